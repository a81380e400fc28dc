//! Core reload manager implementation.
//!
//! Contains the [`ReloadManager`] struct and its methods for loading,
//! watching, and reloading configuration from disk.

use crate::launch::{self, LaunchOverrides};
use crate::schema::SkinConfig;
use crate::watcher::ConfigWatcher;
use std::path::{Path, PathBuf};
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

/// Manages live config reloading.
///
/// Publishes every successfully reloaded config on a
/// [`tokio::sync::watch`] channel. A reload that fails to parse or
/// validate is logged and the previous config stays current.
pub struct ReloadManager {
    config_path: PathBuf,
    overrides: LaunchOverrides,
}

impl ReloadManager {
    /// Load the initial config from `config_path` and start watching it.
    ///
    /// Falls back to defaults when the initial load fails. The watcher runs
    /// in a background task on the current tokio runtime.
    pub async fn start(config_path: PathBuf) -> (SkinConfig, watch::Receiver<SkinConfig>) {
        Self::start_with(config_path, LaunchOverrides::default()).await
    }

    /// Like [`ReloadManager::start`], re-applying `overrides` on every load.
    pub async fn start_with(
        config_path: PathBuf,
        overrides: LaunchOverrides,
    ) -> (SkinConfig, watch::Receiver<SkinConfig>) {
        let initial_config = match launch::load_with(Some(&config_path), &overrides) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to load config: {e}, using defaults");
                SkinConfig::default()
            }
        };

        let (config_tx, config_rx) = watch::channel(initial_config.clone());
        let theme_file = theme_file(&initial_config);

        tokio::spawn(async move {
            let manager = ReloadManager {
                config_path,
                overrides,
            };
            manager.run_watch_loop(config_tx, theme_file).await;
        });

        (initial_config, config_rx)
    }

    /// Internal watch loop that reloads config on file changes.
    async fn run_watch_loop(&self, config_tx: watch::Sender<SkinConfig>, theme_file: Option<PathBuf>) {
        let mut files = vec![self.config_path.clone()];
        files.extend(theme_file);

        let watcher = match ConfigWatcher::new(files) {
            Ok(w) => w,
            Err(e) => {
                error!("failed to create config watcher: {e}");
                return;
            }
        };

        let (change_tx, mut change_rx) = broadcast::channel::<()>(16);

        tokio::spawn(async move {
            if let Err(e) = watcher.watch(change_tx).await {
                error!("config watcher error: {e}");
            }
        });

        loop {
            match change_rx.recv().await {
                Ok(()) => {
                    info!("reloading config from {}", self.config_path.display());
                    match launch::load_with(Some(&self.config_path), &self.overrides) {
                        Ok(config) => {
                            if config_tx.send(config).is_err() {
                                info!("all config receivers dropped, stopping reload manager");
                                break;
                            }
                        }
                        Err(e) => warn!("config reload rejected, keeping previous config: {e}"),
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("config watcher lagged by {n} events");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    info!("config watcher channel closed");
                    break;
                }
            }
        }
    }
}

/// The theme file to watch alongside the config, if the theme is file-based.
fn theme_file(config: &SkinConfig) -> Option<PathBuf> {
    let name = &config.theme.name;
    let looks_like_path = name.contains('/') || name.ends_with(".yaml") || name.ends_with(".yml");
    looks_like_path.then(|| Path::new(name).to_path_buf())
}
