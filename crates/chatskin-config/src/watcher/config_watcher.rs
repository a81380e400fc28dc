//! Core config file watcher implementation.
//!
//! Contains the [`ConfigWatcher`] struct that monitors the config file and
//! any file-based theme for changes, with debounced notifications.

use chatskin_common::ConfigError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

/// Quiet period after the last change before a reload is signalled.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches a set of files and sends a signal when any of them changes.
pub struct ConfigWatcher {
    files: Vec<PathBuf>,
    debounce: Duration,
}

impl ConfigWatcher {
    /// Create a watcher for the given files.
    pub fn new(files: Vec<PathBuf>) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Err(ConfigError::WatchError("no files to watch".into()));
        }

        for path in &files {
            if !path.exists() {
                warn!(
                    "{} does not exist yet, will watch for creation",
                    path.display()
                );
            }
        }

        Ok(Self {
            files,
            debounce: DEFAULT_DEBOUNCE,
        })
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// File names matched against backend events. Backends may report
    /// canonicalized paths, so only the name is compared.
    fn file_names(&self) -> BTreeSet<OsString> {
        self.files
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_os_string()))
            .collect()
    }

    /// Directories to register with the backend. Watching the parent keeps
    /// working across atomic saves that replace the file inode.
    fn watch_dirs(&self) -> BTreeSet<PathBuf> {
        self.files
            .iter()
            .map(|p| match p.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            })
            .collect()
    }

    /// Watch the files, sending `()` on `tx` once per debounced burst of
    /// changes. Runs until the backend shuts down.
    pub async fn watch(&self, tx: broadcast::Sender<()>) -> Result<(), ConfigError> {
        let (raw_tx, mut raw_rx) = mpsc::channel::<()>(16);
        let names = self.file_names();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        return;
                    }
                    let relevant = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().is_some_and(|n| names.contains(n)));
                    if relevant {
                        debug!(paths = ?event.paths, "watched file changed");
                        let _ = raw_tx.try_send(());
                    }
                }
                Err(e) => error!("file watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

        for dir in self.watch_dirs() {
            watcher
                .watch(&dir, RecursiveMode::NonRecursive)
                .map_err(|e| {
                    ConfigError::WatchError(format!("failed to watch {}: {e}", dir.display()))
                })?;
            info!("watching {} for config changes", dir.display());
        }

        while raw_rx.recv().await.is_some() {
            // Coalesce everything that arrives before the window closes.
            let window = tokio::time::sleep(self.debounce);
            tokio::pin!(window);
            loop {
                tokio::select! {
                    _ = &mut window => break,
                    more = raw_rx.recv() => {
                        if more.is_none() {
                            return Ok(());
                        }
                    }
                }
            }

            info!("config changed, sending reload signal");
            if tx.send(()).is_err() {
                debug!("no receivers for config reload signal");
            }
        }

        drop(watcher);
        Ok(())
    }
}
