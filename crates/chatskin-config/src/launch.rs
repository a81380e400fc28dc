//! Values forced over the config file at launch, such as command-line flags.
//!
//! They are applied before the theme is resolved, so `--theme` selects the
//! palette exactly as `[theme] name` would, and they survive live reloads.

use crate::schema::SkinConfig;
use crate::toml_loader;
use chatskin_common::ConfigError;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOverrides {
    pub theme: Option<String>,
    pub host_version: Option<String>,
    pub url: Option<String>,
}

impl LaunchOverrides {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.host_version.is_none() && self.url.is_none()
    }

    pub fn apply(&self, config: &mut SkinConfig) {
        if let Some(theme) = &self.theme {
            config.theme.name = theme.clone();
        }
        if let Some(version) = &self.host_version {
            config.host.version = version.clone();
        }
        if let Some(url) = &self.url {
            config.webview.url = url.clone();
        }
    }
}

/// Load from `path` (or the platform default), apply `overrides`, then
/// resolve the theme and validate.
pub fn load_with(path: Option<&Path>, overrides: &LaunchOverrides) -> Result<SkinConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    overrides.apply(&mut config);
    crate::finish(config)
}
