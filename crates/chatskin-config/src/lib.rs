//! chatskin configuration system.
//!
//! Provides TOML-based configuration with YAML themes, per-host-version
//! selector tables, CSS value sanitization, live reload and full
//! validation. All config sections use defaults so partial configs work
//! out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatskin_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod colors;
pub mod launch;
pub mod reload;
pub mod sanitize;
pub mod schema;
pub mod selectors;
pub mod theme;
pub mod toml_loader;
pub mod validation;
pub mod watcher;

pub use launch::{load_with, LaunchOverrides};
pub use reload::ReloadManager;
pub use schema::{SkinConfig, CONFIG_SCHEMA_VERSION};
pub use selectors::{Region, SelectorTable, BUILT_IN_HOST_VERSIONS};
pub use theme::{ThemeOverrides, BUILT_IN_THEMES};
pub use watcher::ConfigWatcher;

use chatskin_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, applies the selected theme, and validates the result.
pub fn load_config() -> Result<SkinConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    finish(config)
}

/// Load config from an explicit path, apply its theme and validate.
pub fn load_config_from(path: &Path) -> Result<SkinConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    finish(config)
}

/// Apply the selected theme over `config` and validate the result.
pub fn finish(mut config: SkinConfig) -> Result<SkinConfig, ConfigError> {
    if config.theme.name != "claude-light" {
        match theme::load_theme(&config.theme.name) {
            Ok(overrides) => theme::apply_theme(&mut config, &overrides),
            Err(e) => {
                tracing::warn!("failed to load theme '{}': {e}", config.theme.name);
            }
        }
    }

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &SkinConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&SkinConfig::default());
        for section in [
            "\"theme\"",
            "\"colors\"",
            "\"fonts\"",
            "\"spacing\"",
            "\"host\"",
            "\"enforcer\"",
            "\"overrides\"",
            "\"host_variables\"",
            "\"webview\"",
            "\"logging\"",
        ] {
            assert!(json.contains(section), "missing {section}");
        }
        assert!(json.contains("\"claude-light\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = config_to_json(&SkinConfig::default());
        let parsed: SkinConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.theme.name, "claude-light");
        assert_eq!(parsed.colors.accent, "#D97706");
        assert_eq!(parsed.overrides.len(), 3);
    }

    #[test]
    fn finish_applies_dark_theme() {
        let mut config = SkinConfig::default();
        config.theme.name = "claude-dark".into();
        let config = finish(config).unwrap();
        assert_eq!(config.colors.background, "#1F1E1D");
        assert_eq!(config.marker_class(), "light");
    }

    #[test]
    fn finish_keeps_config_when_theme_missing() {
        let mut config = SkinConfig::default();
        config.theme.name = "no-such-theme".into();
        let config = finish(config).unwrap();
        assert_eq!(config.colors.background, "#FAFAFA");
    }

    #[test]
    fn finish_rejects_invalid_values() {
        let mut config = SkinConfig::default();
        config.colors.accent = "url(javascript:alert(1))".into();
        assert!(finish(config).is_err());
    }
}
