//! Configuration schema types for chatskin.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults of the `claude-light` theme.

mod enforcer;
mod host;
mod system;
mod theme;

pub use enforcer::*;
pub use host::*;
pub use system::*;
pub use theme::*;

use chatskin_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::selectors::SelectorTable;

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for chatskin.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinConfig {
    pub theme: ThemeSection,
    pub colors: ColorConfig,
    pub fonts: FontConfig,
    pub spacing: SpacingConfig,
    pub host: HostConfig,
    pub enforcer: EnforcerConfig,
    pub overrides: Vec<InlineOverride>,
    pub host_variables: Vec<HostVariable>,
    pub webview: WebViewSection,
    pub logging: LoggingConfig,
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            theme: ThemeSection::default(),
            colors: ColorConfig::default(),
            fonts: FontConfig::default(),
            spacing: SpacingConfig::default(),
            host: HostConfig::default(),
            enforcer: EnforcerConfig::default(),
            overrides: default_overrides(),
            host_variables: default_host_variables(),
            webview: WebViewSection::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SkinConfig {
    /// The visual part of the config, as consumed by the generator.
    pub fn theme_config(&self) -> ThemeConfig {
        ThemeConfig {
            appearance: self.theme.appearance,
            colors: self.colors.clone(),
            fonts: self.fonts.clone(),
            spacing: self.spacing.clone(),
        }
    }

    /// Resolve the host version's selector table with per-region overrides.
    pub fn selector_table(&self) -> Result<SelectorTable, ConfigError> {
        let base = SelectorTable::builtin(&self.host.version).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "unknown host version '{}'",
                self.host.version
            ))
        })?;
        base.with_overrides(&self.host.selectors)
    }

    /// The marker class stripped on every pass.
    pub fn marker_class(&self) -> &str {
        self.host
            .marker_class
            .as_deref()
            .unwrap_or_else(|| self.theme.appearance.marker_class())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::Region;

    #[test]
    fn default_config_has_correct_theme() {
        let config = SkinConfig::default();
        assert_eq!(config.theme.name, "claude-light");
        assert_eq!(config.theme.appearance, Appearance::Light);
    }

    #[test]
    fn default_config_has_correct_colors() {
        let config = SkinConfig::default();
        assert_eq!(config.colors.background, "#FAFAFA");
        assert_eq!(config.colors.text, "#111827");
        assert_eq!(config.colors.accent, "#D97706");
        assert_eq!(config.colors.user_message, "#F0F9FF");
        assert_eq!(config.colors.assistant_message, "#FFFFFF");
    }

    #[test]
    fn default_marker_follows_appearance() {
        let mut config = SkinConfig::default();
        assert_eq!(config.marker_class(), "dark");

        config.theme.appearance = Appearance::Dark;
        assert_eq!(config.marker_class(), "light");

        config.host.marker_class = Some("theme-night".into());
        assert_eq!(config.marker_class(), "theme-night");
    }

    #[test]
    fn theme_config_copies_visual_sections() {
        let mut config = SkinConfig::default();
        config.spacing.border_radius = "4px".into();
        config.theme.appearance = Appearance::Dark;

        let theme = config.theme_config();
        assert_eq!(theme.spacing.border_radius, "4px");
        assert_eq!(theme.appearance, Appearance::Dark);
        assert_eq!(theme.colors, config.colors);
    }

    #[test]
    fn selector_table_resolves_version_and_overrides() {
        let mut config = SkinConfig::default();
        config
            .host
            .selectors
            .insert(Region::Sidebar, "aside#left".into());

        let table = config.selector_table().unwrap();
        assert_eq!(table.version(), "nav-container");
        assert_eq!(table.get(Region::Sidebar), "aside#left");
        assert_eq!(table.get(Region::CodeBlock), "pre");
    }

    #[test]
    fn unknown_host_version_is_an_error() {
        let mut config = SkinConfig::default();
        config.host.version = "2019-redesign".into();
        assert!(config.selector_table().is_err());
    }

    #[test]
    fn partial_toml_keeps_default_lists() {
        let config: SkinConfig = toml::from_str(
            r##"
[colors]
background = "#000000"
"##,
        )
        .unwrap();
        assert_eq!(config.colors.background, "#000000");
        assert_eq!(config.overrides, default_overrides());
        assert_eq!(config.host_variables, default_host_variables());
    }

    #[test]
    fn explicit_override_list_replaces_defaults() {
        let config: SkinConfig = toml::from_str(
            r#"
[[overrides]]
region = "input_field"
property = "background-color"
role = "surface"
"#,
        )
        .unwrap();
        assert_eq!(config.overrides.len(), 1);
        assert_eq!(config.overrides[0].region, Region::InputField);
    }
}
