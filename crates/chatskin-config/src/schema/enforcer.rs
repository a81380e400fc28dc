//! Reassertion loop timing and the high-priority override lists.

use serde::{Deserialize, Serialize};

use super::theme::ColorRole;
use crate::selectors::Region;

/// Timing of the reassertion loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnforcerConfig {
    /// Period of the redundancy timer. 100-10000.
    pub tick_interval_ms: u64,
    /// Delay of the one-shot retry after the initial pass. 0-30000.
    pub deferred_retry_ms: u64,
    /// Window in which mutation records coalesce into one pass. 0-2000.
    pub mutation_debounce_ms: u64,
    /// Append `!important` to every generated declaration.
    pub important: bool,
}

impl Default for EnforcerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            deferred_retry_ms: 1000,
            mutation_debounce_ms: 50,
            important: true,
        }
    }
}

/// An inline style pushed onto every element of a region on each pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineOverride {
    pub region: Region,
    pub property: String,
    pub role: ColorRole,
}

impl InlineOverride {
    pub fn new(region: Region, property: impl Into<String>, role: ColorRole) -> Self {
        Self {
            region,
            property: property.into(),
            role,
        }
    }
}

/// A host CSS custom property forced to a palette role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostVariable {
    pub name: String,
    pub role: ColorRole,
}

pub fn default_overrides() -> Vec<InlineOverride> {
    vec![
        InlineOverride::new(Region::Body, "background-color", ColorRole::Background),
        InlineOverride::new(Region::Sidebar, "background-color", ColorRole::Sidebar),
        InlineOverride::new(Region::MainContent, "background-color", ColorRole::Background),
    ]
}

pub fn default_host_variables() -> Vec<HostVariable> {
    vec![HostVariable {
        name: "--main-dark-color".into(),
        role: ColorRole::Background,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing() {
        let config = EnforcerConfig::default();
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.deferred_retry_ms, 1000);
        assert_eq!(config.mutation_debounce_ms, 50);
        assert!(config.important);
    }

    #[test]
    fn default_overrides_cover_background_regions() {
        let overrides = default_overrides();
        assert_eq!(overrides.len(), 3);
        assert!(overrides
            .iter()
            .all(|o| o.property == "background-color"));
        assert!(overrides
            .iter()
            .any(|o| o.region == Region::Sidebar && o.role == ColorRole::Sidebar));
    }

    #[test]
    fn override_deserializes_from_toml() {
        let o: InlineOverride = toml::from_str(
            r#"
region = "user_message"
property = "color"
role = "text"
"#,
        )
        .unwrap();
        assert_eq!(o, InlineOverride::new(Region::UserMessage, "color", ColorRole::Text));
    }
}
