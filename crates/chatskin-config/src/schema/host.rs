//! Host page configuration: which markup version to target and the
//! identifiers this tool reserves inside the page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::selectors::Region;

/// Identifier of the injected `<style>` node.
pub const DEFAULT_STYLE_ID: &str = "chatskin-theme";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Built-in selector table version (see `BUILT_IN_HOST_VERSIONS`).
    pub version: String,
    /// Per-region selector replacements layered over the version's table.
    pub selectors: BTreeMap<Region, String>,
    /// Id of the style node owned by the enforcer.
    pub style_id: String,
    /// Marker class to strip. Defaults to the one contradicting the
    /// configured appearance.
    pub marker_class: Option<String>,
    /// URL pattern used in the exported userscript header.
    pub url_match: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            version: "nav-container".into(),
            selectors: BTreeMap::new(),
            style_id: DEFAULT_STYLE_ID.into(),
            marker_class: None,
            url_match: "https://claude.ai/*".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = HostConfig::default();
        assert_eq!(config.version, "nav-container");
        assert_eq!(config.style_id, "chatskin-theme");
        assert!(config.selectors.is_empty());
        assert!(config.marker_class.is_none());
    }

    #[test]
    fn selector_overrides_deserialize_by_region_name() {
        let config: HostConfig = toml::from_str(
            r#"
version = "data-testid"

[selectors]
sidebar = "aside.left"
send_button = "button.go"
"#,
        )
        .unwrap();
        assert_eq!(config.version, "data-testid");
        assert_eq!(config.selectors[&Region::Sidebar], "aside.left");
        assert_eq!(config.selectors[&Region::SendButton], "button.go");
    }

    #[test]
    fn unknown_region_is_rejected() {
        let result: Result<HostConfig, _> = toml::from_str(
            r#"
[selectors]
footer = "footer"
"#,
        );
        assert!(result.is_err());
    }
}
