//! Tests for TOML config loading.

use super::*;
use crate::schema::{Appearance, SkinConfig};
use crate::selectors::Region;
use chatskin_common::ConfigError;

#[test]
fn default_template_parses_to_default_config() {
    let parsed: SkinConfig = toml::from_str(&template::default_config_toml()).unwrap();
    let default = SkinConfig::default();
    assert_eq!(parsed.theme.name, default.theme.name);
    assert_eq!(parsed.colors, default.colors);
    assert_eq!(parsed.host.version, default.host.version);
    assert_eq!(parsed.overrides, default.overrides);
}

#[test]
fn load_from_missing_path_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_path(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn load_partial_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[theme]
appearance = "dark"

[host]
version = "data-testid"

[host.selectors]
send_button = "button.submit"

[enforcer]
tick_interval_ms = 500
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.theme.appearance, Appearance::Dark);
    assert_eq!(config.host.version, "data-testid");
    assert_eq!(config.host.selectors[&Region::SendButton], "button.submit");
    assert_eq!(config.enforcer.tick_interval_ms, 500);
    assert_eq!(config.enforcer.deferred_retry_ms, 1000);
}

#[test]
fn malformed_toml_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[colors\nbackground = ").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn invalid_values_still_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[colors]\ntext = \"chartreuse\"\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.colors.text, "chartreuse");
}

#[test]
fn create_default_config_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    create_default_config(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("# chatskin configuration"));
    assert!(load_from_path(&path).is_ok());
}

#[test]
fn default_path_ends_with_app_dir() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("chatskin/config.toml"));
    }
}
