//! Tests for config validation.

use super::*;
use crate::schema::{HostVariable, InlineOverride, ColorRole};
use crate::selectors::Region;

#[test]
fn default_config_is_valid() {
    assert!(validate(&SkinConfig::default()).is_ok());
}

#[test]
fn invalid_color_is_reported_with_role_name() {
    let mut config = SkinConfig::default();
    config.colors.sidebar = "white".into();

    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("colors.sidebar"));
}

#[test]
fn injected_font_is_rejected() {
    let mut config = SkinConfig::default();
    config.fonts.mono = "Menlo; } body { display: none".into();

    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("fonts.mono"));
}

#[test]
fn invalid_spacing_is_rejected() {
    let mut config = SkinConfig::default();
    config.spacing.padding = "lots".into();
    assert!(validate(&config).is_err());
}

#[test]
fn errors_are_collected_not_short_circuited() {
    let mut config = SkinConfig::default();
    config.colors.text = "nope".into();
    config.spacing.margin = "nope".into();
    config.enforcer.tick_interval_ms = 5;

    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("colors.text"));
    assert!(err.contains("spacing.margin"));
    assert!(err.contains("enforcer.tick_interval_ms"));
}

#[test]
fn timing_ranges() {
    let mut config = SkinConfig::default();
    config.enforcer.tick_interval_ms = 100;
    config.enforcer.deferred_retry_ms = 0;
    config.enforcer.mutation_debounce_ms = 0;
    assert!(validate(&config).is_ok());

    config.enforcer.mutation_debounce_ms = 5_000;
    assert!(validate(&config).is_err());
}

#[test]
fn unknown_host_version_is_rejected() {
    let mut config = SkinConfig::default();
    config.host.version = "v0".into();

    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("unknown host version"));
}

#[test]
fn unsafe_selector_override_is_rejected() {
    let mut config = SkinConfig::default();
    config
        .host
        .selectors
        .insert(Region::CodeBlock, "pre { color: red".into());
    assert!(validate(&config).is_err());
}

#[test]
fn reserved_identifiers_must_be_tokens() {
    let mut config = SkinConfig::default();
    config.host.style_id = "my style".into();
    assert!(validate(&config).is_err());

    let mut config = SkinConfig::default();
    config.host.marker_class = Some("dark\"".into());
    assert!(validate(&config).is_err());
}

#[test]
fn reserved_identifiers_cannot_start_with_a_digit() {
    let mut config = SkinConfig::default();
    config.host.style_id = "1theme".into();
    assert!(validate(&config).is_err());

    let mut config = SkinConfig::default();
    config.host.marker_class = Some("9dark".into());
    assert!(validate(&config).is_err());
}

#[test]
fn override_properties_are_checked() {
    let mut config = SkinConfig::default();
    config.overrides.push(InlineOverride::new(
        Region::Sidebar,
        "background-color: red; x",
        ColorRole::Sidebar,
    ));
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("overrides[3].property"));
}

#[test]
fn host_variables_need_custom_property_names() {
    let mut config = SkinConfig::default();
    config.host_variables.push(HostVariable {
        name: "background".into(),
        role: ColorRole::Background,
    });
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("host_variables[1].name"));
}

#[test]
fn webview_url_must_be_http() {
    let mut config = SkinConfig::default();
    config.webview.url = "file:///etc/passwd".into();
    assert!(validate(&config).is_err());
}
