//! Host markup and reserved identifier validation.

use super::helpers::push_err;
use crate::sanitize::validate_identifier;
use crate::schema::SkinConfig;

pub(crate) fn validate_host(errors: &mut Vec<String>, config: &SkinConfig) {
    let h = &config.host;

    push_err(errors, "host.style_id", validate_identifier(&h.style_id));
    if let Some(ref marker) = h.marker_class {
        push_err(errors, "host.marker_class", validate_identifier(marker));
    }

    // Covers both an unknown version and unsafe per-region overrides.
    if let Err(e) = config.selector_table() {
        errors.push(e.to_string());
    }

    if h.url_match.trim().is_empty()
        || h.url_match.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'')
    {
        errors.push(format!("host.url_match is not a valid match pattern: '{}'", h.url_match));
    }
}

pub(crate) fn validate_webview(errors: &mut Vec<String>, config: &SkinConfig) {
    let w = &config.webview;
    if !(w.url.starts_with("https://") || w.url.starts_with("http://")) {
        errors.push(format!("webview.url must be http(s): '{}'", w.url));
    }
    super::helpers::validate_range(errors, "webview.width", w.width as u64, 320, 7680);
    super::helpers::validate_range(errors, "webview.height", w.height as u64, 240, 4320);
}
