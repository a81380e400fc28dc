//! Palette, font and spacing validation.

use tracing::warn;

use super::helpers::push_err;
use crate::colors::parse_color;
use crate::sanitize::{validate_css_color, validate_css_font_family, validate_css_length};
use crate::schema::{Appearance, ColorRole, SkinConfig};

pub(crate) fn validate_colors(errors: &mut Vec<String>, config: &SkinConfig) {
    for role in ColorRole::ALL {
        let name = format!("colors.{}", role.as_str());
        push_err(errors, &name, validate_css_color(config.colors.get(role)));
    }
}

pub(crate) fn validate_fonts(errors: &mut Vec<String>, config: &SkinConfig) {
    push_err(errors, "fonts.primary", validate_css_font_family(&config.fonts.primary));
    push_err(errors, "fonts.mono", validate_css_font_family(&config.fonts.mono));
}

pub(crate) fn validate_spacing(errors: &mut Vec<String>, config: &SkinConfig) {
    let s = &config.spacing;
    push_err(errors, "spacing.border_radius", validate_css_length(&s.border_radius));
    push_err(errors, "spacing.padding", validate_css_length(&s.padding));
    push_err(errors, "spacing.margin", validate_css_length(&s.margin));
}

/// Warn when the background contradicts the requested appearance. Not an
/// error: a dim "light" theme is a legitimate choice.
pub(crate) fn check_appearance(config: &SkinConfig) {
    let Ok(bg) = parse_color(&config.colors.background) else {
        return;
    };
    let bright = bg.luminance() > 0.4;
    match (config.theme.appearance, bright) {
        (Appearance::Light, false) => warn!(
            background = %config.colors.background,
            "light appearance with a dark background"
        ),
        (Appearance::Dark, true) => warn!(
            background = %config.colors.background,
            "dark appearance with a light background"
        ),
        _ => {}
    }
}
