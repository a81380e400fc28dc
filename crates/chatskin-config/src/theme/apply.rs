//! Theme application and merging.
//!
//! Applies [`ThemeOverrides`] to a [`SkinConfig`], merging only the
//! fields that are present in the theme.

use super::types::ThemeOverrides;
use crate::schema::SkinConfig;

/// Apply theme overrides to a config, merging only the fields that are present.
pub fn apply_theme(config: &mut SkinConfig, theme: &ThemeOverrides) {
    if let Some(appearance) = theme.appearance {
        config.theme.appearance = appearance;
    }

    if let Some(ref colors) = theme.colors {
        config.colors = colors.clone();
    }

    if let Some(ref fonts) = theme.fonts {
        if let Some(ref primary) = fonts.primary {
            config.fonts.primary = primary.clone();
        }
        if let Some(ref mono) = fonts.mono {
            config.fonts.mono = mono.clone();
        }
    }

    if let Some(ref spacing) = theme.spacing {
        if let Some(ref radius) = spacing.border_radius {
            config.spacing.border_radius = radius.clone();
        }
        if let Some(ref padding) = spacing.padding {
            config.spacing.padding = padding.clone();
        }
        if let Some(ref margin) = spacing.margin {
            config.spacing.margin = margin.clone();
        }
    }
}
