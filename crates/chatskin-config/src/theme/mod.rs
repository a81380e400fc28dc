//! Theme loading and merging.
//!
//! Themes are YAML files that override the palette, fonts, spacing and
//! appearance. The built-in ones are embedded; user themes live in
//! `<config dir>/chatskin/themes/`.

mod apply;
mod loader;
mod types;

pub use apply::apply_theme;
pub use loader::{load_theme, load_theme_from_path};
pub use types::{ThemeFontOverrides, ThemeOverrides, ThemeSpacingOverrides, BUILT_IN_THEMES};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Appearance, ColorConfig, SkinConfig};
    use crate::validation;

    #[test]
    fn load_claude_light_returns_default() {
        let theme = load_theme("claude-light").unwrap();
        assert_eq!(theme.name, Some("claude-light".into()));
        assert!(theme.colors.is_none());
    }

    #[test]
    fn built_in_themes_list_has_expected_entries() {
        assert!(BUILT_IN_THEMES.contains(&"claude-light"));
        assert!(BUILT_IN_THEMES.contains(&"claude-dark"));
        assert!(BUILT_IN_THEMES.contains(&"sepia"));
        assert_eq!(BUILT_IN_THEMES.len(), 3);
    }

    #[test]
    fn every_built_in_theme_loads_and_validates() {
        for name in BUILT_IN_THEMES {
            let theme = load_theme(name).unwrap();
            let mut config = SkinConfig::default();
            apply_theme(&mut config, &theme);
            assert!(
                validation::validate(&config).is_ok(),
                "theme {name} produced an invalid config"
            );
        }
    }

    #[test]
    fn claude_dark_switches_appearance() {
        let theme = load_theme("claude-dark").unwrap();
        let mut config = SkinConfig::default();
        apply_theme(&mut config, &theme);

        assert_eq!(config.theme.appearance, Appearance::Dark);
        assert_eq!(config.colors.background, "#1F1E1D");
        assert_eq!(config.marker_class(), "light");
    }

    #[test]
    fn sepia_overrides_fonts_partially() {
        let theme = load_theme("sepia").unwrap();
        let mut config = SkinConfig::default();
        let original_mono = config.fonts.mono.clone();
        apply_theme(&mut config, &theme);

        assert!(config.fonts.primary.starts_with("Georgia"));
        assert_eq!(config.fonts.mono, original_mono);
        assert_eq!(config.spacing.border_radius, "6px");
        assert_eq!(config.spacing.padding, "12px");
    }

    #[test]
    fn apply_theme_with_color_overrides() {
        let mut config = SkinConfig::default();
        let theme = ThemeOverrides {
            colors: Some(ColorConfig {
                accent: "#ff0000".into(),
                ..Default::default()
            }),
            ..Default::default()
        };

        apply_theme(&mut config, &theme);
        assert_eq!(config.colors.accent, "#ff0000");
        assert_eq!(config.colors.text, "#111827");
    }

    #[test]
    fn apply_empty_theme_changes_nothing() {
        let original = SkinConfig::default();
        let mut config = SkinConfig::default();

        apply_theme(&mut config, &ThemeOverrides::default());
        assert_eq!(config.colors, original.colors);
        assert_eq!(config.fonts, original.fonts);
        assert_eq!(config.spacing, original.spacing);
        assert_eq!(config.theme.appearance, original.theme.appearance);
    }

    #[test]
    fn load_theme_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test-theme.yaml");
        std::fs::write(
            &path,
            r##"
name: test-theme
appearance: dark
colors:
  background: "#111111"
fonts:
  mono: "Fira Code"
"##,
        )
        .unwrap();

        let theme = load_theme_from_path(&path).unwrap();
        assert_eq!(theme.name, Some("test-theme".into()));
        assert_eq!(theme.appearance, Some(Appearance::Dark));
        assert_eq!(theme.colors.as_ref().unwrap().background, "#111111");
        assert_eq!(
            theme.fonts.as_ref().unwrap().mono,
            Some("Fira Code".into())
        );

        // A path-like name resolves directly.
        let by_name = load_theme(path.to_str().unwrap()).unwrap();
        assert_eq!(by_name.name, Some("test-theme".into()));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "colors: [not, a, table").unwrap();

        let err = load_theme_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse theme YAML"));
    }

    #[test]
    fn nonexistent_theme_returns_error() {
        let result = load_theme("definitely-not-a-real-theme-name");
        assert!(result.is_err());
    }
}
