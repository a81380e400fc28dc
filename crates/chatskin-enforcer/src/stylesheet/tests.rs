use super::*;
use chatskin_config::schema::{Appearance, ColorRole};

fn table(version: &str) -> SelectorTable {
    SelectorTable::builtin(version).unwrap()
}

fn generate_default() -> String {
    generate_stylesheet(
        &ThemeConfig::default(),
        &table("nav-container"),
        &GeneratorOptions::default(),
    )
}

#[test]
fn generation_is_deterministic() {
    assert_eq!(generate_default(), generate_default());
}

#[test]
fn sections_appear_in_order() {
    let css = generate_default();
    let positions: Vec<usize> = ["host variables", "global", "sidebar", "messages", "code", "input"]
        .iter()
        .map(|s| css.find(&format!("/* {s} */")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn root_block_overrides_host_variables() {
    let css = generate_default();
    assert!(css.starts_with("/* host variables */\n:root {\n"));
    assert!(css.contains("--main-dark-color: #FAFAFA !important;"));
    assert!(css.contains("color-scheme: light !important;"));
}

#[test]
fn every_declaration_is_important_by_default() {
    let css = generate_default();
    for line in css.lines().filter(|l| l.starts_with("  ")) {
        assert!(line.ends_with(" !important;"), "{line}");
    }
}

#[test]
fn important_can_be_disabled() {
    let options = GeneratorOptions {
        important: false,
        ..GeneratorOptions::default()
    };
    let css = generate_stylesheet(&ThemeConfig::default(), &table("nav-container"), &options);
    assert!(!css.contains("!important"));
    assert!(css.contains("  color: #111827;"));
}

#[test]
fn palette_values_land_in_their_regions() {
    let css = generate_default();
    assert!(css.contains(
        "[data-element-id=\"nav-container\"] {\n  background-color: #FFFFFF !important;"
    ));
    assert!(css.contains("pre {\n  background-color: #F9FAFB !important;"));
    assert!(css.contains("border: 1px solid #E5E7EB !important;"));
    assert!(css.contains("box-shadow: 0 0 0 2px #D9770620 !important;"));
    assert!(css.contains("margin: 8px 0 !important;"));
}

#[test]
fn pseudo_classes_apply_to_every_alternative() {
    let css = generate_default();
    assert!(css.contains(
        "button[class*=\"send\"]:hover, button[type=\"submit\"]:hover {"
    ));
    assert!(css.contains(
        "button[class*=\"send\"]:disabled, button[type=\"submit\"]:disabled {"
    ));
    assert!(css.contains("textarea:focus, input[type=\"text\"]:focus {"));
    assert!(css.contains("a:hover {"));
}

#[test]
fn marker_class_is_neutralized() {
    let css = generate_default();
    assert!(css.contains(".dark {\n  background-color: #FAFAFA !important;"));

    let options = GeneratorOptions {
        marker_class: "light".into(),
        ..GeneratorOptions::default()
    };
    let css = generate_stylesheet(&ThemeConfig::default(), &table("nav-container"), &options);
    assert!(css.contains(".light {"));
    assert!(!css.contains(".dark {"));
}

#[test]
fn unsafe_marker_class_is_skipped() {
    let options = GeneratorOptions {
        marker_class: "x{}".into(),
        ..GeneratorOptions::default()
    };
    let css = generate_stylesheet(&ThemeConfig::default(), &table("nav-container"), &options);
    assert!(!css.contains(".x{}"));
}

#[test]
fn digit_led_marker_class_is_skipped() {
    let options = GeneratorOptions {
        marker_class: "9dark".into(),
        ..GeneratorOptions::default()
    };
    let css = generate_stylesheet(&ThemeConfig::default(), &table("nav-container"), &options);
    assert!(!css.contains(".9dark"));
}

#[test]
fn rejected_values_are_dropped_not_emitted() {
    let mut theme = ThemeConfig::default();
    theme.colors.sidebar = "red; } body { display: none".into();
    theme.fonts.mono = "url(evil)".into();

    let css = generate_stylesheet(&theme, &table("nav-container"), &GeneratorOptions::default());
    assert!(!css.contains("display: none"));
    assert!(!css.contains("evil"));
    // The sidebar rule survives with its remaining declarations.
    assert!(css.contains(
        "[data-element-id=\"nav-container\"] {\n  border-right: 1px solid #E5E7EB !important;"
    ));
}

#[test]
fn invalid_host_variable_name_is_skipped() {
    let options = GeneratorOptions {
        host_variables: vec![
            HostVariable {
                name: "background".into(),
                role: ColorRole::Background,
            },
            HostVariable {
                name: "--surface-alt".into(),
                role: ColorRole::Surface,
            },
        ],
        ..GeneratorOptions::default()
    };
    let css = generate_stylesheet(&ThemeConfig::default(), &table("nav-container"), &options);
    assert!(!css.contains("  background: #FAFAFA"));
    assert!(css.contains("--surface-alt: #FFFFFF !important;"));
}

#[test]
fn dark_appearance_sets_color_scheme() {
    let theme = ThemeConfig {
        appearance: Appearance::Dark,
        ..ThemeConfig::default()
    };
    let css = generate_stylesheet(&theme, &table("nav-container"), &GeneratorOptions::default());
    assert!(css.contains("color-scheme: dark !important;"));
}

#[test]
fn every_host_version_generates_its_own_selectors() {
    for version in chatskin_config::BUILT_IN_HOST_VERSIONS {
        let selectors = table(version);
        let css = generate_stylesheet(
            &ThemeConfig::default(),
            &selectors,
            &GeneratorOptions::default(),
        );
        for region in Region::ALL {
            assert!(
                css.contains(selectors.get(region)),
                "{version}: {} missing",
                region.as_str()
            );
        }
    }
}

#[test]
fn options_follow_config() {
    let mut config = SkinConfig::default();
    config.theme.appearance = Appearance::Dark;
    config.enforcer.important = false;

    let options = GeneratorOptions::from_config(&config);
    assert!(!options.important);
    assert_eq!(options.marker_class, "light");
    assert_eq!(options.host_variables, config.host_variables);
}
