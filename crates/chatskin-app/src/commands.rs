//! Subcommands that print and exit.

use std::fmt::Write as _;

use chatskin_common::Result;
use chatskin_config::{Region, SelectorTable, SkinConfig, BUILT_IN_HOST_VERSIONS, BUILT_IN_THEMES};
use chatskin_enforcer::{generate_stylesheet, GeneratorOptions, UserscriptOptions};

/// The stylesheet a pass would inject.
pub fn css(config: &SkinConfig) -> Result<String> {
    let selectors = config.selector_table()?;
    let options = GeneratorOptions::from_config(config);
    Ok(generate_stylesheet(&config.theme_config(), &selectors, &options))
}

pub fn userscript(config: &SkinConfig, url_match: Option<&str>) -> Result<String> {
    let selectors = config.selector_table()?;
    let mut options = UserscriptOptions::from_config(config);
    if let Some(pattern) = url_match {
        options.url_match = pattern.to_string();
    }
    Ok(chatskin_enforcer::render_userscript(
        &config.theme_config(),
        &selectors,
        &config.overrides,
        &options,
    ))
}

/// One line per built-in theme: name, appearance and background.
pub fn themes(current: &str) -> String {
    let mut out = String::new();
    for name in BUILT_IN_THEMES {
        let mut config = SkinConfig::default();
        config.theme.name = (*name).to_string();
        let marker = if *name == current { "*" } else { " " };
        match chatskin_config::finish(config) {
            Ok(config) => {
                let _ = writeln!(
                    out,
                    "{marker} {name:<14} {:<6} {}",
                    config.theme.appearance.color_scheme(),
                    config.colors.background
                );
            }
            Err(e) => {
                tracing::warn!("built-in theme '{name}' failed to load: {e}");
            }
        }
    }
    out
}

/// Every built-in selector table, region by region.
pub fn selectors(current: &str) -> String {
    let mut out = String::new();
    for version in BUILT_IN_HOST_VERSIONS {
        let Some(table) = SelectorTable::builtin(version) else {
            continue;
        };
        let marker = if *version == current { " (current)" } else { "" };
        let _ = writeln!(out, "[{version}]{marker}");
        for region in Region::ALL {
            let _ = writeln!(out, "  {:<18} {}", region.as_str(), table.get(region));
        }
        out.push('\n');
    }
    out
}
