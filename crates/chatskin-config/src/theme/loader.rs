//! Theme file resolution and loading.
//!
//! Built-in themes are compiled into the binary. Anything else is resolved
//! to a YAML file and parsed into [`ThemeOverrides`].

use super::types::ThemeOverrides;
use chatskin_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

const CLAUDE_DARK_YAML: &str = include_str!("../../resources/themes/claude-dark.yaml");
const SEPIA_YAML: &str = include_str!("../../resources/themes/sepia.yaml");

/// Source of a built-in theme, if `name` is one.
fn builtin_source(name: &str) -> Option<&'static str> {
    match name {
        "claude-dark" => Some(CLAUDE_DARK_YAML),
        "sepia" => Some(SEPIA_YAML),
        _ => None,
    }
}

/// Resolve the filesystem path for a user theme.
///
/// If the name looks like a file path (contains `/` or ends in
/// `.yaml`/`.yml`), it is used directly; otherwise it is looked up in
/// `<config dir>/chatskin/themes/`.
fn resolve_theme_path(name: &str) -> Result<PathBuf, ConfigError> {
    if name.contains('/') || name.ends_with(".yaml") || name.ends_with(".yml") {
        let path = PathBuf::from(name);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(path));
    }

    let local_path = PathBuf::from("themes").join(format!("{name}.yaml"));
    if local_path.exists() {
        return Ok(local_path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_theme = config_dir
            .join("chatskin")
            .join("themes")
            .join(format!("{name}.yaml"));
        if config_theme.exists() {
            return Ok(config_theme);
        }
    }

    Err(ConfigError::FileNotFound(PathBuf::from(format!(
        "theme '{name}' not found in any search path"
    ))))
}

/// Load a theme by name.
///
/// The special name "claude-light" always succeeds with empty overrides,
/// since it is the default palette.
pub fn load_theme(name: &str) -> Result<ThemeOverrides, ConfigError> {
    if name == "claude-light" {
        return Ok(ThemeOverrides {
            name: Some("claude-light".into()),
            ..Default::default()
        });
    }

    if let Some(source) = builtin_source(name) {
        return parse_theme(source, name);
    }

    let path = resolve_theme_path(name)?;
    load_theme_from_path(&path)
}

/// Load a theme from a specific filesystem path.
pub fn load_theme_from_path(path: &Path) -> Result<ThemeOverrides, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read theme file {}: {e}", path.display()))
    })?;

    let theme = parse_theme(&content, &path.display().to_string())?;
    info!("loaded theme from {}", path.display());
    Ok(theme)
}

fn parse_theme(source: &str, origin: &str) -> Result<ThemeOverrides, ConfigError> {
    serde_yaml::from_str(source)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse theme YAML {origin}: {e}")))
}
