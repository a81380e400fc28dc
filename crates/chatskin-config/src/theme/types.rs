//! Theme type definitions and constants.
//!
//! Contains the override structs used to partially replace config values
//! when a theme is applied, plus the list of built-in theme names.

use crate::schema::{Appearance, ColorConfig};
use serde::{Deserialize, Serialize};

/// Built-in theme names.
pub const BUILT_IN_THEMES: &[&str] = &["claude-light", "claude-dark", "sepia"];

/// Theme override structure.
///
/// All fields are optional; only present fields override the base config.
/// A present `colors` table replaces the whole palette (missing roles fall
/// back to the `claude-light` values).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub name: Option<String>,
    pub appearance: Option<Appearance>,
    pub colors: Option<ColorConfig>,
    pub fonts: Option<ThemeFontOverrides>,
    pub spacing: Option<ThemeSpacingOverrides>,
}

/// Optional font overrides in a theme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeFontOverrides {
    pub primary: Option<String>,
    pub mono: Option<String>,
}

/// Optional spacing overrides in a theme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSpacingOverrides {
    pub border_radius: Option<String>,
    pub padding: Option<String>,
    pub margin: Option<String>,
}
