//! Theme, palette, typography and spacing configuration types.

use serde::{Deserialize, Serialize};

/// Which appearance the theme forces on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl Appearance {
    /// The host marker class that contradicts this appearance and gets
    /// stripped from the root and body on every pass.
    pub fn marker_class(self) -> &'static str {
        match self {
            Appearance::Light => "dark",
            Appearance::Dark => "light",
        }
    }

    /// Value for the CSS `color-scheme` property.
    pub fn color_scheme(self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
        }
    }
}

/// Theme selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSection {
    /// Built-in theme name or path to a custom theme YAML.
    pub name: String,
    pub appearance: Appearance,
}

impl Default for ThemeSection {
    fn default() -> Self {
        Self {
            name: "claude-light".into(),
            appearance: Appearance::Light,
        }
    }
}

/// Semantic color roles. Every role is a field of [`ColorConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    Primary,
    Secondary,
    Background,
    Sidebar,
    Surface,
    Text,
    TextSecondary,
    Border,
    Hover,
    UserMessage,
    AssistantMessage,
    CodeBackground,
    CodeBorder,
    Accent,
    AccentHover,
    AccentSoft,
    OnAccent,
    FocusRing,
}

impl ColorRole {
    pub const ALL: [ColorRole; 18] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Background,
        ColorRole::Sidebar,
        ColorRole::Surface,
        ColorRole::Text,
        ColorRole::TextSecondary,
        ColorRole::Border,
        ColorRole::Hover,
        ColorRole::UserMessage,
        ColorRole::AssistantMessage,
        ColorRole::CodeBackground,
        ColorRole::CodeBorder,
        ColorRole::Accent,
        ColorRole::AccentHover,
        ColorRole::AccentSoft,
        ColorRole::OnAccent,
        ColorRole::FocusRing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Background => "background",
            ColorRole::Sidebar => "sidebar",
            ColorRole::Surface => "surface",
            ColorRole::Text => "text",
            ColorRole::TextSecondary => "text_secondary",
            ColorRole::Border => "border",
            ColorRole::Hover => "hover",
            ColorRole::UserMessage => "user_message",
            ColorRole::AssistantMessage => "assistant_message",
            ColorRole::CodeBackground => "code_background",
            ColorRole::CodeBorder => "code_border",
            ColorRole::Accent => "accent",
            ColorRole::AccentHover => "accent_hover",
            ColorRole::AccentSoft => "accent_soft",
            ColorRole::OnAccent => "on_accent",
            ColorRole::FocusRing => "focus_ring",
        }
    }
}

/// Color palette configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub sidebar: String,
    pub surface: String,
    pub text: String,
    pub text_secondary: String,
    pub border: String,
    pub hover: String,
    pub user_message: String,
    pub assistant_message: String,
    pub code_background: String,
    pub code_border: String,
    pub accent: String,
    pub accent_hover: String,
    pub accent_soft: String,
    pub on_accent: String,
    pub focus_ring: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#D97706".into(),
            secondary: "#F59E0B".into(),
            background: "#FAFAFA".into(),
            sidebar: "#FFFFFF".into(),
            surface: "#FFFFFF".into(),
            text: "#111827".into(),
            text_secondary: "#6B7280".into(),
            border: "#E5E7EB".into(),
            hover: "#F3F4F6".into(),
            user_message: "#F0F9FF".into(),
            assistant_message: "#FFFFFF".into(),
            code_background: "#F9FAFB".into(),
            code_border: "#E5E7EB".into(),
            accent: "#D97706".into(),
            accent_hover: "#B45309".into(),
            accent_soft: "#FED7AA".into(),
            on_accent: "#FFFFFF".into(),
            focus_ring: "#D9770620".into(),
        }
    }
}

impl ColorConfig {
    /// Look up the value assigned to a role.
    pub fn get(&self, role: ColorRole) -> &str {
        match role {
            ColorRole::Primary => &self.primary,
            ColorRole::Secondary => &self.secondary,
            ColorRole::Background => &self.background,
            ColorRole::Sidebar => &self.sidebar,
            ColorRole::Surface => &self.surface,
            ColorRole::Text => &self.text,
            ColorRole::TextSecondary => &self.text_secondary,
            ColorRole::Border => &self.border,
            ColorRole::Hover => &self.hover,
            ColorRole::UserMessage => &self.user_message,
            ColorRole::AssistantMessage => &self.assistant_message,
            ColorRole::CodeBackground => &self.code_background,
            ColorRole::CodeBorder => &self.code_border,
            ColorRole::Accent => &self.accent,
            ColorRole::AccentHover => &self.accent_hover,
            ColorRole::AccentSoft => &self.accent_soft,
            ColorRole::OnAccent => &self.on_accent,
            ColorRole::FocusRing => &self.focus_ring,
        }
    }
}

/// Font stacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// UI text.
    pub primary: String,
    /// Code blocks and inline code.
    pub mono: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            primary: r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif"#
                .into(),
            mono: r#"ui-monospace, SFMono-Regular, "SF Mono", Menlo, Monaco, Consolas, monospace"#
                .into(),
        }
    }
}

/// Lengths shared by every region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    pub border_radius: String,
    pub padding: String,
    pub margin: String,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            border_radius: "8px".into(),
            padding: "12px".into(),
            margin: "8px".into(),
        }
    }
}

/// The complete visual configuration consumed by the stylesheet generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub appearance: Appearance,
    pub colors: ColorConfig,
    pub fonts: FontConfig,
    pub spacing: SpacingConfig,
}
