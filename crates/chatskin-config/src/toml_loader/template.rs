//! Default config file content.

/// Generate the default TOML config content with comments.
pub(super) fn default_config_toml() -> String {
    r##"# chatskin configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[theme]
name = "claude-light"      # claude-light, claude-dark, sepia, or a YAML path
# appearance = "light"     # light | dark

[colors]
# background = "#FAFAFA"
# sidebar = "#FFFFFF"
# surface = "#FFFFFF"
# text = "#111827"
# text_secondary = "#6B7280"
# border = "#E5E7EB"
# hover = "#F3F4F6"
# user_message = "#F0F9FF"
# assistant_message = "#FFFFFF"
# code_background = "#F9FAFB"
# code_border = "#E5E7EB"
# accent = "#D97706"
# accent_hover = "#B45309"
# accent_soft = "#FED7AA"
# on_accent = "#FFFFFF"
# focus_ring = "#D9770620"

[fonts]
# primary = '-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif'
# mono = 'ui-monospace, SFMono-Regular, "SF Mono", Menlo, Monaco, Consolas, monospace'

[spacing]
# border_radius = "8px"
# padding = "12px"
# margin = "8px"

[host]
version = "nav-container"  # legacy-class, nav-container, data-testid
# style_id = "chatskin-theme"
# marker_class = "dark"     # defaults to the class contradicting the appearance
# url_match = "https://claude.ai/*"

# [host.selectors]
# sidebar = 'nav[aria-label="Sidebar"]'

[enforcer]
# tick_interval_ms = 1000      # 100-10000
# deferred_retry_ms = 1000     # 0-30000
# mutation_debounce_ms = 50    # 0-2000
# important = true

# Inline styles pushed onto matching elements every pass. Declaring any
# entry replaces the default list.
# [[overrides]]
# region = "sidebar"
# property = "background-color"
# role = "sidebar"

# Host CSS custom properties forced to a palette role.
# [[host_variables]]
# name = "--main-dark-color"
# role = "background"

[webview]
# url = "https://claude.ai"
# devtools = false
# width = 1280
# height = 860

[logging]
# level = "info"               # trace, debug, info, warn, error
"##
    .to_string()
}
