//! Webview window and logging configuration types.

use serde::{Deserialize, Serialize};

/// Window that hosts the chat page when running `chatskin run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSection {
    pub url: String,
    pub devtools: bool,
    pub user_agent: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl Default for WebViewSection {
    fn default() -> Self {
        Self {
            url: "https://claude.ai".into(),
            devtools: cfg!(debug_assertions),
            user_agent: None,
            width: 1280,
            height: 860,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing_subscriber::EnvFilter` directive scoped to this workspace.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "chatskin=trace",
            LogLevel::Debug => "chatskin=debug",
            LogLevel::Info => "chatskin=info",
            LogLevel::Warn => "chatskin=warn",
            LogLevel::Error => "chatskin=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webview_defaults() {
        let config = WebViewSection::default();
        assert_eq!(config.url, "https://claude.ai");
        assert_eq!(config.width, 1280);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn log_level_directives() {
        assert_eq!(LogLevel::default().directive(), "chatskin=info");
        assert_eq!(LogLevel::Trace.directive(), "chatskin=trace");
    }

    #[test]
    fn log_level_parses_lowercase() {
        let config: LoggingConfig = toml::from_str(r#"level = "debug""#).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
    }
}
