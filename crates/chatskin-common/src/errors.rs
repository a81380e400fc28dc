use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

/// Failures while reading or writing the styled document.
///
/// A selector that matches nothing is not an error; these variants cover
/// malformed input and a target that can no longer be reached.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("document has no head element")]
    NoHead,

    #[error("document has no body element")]
    NoBody,

    #[error("document channel closed")]
    ChannelClosed,

    #[error("script error: {0}")]
    Script(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SkinError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
