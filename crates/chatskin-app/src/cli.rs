use std::path::PathBuf;

use chatskin_config::LaunchOverrides;
use clap::{Parser, Subcommand};

/// chatskin: keep a fixed palette on a chat web page.
#[derive(Parser, Debug)]
#[command(name = "chatskin", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Theme name or YAML path, replacing `[theme] name`.
    #[arg(long, global = true)]
    pub theme: Option<String>,

    /// Selector table version, replacing `[host] version`.
    #[arg(long, global = true)]
    pub host_version: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the generated stylesheet.
    Css,
    /// Print a browser userscript that enforces the theme.
    Userscript {
        /// `@match` pattern for the script header.
        #[arg(long = "match")]
        url_match: Option<String>,
    },
    /// List built-in themes.
    Themes,
    /// List built-in selector tables.
    Selectors,
    /// Open the chat page in a window and enforce the theme live.
    Run {
        /// Page to open instead of `[webview] url`.
        #[arg(long)]
        url: Option<String>,
    },
}

impl Args {
    /// The subcommand, `run` when none was given.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Run { url: None })
    }

    pub fn overrides(&self) -> LaunchOverrides {
        let url = match &self.command {
            Some(Command::Run { url }) => url.clone(),
            _ => None,
        };
        LaunchOverrides {
            theme: self.theme.clone(),
            host_version: self.host_version.clone(),
            url,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
