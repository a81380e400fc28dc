mod app_state;
mod cli;
mod commands;

use std::process::ExitCode;

use chatskin_common::SkinError;
use chatskin_config::{toml_loader, LaunchOverrides, SkinConfig};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use cli::Command;

/// Defaults with the launch overrides applied, or plain defaults if even
/// those do not validate.
fn fallback_config(overrides: &LaunchOverrides) -> SkinConfig {
    let mut config = SkinConfig::default();
    overrides.apply(&mut config);
    chatskin_config::finish(config).unwrap_or_else(|e| {
        tracing::warn!("Launch overrides rejected, using defaults: {e}");
        SkinConfig::default()
    })
}

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "chatskin=info".parse().expect("static directive")),
            ),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_or_fail(output: chatskin_common::Result<String>) -> ExitCode {
    match output {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    // Parse CLI arguments
    let args = cli::parse();
    let overrides = args.overrides();

    // Load config before logging so `[logging] level` can seed the filter
    let loaded = chatskin_config::load_with(args.config.as_deref(), &overrides);

    // Initialize logging
    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => format!("chatskin={level}"),
        (None, Ok(config)) => config.logging.level.directive().to_string(),
        (None, Err(_)) => "chatskin=info".to_string(),
    };
    init_logging(&directive);

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        fallback_config(&overrides)
    });
    tracing::debug!(theme = %config.theme.name, host = %config.host.version, "Config loaded");

    match args.command() {
        Command::Css => print_or_fail(commands::css(&config)),
        Command::Userscript { url_match } => {
            print_or_fail(commands::userscript(&config, url_match.as_deref()))
        }
        Command::Themes => {
            print!("{}", commands::themes(&config.theme.name));
            ExitCode::SUCCESS
        }
        Command::Selectors => {
            print!("{}", commands::selectors(&config.host.version));
            ExitCode::SUCCESS
        }
        Command::Run { .. } => run(config, args.config.clone(), overrides),
    }
}

fn run(config: SkinConfig, config_path: Option<std::path::PathBuf>, overrides: LaunchOverrides) -> ExitCode {
    tracing::info!("chatskin v{} starting...", env!("CARGO_PKG_VERSION"));

    let code = match run_app(config, config_path, overrides) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    };
    tracing::info!("Shutdown complete");
    code
}

fn run_app(
    config: SkinConfig,
    config_path: Option<std::path::PathBuf>,
    overrides: LaunchOverrides,
) -> chatskin_common::Result<()> {
    let config_path = config_path.or_else(|| toml_loader::default_config_path().ok());

    let event_loop = EventLoop::new().map_err(event_loop_error)?;
    let mut app = app_state::ChatskinApp::new(config, config_path, overrides);

    tracing::info!("Entering event loop");
    event_loop.run_app(&mut app).map_err(event_loop_error)
}

fn event_loop_error(e: impl std::fmt::Display) -> SkinError {
    SkinError::WebView(format!("event loop: {e}"))
}
