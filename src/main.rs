//! Ignoro CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use ignoro::cache::default_cache_dir;
use ignoro::cli::{Cli, CommandContext, CommandDispatcher};
use ignoro::config::load_settings;
use ignoro::ui::{NoticeKind, Shell, TerminalShell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, so the picker stays clean
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("ignoro=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ignoro=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Ignoro starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let mut shell = TerminalShell::new();

    match run(&cli, &mut shell) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            shell.notify(&format!("Error: {}", e), NoticeKind::Error);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, shell: &mut TerminalShell) -> ignoro::Result<u8> {
    let settings = load_settings(cli.config.as_deref())?;
    let working_dir = std::env::current_dir()?;
    let context = CommandContext::new(settings, default_cache_dir(), working_dir);

    let mut dispatcher = CommandDispatcher::new(context);
    let result = dispatcher.dispatch(cli, shell)?;
    Ok(result.exit_code.clamp(0, 255) as u8)
}
