//! tempalert-setup CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tempalert_setup::cli::{Cli, CommandDispatcher, Commands};
use tempalert_setup::config::SetupPaths;
use tempalert_setup::shell::{is_ci, is_elevated};
use tempalert_setup::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("tempalert_setup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tempalert_setup=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Pick the output mode. JSON on stdout leaves room for errors only.
fn output_mode(cli: &Cli) -> OutputMode {
    match &cli.command {
        Some(Commands::Sensors(args)) if args.json => OutputMode::Silent,
        _ if cli.quiet => OutputMode::Quiet,
        _ if cli.verbose => OutputMode::Verbose,
        _ => OutputMode::Normal,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("tempalert-setup starting with args: {:?}", cli);

    let output_mode = output_mode(&cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Prompts only make sense for the wizard itself.
    let is_interactive = match &cli.command {
        Some(Commands::Setup(args)) => !args.non_interactive && !is_ci(),
        None => !cli.setup.non_interactive && !is_ci(),
        _ => false,
    };

    let mut ui = create_ui(is_interactive, output_mode);
    let dispatcher = CommandDispatcher::new(SetupPaths::detect(), is_elevated());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code.clamp(0, 255) as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
