//! Kickstart CLI entry point.
//!
//! Wiring order matters: parse args, initialise logging, load config, build
//! the output manager, then dispatch. Anything that fails before dispatch is
//! reported through the same error path as command failures so exit codes
//! stay consistent.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
#[cfg(feature = "interactive")]
mod prompt;

use cli::{Cli, Commands, GlobalArgs};
use config::AppConfig;
use error::CliError;
use output::OutputManager;

fn main() -> ExitCode {
    // Load .env if present; silently skip otherwise.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.global) {
        // Logging is best-effort; the CLI still works without a subscriber.
        eprintln!("warning: {e}");
    }

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::ConfigError {
                message: e.to_string(),
            };
            let output = OutputManager::new(&cli.global, &AppConfig::default());
            return handle_error(err, &cli.global, &output);
        }
    };

    let output = OutputManager::new(&cli.global, &config);

    let result = match &cli.command {
        Commands::New(args) => commands::new::execute(args, &config, &output),
        Commands::Completions(args) => commands::completions::execute(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => handle_error(err, &cli.global, &output),
    }
}

/// Report a failure and map it to an exit code.
///
/// Cancellation is an outcome, not an error: it gets a short notice and its
/// own exit code instead of the full error block.
fn handle_error(err: CliError, global: &GlobalArgs, output: &OutputManager) -> ExitCode {
    err.log();

    if err.is_cancellation() {
        let _ = output.warning("Cancelled - the target was restored to its previous state.");
    } else {
        let verbose = global.verbose > 0;
        let rendered = if output.supports_color() {
            err.format_colored(verbose)
        } else {
            err.format_plain(verbose)
        };
        eprintln!("{rendered}");
    }

    ExitCode::from(err.exit_code())
}
