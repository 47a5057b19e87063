//! # clikit
//!
//! A dependency-injected CLI skeleton and the generator that stamps out new
//! projects from it.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` from the working directory, if present.
//! 2. Bootstrap the container: filesystem, configuration (defaults, then
//!    environment, then a pre-scan of the raw arguments), diagnostics,
//!    logger, output, template source, scaffold service, commands.
//! 3. Parse the arguments and dispatch to the registered command.
//! 4. Translate the outcome or error into an exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! |  0   | Success, `--help`, `--version`, cancelled `new` |
//! |  1   | Command, configuration or startup failure       |
//! |  2   | Invalid arguments (reported by clap)            |

use std::process::ExitCode;

mod app;
mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod prompt;
mod registry;

fn main() -> ExitCode {
    // Missing .env is normal; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let argv: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let mut app = match app::bootstrap(&argv) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Failed to start application: {err}");
            err.log();
            return ExitCode::FAILURE;
        }
    };

    match app.run(&argv) {
        Ok(outcome) if outcome.success => ExitCode::SUCCESS,
        Ok(outcome) => {
            tracing::debug!(message = %outcome.message, "command reported failure");
            ExitCode::FAILURE
        }
        Err(err) => app.report(err),
    }
}
