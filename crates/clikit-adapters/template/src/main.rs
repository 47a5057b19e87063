//! Entry point: bootstrap the container, parse the command line, run the
//! selected command and turn the result into an exit code.
//!
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! |  0   | Success, `--help`, `--version`   |
//! |  1   | Command or configuration failure |
//! |  2   | Invalid arguments                |

mod app;
mod commands;
mod config;
mod container;
mod error;
mod logging;
mod registry;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command, value_parser};

use crate::config::LogLevel;

/// Root parser with the global logging flags. Commands are attached by the
/// registry during bootstrap.
fn root_command() -> Command {
    Command::default()
        .name("my-cli-app")
        .about("A simple CLI application that echoes your name")
        .version(clap::crate_version!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log_file")
                .short('l')
                .long("log-file")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .help("Specify a log file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable verbose output"),
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .value_name("LEVEL")
                .default_value("info")
                .value_parser(LogLevel::NAMES)
                .global(true)
                .help("Set log level (debug, info, warn, error)"),
        )
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let mut app = match app::bootstrap(&argv, root_command()) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Failed to start application: {err}");
            return ExitCode::FAILURE;
        }
    };

    match app.run(&argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => app.report(err),
    }
}
