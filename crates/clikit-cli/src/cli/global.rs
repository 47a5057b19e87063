//! Global arguments that apply to every subcommand.
//!
//! The configuration loader reads the same flags from the raw argument list
//! before parsing. After the parse the application folds these values back
//! in, which covers the forms the pre-scan does not recognise.

use std::path::PathBuf;

use clap::Args;
use clap::builder::PossibleValuesParser;

use clikit_core::domain::LogLevel;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Also write application logs to this file.
    #[arg(
        short = 'l',
        long = "log-file",
        value_name = "PATH",
        global = true,
        help = "Specify a log file"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        help = "Enable verbose output"
    )]
    pub verbose: bool,

    /// Lowest severity that is emitted.
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        global = true,
        default_value = "info",
        value_parser = PossibleValuesParser::new(LogLevel::names()),
        help = "Set log level (debug, info, warn, error)"
    )]
    pub log_level: String,
}
