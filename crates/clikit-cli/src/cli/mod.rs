//! The root parser every registered command is attached to.
//!
//! Subcommands are not declared here; the command registry adds them.

use clap::{Args, Command};

pub mod global;
pub use global::GlobalArgs;

pub const BIN_NAME: &str = "clikit";

/// Root command with the global flags and no subcommands yet.
pub fn root_command() -> Command {
    let program = Command::new(BIN_NAME)
        .bin_name(BIN_NAME)
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about("CLI application skeleton and project generator")
        .after_help(
            "EXAMPLES:\n\
            \x20 clikit echo --name Ada --uppercase --repeat 3\n\
            \x20 clikit --log-file app.log --log-level debug echo -n Ada\n\
            \x20 clikit new my-cli --yes",
        )
        .arg_required_else_help(true)
        .subcommand_required(true);

    GlobalArgs::augment_args(program)
}
