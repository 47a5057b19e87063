//! `clikit echo`: greet someone through the logging pipeline.

use clap::{ArgMatches, Args, FromArgMatches};
use serde_json::json;

use clikit_core::domain::EchoOptions;
use clikit_core::error::ClikitError;

use crate::error::CliResult;
use crate::registry::{CommandContext, CommandDescriptor, CommandOutcome};

#[derive(Debug, Clone, Args)]
pub struct EchoArgs {
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Name to echo")]
    pub name: String,

    #[arg(short = 'u', long = "uppercase", help = "Convert output to uppercase")]
    pub uppercase: bool,

    /// Kept as text; the count is range-checked by `EchoOptions`.
    #[arg(
        short = 'r',
        long = "repeat",
        value_name = "COUNT",
        default_value = "1",
        allow_hyphen_values = true,
        help = "Repeat the output multiple times"
    )]
    pub repeat: String,
}

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor {
        name: "echo",
        description: "Echo your name with optional transformations",
        configure: |cmd| {
            EchoArgs::augment_args(cmd).after_help(
                "EXAMPLES:\n\
                \x20 clikit echo --name Ada\n\
                \x20 clikit echo -n Ada --uppercase --repeat 3",
            )
        },
        execute,
    }
}

fn execute(matches: &ArgMatches, ctx: &CommandContext<'_>) -> CliResult<CommandOutcome> {
    let args = EchoArgs::from_arg_matches(matches)?;
    let options =
        EchoOptions::parse(args.name, args.uppercase, &args.repeat).map_err(ClikitError::from)?;
    Ok(run(&options, ctx))
}

fn run(options: &EchoOptions, ctx: &CommandContext<'_>) -> CommandOutcome {
    let logger = &ctx.logger;
    let config = &ctx.config;

    logger.debug(&format!("Current log level: {}", config.log_level));
    logger.debug(&format!("Verbose mode: {}", config.verbose));
    logger.debug(&format!(
        "Log file: {}",
        config
            .log_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string())
    ));

    let output = options.greeting();
    for _ in 0..options.repeat() {
        logger.info(&output);
    }

    CommandOutcome::success(format!(
        "Echoed \"{}\" {} time(s)",
        options.name(),
        options.repeat()
    ))
    .with_data(json!({ "output": output, "options": options }))
}
