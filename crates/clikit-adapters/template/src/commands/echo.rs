//! `echo`: greet a name, optionally upper-cased and repeated.

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::{AppError, AppResult};
use crate::registry::{CommandContext, CommandDescriptor};

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor {
        name: "echo",
        description: "Echo your name with optional transformations",
        configure,
        execute,
    }
}

fn configure(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("name")
            .short('n')
            .long("name")
            .required(true)
            .help("Name to echo"),
    )
    .arg(
        Arg::new("uppercase")
            .short('u')
            .long("uppercase")
            .action(ArgAction::SetTrue)
            .help("Convert to uppercase"),
    )
    .arg(
        Arg::new("repeat")
            .short('r')
            .long("repeat")
            .default_value("1")
            .allow_hyphen_values(true)
            .help("Number of times to repeat (1-100)"),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EchoOptions {
    name: String,
    uppercase: bool,
    repeat: u8,
}

impl EchoOptions {
    fn parse(matches: &ArgMatches) -> AppResult<Self> {
        let name = matches
            .get_one::<String>("name")
            .map(|n| n.trim().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            return Err(AppError::InvalidOption("name must not be empty".into()));
        }

        let raw = matches.get_one::<String>("repeat").map_or("1", String::as_str);
        let repeat = raw
            .parse::<u8>()
            .ok()
            .filter(|n| (1..=100).contains(n))
            .ok_or_else(|| {
                AppError::InvalidOption(format!("repeat must be between 1 and 100, got '{raw}'"))
            })?;

        Ok(Self {
            name,
            uppercase: matches.get_flag("uppercase"),
            repeat,
        })
    }

    fn greeting(&self) -> String {
        let greeting = format!("Hello, {}!", self.name);
        if self.uppercase {
            greeting.to_uppercase()
        } else {
            greeting
        }
    }
}

fn execute(matches: &ArgMatches, ctx: &CommandContext) -> AppResult<()> {
    let options = EchoOptions::parse(matches)?;

    ctx.logger
        .debug(&format!("Current log level: {}", ctx.config.log_level));
    ctx.logger
        .debug(&format!("Verbose mode: {}", ctx.config.verbose));

    let greeting = options.greeting();
    for _ in 0..options.repeat {
        ctx.logger.info(&greeting);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppResult<EchoOptions> {
        let matches = configure(Command::new("echo"))
            .try_get_matches_from(std::iter::once("echo").chain(args.iter().copied()))?;
        EchoOptions::parse(&matches)
    }

    #[test]
    fn uppercase_greeting() {
        let options = parse(&["-n", "Ada", "-u", "-r", "3"]).unwrap();
        assert_eq!(options.repeat, 3);
        assert_eq!(options.greeting(), "HELLO, ADA!");
    }

    #[test]
    fn repeat_out_of_range_is_rejected() {
        assert!(parse(&["-n", "Ada", "-r", "0"]).is_err());
        assert!(parse(&["-n", "Ada", "-r", "101"]).is_err());
        assert!(parse(&["-n", "Ada", "-r", "many"]).is_err());
    }
}
