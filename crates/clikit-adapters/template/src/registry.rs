//! Name-keyed table of subcommands.

use std::rc::Rc;

use clap::{ArgMatches, Command};

use crate::config::Configuration;
use crate::error::{AppError, AppResult};
use crate::logging::SharedLogger;

pub struct CommandContext {
    pub logger: SharedLogger,
    pub config: Rc<Configuration>,
}

#[derive(Clone, Copy)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub configure: fn(Command) -> Command,
    pub execute: fn(&ArgMatches, &CommandContext) -> AppResult<()>,
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    /// Add a command; a second command with the same name is refused.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> AppResult<()> {
        if self.commands.iter().any(|c| c.name == descriptor.name) {
            return Err(AppError::DuplicateCommand(descriptor.name.to_string()));
        }
        self.commands.push(descriptor);
        Ok(())
    }

    /// Attach every command, in registration order, to `program`.
    pub fn configure(&self, program: Command) -> Command {
        self.commands.iter().fold(program, |program, descriptor| {
            let sub = Command::new(descriptor.name).about(descriptor.description);
            program.subcommand((descriptor.configure)(sub))
        })
    }

    /// Run `name`; failures are logged here and come back wrapped.
    pub fn execute(&self, name: &str, matches: &ArgMatches, ctx: &CommandContext) -> AppResult<()> {
        let descriptor = self
            .commands
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| AppError::UnknownCommand(name.to_string()))?;

        ctx.logger.debug(&format!("Executing command: {name}"));
        (descriptor.execute)(matches, ctx).map_err(|err| {
            ctx.logger.error(&format!("Command {name} failed: {err}"));
            AppError::Command {
                command: name.to_string(),
                source: Box::new(err),
            }
        })
    }
}
