//! Name-keyed table of subcommands.
//!
//! A command is plain data: a name, help text, a function that adds its
//! arguments to a `clap::Command`, and a function that runs it. The registry
//! attaches every command to the shared parser and is the single boundary
//! where command failures are logged.

use std::sync::Arc;

use clap::{ArgMatches, Command};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use clikit_core::prelude::{Configuration, ServiceContainer, SharedLogger};

use crate::error::{CliError, CliResult};

pub type ConfigureFn = fn(Command) -> Command;
pub type ExecuteFn = fn(&ArgMatches, &CommandContext<'_>) -> CliResult<CommandOutcome>;

/// Everything a command receives besides its own arguments.
pub struct CommandContext<'a> {
    pub container: &'a ServiceContainer,
    pub logger: SharedLogger,
    pub config: Arc<Configuration>,
}

impl<'a> CommandContext<'a> {
    /// Pull the logger and configuration out of the container.
    pub fn from_container(container: &'a ServiceContainer) -> CliResult<Self> {
        Ok(Self {
            container,
            logger: container.resolve_cloned::<SharedLogger>()?,
            config: container.resolve::<Configuration>()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CommandOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[derive(Clone, Copy)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub configure: ConfigureFn,
    pub execute: ExecuteFn,
}

impl std::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. A second command with the same name is refused and the
    /// first one stays.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> CliResult<()> {
        if self.get(descriptor.name).is_some() {
            return Err(CliError::DuplicateCommand {
                name: descriptor.name.to_string(),
            });
        }
        debug!(command = descriptor.name, "command registered");
        self.commands.push(descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Registered commands, in registration order.
    pub fn all(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// Attach every command, in registration order, to `program`.
    pub fn configure(&self, program: Command) -> Command {
        self.commands.iter().fold(program, |program, descriptor| {
            let sub = Command::new(descriptor.name).about(descriptor.description);
            program.subcommand((descriptor.configure)(sub))
        })
    }

    /// Run `name` with its parsed arguments.
    ///
    /// Failures are logged through the context's logger here and come back
    /// wrapped as [`CliError::Command`].
    #[instrument(skip(self, matches, ctx))]
    pub fn execute(
        &self,
        name: &str,
        matches: &ArgMatches,
        ctx: &CommandContext<'_>,
    ) -> CliResult<CommandOutcome> {
        let descriptor = self.get(name).ok_or_else(|| CliError::UnknownCommand {
            name: name.to_string(),
        })?;

        ctx.logger.debug(&format!("Executing command: {name}"));
        match (descriptor.execute)(matches, ctx) {
            Ok(outcome) => {
                ctx.logger
                    .debug(&format!("Command {name} completed successfully"));
                Ok(outcome)
            }
            Err(err) => {
                ctx.logger.error(&format!("Command {name} failed: {err}"));
                Err(CliError::command(name, err))
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingLogger;
    use super::*;
    use clap::Arg;
    use clikit_core::prelude::LogLevel;

    fn configure_greet(cmd: Command) -> Command {
        cmd.arg(Arg::new("who").long("who").required(true))
    }

    fn execute_greet(matches: &ArgMatches, ctx: &CommandContext<'_>) -> CliResult<CommandOutcome> {
        let who = matches.get_one::<String>("who").cloned().unwrap_or_default();
        ctx.logger.info(&format!("hi {who}"));
        Ok(CommandOutcome::success(format!("greeted {who}")))
    }

    fn execute_broken(_: &ArgMatches, _: &CommandContext<'_>) -> CliResult<CommandOutcome> {
        Err(CliError::Prompt {
            message: "no terminal".into(),
        })
    }

    fn greet() -> CommandDescriptor {
        CommandDescriptor {
            name: "greet",
            description: "Say hi",
            configure: configure_greet,
            execute: execute_greet,
        }
    }

    fn broken() -> CommandDescriptor {
        CommandDescriptor {
            name: "broken",
            description: "Always fails",
            configure: |cmd| cmd,
            execute: execute_broken,
        }
    }

    fn context(container: &ServiceContainer) -> (CommandContext<'_>, Arc<RecordingLogger>) {
        let recorder = Arc::new(RecordingLogger::default());
        let ctx = CommandContext {
            container,
            logger: recorder.clone(),
            config: Arc::new(Configuration::default()),
        };
        (ctx, recorder)
    }

    #[test]
    fn duplicate_names_keep_the_first() {
        let mut registry = CommandRegistry::new();
        registry.register(greet()).unwrap();

        let mut other = broken();
        other.name = "greet";
        let err = registry.register(other).unwrap_err();

        assert!(matches!(err, CliError::DuplicateCommand { ref name } if name == "greet"));
        assert_eq!(registry.all().len(), 1);
        assert_eq!(registry.get("greet").unwrap().description, "Say hi");
    }

    #[test]
    fn configure_keeps_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register(greet()).unwrap();
        registry.register(broken()).unwrap();

        let program = registry.configure(Command::new("app"));
        let names: Vec<_> = program.get_subcommands().map(|c| c.get_name()).collect();
        assert_eq!(names, ["greet", "broken"]);

        let about = program
            .find_subcommand("greet")
            .and_then(|c| c.get_about())
            .map(|a| a.to_string());
        assert_eq!(about.as_deref(), Some("Say hi"));
    }

    #[test]
    fn execute_dispatches_and_logs() {
        let mut registry = CommandRegistry::new();
        registry.register(greet()).unwrap();
        let program = registry.configure(Command::new("app"));
        let matches = program
            .try_get_matches_from(["app", "greet", "--who", "Ada"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        let container = ServiceContainer::new();
        let (ctx, recorder) = context(&container);
        let outcome = registry.execute(name, sub, &ctx).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.message, "greeted Ada");
        assert_eq!(
            recorder.messages(LogLevel::Debug),
            ["Executing command: greet", "Command greet completed successfully"]
        );
        assert_eq!(recorder.messages(LogLevel::Info), ["hi Ada"]);
    }

    #[test]
    fn failures_are_logged_and_wrapped() {
        let mut registry = CommandRegistry::new();
        registry.register(broken()).unwrap();

        let container = ServiceContainer::new();
        let (ctx, recorder) = context(&container);
        let err = registry
            .execute("broken", &ArgMatches::default(), &ctx)
            .unwrap_err();

        assert!(matches!(err, CliError::Command { ref command, .. } if command == "broken"));
        assert_eq!(
            recorder.messages(LogLevel::Error),
            ["Command broken failed: Prompt failed: no terminal"]
        );
    }

    #[test]
    fn unknown_command_is_an_error() {
        let registry = CommandRegistry::new();
        let container = ServiceContainer::new();
        let (ctx, _) = context(&container);

        let err = registry
            .execute("nope", &ArgMatches::default(), &ctx)
            .unwrap_err();
        assert!(matches!(err, CliError::UnknownCommand { .. }));
    }

    #[test]
    fn context_resolves_from_container() {
        let container = ServiceContainer::new();
        assert!(CommandContext::from_container(&container).is_err());

        let logger: SharedLogger = Arc::new(RecordingLogger::default());
        container.register_instance(logger).unwrap();
        container.register_instance(Configuration::default()).unwrap();
        assert!(CommandContext::from_container(&container).is_ok());
    }

    #[test]
    fn outcome_serialises_without_empty_data() {
        let json = serde_json::to_value(CommandOutcome {
            success: false,
            message: "nope".into(),
            data: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "message": "nope" }));
    }
}
