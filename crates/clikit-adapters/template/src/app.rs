//! Container wiring and the application shell.

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::parser::ValueSource;
use clap::{ArgMatches, Command};

use crate::commands;
use crate::config::{Configuration, ConfigurationService, LogLevel};
use crate::container::Container;
use crate::error::{AppError, AppResult};
use crate::logging::{LoggerFactory, SharedLogger};
use crate::registry::{CommandContext, CommandRegistry};

/// Register every service and attach the commands to `root`.
///
/// The configuration is loaded from the raw arguments first, since the
/// logger is built from it.
pub fn bootstrap(argv: &[String], root: Command) -> AppResult<Application> {
    let container = Container::new();

    container.register_transient(|_| Ok(ConfigurationService::new()));
    let config = container
        .resolve::<ConfigurationService>()?
        .load(argv.get(1..).unwrap_or_default())?;
    container.register_instance(config);
    register_logger(&container);

    let mut registry = CommandRegistry::default();
    for descriptor in commands::all() {
        registry.register(descriptor)?;
    }
    let program = registry.configure(root);
    container.register_instance(registry);

    Application::new(container, program)
}

fn register_logger(container: &Container) {
    container.register_singleton::<SharedLogger, _>(|c| {
        let config = c.resolve::<Configuration>()?;
        let logger: SharedLogger = Rc::new(LoggerFactory::composite(&config));
        Ok(logger)
    });
}

pub struct Application {
    container: Container,
    program: Command,
    logger: SharedLogger,
    config: Rc<Configuration>,
}

impl Application {
    fn new(container: Container, program: Command) -> AppResult<Self> {
        let logger = container.resolve_cloned::<SharedLogger>()?;
        let config = container.resolve::<Configuration>()?;
        Ok(Self {
            container,
            program,
            logger,
            config,
        })
    }

    /// Parse `argv` (program name first) and dispatch to the command.
    pub fn run(&mut self, argv: &[String]) -> AppResult<()> {
        let matches = self.program.clone().try_get_matches_from(argv)?;
        self.apply_global_args(&matches)?;

        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| AppError::UnknownCommand(String::new()))?;

        let registry = self.container.resolve::<CommandRegistry>()?;
        let ctx = CommandContext {
            logger: Rc::clone(&self.logger),
            config: Rc::clone(&self.config),
        };
        registry.execute(name, sub_matches, &ctx)
    }

    /// Fold flags the pre-scan could not see (`-lapp.log`, `-uv`) into the
    /// configuration and rebuild the logger when anything changed.
    fn apply_global_args(&mut self, matches: &ArgMatches) -> AppResult<()> {
        let mut config = (*self.config).clone();
        if matches.value_source("log_level") == Some(ValueSource::CommandLine) {
            if let Some(level) = matches.get_one::<String>("log_level") {
                config.log_level = level.parse::<LogLevel>()?;
            }
        }
        if let Some(file) = matches.get_one::<PathBuf>("log_file") {
            config.log_file = Some(file.clone());
        }
        config.verbose |= matches.get_flag("verbose");

        if config != *self.config {
            self.container.register_instance(config);
            register_logger(&self.container);
            self.config = self.container.resolve::<Configuration>()?;
            self.logger = self.container.resolve_cloned::<SharedLogger>()?;
        }
        Ok(())
    }

    /// Report a failed run and pick the exit code.
    pub fn report(&self, err: AppError) -> ExitCode {
        match &err {
            AppError::Usage(usage) => {
                if let Err(e) = usage.print() {
                    eprintln!("{e}");
                }
            }
            // Already logged by the registry.
            AppError::Command { source, .. } => {
                if self.config.verbose {
                    eprintln!("{source:?}");
                }
            }
            other => self.logger.error(&other.to_string()),
        }
        ExitCode::from(err.exit_code())
    }
}
