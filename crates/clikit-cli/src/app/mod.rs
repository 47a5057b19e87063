//! The application shell: a bootstrapped container plus the parser built
//! from its command registry.

use std::process::ExitCode;
use std::sync::Arc;

use clap::parser::ValueSource;
use clap::{ArgMatches, Command, FromArgMatches};
use tracing::{debug, instrument};

use clikit_core::error::ClikitError;
use clikit_core::prelude::{Configuration, LogLevel, ServiceContainer, SharedLogger};

use crate::cli::{GlobalArgs, root_command};
use crate::error::{CliError, CliResult};
use crate::registry::{CommandContext, CommandOutcome, CommandRegistry};

mod bootstrap;

pub use bootstrap::bootstrap;
use bootstrap::register_logger;

pub struct Application {
    container: ServiceContainer,
    registry: Arc<CommandRegistry>,
    logger: SharedLogger,
    config: Arc<Configuration>,
    command: Command,
}

impl Application {
    /// Resolve what the shell itself needs. A missing registration surfaces
    /// here, before any argument is parsed.
    pub fn new(container: ServiceContainer) -> CliResult<Self> {
        let registry = container.resolve::<CommandRegistry>()?;
        let logger = container.resolve_cloned::<SharedLogger>()?;
        let config = container.resolve::<Configuration>()?;
        let command = registry.configure(root_command());
        debug!(
            commands = ?registry.all().iter().map(|c| c.name).collect::<Vec<_>>(),
            "parser built"
        );

        Ok(Self {
            container,
            registry,
            logger,
            config,
            command,
        })
    }

    /// Parse `argv` (program name first) and dispatch to the matching
    /// command.
    #[instrument(skip_all)]
    pub fn run(&mut self, argv: &[String]) -> CliResult<CommandOutcome> {
        let matches = self.command.clone().try_get_matches_from(argv)?;
        let global = GlobalArgs::from_arg_matches(&matches)?;
        debug!(?global, "arguments parsed");
        self.apply_global_args(&matches, &global)?;

        let (name, sub_matches) =
            matches
                .subcommand()
                .ok_or_else(|| CliError::UnknownCommand {
                    name: String::new(),
                })?;

        let ctx = CommandContext::from_container(&self.container)?;
        self.registry.execute(name, sub_matches, &ctx)
    }

    /// Fold the parsed global flags into the loaded configuration.
    ///
    /// The pre-scan only sees the spelled-out flag forms; clap also accepts
    /// attached values (`-lapp.log`) and bundled shorts (`-uv`). When the
    /// parse finds something the pre-scan missed, the configuration and the
    /// logger built from it are registered again.
    fn apply_global_args(&mut self, matches: &ArgMatches, global: &GlobalArgs) -> CliResult<()> {
        let mut config = (*self.config).clone();
        if matches.value_source("log_level") == Some(ValueSource::CommandLine) {
            config.log_level = global
                .log_level
                .parse::<LogLevel>()
                .map_err(ClikitError::from)?;
        }
        if let Some(file) = &global.log_file {
            config.log_file = Some(file.clone());
        }
        config.verbose |= global.verbose;

        if config == *self.config {
            return Ok(());
        }
        debug!(
            log_level = %config.log_level,
            verbose = config.verbose,
            log_file = ?config.log_file,
            "command line overrides pre-scanned configuration"
        );

        self.container.register_instance(config)?;
        register_logger(&self.container)?;
        self.config = self.container.resolve::<Configuration>()?;
        self.logger = self.container.resolve_cloned::<SharedLogger>()?;
        Ok(())
    }

    /// Turn a failed run into an exit code.
    ///
    /// Usage errors are printed by clap. Command failures were already logged
    /// by the registry; anything else is logged here. `--verbose` adds the
    /// full cause chain and suggestions on stderr.
    pub fn report(&self, err: CliError) -> ExitCode {
        match &err {
            CliError::Usage(usage) => {
                if let Err(e) = usage.print() {
                    debug!("failed to print usage: {e}");
                }
                return ExitCode::from(err.exit_code());
            }
            CliError::Command { .. } => {}
            other => self.logger.error(&other.to_string()),
        }

        err.log();

        if self.config.verbose {
            let colored =
                std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr();
            let rendered = if colored {
                err.format_colored(true)
            } else {
                err.format_plain(true)
            };
            eprint!("{rendered}");
        }

        ExitCode::from(err.exit_code())
    }
}
