//! Wiring of every service the commands depend on.

use std::sync::Arc;

use tracing::debug;

use clikit_adapters::{EmbeddedTemplate, LocalFilesystem, LoggerFactory};
use clikit_core::prelude::{
    Configuration, ConfigurationService, Dependencies, Lifetime, ScaffoldService,
    ServiceContainer, ServiceDescriptor, ServiceKey, SharedFilesystem, SharedLogger,
    SharedTemplateSource,
};

use super::Application;
use crate::commands;
use crate::error::CliResult;
use crate::logging::init_logging;
use crate::output::OutputManager;
use crate::registry::CommandRegistry;

/// Build the container for `argv` and wrap it in an [`Application`].
///
/// Order matters: the configuration is loaded from the raw arguments before
/// anything that reads it is registered.
pub fn bootstrap(argv: &[String]) -> CliResult<Application> {
    let container = ServiceContainer::new();

    container.register_instance::<SharedFilesystem>(Arc::new(LocalFilesystem))?;
    container.register_instance(ConfigurationService::new())?;

    let cli_args = argv.get(1..).unwrap_or_default();
    let config = container
        .resolve::<ConfigurationService>()?
        .load(Some(cli_args))?;
    container.register_instance(config.clone())?;

    if let Err(e) = init_logging(&config) {
        // A subscriber from an earlier bootstrap in this process is fine.
        debug!("tracing already initialised: {e}");
    }
    debug!(
        log_level = %config.log_level,
        verbose = config.verbose,
        log_file = ?config.log_file,
        "configuration loaded"
    );

    register_services(&container)?;
    register_commands(&container)?;

    Application::new(container)
}

fn register_services(container: &ServiceContainer) -> CliResult<()> {
    register_logger(container)?;

    container.register_instance(OutputManager::detect())?;

    container.register_singleton::<SharedTemplateSource, _>(|_: &ServiceContainer| {
        let template: SharedTemplateSource = Arc::new(EmbeddedTemplate::new());
        Ok(template)
    })?;

    container.register(ServiceDescriptor::constructor(
        Lifetime::Transient,
        vec![ServiceKey::of::<SharedFilesystem>()],
        |deps: &mut Dependencies| {
            Ok(ScaffoldService::new(
                deps.take_cloned::<SharedFilesystem>()?,
            ))
        },
    ))?;

    Ok(())
}

/// The composite logger, built lazily from the registered configuration.
/// Registering again drops the cached logger.
pub(super) fn register_logger(container: &ServiceContainer) -> CliResult<()> {
    container.register_singleton::<SharedLogger, _>(|c: &ServiceContainer| {
        let config = c.resolve::<Configuration>()?;
        let filesystem = c.resolve_cloned::<SharedFilesystem>()?;
        let logger: SharedLogger = Arc::new(LoggerFactory::composite(&config, filesystem)?);
        Ok(logger)
    })?;
    Ok(())
}

fn register_commands(container: &ServiceContainer) -> CliResult<()> {
    let mut registry = CommandRegistry::new();
    for descriptor in commands::builtin() {
        registry.register(descriptor)?;
    }
    container.register_instance(registry)?;
    Ok(())
}
