//! Construction of log destinations from configuration.

use std::sync::Arc;

use clikit_core::application::ports::{SharedFilesystem, SharedLogger};
use clikit_core::domain::Configuration;
use clikit_core::error::{ClikitError, ClikitResult};

use super::{CompositeLogger, ConsoleLogger, FileLogger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerKind {
    Console,
    File,
}

pub struct LoggerFactory;

impl LoggerFactory {
    /// Build one destination with the configured threshold.
    pub fn create(
        kind: LoggerKind,
        config: &Configuration,
        filesystem: Option<SharedFilesystem>,
    ) -> ClikitResult<SharedLogger> {
        match kind {
            LoggerKind::Console => Ok(Arc::new(ConsoleLogger::new(config.log_level))),
            LoggerKind::File => match (&config.log_file, filesystem) {
                (Some(path), Some(fs)) => {
                    Ok(Arc::new(FileLogger::new(path.clone(), fs, config.log_level)))
                }
                _ => Err(ClikitError::Configuration {
                    message: "File logger requires a log file path and a filesystem".into(),
                }),
            },
        }
    }

    /// Console destination, plus a file destination when a log file is set.
    pub fn composite(
        config: &Configuration,
        filesystem: SharedFilesystem,
    ) -> ClikitResult<CompositeLogger> {
        let mut composite = CompositeLogger::new();
        composite.add_logger(Self::create(LoggerKind::Console, config, None)?);

        if config.log_file.is_some() {
            composite.add_logger(Self::create(LoggerKind::File, config, Some(filesystem))?);
        }
        Ok(composite)
    }
}
