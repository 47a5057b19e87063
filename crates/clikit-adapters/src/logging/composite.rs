//! Fan-out log destination.

use clikit_core::application::{
    LogError,
    ports::{Logger, SharedLogger},
};
use clikit_core::domain::LogLevel;

/// Forwards every call to each destination in registration order.
///
/// Fan-out is best effort: a failing destination does not stop the ones
/// after it. Failures are collected into a single [`LogError::Fanout`].
/// The composite itself applies no threshold.
#[derive(Default, Clone)]
pub struct CompositeLogger {
    loggers: Vec<SharedLogger>,
}

impl CompositeLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_logger(&mut self, logger: SharedLogger) {
        self.loggers.push(logger);
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.add_logger(logger);
        self
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl Logger for CompositeLogger {
    fn try_log(&self, level: LogLevel, message: &str) -> Result<(), LogError> {
        let failures: Vec<LogError> = self
            .loggers
            .iter()
            .filter_map(|logger| logger.try_log(level, message).err())
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LogError::Fanout { failures })
        }
    }
}

impl std::fmt::Debug for CompositeLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeLogger")
            .field("destinations", &self.loggers.len())
            .finish()
    }
}
