//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `clikit-adapters` crate provides implementations.

use std::path::Path;
use std::sync::Arc;

use crate::application::error::LogError;
use crate::domain::{LogLevel, TemplateTree};
use crate::error::ClikitResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `clikit_adapters::filesystem::LocalFilesystem` (production)
/// - `clikit_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> ClikitResult<String>;

    /// Write content to a file, creating parent directories as needed.
    fn write_file(&self, path: &Path, content: &str) -> ClikitResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ClikitResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ClikitResult<()>;
}

/// Port for application log destinations.
///
/// Only [`Logger::try_log`] is required. The provided severity methods never
/// fail: a destination error is reported as a diagnostic and dropped.
pub trait Logger: Send + Sync {
    fn try_log(&self, level: LogLevel, message: &str) -> Result<(), LogError>;

    fn log(&self, level: LogLevel, message: &str) {
        if let Err(e) = self.try_log(level, message) {
            tracing::warn!(error = %e, %level, "log call failed");
        }
    }

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Port for the tree copied by `clikit new`.
///
/// Implemented by:
/// - `clikit_adapters::template_source::EmbeddedTemplate` (built into the binary)
/// - `clikit_adapters::template_source::DirectoryTemplate` (walked from disk)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    fn load(&self) -> ClikitResult<TemplateTree>;

    /// Human-readable origin, for messages.
    fn describe(&self) -> String;
}

pub type SharedFilesystem = Arc<dyn Filesystem>;
pub type SharedLogger = Arc<dyn Logger>;
pub type SharedTemplateSource = Arc<dyn TemplateSource>;
