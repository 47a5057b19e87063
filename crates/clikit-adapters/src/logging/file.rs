//! File log destination.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::warn;

use clikit_core::application::{
    LogError,
    ports::{Logger, SharedFilesystem},
};
use clikit_core::domain::LogLevel;
use clikit_core::error::ClikitResult;

/// Writes `[timestamp] [LEVEL] message` lines to a file.
///
/// Every write reads the whole file and writes it back with the new line
/// appended, through the [`Filesystem`](clikit_core::application::ports::Filesystem)
/// port. Write failures are reported on stderr and never returned.
pub struct FileLogger {
    path: PathBuf,
    filesystem: SharedFilesystem,
    threshold: LogLevel,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>, filesystem: SharedFilesystem, threshold: LogLevel) -> Self {
        Self {
            path: path.into(),
            filesystem,
            threshold,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn append(&self, line: &str) -> ClikitResult<()> {
        let mut content = if self.filesystem.exists(&self.path) {
            self.filesystem.read_file(&self.path)?
        } else {
            String::new()
        };
        content.push_str(line);
        self.filesystem.write_file(&self.path, &content)
    }
}

/// One formatted log line, newline included.
pub fn format_line(level: LogLevel, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        level.label(),
        message
    )
}

impl Logger for FileLogger {
    fn try_log(&self, level: LogLevel, message: &str) -> Result<(), LogError> {
        if !level.passes(self.threshold) {
            return Ok(());
        }

        if let Err(e) = self.append(&format_line(level, message)) {
            warn!(error = %e, path = %self.path.display(), "log file write failed");
            eprintln!("Failed to write to log file: {e}");
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLogger")
            .field("path", &self.path)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
