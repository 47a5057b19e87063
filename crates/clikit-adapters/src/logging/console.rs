//! Console log destination.

use std::io::Write;
use std::sync::Mutex;

use console::Term;

use clikit_core::application::{LogError, ports::Logger};
use clikit_core::domain::LogLevel;

type Writer = Mutex<Box<dyn Write + Send>>;

/// Writes `[LEVEL] message` lines. Debug and info go to stdout, warn and
/// error to stderr.
pub struct ConsoleLogger {
    threshold: LogLevel,
    stdout: Writer,
    stderr: Writer,
}

impl ConsoleLogger {
    pub fn new(threshold: LogLevel) -> Self {
        Self::with_writers(threshold, Term::stdout(), Term::stderr())
    }

    /// Logger writing to arbitrary streams instead of the terminal.
    pub fn with_writers(
        threshold: LogLevel,
        stdout: impl Write + Send + 'static,
        stderr: impl Write + Send + 'static,
    ) -> Self {
        Self {
            threshold,
            stdout: Mutex::new(Box::new(stdout)),
            stderr: Mutex::new(Box::new(stderr)),
        }
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }
}

impl Logger for ConsoleLogger {
    fn try_log(&self, level: LogLevel, message: &str) -> Result<(), LogError> {
        if !level.passes(self.threshold) {
            return Ok(());
        }

        let (stream, name) = match level {
            LogLevel::Debug | LogLevel::Info => (&self.stdout, "stdout"),
            LogLevel::Warn | LogLevel::Error => (&self.stderr, "stderr"),
        };

        let mut writer = stream
            .lock()
            .map_err(|_| LogError::write(name, "writer lock poisoned"))?;
        writeln!(writer, "[{}] {}", level.label(), message)
            .and_then(|()| writer.flush())
            .map_err(|e| LogError::write(name, e))
    }
}

impl std::fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
