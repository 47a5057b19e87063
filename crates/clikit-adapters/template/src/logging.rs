//! Logging facade: console and file destinations behind one composite.

use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::PathBuf;
use std::rc::Rc;

use crate::config::{Configuration, LogLevel};

pub trait Logger {
    fn log(&self, level: LogLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

pub type SharedLogger = Rc<dyn Logger>;

/// `[LEVEL] message`; debug and info on stdout, warn and error on stderr.
pub struct ConsoleLogger {
    threshold: LogLevel,
}

impl ConsoleLogger {
    pub fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if level < self.threshold {
            return;
        }
        match level {
            LogLevel::Debug | LogLevel::Info => println!("[{}] {message}", level.label()),
            LogLevel::Warn | LogLevel::Error => eprintln!("[{}] {message}", level.label()),
        }
    }
}

/// Appends timestamped lines to a file. Write failures go to stderr.
pub struct FileLogger {
    path: PathBuf,
    threshold: LogLevel,
}

impl FileLogger {
    pub fn new(path: PathBuf, threshold: LogLevel) -> Self {
        Self { path, threshold }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl Logger for FileLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if level < self.threshold {
            return;
        }
        let stamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        let line = format!("[{stamp}] [{}] {message}\n", level.label());
        if let Err(e) = self.append(&line) {
            eprintln!("Failed to write to log file {}: {e}", self.path.display());
        }
    }
}

/// Forwards every call to each destination in order.
#[derive(Default)]
pub struct CompositeLogger {
    loggers: Vec<SharedLogger>,
}

impl CompositeLogger {
    pub fn add_logger(&mut self, logger: SharedLogger) {
        self.loggers.push(logger);
    }
}

impl Logger for CompositeLogger {
    fn log(&self, level: LogLevel, message: &str) {
        for logger in &self.loggers {
            logger.log(level, message);
        }
    }
}

pub struct LoggerFactory;

impl LoggerFactory {
    /// Console destination, plus a file destination when a log file is set.
    pub fn composite(config: &Configuration) -> CompositeLogger {
        let mut composite = CompositeLogger::default();
        composite.add_logger(Rc::new(ConsoleLogger::new(config.log_level)));
        if let Some(path) = &config.log_file {
            composite.add_logger(Rc::new(FileLogger::new(path.clone(), config.log_level)));
        }
        composite
    }
}
