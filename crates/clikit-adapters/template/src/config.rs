//! Runtime configuration.
//!
//! Sources, lowest precedence first: defaults, the environment
//! (`LOG_LEVEL`, `LOG_FILE`, `VERBOSE`), then the global flags found in the
//! raw command line. The command line is scanned before clap runs so the
//! logger exists by the time commands are dispatched.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const NAMES: [&'static str; 4] = ["debug", "info", "warn", "error"];

    pub fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

impl FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(AppError::Configuration(format!(
                "unknown log level '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Configuration {
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

pub struct ConfigurationService {
    env: EnvLookup,
}

impl Default for ConfigurationService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationService {
    pub fn new() -> Self {
        Self::with_env(|key| std::env::var(key).ok())
    }

    pub fn with_env(lookup: impl Fn(&str) -> Option<String> + 'static) -> Self {
        Self {
            env: Box::new(lookup),
        }
    }

    /// Merge every source and validate the result.
    pub fn load(&self, args: &[String]) -> AppResult<Configuration> {
        let mut raw = match serde_json::to_value(Configuration::default()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let non_empty = |key: &str| (self.env)(key).filter(|v| !v.is_empty());
        if let Some(level) = non_empty("LOG_LEVEL") {
            raw.insert("logLevel".into(), Value::String(level));
        }
        if let Some(file) = non_empty("LOG_FILE") {
            raw.insert("logFile".into(), Value::String(file));
        }
        if (self.env)("VERBOSE").as_deref() == Some("true") {
            raw.insert("verbose".into(), Value::Bool(true));
        }
        scan_args(&mut raw, args);

        Configuration::deserialize(Value::Object(raw))
            .map_err(|e| AppError::Configuration(format!("Failed to load configuration: {e}")))
    }
}

fn scan_args(raw: &mut Map<String, Value>, args: &[String]) {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_owned())),
            _ => (arg.as_str(), None),
        };

        match flag {
            "--log-level" => {
                let value = inline.or_else(|| iter.next().cloned());
                if let Some(level) = value.filter(|v| v.parse::<LogLevel>().is_ok()) {
                    raw.insert("logLevel".into(), Value::String(level));
                }
            }
            "--log-file" | "-l" => {
                if let Some(file) = inline.or_else(|| iter.next().cloned()) {
                    raw.insert("logFile".into(), Value::String(file));
                }
            }
            "--verbose" | "-v" => {
                raw.insert("verbose".into(), Value::Bool(true));
            }
            _ => {}
        }
    }
}
