use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::log_level::LogLevel;

/// Validated runtime configuration of the application skeleton.
///
/// Field names serialise in camelCase (`logLevel`, `logFile`, `verbose`);
/// that is the shape the loader merges and validates. Unknown keys are
/// ignored, missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    #[serde(default)]
    pub verbose: bool,
}

impl Configuration {
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
