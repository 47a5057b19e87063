use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Severity of a log call, and the threshold a destination filters with.
///
/// Variants are declared in rank order so the derived `Ord` matches the
/// hierarchy `debug < info < warn < error`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
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
    pub const ALL: [LogLevel; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Position in the severity hierarchy (debug=0 .. error=3).
    pub const fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
        }
    }

    /// `true` if a call at this level passes a destination set to `threshold`.
    pub const fn passes(self, threshold: LogLevel) -> bool {
        self.rank() >= threshold.rank()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Upper-case tag used in log line prefixes.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// String names accepted on the command line and in `LOG_LEVEL`.
    pub fn names() -> [&'static str; 4] {
        Self::ALL.map(Self::as_str)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| DomainError::InvalidLogLevel { value: s.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_hierarchy() {
        let ranks: Vec<u8> = LogLevel::ALL.iter().map(|l| l.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(LogLevel::Debug < LogLevel::Error);
    }

    #[test]
    fn warn_threshold_drops_debug_and_info() {
        assert!(!LogLevel::Debug.passes(LogLevel::Warn));
        assert!(!LogLevel::Info.passes(LogLevel::Warn));
        assert!(LogLevel::Warn.passes(LogLevel::Warn));
        assert!(LogLevel::Error.passes(LogLevel::Warn));
    }

    #[test]
    fn parsing_is_exact() {
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        // matching is case sensitive, like the schema
        assert!("WARN".parse::<LogLevel>().is_err());
        assert!("fatal".parse::<LogLevel>().is_err());
    }

    #[test]
    fn default_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
