//! Runtime configuration loading.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. Environment (`LOG_LEVEL`, `LOG_FILE`, `VERBOSE`)
//! 3. A pre-scan of the raw command line
//!
//! The pre-scan runs before clap so that logging can be configured before
//! the real parse. It only recognises the global logging flags and ignores
//! everything else.

use std::sync::RwLock;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::domain::{Configuration, LogLevel};
use crate::error::{ClikitError, ClikitResult};

pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "LOG_FILE";
pub const ENV_VERBOSE: &str = "VERBOSE";

const KEY_LOG_LEVEL: &str = "logLevel";
const KEY_LOG_FILE: &str = "logFile";
const KEY_VERBOSE: &str = "verbose";

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

pub struct ConfigurationService {
    config: RwLock<Configuration>,
    env: EnvLookup,
}

impl Default for ConfigurationService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationService {
    /// Service reading the process environment.
    pub fn new() -> Self {
        Self::with_env(|key| std::env::var(key).ok())
    }

    /// Service reading the environment through `lookup`.
    pub fn with_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            config: RwLock::new(Configuration::default()),
            env: Box::new(lookup),
        }
    }

    /// Merge all sources, validate, and keep the result for [`get`](Self::get).
    #[instrument(skip_all, fields(args = cli_args.map_or(0, <[String]>::len)))]
    pub fn load(&self, cli_args: Option<&[String]>) -> ClikitResult<Configuration> {
        let mut raw = match serde_json::to_value(Configuration::default()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        self.merge_environment(&mut raw);
        if let Some(args) = cli_args {
            merge_cli_args(&mut raw, args);
        }
        let merged = Value::Object(raw);
        debug!(raw = %merged, "merged configuration sources");

        let config = self.validate(&merged).map_err(|e| {
            ClikitError::configuration(format!("Failed to load configuration: {}", reason(&e)))
        })?;

        match self.config.write() {
            Ok(mut current) => *current = config.clone(),
            Err(poisoned) => *poisoned.into_inner() = config.clone(),
        }
        Ok(config)
    }

    /// The most recently loaded configuration, or the defaults.
    pub fn get(&self) -> Configuration {
        match self.config.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Validate an arbitrary value against the configuration shape.
    pub fn validate(&self, raw: &Value) -> ClikitResult<Configuration> {
        Configuration::deserialize(raw).map_err(|e| {
            ClikitError::configuration(format!("Configuration validation failed: {e}"))
        })
    }

    fn merge_environment(&self, raw: &mut Map<String, Value>) {
        let non_empty = |key: &str| (self.env)(key).filter(|v| !v.is_empty());

        if let Some(level) = non_empty(ENV_LOG_LEVEL) {
            raw.insert(KEY_LOG_LEVEL.into(), Value::String(level));
        }
        if let Some(file) = non_empty(ENV_LOG_FILE) {
            raw.insert(KEY_LOG_FILE.into(), Value::String(file));
        }
        if (self.env)(ENV_VERBOSE).as_deref() == Some("true") {
            raw.insert(KEY_VERBOSE.into(), Value::Bool(true));
        }
    }
}

fn reason(err: &ClikitError) -> String {
    match err {
        ClikitError::Configuration { message } => message.clone(),
        other => other.to_string(),
    }
}

/// Apply the global logging flags found in `args`.
///
/// `--log-level` is taken only when its value is a known level; a bad value
/// is left for clap to reject. Value-taking flags always consume the next
/// argument.
fn merge_cli_args(raw: &mut Map<String, Value>, args: &[String]) {
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
                    raw.insert(KEY_LOG_LEVEL.into(), Value::String(level));
                }
            }
            "--log-file" | "-l" => {
                if let Some(file) = inline.or_else(|| iter.next().cloned()) {
                    raw.insert(KEY_LOG_FILE.into(), Value::String(file));
                }
            }
            "--verbose" | "-v" => {
                raw.insert(KEY_VERBOSE.into(), Value::Bool(true));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn service(vars: &[(&str, &str)]) -> ConfigurationService {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigurationService::with_env(move |key| vars.get(key).cloned())
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_sources() {
        let config = service(&[]).load(None).unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let svc = service(&[
            ("LOG_LEVEL", "debug"),
            ("LOG_FILE", "/tmp/x.log"),
            ("VERBOSE", "true"),
        ]);
        let config = svc.load(None).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/x.log")));
        assert!(config.verbose);
        assert_eq!(svc.get(), config);
    }

    #[test]
    fn verbose_requires_exact_true() {
        let config = service(&[("VERBOSE", "1")]).load(None).unwrap();
        assert!(!config.verbose);
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let config = service(&[("LOG_LEVEL", ""), ("LOG_FILE", "")])
            .load(None)
            .unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn invalid_environment_level_is_a_configuration_error() {
        let err = service(&[("LOG_LEVEL", "loud")]).load(None).unwrap_err();
        assert!(matches!(err, ClikitError::Configuration { .. }));
        assert!(err.to_string().contains("Failed to load configuration"));
    }

    #[test]
    fn cli_overrides_environment() {
        let svc = service(&[("LOG_LEVEL", "debug"), ("LOG_FILE", "env.log")]);
        let argv = args(&["echo", "--log-level", "error", "-l", "cli.log", "-v"]);
        let config = svc.load(Some(&argv)).unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.log_file, Some(PathBuf::from("cli.log")));
        assert!(config.verbose);
    }

    #[test]
    fn cli_level_fixes_bad_environment_level() {
        let argv = args(&["--log-level", "warn"]);
        let config = service(&[("LOG_LEVEL", "loud")])
            .load(Some(&argv))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn unknown_cli_level_is_ignored_but_consumed() {
        let argv = args(&["--log-level", "--verbose"]);
        let config = service(&[]).load(Some(&argv)).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.verbose);
    }

    #[test]
    fn equals_forms_are_recognised() {
        let argv = args(&["--log-level=debug", "--log-file=app.log"]);
        let config = service(&[]).load(Some(&argv)).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("app.log")));
    }

    #[test]
    fn trailing_value_flag_is_ignored() {
        let argv = args(&["--log-file"]);
        let config = service(&[]).load(Some(&argv)).unwrap();
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn validate_rejects_bad_shapes() {
        let svc = service(&[]);
        assert!(svc.validate(&json!({ "logLevel": "warn" })).is_ok());

        let err = svc.validate(&json!({ "verbose": "yes" })).unwrap_err();
        assert!(
            err.to_string()
                .contains("Configuration validation failed")
        );
    }
}
