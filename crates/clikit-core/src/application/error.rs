//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No provider registered for the requested type.
    #[error("Service not registered: {service}")]
    ServiceNotFound { service: &'static str },

    /// A provider produced (or a constructor asked for) the wrong type.
    #[error("Service type mismatch: expected {expected}, found {found}")]
    ServiceTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Resolution re-entered a service that is still being constructed.
    #[error("Dependency cycle detected: {chain}")]
    DependencyCycle { chain: String },

    /// A constructor asked for more dependencies than it declared.
    #[error("Missing dependency for {service}: {dependency}")]
    MissingDependency {
        service: &'static str,
        dependency: &'static str,
    },

    /// Container state lock poisoned.
    #[error("Service container lock poisoned")]
    ContainerLockError,

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Directory {path} already exists")]
    ProjectExists { path: PathBuf },

    /// A file the substitution rules rewrite is missing from the template.
    #[error("Template is missing {path}")]
    TemplateFileMissing { path: String },

    /// The template tree could not be read.
    #[error("Failed to load template: {reason}")]
    TemplateLoad { reason: String },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ServiceNotFound { service } => vec![
                format!("Register {service} in the bootstrapper before resolving it"),
            ],
            Self::DependencyCycle { .. } => vec![
                "Break the cycle by registering one of the services as an instance".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Remove {} or choose a different folder name", path.display()),
            ],
            Self::TemplateFileMissing { path } => vec![
                format!("Add {path} to the template directory"),
                "Omit --template-dir to use the built-in template".into(),
            ],
            Self::TemplateLoad { .. } => vec![
                "Check that --template-dir points to a readable directory".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("Remove {} manually", path.display()),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ServiceNotFound { .. } | Self::TemplateFileMissing { .. } => {
                ErrorCategory::NotFound
            }
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::TemplateLoad { .. } => ErrorCategory::Configuration,
            Self::ServiceTypeMismatch { .. }
            | Self::DependencyCycle { .. }
            | Self::MissingDependency { .. }
            | Self::ContainerLockError
            | Self::FilesystemError { .. }
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}

/// Failure of a logging destination.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LogError {
    #[error("Failed to write to {destination}: {reason}")]
    Write { destination: String, reason: String },

    /// One or more destinations of a composite logger failed. Every
    /// destination was still invoked.
    #[error("{} log destination(s) failed: {}", .failures.len(), join(.failures))]
    Fanout { failures: Vec<LogError> },
}

impl LogError {
    pub fn write(destination: impl Into<String>, reason: impl ToString) -> Self {
        Self::Write {
            destination: destination.into(),
            reason: reason.to_string(),
        }
    }
}

fn join(failures: &[LogError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fanout_lists_every_failure() {
        let err = LogError::Fanout {
            failures: vec![
                LogError::write("stdout", "closed"),
                LogError::write("app.log", "denied"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "2 log destination(s) failed: Failed to write to stdout: closed; \
             Failed to write to app.log: denied"
        );
    }

    #[test]
    fn project_exists_message() {
        let err = ApplicationError::ProjectExists {
            path: PathBuf::from("demo"),
        };
        assert_eq!(err.to_string(), "Directory demo already exists");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
