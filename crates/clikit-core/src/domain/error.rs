// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

use super::echo::{MAX_REPEAT, MIN_REPEAT};

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `ClikitError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration values
    // ========================================================================
    #[error("Invalid log level '{value}' (expected debug, info, warn or error)")]
    InvalidLogLevel { value: String },

    // ========================================================================
    // Echo options
    // ========================================================================
    #[error("Name is required")]
    EmptyEchoName,

    #[error("Repeat count '{value}' is not a whole number")]
    InvalidRepeat { value: String },

    #[error("Repeat count {value} is out of range (1-100)")]
    RepeatOutOfRange { value: i64 },

    // ========================================================================
    // Generator answers
    // ========================================================================
    #[error("Project name is required")]
    EmptyProjectName,

    #[error(
        "Command name '{value}' must contain only lowercase letters, numbers, and hyphens"
    )]
    InvalidCommandName { value: String },

    #[error("{field} may not contain {character:?}")]
    UnsupportedCharacter {
        field: &'static str,
        character: char,
    },

    // ========================================================================
    // Template tree
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidLogLevel { .. } => {
                vec!["Use one of: debug, info, warn, error".into()]
            }
            Self::EmptyEchoName => vec!["Pass a name: echo --name Ada".into()],
            Self::InvalidRepeat { .. } | Self::RepeatOutOfRange { .. } => vec![format!(
                "--repeat takes a whole number between {MIN_REPEAT} and {MAX_REPEAT}"
            )],
            Self::EmptyProjectName => vec!["Provide a project name or accept the default".into()],
            Self::InvalidCommandName { .. } => vec![
                "Examples: my-tool, greet, tool2".into(),
                "Pass it explicitly with --command-name".into(),
            ],
            Self::UnsupportedCharacter { .. } => vec![
                "Quotes, backslashes and line breaks are written verbatim into Cargo.toml and src/main.rs".into(),
            ],
            _ => vec!["The template itself is malformed; check --template-dir".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AbsolutePathNotAllowed { .. } | Self::DuplicatePath { .. } => {
                ErrorCategory::Internal
            }
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
