//! Error handling for the clikit binary.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;
use std::io;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use clikit_core::error::ClikitError;

pub use clikit_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from `clikit-core` or the adapters.
    #[error("{0}")]
    Core(#[from] ClikitError),

    /// Argument parsing stopped: bad usage, or `--help` / `--version`.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// A command failed inside the registry boundary.
    #[error("Command execution failed: {message}")]
    Command {
        command: String,
        message: String,
        #[source]
        source: Box<CliError>,
    },

    #[error("Command '{name}' is already registered")]
    DuplicateCommand { name: String },

    #[error("Unknown command '{name}'")]
    UnknownCommand { name: String },

    #[error("Invalid folder name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Directory {path} already exists")]
    DirectoryExists { path: PathBuf },

    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Wrap a failure raised while `command` was executing.
    pub fn command(command: impl Into<String>, source: CliError) -> Self {
        Self::Command {
            command: command.into(),
            message: source.to_string(),
            source: Box::new(source),
        }
    }

    /// Stable machine-readable identifier.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Core(_) => "core",
            Self::Usage(_) => "usage",
            Self::Command { .. } => "command-failed",
            Self::DuplicateCommand { .. } => "duplicate-command",
            Self::UnknownCommand { .. } => "unknown-command",
            Self::InvalidProjectName { .. } => "invalid-project-name",
            Self::DirectoryExists { .. } => "directory-exists",
            Self::Prompt { .. } => "prompt",
            Self::IoError { .. } => "io",
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core) => core.suggestions(),

            Self::Usage(_) => vec!["Use --help for usage information".into()],

            Self::Command { source, .. } => source.suggestions(),

            Self::DuplicateCommand { name } => vec![
                format!("Two commands were registered under the name '{name}'"),
                "Give each command descriptor a unique name".into(),
            ],

            Self::UnknownCommand { name } => vec![
                format!("No command named '{name}' is registered"),
                "Run with --help to list the available commands".into(),
            ],

            Self::InvalidProjectName { name, reason } => vec![
                format!("Folder name '{name}' is invalid: {reason}"),
                "Pass a folder name such as my-cli or ../tools/my-cli".into(),
            ],

            Self::DirectoryExists { path } => vec![
                "Choose a different folder name".into(),
                format!("Remove the existing directory: rm -rf {}", path.display()),
            ],

            Self::Prompt { .. } => vec![
                "Run in an interactive terminal, or pass --yes to accept defaults".into(),
                "Answers can also be given as flags, see clikit new --help".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get the error category for styling and logging.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Usage(_) => ErrorCategory::UserError,
            Self::Command { source, .. } => source.category(),
            Self::DuplicateCommand { .. } => ErrorCategory::Internal,
            Self::UnknownCommand { .. } => ErrorCategory::NotFound,
            Self::InvalidProjectName { .. } => ErrorCategory::UserError,
            Self::DirectoryExists { .. } => ErrorCategory::UserError,
            Self::Prompt { .. } => ErrorCategory::Internal,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// Usage errors keep clap's own code (0 for help and version, 2 for bad
    /// arguments). Every other failure is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(e) => u8::try_from(e.exit_code()).unwrap_or(1),
            _ => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Emit the error as a diagnostic event.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!(code = self.code(), "User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!(code = self.code(), "Not found: {}", self),
            ErrorCategory::Configuration => {
                tracing::error!(code = self.code(), "Configuration error: {}", self)
            }
            ErrorCategory::Internal => tracing::error!(code = self.code(), "Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clikit_core::application::ApplicationError;
    use clikit_core::domain::DomainError;

    fn usage(kind: ErrorKind) -> CliError {
        CliError::Usage(clap::Error::new(kind))
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn usage_errors_keep_clap_exit_code() {
        assert_eq!(usage(ErrorKind::MissingRequiredArgument).exit_code(), 2);
        assert_eq!(usage(ErrorKind::DisplayHelp).exit_code(), 0);
        assert_eq!(usage(ErrorKind::DisplayVersion).exit_code(), 0);
    }

    #[test]
    fn everything_else_exits_one() {
        let errors = [
            CliError::Core(ClikitError::Configuration {
                message: "bad".into(),
            }),
            CliError::DuplicateCommand { name: "echo".into() },
            CliError::DirectoryExists {
                path: PathBuf::from("demo"),
            },
            CliError::command("echo", CliError::Core(DomainError::EmptyEchoName.into())),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }

    // ── messages & categories ─────────────────────────────────────────────

    #[test]
    fn command_error_carries_inner_message() {
        let inner = CliError::Core(DomainError::RepeatOutOfRange { value: 0 }.into());
        let inner_text = inner.to_string();
        let err = CliError::command("echo", inner);

        assert_eq!(err.to_string(), format!("Command execution failed: {inner_text}"));
        assert_eq!(err.category(), ErrorCategory::UserError);
        assert_eq!(err.code(), "command-failed");
        assert!(err.source().is_some());
    }

    #[test]
    fn directory_exists_message() {
        let err = CliError::DirectoryExists {
            path: PathBuf::from("demo"),
        };
        assert_eq!(err.to_string(), "Directory demo already exists");
        assert!(err.suggestions().iter().any(|s| s.contains("rm -rf demo")));
    }

    #[test]
    fn core_categories_map_across() {
        let not_found = CliError::Core(
            ApplicationError::ServiceNotFound {
                service: "Logger",
            }
            .into(),
        );
        assert_eq!(not_found.category(), ErrorCategory::NotFound);

        let config = CliError::Core(ClikitError::Configuration {
            message: "x".into(),
        });
        assert_eq!(config.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn io_errors_convert() {
        let err: CliError = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, CliError::IoError { .. }));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::DirectoryExists {
            path: PathBuf::from("/tmp/x"),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error: Directory /tmp/x already exists"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_causes_and_omits_hint() {
        let err = CliError::command("new", CliError::Prompt {
            message: "not a terminal".into(),
        });
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: Prompt failed: not a terminal"));
        assert!(!s.contains("--verbose for more"));
    }
}
