//! Core domain layer for clikit.
//!
//! Pure values and rules with no I/O: the configuration record, log
//! levels, echo options, generator answers, the template tree and the
//! substitution rules applied to it. Everything that touches the outside
//! world goes through the ports in the application layer.

pub mod configuration;
pub mod echo;
pub mod error;
pub mod log_level;
pub mod project;
pub mod substitution;
pub mod template;

pub use configuration::Configuration;
pub use echo::{EchoOptions, MAX_REPEAT, MIN_REPEAT};
pub use error::{DomainError, ErrorCategory};
pub use log_level::LogLevel;
pub use project::{DEFAULT_DESCRIPTION, ProjectAnswers, default_command_name, validate_command_name};
pub use substitution::{FileRewrite, Replace, Substitution, rewrites_for};
pub use template::{RelativePath, TemplateFile, TemplateTree};
