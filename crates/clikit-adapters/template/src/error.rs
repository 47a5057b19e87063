use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Service not registered: {0}")]
    ServiceNotFound(&'static str),

    #[error("Circular dependency detected: {0}")]
    DependencyCycle(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Command {0} is already registered")]
    DuplicateCommand(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command {command} failed: {source}")]
    Command {
        command: String,
        #[source]
        source: Box<AppError>,
    },

    #[error(transparent)]
    Usage(#[from] clap::Error),
}

impl AppError {
    /// Process exit code. clap decides for usage errors (0 for help and
    /// version), everything else is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(err) => u8::try_from(err.exit_code()).unwrap_or(2),
            _ => 1,
        }
    }
}
