//! Infrastructure adapters for clikit.
//!
//! This crate implements the ports defined in `clikit-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod logging;
pub mod template_source;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use logging::{CompositeLogger, ConsoleLogger, FileLogger, LoggerFactory, LoggerKind};
pub use template_source::{DirectoryTemplate, EmbeddedTemplate};
