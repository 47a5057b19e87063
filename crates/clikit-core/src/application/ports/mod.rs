//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `clikit-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `Logger`: Application log destinations
//!   - `TemplateSource`: The project template tree

pub mod output;

pub use output::{
    Filesystem, Logger, SharedFilesystem, SharedLogger, SharedTemplateSource, TemplateSource,
};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateSource};
