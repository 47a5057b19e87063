//! Application layer for clikit.
//!
//! This layer contains:
//! - **Services**: the service container, configuration loading and project scaffolding
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ConfigurationService, Dependencies, Lifetime, ScaffoldReport, ScaffoldService,
    ServiceContainer, ServiceDescriptor, ServiceKey,
};

pub use error::{ApplicationError, LogError};
