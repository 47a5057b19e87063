//! Application services - orchestrate use cases.
//!
//! The container wires services together, the configuration service
//! produces the runtime configuration, and the scaffold service writes new
//! projects.

pub mod configuration_service;
pub mod container;
pub mod scaffold_service;

pub use configuration_service::ConfigurationService;
pub use container::{Dependencies, Lifetime, ServiceContainer, ServiceDescriptor, ServiceKey};
pub use scaffold_service::{ScaffoldReport, ScaffoldService};
