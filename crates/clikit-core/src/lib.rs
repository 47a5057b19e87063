//! Clikit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the clikit
//! application skeleton and project generator, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           clikit-cli (CLI)              │
//! │  (Application shell, commands, clap)    │
//! └──────────────────┬──────────────────────┘
//!                    │ resolves from
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ServiceContainer, ConfigurationService,│
//! │            ScaffoldService)             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Filesystem, Logger, Template)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     clikit-adapters (Infrastructure)    │
//! │ (LocalFilesystem, ConsoleLogger, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (LogLevel, Configuration, EchoOptions,  │
//! │   ProjectAnswers, TemplateTree)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use clikit_core::prelude::*;
//!
//! let container = ServiceContainer::new();
//! container.register_instance(ConfigurationService::new())?;
//!
//! let service = container.resolve::<ConfigurationService>()?;
//! let config = service.load(None)?;
//! container.register_instance(config)?;
//!
//! assert!(container.has::<Configuration>());
//! # Ok::<(), ClikitError>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConfigurationService, Dependencies, Lifetime, ScaffoldReport, ScaffoldService,
        ServiceContainer, ServiceDescriptor, ServiceKey,
        ports::{
            Filesystem, Logger, SharedFilesystem, SharedLogger, SharedTemplateSource,
            TemplateSource,
        },
    };
    pub use crate::domain::{
        Configuration, EchoOptions, LogLevel, ProjectAnswers, RelativePath, TemplateFile,
        TemplateTree,
    };
    pub use crate::error::{ClikitError, ClikitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
