//! Application layer for Keen.
//!
//! This layer contains:
//! - **Services**: the scaffold pipeline (`ScaffoldService`)
//! - **Ports**: trait definitions for the filesystem, template catalog,
//!   package installer and progress reporting
//! - **Errors**: application-specific error types
//!
//! What gets rewritten and renamed is decided by `crate::domain`; this layer
//! only sequences it and talks to the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ScaffoldReport, ScaffoldRequest, ScaffoldService};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Filesystem, NoopObserver, PackageInstaller, ScaffoldObserver, Stage, StepOutcome,
    TemplateCatalog,
};

pub use error::ApplicationError;
