//! Infrastructure adapters for keen-project-create.
//!
//! This crate implements the ports defined in `keen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod installer;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use installer::ProcessInstaller;
pub use templates::BundledTemplates;
