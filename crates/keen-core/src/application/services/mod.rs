//! Application services - orchestrate use cases.
//!
//! There is one use case: create a project from the bundled template.

pub mod scaffold_service;

pub use scaffold_service::{ScaffoldReport, ScaffoldRequest, ScaffoldService};
