//! Keen Core - project creation pipeline
//!
//! This crate holds the domain and application layers of
//! `keen-project-create`, in the same ports-and-adapters shape as the rest of
//! the workspace.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            keen-cli (CLI)               │
//! │   (argv + cwd captured into a request)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          ScaffoldService                │
//! │  prepare → copy → plan steps → install  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ Filesystem, TemplateCatalog, Installer, │
//! │          ScaffoldObserver               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    keen-adapters (Infrastructure)       │
//! │ LocalFilesystem, MemoryFilesystem, ...  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keen_core::{
//!     application::{NoopObserver, ScaffoldRequest, ScaffoldService},
//!     domain::Invocation,
//! };
//!
//! let invocation = Invocation::from_args(&["demo", "--type=vscode"]).unwrap();
//! let request = ScaffoldRequest::new(invocation, "/work");
//!
//! // Adapters come from keen-adapters.
//! let service = ScaffoldService::new(filesystem, catalog, installer);
//! service.scaffold(&request, &NoopObserver).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        NoopObserver, ScaffoldReport, ScaffoldRequest, ScaffoldService, Stage,
        ports::{Filesystem, PackageInstaller, ScaffoldObserver, TemplateCatalog},
    };
    pub use crate::domain::{
        Invocation, PackageManager, Placeholder, PlanStep, Replacements, ScaffoldPlan,
        TemplateKind,
    };
    pub use crate::error::{ScaffoldError, ScaffoldResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
