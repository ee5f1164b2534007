//! Application ports (traits) for external dependencies.
//!
//! - **Driven (Output) Ports**: called by the pipeline, implemented by
//!   infrastructure
//!   - `Filesystem`: file and directory operations
//!   - `TemplateCatalog`: where the bundled templates live
//!   - `PackageInstaller`: the dependency install subprocess
//!   - `ScaffoldObserver`: progress reporting

pub mod output;

pub use output::{
    Filesystem, NoopObserver, PackageInstaller, ScaffoldObserver, Stage, StepOutcome,
    TemplateCatalog,
};

#[cfg(test)]
pub use output::{MockFilesystem, MockPackageInstaller, MockTemplateCatalog};
