//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from the outside world.
//! The `keen-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{PackageManager, PlanStep, TemplateKind};
use crate::error::ScaffoldResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `keen_adapters::filesystem::LocalFilesystem` (production)
/// - `keen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all missing parents. Succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> ScaffoldResult<()>;

    /// Direct children of a directory, in whatever order the backend yields.
    fn list_dir(&self, path: &Path) -> ScaffoldResult<Vec<PathBuf>>;

    /// Recursively copy the contents of `src` into `dest`, mirroring its
    /// structure and file bytes. Returns the number of files copied.
    fn copy_tree(&self, src: &Path, dest: &Path) -> ScaffoldResult<usize>;

    /// Read a whole file as text. Invalid UTF-8 sequences become U+FFFD.
    fn read_to_string(&self, path: &Path) -> ScaffoldResult<String>;

    /// Write `content` over the file at `path`.
    fn write_file(&self, path: &Path, content: &str) -> ScaffoldResult<()>;

    /// Rename within the same parent directory.
    fn rename(&self, from: &Path, to: &Path) -> ScaffoldResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for locating the bundled template trees.
///
/// Implemented by `keen_adapters::BundledTemplates`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateCatalog: Send + Sync {
    /// Directory holding the template for `kind`. The path is not required to
    /// exist; the pipeline checks that before copying.
    fn locate(&self, kind: TemplateKind) -> PathBuf;
}

/// Port for installing dependencies in the generated project.
///
/// Implemented by `keen_adapters::ProcessInstaller`.
#[cfg_attr(test, mockall::automock)]
pub trait PackageInstaller: Send + Sync {
    /// Run the install command with `dir` as working directory and wait for it.
    fn install(&self, manager: PackageManager, dir: &Path) -> ScaffoldResult<()>;
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Prepare,
    Copy,
    Personalize,
    Install,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Prepare => "prepare",
            Self::Copy => "copy",
            Self::Personalize => "personalize",
            Self::Install => "install",
        };
        f.write_str(name)
    }
}

/// What happened to a single plan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    /// The file or directory the step targets is not part of this template.
    Skipped,
}

/// Port for progress reporting.
///
/// Every method has a no-op default so callers only override what they show.
pub trait ScaffoldObserver {
    fn stage_started(&self, _stage: Stage) {}

    fn stage_finished(&self, _stage: Stage) {}

    fn step_completed(&self, _step: &PlanStep, _outcome: StepOutcome) {}
}

/// Observer that reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScaffoldObserver for NoopObserver {}
