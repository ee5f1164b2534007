//! Application layer errors.
//!
//! These errors represent failures while carrying out the pipeline, as
//! opposed to an invalid invocation (`DomainError`).

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while creating a project.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The target directory already has entries in it.
    #[error("Target directory is not empty: {}", path.display())]
    TargetNotEmpty { path: PathBuf },

    /// The target directory could not be created or listed.
    #[error("Failed creating target directory {}: {reason}", path.display())]
    TargetUnavailable { path: PathBuf, reason: String },

    /// The selected template directory does not exist.
    #[error("Template directory not found: {}", path.display())]
    TemplateMissing { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// The package manager exited with a non-zero status.
    #[error("{program} install failed")]
    InstallFailed { program: String, code: Option<i32> },

    /// The package manager could not be started at all.
    #[error("Failed to run {program}: {reason}")]
    InstallSpawnFailed { program: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TargetNotEmpty { path } => vec![
                format!("'{}' already contains files", path.display()),
                "Choose a different project name".into(),
                "Or empty the directory and run again".into(),
            ],
            Self::TargetUnavailable { path, .. } => vec![
                format!("Failed to prepare: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::TemplateMissing { .. } => vec![
                "The bundled templates could not be located".into(),
                "Pass --templates-dir <DIR> or set KEEN_TEMPLATES__ROOT".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check file permissions and available disk space".into(),
                "The target directory may be partially populated".into(),
            ],
            Self::InstallFailed { program, code } => {
                let mut out = vec!["Check the installer output above for details".into()];
                if let Some(code) = code {
                    out.push(format!("{program} exited with status {code}"));
                }
                out.push(format!("Re-run '{program} install' inside the project"));
                out
            }
            Self::InstallSpawnFailed { program, .. } => vec![
                format!("Ensure '{program}' is installed and in your PATH"),
                "Or pass --skip-install and install dependencies later".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TargetNotEmpty { .. } => ErrorCategory::Validation,
            Self::TemplateMissing { .. } => ErrorCategory::NotFound,
            Self::InstallFailed { .. } | Self::InstallSpawnFailed { .. } => {
                ErrorCategory::External
            }
            Self::TargetUnavailable { .. } | Self::FilesystemError { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
