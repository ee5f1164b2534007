use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// The domain is small: the only rule it enforces on its own is that an
/// invocation names the project to create.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Missing project name")]
    MissingProjectName,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingProjectName => vec![
                "Usage: keen-project-create <project-name>".into(),
                "Example: keen-project-create my-agent".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingProjectName => ErrorCategory::Validation,
        }
    }
}
