//! Unified error handling for Keen Core.
//!
//! Wraps domain and application errors behind one type that carries
//! user-actionable suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Keen Core operations.
#[derive(Debug, Error, Clone)]
pub enum ScaffoldError {
    /// Errors from the domain layer (invalid invocation).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (filesystem, template, install).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl ScaffoldError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input or a violated precondition; the user can fix it.
    Validation,
    /// Something the tool needs is missing.
    NotFound,
    /// An external tool failed.
    External,
    /// Filesystem or other system failure.
    Internal,
}

/// Convenient result type alias.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn domain_error_is_validation() {
        let err = ScaffoldError::from(DomainError::MissingProjectName);
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("Usage")));
    }

    #[test]
    fn display_is_transparent() {
        let err = ScaffoldError::from(ApplicationError::TargetNotEmpty {
            path: PathBuf::from("/tmp/demo"),
        });
        assert_eq!(err.to_string(), "Target directory is not empty: /tmp/demo");
    }
}
