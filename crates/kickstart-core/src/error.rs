//! Unified error handling for Kickstart Core.
//!
//! This module provides a unified error type that wraps domain and pipeline
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::PipelineError;
use crate::domain::DomainError;

/// Root error type for Kickstart Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// kickstart-core, providing a unified interface for error handling.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Errors from the domain layer (precondition violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the pipeline (orchestration failures).
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ScaffoldError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Pipeline(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Kickstart".into(),
                "Please report this issue at: https://github.com/kickstart-dev/kickstart/issues"
                    .into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Pipeline(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error represents a user-initiated cancellation.
    ///
    /// Cancellations are reported differently from failures: no error log,
    /// only a rollback note and a dedicated exit code at the CLI boundary.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Pipeline(PipelineError::Cancelled))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Precondition,
    Network,
    Filesystem,
    Cancelled,
    Internal,
}

/// Convenient result type alias.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;
