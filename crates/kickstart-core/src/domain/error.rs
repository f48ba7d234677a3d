//! Domain-level errors: precondition failures checked before the pipeline
//! ever touches the filesystem.

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid template archive URL '{url}': {reason}")]
    InvalidArchiveUrl { url: String, reason: String },

    #[error("Unknown package manager '{name}'")]
    UnknownPackageManager { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use lowercase letters, digits, hyphens, and underscores".into(),
                "Start with a letter or digit".into(),
                "Examples: my-app, my_app, app123".into(),
            ],
            Self::InvalidArchiveUrl { url, .. } => vec![
                format!("Could not use '{}' as a template source", url),
                "Provide an https:// URL to a .tar.gz archive".into(),
                "Or a path to a local .tar.gz file".into(),
            ],
            Self::UnknownPackageManager { name } => vec![
                format!("'{}' is not a recognized package manager", name),
                "Supported: npm, pnpm, yarn, bun".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidArchiveUrl { .. }
            | Self::UnknownPackageManager { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
