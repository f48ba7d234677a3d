//! Pipeline errors.
//!
//! These errors represent orchestration failures, one variant per failure
//! kind so the CLI can map them to categories and exit codes without
//! string matching. Precondition errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::pipeline::Stage;
use crate::error::ErrorCategory;

/// Errors that occur while the scaffolding pipeline is running.
#[derive(Debug, Error, Clone)]
pub enum PipelineError {
    /// The target directory already carries a scaffold marker.
    #[error("'{path}' is already scaffolded (found {marker})")]
    AlreadyScaffolded { path: PathBuf, marker: String },

    /// The target directory (or its parent) is not writable.
    #[error("cannot write to '{path}': {reason}")]
    PermissionDenied { path: PathBuf, reason: String },

    /// Archive retrieval failed: transport error or non-success status.
    #[error("failed to download template from '{url}': {reason}")]
    Network { url: String, reason: String },

    /// The archive could not be decompressed or unpacked.
    #[error("failed to extract '{archive}': {reason}")]
    Extraction { archive: PathBuf, reason: String },

    /// A move/delete during tree reconciliation failed.
    #[error("failed to reconcile template tree at '{path}': {reason}")]
    Reconciliation { path: PathBuf, reason: String },

    /// The project manifest could not be read, parsed, or rewritten.
    #[error("failed to patch manifest '{path}': {reason}")]
    ManifestPatch { path: PathBuf, reason: String },

    /// The package-manager prompt failed to produce input.
    #[error("package manager selection failed: {reason}")]
    PromptFailed { reason: String },

    /// The user interrupted the run. Not a failure: reported without an
    /// error log, with its own exit code at the CLI boundary.
    #[error("operation cancelled")]
    Cancelled,
}

impl PipelineError {
    /// The pipeline stage this error belongs to, for one-line reporting
    /// at the orchestrator boundary.
    pub fn stage(&self) -> Stage {
        match self {
            Self::AlreadyScaffolded { .. } | Self::PermissionDenied { .. } => Stage::Guarded,
            Self::Network { .. } => Stage::Fetched,
            Self::Extraction { .. } => Stage::Extracted,
            Self::Reconciliation { .. } => Stage::Reconciled,
            Self::ManifestPatch { .. } => Stage::Patched,
            Self::PromptFailed { .. } | Self::Cancelled => Stage::Init,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyScaffolded { path, .. } => vec![
                format!("'{}' was already provisioned by kickstart", path.display()),
                "Choose a different target directory".into(),
                "Or remove the existing one if you want a fresh scaffold".into(),
            ],
            Self::PermissionDenied { path, .. } => vec![
                format!("Cannot write to: {}", path.display()),
                "Check directory permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::Network { .. } => vec![
                "Check your network connection".into(),
                "The template host may be temporarily unavailable".into(),
                "Re-run the command; the target was restored to a clean state".into(),
            ],
            Self::Extraction { .. } => vec![
                "The downloaded archive appears corrupt or unsupported".into(),
                "Only gzip-compressed tar archives are supported".into(),
                "Re-run the command to download a fresh copy".into(),
            ],
            Self::Reconciliation { path, .. } => vec![
                format!("A filesystem operation failed under: {}", path.display()),
                "Check permissions and available disk space".into(),
            ],
            Self::ManifestPatch { path, .. } => vec![
                format!("Could not rewrite: {}", path.display()),
                "The template's package.json may be malformed".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Pass --package-manager to skip the interactive prompt".into(),
            ],
            Self::Cancelled => vec![
                "Operation was cancelled".into(),
                "No partial scaffold was left behind".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyScaffolded { .. } => ErrorCategory::Precondition,
            Self::PermissionDenied { .. } => ErrorCategory::Filesystem,
            Self::Network { .. } => ErrorCategory::Network,
            Self::Extraction { .. } | Self::Reconciliation { .. } | Self::ManifestPatch { .. } => {
                ErrorCategory::Filesystem
            }
            Self::PromptFailed { .. } => ErrorCategory::Validation,
            Self::Cancelled => ErrorCategory::Cancelled,
        }
    }
}
