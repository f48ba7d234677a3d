//! Path guard - the idempotency gate.
//!
//! A read-only probe run before anything is created. It is the only
//! mechanism preventing double-provisioning; it performs no locking, so
//! two concurrent invocations against the same path remain a documented
//! hazard (both may pass before either writes the marker).

use std::path::Path;

use tracing::debug;

use crate::application::PipelineError;
use crate::domain::{TargetState, TemplateLayout};

/// Precondition checks on the target directory.
pub struct PathGuard;

impl PathGuard {
    /// Validate that `target` may be scaffolded into.
    ///
    /// Fails with [`PipelineError::AlreadyScaffolded`] if the scaffold
    /// marker is present, and [`PipelineError::PermissionDenied`] if the
    /// target (or, for an absent target, its parent) is not writable.
    /// Side effect: none.
    pub fn check(target: &Path, layout: &TemplateLayout) -> Result<TargetState, PipelineError> {
        let state = TargetState::probe(target, layout).map_err(|e| {
            PipelineError::PermissionDenied {
                path: target.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        debug!(target = %target.display(), %state, "target probed");

        if state == TargetState::OccupiedScaffold {
            return Err(PipelineError::AlreadyScaffolded {
                path: target.to_path_buf(),
                marker: layout.scaffold_marker.clone(),
            });
        }

        // Writability: probe the directory itself, or the parent when the
        // pipeline will be the one creating it. The pipeline never creates
        // directories above the target.
        let probe_path = if state.is_absent() {
            match target.parent().filter(|p| !p.as_os_str().is_empty()) {
                Some(parent) if parent.exists() => parent,
                _ => {
                    return Err(PipelineError::PermissionDenied {
                        path: target.to_path_buf(),
                        reason: "parent directory does not exist".into(),
                    });
                }
            }
        } else {
            target
        };

        let metadata =
            std::fs::metadata(probe_path).map_err(|e| PipelineError::PermissionDenied {
                path: probe_path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if metadata.permissions().readonly() {
            return Err(PipelineError::PermissionDenied {
                path: probe_path.to_path_buf(),
                reason: "directory is read-only".into(),
            });
        }

        Ok(state)
    }
}
