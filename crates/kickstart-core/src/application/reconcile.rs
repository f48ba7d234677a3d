//! Tree reconciliation.
//!
//! Collapses the two-level template layout into a flat project root:
//! the nested subtree (`core/`) is authoritative, auxiliary top-level
//! folders are discarded, and known lock files never survive. All moves
//! are last-writer-wins by name; file contents are never merged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::PipelineError;
use crate::domain::TemplateLayout;

/// A single planned move, relative to the target root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMove {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Ordered list of moves derived from the nested subtree.
///
/// Every move is an unconditional overwrite: the nested subtree is
/// authoritative, so no conflict detection or backup is produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    pub moves: Vec<FileMove>,
}

impl ReconciliationPlan {
    /// Derive the plan by listing the nested subtree's top-level entries.
    ///
    /// An absent subtree yields an empty plan (the reconciler is then a
    /// no-op apart from lock-file purging).
    pub fn derive(target: &Path, layout: &TemplateLayout) -> Result<Self, PipelineError> {
        let core = layout.core_path(target);
        if !core.exists() {
            return Ok(Self::default());
        }

        let mut moves = Vec::new();
        for entry in fs::read_dir(&core).map_err(|e| reconcile_err(&core, e))? {
            let entry = entry.map_err(|e| reconcile_err(&core, e))?;
            let name = entry.file_name();
            moves.push(FileMove {
                source: PathBuf::from(&layout.core_dir).join(&name),
                dest: PathBuf::from(&name),
            });
        }
        // Deterministic order for reporting and tests; overwrite semantics
        // do not depend on it.
        moves.sort_by(|a, b| a.source.cmp(&b.source));
        Ok(Self { moves })
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Merges the nested template subtree into the target root.
pub struct TreeReconciler;

impl TreeReconciler {
    /// Run the full reconciliation against `target`.
    ///
    /// 1. Create the staging area if absent.
    /// 2. Move every nested-subtree entry into staging (overwrite by name).
    /// 3. Delete every other top-level entry in `target`.
    /// 4. Promote staging entries into `target` (overwrite by name).
    /// 5. Delete the staging area - unconditionally, success or failure.
    /// 6. Purge known lock files.
    pub fn reconcile(target: &Path, layout: &TemplateLayout) -> Result<(), PipelineError> {
        // The merge is gated on the subtree's existence, not on the plan:
        // an existing-but-empty subtree is still authoritative and wipes
        // the auxiliary top level.
        if !layout.core_path(target).exists() {
            debug!(target = %target.display(), "no nested subtree; skipping merge");
        } else {
            let plan = ReconciliationPlan::derive(target, layout)?;
            let staging = layout.staging_path(target);
            let result = Self::merge(target, &plan, &staging);

            // The staging area never outlives reconciliation, even when the
            // merge failed halfway.
            if staging.exists() {
                if let Err(e) = fs::remove_dir_all(&staging) {
                    warn!(path = %staging.display(), error = %e, "failed to remove staging area");
                }
            }
            result?;
        }

        Self::purge_lock_files(target, layout)
    }

    fn merge(
        target: &Path,
        plan: &ReconciliationPlan,
        staging: &Path,
    ) -> Result<(), PipelineError> {
        if !staging.exists() {
            fs::create_dir(staging).map_err(|e| reconcile_err(staging, e))?;
        }

        // Nested subtree -> staging.
        for mv in &plan.moves {
            let from = target.join(&mv.source);
            let to = staging.join(&mv.dest);
            move_entry(&from, &to)?;
        }

        // Drop everything else at the top level: the emptied core dir, the
        // downloaded archive, auxiliary example folders.
        for entry in fs::read_dir(target).map_err(|e| reconcile_err(target, e))? {
            let entry = entry.map_err(|e| reconcile_err(target, e))?;
            let path = entry.path();
            if path == staging {
                continue;
            }
            remove_entry(&path)?;
        }

        // Staging -> target root.
        for mv in &plan.moves {
            let from = staging.join(&mv.dest);
            let to = target.join(&mv.dest);
            move_entry(&from, &to)?;
        }

        debug!(target = %target.display(), moves = plan.moves.len(), "nested subtree promoted");
        Ok(())
    }

    fn purge_lock_files(target: &Path, layout: &TemplateLayout) -> Result<(), PipelineError> {
        for name in &layout.lock_files {
            let path = target.join(name);
            if path.exists() {
                fs::remove_file(&path).map_err(|e| reconcile_err(&path, e))?;
                debug!(lock = %name, "stale lock file removed");
            }
        }
        Ok(())
    }
}

/// Move `from` to `to`, replacing any existing entry of the same name.
fn move_entry(from: &Path, to: &Path) -> Result<(), PipelineError> {
    if to.exists() {
        remove_entry(to)?;
    }
    fs::rename(from, to).map_err(|e| reconcile_err(from, e))
}

fn remove_entry(path: &Path) -> Result<(), PipelineError> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| reconcile_err(path, e))
}

fn reconcile_err(path: &Path, e: io::Error) -> PipelineError {
    PipelineError::Reconciliation {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
