//! Scaffold pipeline - main application orchestrator.
//!
//! Sequences the provisioning stages over a target directory:
//!
//! ```text
//! Init → Guarded → Fetched → Extracted → Reconciled → Patched → Done
//!                     │            │            │          │
//!                     └────────────┴────────────┴──────────┴──→ Failed
//! ```
//!
//! Each transition invokes exactly one component; any failure transitions
//! to `Failed` and triggers rollback. The pipeline is the only component
//! permitted to delete the target directory, and it only does so when it
//! created the directory itself - a pre-existing directory is never
//! destroyed, its partial contents are left in place and the error notes
//! this asymmetry.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        PipelineError,
        guard::PathGuard,
        manifest::ManifestPatcher,
        ports::{ArchiveExtractor, ArchiveFetcher, PackageManagerPrompt, PromptOutcome},
        reconcile::TreeReconciler,
    },
    domain::{PackageManager, TemplateLayout},
    error::{ScaffoldError, ScaffoldResult},
};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Guarded,
    Fetched,
    Extracted,
    Reconciled,
    Patched,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Init => "init",
            Self::Guarded => "guard",
            Self::Fetched => "fetch",
            Self::Extracted => "extract",
            Self::Reconciled => "reconcile",
            Self::Patched => "patch",
            Self::Done => "done",
        };
        f.write_str(s)
    }
}

/// Cooperative cancellation handle.
///
/// Checked between stages; the pipeline never interrupts a stage that has
/// already started. Callers wire this to their interrupt handling (the
/// core deliberately installs no signal handlers).
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation at the next stage boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything the pipeline needs to provision one target directory.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    /// Directory the project is provisioned into.
    pub target_dir: PathBuf,
    /// HTTPS URL of the gzip-compressed template tarball.
    pub archive_url: String,
    /// Preselected package manager offered to the prompt.
    pub package_manager: Option<PackageManager>,
    /// Template layout naming. Defaults cover the canonical template.
    pub layout: TemplateLayout,
}

impl ScaffoldRequest {
    pub fn new(target_dir: impl Into<PathBuf>, archive_url: impl Into<String>) -> Self {
        Self {
            target_dir: target_dir.into(),
            archive_url: archive_url.into(),
            package_manager: None,
            layout: TemplateLayout::default(),
        }
    }

    pub fn with_package_manager(mut self, pm: Option<PackageManager>) -> Self {
        self.package_manager = pm;
        self
    }
}

/// Structured success result handed back to the caller for reporting.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    /// Final project path.
    pub project_dir: PathBuf,
    /// Package manager the user selected.
    pub package_manager: PackageManager,
    /// Files written, relative to the project root, sorted.
    pub files: Vec<PathBuf>,
}

/// Main scaffolding pipeline.
///
/// Owns the driven ports and the rollback-on-failure policy.
pub struct ScaffoldPipeline {
    fetcher: Box<dyn ArchiveFetcher>,
    extractor: Box<dyn ArchiveExtractor>,
    prompt: Box<dyn PackageManagerPrompt>,
    cancel: CancelFlag,
}

impl ScaffoldPipeline {
    /// Create a new pipeline with the given adapters.
    pub fn new(
        fetcher: Box<dyn ArchiveFetcher>,
        extractor: Box<dyn ArchiveExtractor>,
        prompt: Box<dyn PackageManagerPrompt>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            prompt,
            cancel: CancelFlag::new(),
        }
    }

    /// Handle callers use to request cancellation between stages.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Provision a project into `request.target_dir`.
    ///
    /// This is the main use case. On success the target directory holds a
    /// flat project root; on failure a directory this run created is
    /// removed entirely so a retry starts from a clean state.
    #[instrument(skip_all, fields(target = %request.target_dir.display()))]
    pub fn run(&self, request: &ScaffoldRequest) -> ScaffoldResult<ScaffoldReport> {
        // Selection happens before any filesystem effect: backing out of
        // the prompt must leave nothing to clean up.
        let package_manager = match self.prompt.select(request.package_manager) {
            PromptOutcome::Selected(pm) => pm,
            PromptOutcome::Cancelled => return Err(PipelineError::Cancelled.into()),
            PromptOutcome::Failed(reason) => {
                return Err(PipelineError::PromptFailed { reason }.into());
            }
        };
        debug!(%package_manager, "package manager selected");

        // Guard failures need no rollback - nothing was created yet.
        let state = PathGuard::check(&request.target_dir, &request.layout)?;
        info!(stage = %Stage::Guarded, %state, "target accepted");

        let created = state.is_absent();
        if created {
            fs::create_dir(&request.target_dir).map_err(|e| PipelineError::PermissionDenied {
                path: request.target_dir.clone(),
                reason: e.to_string(),
            })?;
        }

        match self.execute(request) {
            Ok(()) => {
                let files = list_files(&request.target_dir).map_err(|e| {
                    // Reporting failed after a complete scaffold; treat it
                    // like any other filesystem failure.
                    self.rollback(&request.target_dir, created);
                    ScaffoldError::from(e)
                })?;
                info!(stage = %Stage::Done, files = files.len(), "scaffold completed");
                Ok(ScaffoldReport {
                    project_dir: request.target_dir.clone(),
                    package_manager,
                    files,
                })
            }
            Err(e) => {
                if !matches!(e, PipelineError::Cancelled) {
                    error!(stage = %e.stage(), error = %e, "scaffolding failed");
                }
                self.rollback(&request.target_dir, created);
                Err(e.into())
            }
        }
    }

    /// The fallible stage sequence, `Guarded → Patched`.
    fn execute(&self, request: &ScaffoldRequest) -> Result<(), PipelineError> {
        self.checkpoint()?;
        let archive = self
            .fetcher
            .fetch(&request.archive_url, &request.target_dir)?;
        info!(stage = %Stage::Fetched, archive = %archive.display(), "template downloaded");

        self.checkpoint()?;
        self.extractor.extract(&archive, &request.target_dir)?;
        info!(stage = %Stage::Extracted, "archive unpacked");

        self.checkpoint()?;
        TreeReconciler::reconcile(&request.target_dir, &request.layout)?;
        info!(stage = %Stage::Reconciled, "template tree flattened");

        self.checkpoint()?;
        ManifestPatcher::patch(&request.target_dir, &request.layout)?;
        info!(stage = %Stage::Patched, "manifest patched");

        Ok(())
    }

    /// Honour a pending cancellation at a stage boundary.
    fn checkpoint(&self) -> Result<(), PipelineError> {
        if self.cancel.is_cancelled() {
            Err(PipelineError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Best-effort rollback on failure or cancellation.
    ///
    /// Only a directory this run created is deleted; a pre-existing target
    /// is left as-is (destroying user data the pipeline did not create is
    /// not permitted).
    fn rollback(&self, target: &Path, created: bool) {
        if !created {
            info!(path = %target.display(), "pre-existing directory left in place");
            return;
        }
        if let Err(e) = fs::remove_dir_all(target) {
            warn!(path = %target.display(), error = %e, "rollback failed");
        } else {
            info!(path = %target.display(), "target restored to pre-invocation state");
        }
    }
}

/// List every file under `root`, relative and sorted.
fn list_files(root: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.map_err(|e| PipelineError::Reconciliation {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }
    }
    files.sort();
    Ok(files)
}
