//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from external systems.
//! The `kickstart-adapters` crate provides the production implementations;
//! tests inject mocks.

use std::path::{Path, PathBuf};

use crate::application::PipelineError;
use crate::domain::PackageManager;

/// Port for retrieving a remote template archive.
///
/// Implemented by:
/// - `kickstart_adapters::fetcher::HttpArchiveFetcher` (production)
/// - `kickstart_adapters::fetcher::LocalArchiveFetcher` (offline/testing)
///
/// ## Design Notes
///
/// - The archive is written *inside* `dest_dir` so that rollback by
///   directory deletion covers it.
/// - No internal retries: re-running the whole pipeline after rollback is
///   the retry mechanism.
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveFetcher: Send + Sync {
    /// Download `url` into `dest_dir`, returning the local archive path.
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, PipelineError>;
}

/// Port for unpacking a template archive.
///
/// Implemented by:
/// - `kickstart_adapters::extractor::TarGzExtractor` (production)
///
/// The archive is expected to contain exactly one wrapper directory whose
/// contents are extracted directly into `target` (strip-top-level policy).
/// A successful extraction consumes the archive file; on failure it is left
/// in place for the orchestrator's rollback to sweep up.
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveExtractor: Send + Sync {
    /// Unpack `archive` into `target`, stripping the wrapper directory.
    fn extract(&self, archive: &Path, target: &Path) -> Result<(), PipelineError>;
}

/// Outcome of a package-manager selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The user picked a package manager.
    Selected(PackageManager),
    /// The user backed out (Esc / Ctrl-C). Rolls the pipeline back like a
    /// failure but is reported as a cancellation.
    Cancelled,
    /// The prompt itself failed (no terminal, read error).
    Failed(String),
}

/// Port for choosing a package manager.
///
/// Modelled as a pluggable collaborator so the pipeline is testable
/// without a terminal. The CLI provides an interactive implementation;
/// a preset implementation covers `--package-manager` and `--yes`.
#[cfg_attr(test, mockall::automock)]
pub trait PackageManagerPrompt: Send + Sync {
    /// Ask for a package manager, offering `default` preselected.
    fn select(&self, default: Option<PackageManager>) -> PromptOutcome;
}

/// Prompt implementation that always answers with a fixed selection.
///
/// Used when the choice arrives via CLI flag or configuration and no
/// interaction is wanted.
#[derive(Debug, Clone, Copy)]
pub struct PresetPrompt {
    selection: PackageManager,
}

impl PresetPrompt {
    pub fn new(selection: PackageManager) -> Self {
        Self { selection }
    }
}

impl PackageManagerPrompt for PresetPrompt {
    fn select(&self, _default: Option<PackageManager>) -> PromptOutcome {
        PromptOutcome::Selected(self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_prompt_ignores_default() {
        let prompt = PresetPrompt::new(PackageManager::Bun);
        assert_eq!(
            prompt.select(Some(PackageManager::Npm)),
            PromptOutcome::Selected(PackageManager::Bun)
        );
    }
}
