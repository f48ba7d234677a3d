//! Template layout naming.
//!
//! A template archive is a snapshot of a repository with a two-level
//! layout: one nested subtree holding the canonical project files plus
//! auxiliary top-level folders (alternate example apps, docs). The names
//! below are deterministic and shared by every pipeline stage.

use std::path::{Path, PathBuf};

/// Names and locations the pipeline relies on inside a template tree.
///
/// The defaults describe the canonical template layout; tests override
/// individual fields to build synthetic trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    /// Nested subtree holding the canonical project files.
    pub core_dir: String,
    /// Staging area used during reconciliation. Exclusively owned by the
    /// reconciler; never survives a pipeline run.
    pub staging_dir: String,
    /// Project metadata file, relative to the target root.
    pub manifest_file: String,
    /// Manifest field pinning a package manager; cleared after the merge.
    pub package_manager_field: String,
    /// Sentinel file whose presence marks an already-provisioned directory.
    pub scaffold_marker: String,
    /// File name the downloaded tarball is stored under inside the target.
    pub archive_file: String,
    /// Lock files purged from the reconciled tree.
    pub lock_files: Vec<String>,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            core_dir: "core".into(),
            staging_dir: "temp".into(),
            manifest_file: "package.json".into(),
            package_manager_field: "packageManager".into(),
            scaffold_marker: "kickstart.config.ts".into(),
            archive_file: "template.tar.gz".into(),
            lock_files: vec![
                "package-lock.json".into(),
                "yarn.lock".into(),
                "pnpm-lock.yaml".into(),
                "bun.lockb".into(),
                "bun.lock".into(),
            ],
        }
    }
}

impl TemplateLayout {
    /// Path of the nested subtree inside `target`.
    pub fn core_path(&self, target: &Path) -> PathBuf {
        target.join(&self.core_dir)
    }

    /// Path of the staging area inside `target`.
    pub fn staging_path(&self, target: &Path) -> PathBuf {
        target.join(&self.staging_dir)
    }

    /// Path of the project manifest inside `target`.
    pub fn manifest_path(&self, target: &Path) -> PathBuf {
        target.join(&self.manifest_file)
    }

    /// Path of the scaffold marker inside `target`.
    pub fn marker_path(&self, target: &Path) -> PathBuf {
        target.join(&self.scaffold_marker)
    }

    /// Path the downloaded archive is stored at inside `target`.
    pub fn archive_path(&self, target: &Path) -> PathBuf {
        target.join(&self.archive_file)
    }
}
