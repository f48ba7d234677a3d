//! End-to-end pipeline properties, driven through fake adapters that
//! synthesize extracted template trees on the real filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use kickstart_core::{
    application::{PipelineError, ScaffoldPipeline, ScaffoldRequest, ports::*},
    domain::PackageManager,
    error::ScaffoldError,
};

// ── fake adapters ─────────────────────────────────────────────────────────────

/// Writes a placeholder archive into the target, or fails like a dead link.
struct FakeFetcher {
    fail: bool,
}

impl ArchiveFetcher for FakeFetcher {
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, PipelineError> {
        if self.fail {
            return Err(PipelineError::Network {
                url: url.to_string(),
                reason: "connection reset".into(),
            });
        }
        let path = dest_dir.join("template.tar.gz");
        fs::write(&path, b"tarball").map_err(|e| PipelineError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(path)
    }
}

/// Materializes a fixed tree instead of unpacking a real tarball, then
/// consumes the archive the way the production extractor does.
struct FakeExtractor {
    entries: Vec<(String, String)>,
    fail: bool,
}

impl FakeExtractor {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(p, c)| (p.to_string(), c.to_string()))
                .collect(),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            entries: Vec::new(),
            fail: true,
        }
    }
}

impl ArchiveExtractor for FakeExtractor {
    fn extract(&self, archive: &Path, target: &Path) -> Result<(), PipelineError> {
        if self.fail {
            return Err(PipelineError::Extraction {
                archive: archive.to_path_buf(),
                reason: "invalid tar header".into(),
            });
        }
        for (path, content) in &self.entries {
            let full = target.join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }
        fs::remove_file(archive).unwrap();
        Ok(())
    }
}

// ── helpers ───────────────────────────────────────────────────────────────────

const URL: &str = "https://example.test/template.tar.gz";

/// The canonical template: one nested `core/` subtree with the scaffold
/// marker, plus an auxiliary `examples/` folder and stale lock files.
fn canonical_template() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "core/package.json",
            r#"{"name":"template","packageManager":"bun@1.1.0"}"#,
        ),
        ("core/kickstart.config.ts", "export default {}"),
        ("core/src/index.ts", "export {}"),
        ("core/pnpm-lock.yaml", "lockfileVersion: 9"),
        ("examples/readme.md", "example app"),
        ("bun.lockb", "binary"),
    ]
}

fn build_pipeline(fetcher_fails: bool, extractor: FakeExtractor) -> ScaffoldPipeline {
    ScaffoldPipeline::new(
        Box::new(FakeFetcher {
            fail: fetcher_fails,
        }),
        Box::new(extractor),
        Box::new(PresetPrompt::new(PackageManager::Npm)),
    )
}

fn run_canonical(target: &Path) -> Result<(), ScaffoldError> {
    let pipeline = build_pipeline(false, FakeExtractor::new(&canonical_template()));
    pipeline.run(&ScaffoldRequest::new(target, URL)).map(|_| ())
}

fn tree_snapshot(root: &Path) -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            out.push((
                entry.path().strip_prefix(root).unwrap().to_path_buf(),
                fs::read_to_string(entry.path()).unwrap(),
            ));
        }
    }
    out
}

// ── properties ────────────────────────────────────────────────────────────────

#[test]
fn scaffold_produces_flat_project_root() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");

    run_canonical(&target).unwrap();

    assert!(target.join("package.json").exists());
    assert!(target.join("src/index.ts").exists());
    assert!(target.join("kickstart.config.ts").exists());
    assert!(!target.join("core").exists());
    assert!(!target.join("temp").exists());
    assert!(!target.join("examples").exists());
    assert!(!target.join("template.tar.gz").exists());
}

#[test]
fn second_invocation_fails_without_mutating_the_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");

    run_canonical(&target).unwrap();
    let before = tree_snapshot(&target);

    let err = run_canonical(&target).unwrap_err();
    assert!(matches!(
        err,
        ScaffoldError::Pipeline(PipelineError::AlreadyScaffolded { .. })
    ));
    assert_eq!(tree_snapshot(&target), before);
}

#[test]
fn rollback_completeness_fetch_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");

    let pipeline = build_pipeline(true, FakeExtractor::new(&[]));
    assert!(pipeline.run(&ScaffoldRequest::new(&target, URL)).is_err());
    assert!(!target.exists());
}

#[test]
fn rollback_completeness_extract_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");

    let pipeline = build_pipeline(false, FakeExtractor::failing());
    assert!(pipeline.run(&ScaffoldRequest::new(&target, URL)).is_err());
    assert!(!target.exists());
}

#[test]
fn rollback_completeness_reconcile_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");

    // A plain file where the staging directory must go makes every move
    // into staging fail.
    let pipeline = build_pipeline(
        false,
        FakeExtractor::new(&[("core/a.txt", "a"), ("temp", "not a directory")]),
    );
    let err = pipeline
        .run(&ScaffoldRequest::new(&target, URL))
        .unwrap_err();
    assert!(matches!(
        err,
        ScaffoldError::Pipeline(PipelineError::Reconciliation { .. })
    ));
    assert!(!target.exists());
}

#[test]
fn rollback_completeness_patch_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");

    let pipeline = build_pipeline(
        false,
        FakeExtractor::new(&[("core/package.json", "{ not json")]),
    );
    let err = pipeline
        .run(&ScaffoldRequest::new(&target, URL))
        .unwrap_err();
    assert!(matches!(
        err,
        ScaffoldError::Pipeline(PipelineError::ManifestPatch { .. })
    ));
    assert!(!target.exists());
}

#[test]
fn rollback_spares_pre_existing_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("user-notes.md"), "keep me").unwrap();

    let pipeline = build_pipeline(true, FakeExtractor::new(&[]));
    assert!(pipeline.run(&ScaffoldRequest::new(&target, URL)).is_err());

    assert!(target.exists());
    assert_eq!(
        fs::read_to_string(target.join("user-notes.md")).unwrap(),
        "keep me"
    );
}

#[test]
fn overwrite_policy_nested_subtree_wins() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");

    let pipeline = build_pipeline(
        false,
        FakeExtractor::new(&[
            ("core/x", "nested content"),
            ("core/kickstart.config.ts", ""),
            ("x", "auxiliary content"),
        ]),
    );
    pipeline.run(&ScaffoldRequest::new(&target, URL)).unwrap();

    assert_eq!(
        fs::read_to_string(target.join("x")).unwrap(),
        "nested content"
    );
}

#[test]
fn no_lock_file_survives() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");

    run_canonical(&target).unwrap();

    for lock in [
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "bun.lockb",
        "bun.lock",
    ] {
        assert!(!target.join(lock).exists(), "{lock} survived");
    }
}

#[test]
fn manifest_patch_clears_pinned_field_only() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");

    run_canonical(&target).unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(target.join("package.json")).unwrap()).unwrap();
    assert!(manifest.get("packageManager").is_none());
    assert_eq!(manifest["name"], "template");
}

#[test]
fn report_summarizes_written_files() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("app");

    let pipeline = build_pipeline(false, FakeExtractor::new(&canonical_template()));
    let report = pipeline.run(&ScaffoldRequest::new(&target, URL)).unwrap();

    assert_eq!(report.project_dir, target);
    assert!(report.files.contains(&PathBuf::from("package.json")));
    assert!(report.files.contains(&PathBuf::from("src/index.ts")));
    assert!(!report.files.iter().any(|f| f.starts_with("core")));
}
