//! Gzip-compressed tar extraction with a strip-top-level policy.

use std::fs;
use std::io;
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tracing::{debug, info};

use kickstart_core::application::{PipelineError, ports::ArchiveExtractor};

/// Production extractor for `.tar.gz` template snapshots.
///
/// The archive is expected to contain exactly one wrapper directory (a
/// repository snapshot folder); its contents are unpacked directly into
/// the target. The archive file is deleted after a successful unpack -
/// on failure it stays put and the orchestrator's rollback sweeps it up
/// together with the target directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzExtractor;

impl TarGzExtractor {
    pub fn new() -> Self {
        Self
    }

    fn unpack(&self, archive: &Path, target: &Path) -> io::Result<usize> {
        let file = fs::File::open(archive)?;
        let mut tar = tar::Archive::new(GzDecoder::new(file));

        let mut unpacked = 0;
        for entry in tar.entries()? {
            let mut entry = entry?;
            let path = entry.path()?.into_owned();

            // Discard the single enclosing snapshot directory.
            let mut components = path.components();
            components.next();
            let stripped = components.as_path();
            if stripped.as_os_str().is_empty() {
                continue; // the wrapper directory entry itself
            }
            if stripped
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
            {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("archive entry escapes target: {}", path.display()),
                ));
            }

            let dest = target.join(stripped);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            entry.unpack(&dest)?;
            unpacked += 1;
        }
        Ok(unpacked)
    }
}

impl ArchiveExtractor for TarGzExtractor {
    fn extract(&self, archive: &Path, target: &Path) -> Result<(), PipelineError> {
        debug!(archive = %archive.display(), "unpacking template archive");

        let unpacked =
            self.unpack(archive, target)
                .map_err(|e| PipelineError::Extraction {
                    archive: archive.to_path_buf(),
                    reason: e.to_string(),
                })?;

        // Consumed on success only.
        fs::remove_file(archive).map_err(|e| PipelineError::Extraction {
            archive: archive.to_path_buf(),
            reason: format!("failed to remove archive after unpack: {e}"),
        })?;

        info!(entries = unpacked, target = %target.display(), "template archive extracted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{Compression, write::GzEncoder};

    fn build_archive(path: &Path, entries: &[(&str, &str)]) {
        let file = fs::File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn strips_the_wrapper_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("template.tar.gz");
        build_archive(
            &archive,
            &[
                ("wrapper/core/package.json", "{}"),
                ("wrapper/core/src/index.ts", "export {}"),
                ("wrapper/examples/readme.md", "aux"),
            ],
        );
        let target = tmp.path().join("out");
        fs::create_dir(&target).unwrap();

        TarGzExtractor::new().extract(&archive, &target).unwrap();

        assert!(target.join("core/package.json").exists());
        assert!(target.join("core/src/index.ts").exists());
        assert!(target.join("examples/readme.md").exists());
        assert!(!target.join("wrapper").exists());
    }

    #[test]
    fn consumes_archive_on_success() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("template.tar.gz");
        build_archive(&archive, &[("wrapper/file.txt", "x")]);
        let target = tmp.path().join("out");
        fs::create_dir(&target).unwrap();

        TarGzExtractor::new().extract(&archive, &target).unwrap();
        assert!(!archive.exists());
    }

    #[test]
    fn corrupt_archive_is_an_extraction_error_and_is_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("template.tar.gz");
        fs::write(&archive, b"definitely not gzip").unwrap();
        let target = tmp.path().join("out");
        fs::create_dir(&target).unwrap();

        let err = TarGzExtractor::new()
            .extract(&archive, &target)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Extraction { .. }));
        assert!(archive.exists());
    }

    /// `append_data` refuses `..` in entry names, so smuggle the path in by
    /// writing the header's name field directly.
    fn build_archive_with_raw_name(path: &Path, raw_name: &str, content: &str) {
        let file = fs::File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.as_mut_bytes()[..raw_name.len()].copy_from_slice(raw_name.as_bytes());
        header.set_cksum();

        builder.append(&header, content.as_bytes()).unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn rejects_path_traversal_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("template.tar.gz");
        build_archive_with_raw_name(&archive, "wrapper/../../escape.txt", "bad");
        let target = tmp.path().join("out");
        fs::create_dir(&target).unwrap();

        let err = TarGzExtractor::new()
            .extract(&archive, &target)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Extraction { .. }));
        assert!(!tmp.path().join("escape.txt").exists());
    }

    #[test]
    fn file_contents_survive_the_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("template.tar.gz");
        build_archive(&archive, &[("snap/core/notes.md", "hello template")]);
        let target = tmp.path().join("out");
        fs::create_dir(&target).unwrap();

        TarGzExtractor::new().extract(&archive, &target).unwrap();
        assert_eq!(
            fs::read_to_string(target.join("core/notes.md")).unwrap(),
            "hello template"
        );
    }
}
