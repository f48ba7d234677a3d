//! Local-file archive fetcher.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use kickstart_core::application::{PipelineError, ports::ArchiveFetcher};

/// Fetcher that copies an already-downloaded archive into the target.
///
/// Used for offline provisioning (`--template ./snapshot.tar.gz`) and for
/// integration tests that must not touch the network. The `url` argument
/// of [`ArchiveFetcher::fetch`] is ignored; the source path is fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct LocalArchiveFetcher {
    source: PathBuf,
}

impl LocalArchiveFetcher {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl ArchiveFetcher for LocalArchiveFetcher {
    fn fetch(&self, _url: &str, dest_dir: &Path) -> Result<PathBuf, PipelineError> {
        let dest = dest_dir.join("template.tar.gz");
        debug!(source = %self.source.display(), "copying local template archive");

        fs::copy(&self.source, &dest).map_err(|e| PipelineError::Network {
            url: self.source.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(dest)
    }
}
