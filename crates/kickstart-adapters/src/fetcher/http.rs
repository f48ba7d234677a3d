//! HTTP archive fetcher using blocking `ureq`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use kickstart_core::application::{PipelineError, ports::ArchiveFetcher};

/// Name the downloaded tarball is stored under inside the target directory.
///
/// Matches `TemplateLayout::archive_file`; keeping the archive inside the
/// target means rollback-by-directory-deletion covers it.
const ARCHIVE_FILE: &str = "template.tar.gz";

/// Production fetcher: one blocking GET, body treated as opaque bytes.
///
/// No retries and no streaming decompression here - decompression belongs
/// to the extractor, retries to the caller re-running the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpArchiveFetcher;

impl HttpArchiveFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveFetcher for HttpArchiveFetcher {
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, PipelineError> {
        debug!(%url, "downloading template archive");

        // ureq 3.x surfaces non-2xx statuses as errors from call().
        let response = ureq::get(url).call().map_err(|e| PipelineError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut body = response.into_body();
        let bytes = body
            .read_to_vec()
            .map_err(|e| PipelineError::Network {
                url: url.to_string(),
                reason: format!("failed to read response body: {e}"),
            })?;

        let path = dest_dir.join(ARCHIVE_FILE);
        fs::write(&path, &bytes).map_err(|e| PipelineError::Network {
            url: url.to_string(),
            reason: format!("failed to store archive at {}: {e}", path.display()),
        })?;

        info!(bytes = bytes.len(), path = %path.display(), "template archive downloaded");
        Ok(path)
    }
}
