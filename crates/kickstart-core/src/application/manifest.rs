//! Manifest patching.
//!
//! After the merge, the project's `package.json` still carries whatever
//! package manager the template authors pinned. The target project has not
//! chosen one yet, so the field is cleared.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::application::PipelineError;
use crate::domain::TemplateLayout;

/// Rewrites fields of the project manifest in place.
pub struct ManifestPatcher;

impl ManifestPatcher {
    /// Remove the pinned package-manager field from the manifest.
    ///
    /// No-op (not an error) when the manifest or the field is absent; the
    /// file is only rewritten when the field was actually removed, with
    /// stable two-space indentation and a trailing newline.
    pub fn patch(target: &Path, layout: &TemplateLayout) -> Result<(), PipelineError> {
        let path = layout.manifest_path(target);
        if !path.exists() {
            debug!(path = %path.display(), "no manifest to patch");
            return Ok(());
        }

        let raw = fs::read_to_string(&path).map_err(|e| PipelineError::ManifestPatch {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let mut manifest: Value =
            serde_json::from_str(&raw).map_err(|e| PipelineError::ManifestPatch {
                path: path.clone(),
                reason: format!("invalid JSON: {e}"),
            })?;

        let Some(object) = manifest.as_object_mut() else {
            return Err(PipelineError::ManifestPatch {
                path,
                reason: "manifest root is not a JSON object".into(),
            });
        };

        if object.remove(&layout.package_manager_field).is_none() {
            debug!(field = %layout.package_manager_field, "field absent; manifest untouched");
            return Ok(());
        }

        let mut formatted =
            serde_json::to_string_pretty(&manifest).map_err(|e| PipelineError::ManifestPatch {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        formatted.push('\n');

        fs::write(&path, formatted).map_err(|e| PipelineError::ManifestPatch {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "pinned package manager cleared");
        Ok(())
    }
}
