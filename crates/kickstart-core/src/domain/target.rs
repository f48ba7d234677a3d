//! Target-directory classification.

use std::fmt;
use std::io;
use std::path::Path;

use super::layout::TemplateLayout;

/// Observed state of the target directory before the pipeline runs.
///
/// The pipeline's rollback asymmetry hangs off this classification: a
/// directory that was `Absent` at guard time is deleted wholesale on
/// failure, while pre-existing directories are never destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    /// The directory does not exist yet.
    Absent,
    /// The directory exists and contains no entries.
    Empty,
    /// The directory exists with contents, but no scaffold marker.
    OccupiedForeign,
    /// The directory contains the scaffold marker; provisioning again
    /// would double-scaffold.
    OccupiedScaffold,
}

impl TargetState {
    /// Classify `target` by direct filesystem probe. Read-only.
    pub fn probe(target: &Path, layout: &TemplateLayout) -> io::Result<Self> {
        if !target.exists() {
            return Ok(Self::Absent);
        }
        if layout.marker_path(target).exists() {
            return Ok(Self::OccupiedScaffold);
        }
        let mut entries = std::fs::read_dir(target)?;
        if entries.next().is_none() {
            Ok(Self::Empty)
        } else {
            Ok(Self::OccupiedForeign)
        }
    }

    /// `true` when the pipeline would own (and thus roll back) the
    /// directory it is about to create.
    pub fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Absent => "absent",
            Self::Empty => "empty",
            Self::OccupiedForeign => "occupied-foreign",
            Self::OccupiedScaffold => "occupied-scaffold",
        };
        f.write_str(s)
    }
}
