//! Value objects shared across the pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Package managers the scaffolded project may be driven with.
///
/// The pipeline never runs an install; the selection only feeds the
/// next-steps guidance in the final report. The template's own pinned
/// `packageManager` field is cleared during manifest patching so it cannot
/// conflict with this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// All supported package managers, in prompt display order.
    pub const ALL: [Self; 4] = [Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    /// The lock file this manager writes.
    ///
    /// Note: `bun` has written both a binary (`bun.lockb`) and a textual
    /// (`bun.lock`) lock file across versions; the purge list in
    /// [`super::TemplateLayout`] enumerates both.
    pub fn lock_file(self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Pnpm => "pnpm-lock.yaml",
            Self::Yarn => "yarn.lock",
            Self::Bun => "bun.lockb",
        }
    }

    /// The install command shown in next-steps guidance.
    pub fn install_command(self) -> &'static str {
        match self {
            Self::Npm => "npm install",
            Self::Pnpm => "pnpm install",
            Self::Yarn => "yarn",
            Self::Bun => "bun install",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        };
        f.write_str(name)
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            "bun" => Ok(Self::Bun),
            other => Err(DomainError::UnknownPackageManager {
                name: other.to_string(),
            }),
        }
    }
}
