//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config` path, or the platform config dir)
//! 3. Built-in defaults (always present)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Template archive used when neither flag nor config file names one.
pub const DEFAULT_TEMPLATE_URL: &str =
    "https://codeload.github.com/kickstart-dev/template/tar.gz/refs/heads/main";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub template: TemplateConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Preselected package manager offered by the prompt.
    pub package_manager: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Where the template tarball comes from.
    pub archive_url: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            archive_url: DEFAULT_TEMPLATE_URL.into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            output: OutputConfig::default(),
            template: TemplateConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; when it is
    /// `None` the platform config directory is consulted.  A missing file is
    /// not an error — defaults apply — but an unreadable or unparsable file
    /// is, so typos don't silently fall back.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = match config_file {
            Some(p) => Some(p.clone()),
            None => Self::default_path().filter(|p| p.exists()),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("cannot parse {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Platform-appropriate default config file location.
    fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "kickstart", "kickstart")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_builtin_url() {
        let config = AppConfig::default();
        assert_eq!(config.template.archive_url, DEFAULT_TEMPLATE_URL);
        assert!(config.defaults.package_manager.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[defaults]\npackage_manager = \"pnpm\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.defaults.package_manager.as_deref(), Some("pnpm"));
        assert_eq!(config.template.archive_url, DEFAULT_TEMPLATE_URL);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "defaults = 3").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
