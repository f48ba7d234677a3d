//! Project-name validation.
//!
//! A precondition checked by callers before the pipeline starts; a bad
//! name never reaches the filesystem stages.

use super::error::DomainError;

/// Maximum length accepted for a project name.
pub const MAX_NAME_LEN: usize = 214;

/// Validate a project (directory) name.
///
/// Accepted: lowercase alphanumerics, `-` and `_`, starting with an
/// alphanumeric. This mirrors the naming rules of the package registries
/// the scaffolded manifest ends up in.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let fail = |reason: &str| DomainError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(fail("name is empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(fail("name is too long"));
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap_or_default();
    if !first.is_ascii_alphanumeric() {
        return Err(fail("must start with a letter or digit"));
    }
    if name
        .chars()
        .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'))
    {
        return Err(fail(
            "only lowercase letters, digits, '-' and '_' are allowed",
        ));
    }
    Ok(())
}

/// Validate a template archive source.
///
/// Accepted: an `http(s)://` URL or a plain local path. Anything carrying a
/// different scheme is rejected up front so a typo'd source fails before
/// the pipeline starts.
pub fn validate_archive_source(source: &str) -> Result<(), DomainError> {
    let fail = |reason: &str| DomainError::InvalidArchiveUrl {
        url: source.to_string(),
        reason: reason.to_string(),
    };

    if source.trim().is_empty() {
        return Err(fail("source is empty"));
    }
    if let Some((scheme, _)) = source.split_once("://") {
        if scheme != "http" && scheme != "https" {
            return Err(fail("only http(s) URLs are supported"));
        }
    }
    Ok(())
}
