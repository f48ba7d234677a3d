//! Comprehensive error handling for the Kickstart CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use kickstart_core::error::{ErrorCategory as CoreCategory, ScaffoldError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Comprehensive CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Project name validation failed.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `kickstart-core`.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error's category without touching core internals.
    #[error("Scaffolding failed: {0}")]
    Core(#[from] ScaffoldError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled { target_removed: bool },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use lowercase letters, digits, hyphens, and underscores".into(),
                "Start with a letter or digit".into(),
                "Examples: my-project, my_app, project123".into(),
            ],

            Self::ConfigError { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your config file syntax (TOML)".into(),
                "Or run without --config to use the defaults".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Cancelled { target_removed } => {
                let mut s = vec!["Operation was cancelled".into()];
                if *target_removed {
                    s.push("The target directory was restored to its pre-invocation state".into());
                } else {
                    s.push("No changes were made".into());
                }
                s
            }
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::InvalidProjectName { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Precondition => ErrorCategory::UserError,
                CoreCategory::Cancelled => ErrorCategory::Cancelled,
                CoreCategory::Network | CoreCategory::Filesystem | CoreCategory::Internal => {
                    ErrorCategory::Internal
                }
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    /// | Cancelled     | 130  |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
            ErrorCategory::Cancelled => 130,
        }
    }

    /// `true` for user-initiated cancellation (reported, never logged as an
    /// error).
    pub fn is_cancellation(&self) -> bool {
        self.category() == ErrorCategory::Cancelled
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        // Error header
        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        // Main error message
        output.push_str(&format!("  {}\n", self.to_string().red()));

        // Error chain (if verbose)
        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        // Suggestions
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        // Hint to re-run with -v
        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] — no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.  Cancellations are deliberately not
    /// logged as errors — they are an outcome, not a failure.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Cancelled => tracing::info!("Cancelled: {}", self),
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, precondition).
    UserError,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
    /// User-initiated cancellation.
    Cancelled,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
///
/// Two concrete impls are provided:
/// - `Result<T, std::io::Error>`    → `CliError::IoError`
/// - `Result<T, ScaffoldError>`     → `CliError::Core`
///
/// There is deliberately **no blanket impl** — it would conflict with both
/// concrete impls (rustc rejects overlapping trait implementations).
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, ScaffoldError> {
    /// The context message is ignored for core errors because the core error
    /// already carries sufficient context.  The method exists only to satisfy
    /// the trait contract at mixed call-sites.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickstart_core::application::PipelineError;
    use std::io;
    use std::path::PathBuf;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn invalid_name_suggestions_non_empty() {
        let err = CliError::InvalidProjectName {
            name: ".hidden".into(),
            reason: "starts with '.'".into(),
        };
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn already_scaffolded_suggests_a_different_directory() {
        let err = CliError::Core(ScaffoldError::Pipeline(PipelineError::AlreadyScaffolded {
            path: PathBuf::from("/tmp/app"),
            marker: "kickstart.config.ts".into(),
        }));
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("different target directory"))
        );
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into()
            }
            .exit_code(),
            2
        );
    }

    #[test]
    fn exit_code_precondition_is_user_error() {
        let err = CliError::Core(ScaffoldError::Pipeline(PipelineError::AlreadyScaffolded {
            path: PathBuf::from("/tmp/app"),
            marker: "kickstart.config.ts".into(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into()
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn exit_code_cancelled_is_distinct() {
        let direct = CliError::Cancelled {
            target_removed: false,
        };
        let via_core = CliError::Core(ScaffoldError::Pipeline(PipelineError::Cancelled));
        assert_eq!(direct.exit_code(), 130);
        assert_eq!(via_core.exit_code(), 130);
        assert!(direct.is_cancellation());
        assert!(via_core.is_cancellation());
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::InvalidProjectName {
            name: "My App".into(),
            reason: "uppercase".into(),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let err = CliError::Cancelled {
            target_removed: true,
        };
        let s = err.format_plain(true);
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }
}
