//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use kickstart_core::domain::PackageManager;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kickstart",
    bin_name = "kickstart",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Provision a project from a remote template",
    long_about = "Kickstart downloads a template archive, flattens it into a \
                  ready-to-use project directory, and cleans up after itself \
                  when anything goes wrong.",
    after_help = "EXAMPLES:\n\
        \x20 kickstart new my-app\n\
        \x20 kickstart new my-app --package-manager pnpm\n\
        \x20 kickstart new my-app --template ./snapshot.tar.gz --yes\n\
        \x20 kickstart completions bash > /usr/share/bash-completion/completions/kickstart",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision a new project directory from the template archive.
    #[command(
        visible_alias = "n",
        about = "Provision a new project",
        after_help = "EXAMPLES:\n\
            \x20 kickstart new my-app\n\
            \x20 kickstart new my-app --package-manager bun\n\
            \x20 kickstart new ./apps/my-app --template https://example.com/t.tar.gz"
    )]
    New(NewArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kickstart completions bash\n\
            \x20 kickstart completions zsh > ~/.zfunc/_kickstart"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `kickstart new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Target directory for the new project (created if absent).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Package manager to show in next-steps guidance.
    #[arg(
        short = 'p',
        long = "package-manager",
        value_enum,
        help = "Package manager preference (skips the prompt)"
    )]
    pub package_manager: Option<PackageManagerArg>,

    /// Template archive source: an https:// URL or a local .tar.gz path.
    #[arg(short = 't', long = "template", value_name = "URL_OR_FILE")]
    pub template: Option<String>,

    /// Skip the interactive prompt, answering with defaults.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

/// Clap-facing mirror of [`PackageManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManagerArg {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => Self::Npm,
            PackageManagerArg::Pnpm => Self::Pnpm,
            PackageManagerArg::Yarn => Self::Yarn,
            PackageManagerArg::Bun => Self::Bun,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kickstart completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
