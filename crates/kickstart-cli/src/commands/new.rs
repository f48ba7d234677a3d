//! `kickstart new` - provision a project from the template archive.

use std::io::IsTerminal;
use std::path::Path;

use tracing::debug;

use kickstart_adapters::{HttpArchiveFetcher, LocalArchiveFetcher, TarGzExtractor};
use kickstart_core::application::ports::{ArchiveFetcher, PackageManagerPrompt, PresetPrompt};
use kickstart_core::domain::{PackageManager, validate_archive_source, validate_project_name};
use kickstart_core::prelude::{ScaffoldError, ScaffoldPipeline, ScaffoldReport, ScaffoldRequest};

use crate::cli::NewArgs;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

/// Provision a new project into `args.path`.
pub fn execute(args: &NewArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    // The directory name is the project name; validate it before touching
    // the filesystem so typos fail fast.
    let name = args
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidInput {
            message: format!("'{}' has no usable directory name", args.path.display()),
        })?;
    validate_project_name(name).map_err(|e| CliError::InvalidProjectName {
        name: name.to_string(),
        reason: e.to_string(),
    })?;

    let source = args
        .template
        .as_deref()
        .unwrap_or(&config.template.archive_url);
    validate_archive_source(source).map_err(ScaffoldError::from)?;
    let default_pm = resolve_default_package_manager(args, config)?;

    output.header(&format!("Creating project '{name}'"))?;
    output.info(&format!("Template: {source}"))?;

    let pipeline = ScaffoldPipeline::new(
        make_fetcher(source),
        Box::new(TarGzExtractor::new()),
        make_prompt(args, default_pm, output),
    );
    let request =
        ScaffoldRequest::new(&args.path, source.to_string()).with_package_manager(default_pm);

    let report = pipeline.run(&request)?;
    print_report(&report, output)?;
    Ok(())
}

/// Pick the archive fetcher for `source`.
///
/// Anything that is not an `http(s)://` URL is treated as a local archive
/// path, which keeps offline provisioning a one-flag affair.
fn make_fetcher(source: &str) -> Box<dyn ArchiveFetcher> {
    if source.starts_with("http://") || source.starts_with("https://") {
        Box::new(HttpArchiveFetcher::new())
    } else {
        debug!(%source, "template source treated as a local archive");
        Box::new(LocalArchiveFetcher::new(Path::new(source)))
    }
}

/// Decide how the package manager gets chosen.
///
/// `--yes`, an explicit `--package-manager`, or a non-interactive stdin all
/// skip the prompt. The preset falls back to npm when nothing else named a
/// manager.
fn make_prompt(
    args: &NewArgs,
    default_pm: Option<PackageManager>,
    output: &OutputManager,
) -> Box<dyn PackageManagerPrompt> {
    let skip_prompt = args.yes
        || args.package_manager.is_some()
        || !std::io::stdin().is_terminal();

    if skip_prompt {
        return Box::new(PresetPrompt::new(default_pm.unwrap_or(PackageManager::Npm)));
    }

    #[cfg(feature = "interactive")]
    {
        Box::new(crate::prompt::DialoguerPrompt::new(output.supports_color()))
    }
    #[cfg(not(feature = "interactive"))]
    {
        let _ = output;
        Box::new(PresetPrompt::new(default_pm.unwrap_or(PackageManager::Npm)))
    }
}

/// CLI flag wins over the config file; a bad config value is a config error,
/// not a silent fallback.
fn resolve_default_package_manager(
    args: &NewArgs,
    config: &AppConfig,
) -> CliResult<Option<PackageManager>> {
    if let Some(arg) = args.package_manager {
        return Ok(Some(arg.into()));
    }
    match &config.defaults.package_manager {
        Some(raw) => raw
            .parse::<PackageManager>()
            .map(Some)
            .map_err(|e| CliError::ConfigError {
                message: format!("defaults.package_manager: {e}"),
            }),
        None => Ok(None),
    }
}

/// Success summary plus next-steps guidance.
fn print_report(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    let pm = report.package_manager;

    output.success(&format!(
        "Project ready at {} ({} files)",
        report.project_dir.display(),
        report.files.len()
    ))?;
    output.print("")?;
    output.header("Next steps:")?;
    output.print(&format!("  cd {}", report.project_dir.display()))?;
    output.print(&format!("  {}", pm.install_command()))?;
    output.print(&format!("  {pm} run dev"))?;
    Ok(())
}
