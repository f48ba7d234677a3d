//! Interactive package-manager selection.
//!
//! Implements the core's `PackageManagerPrompt` port on top of `dialoguer`.
//! Compiled only with the default `interactive` feature; in minimal builds
//! the CLI falls back to presets and `--package-manager`.

use kickstart_core::application::ports::{PackageManagerPrompt, PromptOutcome};
use kickstart_core::domain::PackageManager;

use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;

/// Terminal prompt backed by `dialoguer::Select`.
///
/// Esc and Ctrl-C are both reported as [`PromptOutcome::Cancelled`]; only a
/// genuine I/O problem (no terminal, read failure) becomes `Failed`.
pub struct DialoguerPrompt {
    use_color: bool,
}

impl DialoguerPrompt {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl PackageManagerPrompt for DialoguerPrompt {
    fn select(&self, default: Option<PackageManager>) -> PromptOutcome {
        let choices = PackageManager::ALL;
        let labels: Vec<String> = choices.iter().map(|pm| pm.to_string()).collect();
        let default_index = default
            .and_then(|d| choices.iter().position(|pm| *pm == d))
            .unwrap_or(0);

        let result = if self.use_color {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Which package manager do you want to use?")
                .items(&labels)
                .default(default_index)
                .interact_opt()
        } else {
            Select::new()
                .with_prompt("Which package manager do you want to use?")
                .items(&labels)
                .default(default_index)
                .interact_opt()
        };

        match result {
            Ok(Some(index)) => PromptOutcome::Selected(choices[index]),
            // Esc / 'q'
            Ok(None) => PromptOutcome::Cancelled,
            Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => {
                // Ctrl-C inside the prompt
                PromptOutcome::Cancelled
            }
            Err(e) => PromptOutcome::Failed(e.to_string()),
        }
    }
}
