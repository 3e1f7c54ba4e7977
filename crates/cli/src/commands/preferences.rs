use clap::Args;
use coordi_core::config::LoadOptions;
use coordi_core::domain::profile::Gender;
use coordi_core::domain::style::Style;

use crate::commands::{
    build_runtime, load_config, open_repository, storage_failure, CommandResult, EXIT_INPUT,
};

const COMMAND: &str = "preferences";

/// Without flags the stored preferences are shown. Given flags are merged into
/// what is stored.
#[derive(Debug, Clone, Default, Args)]
pub struct PreferencesArgs {
    #[arg(long, help = "casual, smart, street, mode, minimal or vintage")]
    pub style: Option<String>,
    #[arg(long, help = "male, female or other")]
    pub gender: Option<String>,
    #[arg(long, help = "Age in years")]
    pub age: Option<u32>,
}

pub fn run(options: &LoadOptions, args: PreferencesArgs) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match build_runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };
    let repository = open_repository(&config);

    runtime.block_on(async {
        let stored = repository.user_preferences().await;
        if args.style.is_none() && args.gender.is_none() && args.age.is_none() {
            return match stored {
                Some(preferences) => {
                    CommandResult::success_with_data(COMMAND, "stored preferences", &preferences)
                }
                None => CommandResult::success(COMMAND, "no preferences stored"),
            };
        }

        let mut preferences = stored.unwrap_or_default();
        if let Some(style) = args.style.as_deref() {
            let Some(style) = Style::parse(style) else {
                let known = Style::ALL.iter().map(Style::as_str).collect::<Vec<_>>().join(", ");
                return CommandResult::failure(
                    COMMAND,
                    "invalid_input",
                    format!("unknown style `{}` (expected one of: {known})", style.trim()),
                    EXIT_INPUT,
                );
            };
            preferences.selected_style = Some(style.as_str().to_string());
        }
        if let Some(gender) = args.gender.as_deref() {
            preferences.gender = Some(Gender::parse_lenient(gender));
        }
        if let Some(age) = args.age {
            preferences.age = Some(age);
        }

        if repository.save_user_preferences(&preferences).await {
            CommandResult::success_with_data(COMMAND, "preferences saved", &preferences)
        } else {
            storage_failure(COMMAND, &config)
        }
    })
}
