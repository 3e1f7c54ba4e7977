use clap::Args;
use coordi_core::config::LoadOptions;
use coordi_core::domain::profile::{Gender, UserProfile};

use crate::commands::{
    build_runtime, load_config, open_repository, storage_failure, CommandResult, EXIT_INPUT,
};

const COMMAND: &str = "profile";

/// Without flags the stored profile is shown; `--gender` and `--age` together
/// register or replace it.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    #[arg(long, help = "male, female or other")]
    pub gender: Option<String>,
    #[arg(long, help = "Age in years (13-100)")]
    pub age: Option<u32>,
    #[arg(long, help = "Optional display name")]
    pub nickname: Option<String>,
}

pub fn run(options: &LoadOptions, args: ProfileArgs) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match build_runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };
    let repository = open_repository(&config);

    let profile = match (args.gender, args.age) {
        (None, None) if args.nickname.is_none() => {
            return match runtime.block_on(repository.user_profile()) {
                Some(profile) => CommandResult::success_with_data(COMMAND, "stored profile", &profile),
                None => CommandResult::success(COMMAND, "no profile stored"),
            };
        }
        (Some(gender), Some(age)) => UserProfile {
            nickname: args.nickname.filter(|nickname| !nickname.trim().is_empty()),
            gender: Gender::parse_lenient(&gender),
            age,
        },
        _ => {
            return CommandResult::failure(
                COMMAND,
                "invalid_input",
                "registering a profile needs both --gender and --age",
                EXIT_INPUT,
            );
        }
    };

    if let Err(error) = profile.validate_for_registration() {
        return CommandResult::failure(COMMAND, "invalid_input", error.to_string(), EXIT_INPUT);
    }

    if runtime.block_on(repository.save_user_profile(&profile)) {
        CommandResult::success_with_data(COMMAND, "profile saved", &profile)
    } else {
        storage_failure(COMMAND, &config)
    }
}
