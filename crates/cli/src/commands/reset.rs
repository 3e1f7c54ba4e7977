use coordi_core::config::LoadOptions;

use crate::commands::{build_runtime, load_config, open_repository, storage_failure, CommandResult};

const COMMAND: &str = "reset";

/// Removes the stored profile, preferences and history.
pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match build_runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    if runtime.block_on(open_repository(&config).clear_all_user_data()) {
        CommandResult::success(COMMAND, "cleared profile, preferences and history")
    } else {
        storage_failure(COMMAND, &config)
    }
}
