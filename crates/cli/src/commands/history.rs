use coordi_core::config::LoadOptions;
use coordi_core::domain::outfit::HISTORY_CAP;

use crate::commands::{build_runtime, load_config, open_repository, CommandResult};

const COMMAND: &str = "history";

pub fn run(options: &LoadOptions, limit: usize) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match build_runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let history = runtime.block_on(open_repository(&config).outfit_history());
    let recent = history.recent(limit.min(HISTORY_CAP));
    CommandResult::success_with_data(
        COMMAND,
        format!("showing {} of {} stored outfits, newest first", recent.len(), history.len()),
        &recent,
    )
}
