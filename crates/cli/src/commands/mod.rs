pub mod config;
pub mod doctor;
pub mod history;
pub mod preferences;
pub mod profile;
pub mod reset;
pub mod suggest;

use std::sync::Arc;

use coordi_core::config::{AppConfig, LoadOptions};
use coordi_db::{JsonFileStore, UserRepository};
use serde::Serialize;
use serde_json::Value;

pub const EXIT_OK: u8 = 0;
pub const EXIT_INTERNAL: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_INPUT: u8 = 3;
pub const EXIT_STORAGE: u8 = 4;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::build(command, None, message.into(), None, EXIT_OK)
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: &impl Serialize,
    ) -> Self {
        Self::build(command, None, message.into(), encode_data(data), EXIT_OK)
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        Self::build(command, Some(error_class), message.into(), None, exit_code)
    }

    pub fn failure_with_data(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        data: &impl Serialize,
        exit_code: u8,
    ) -> Self {
        Self::build(command, Some(error_class), message.into(), encode_data(data), exit_code)
    }

    fn build(
        command: &str,
        error_class: Option<&str>,
        message: String,
        data: Option<Value>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: if error_class.is_some() { "error" } else { "ok" }.to_string(),
            error_class: error_class.map(str::to_string),
            message,
            data,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn encode_data(data: &impl Serialize) -> Option<Value> {
    serde_json::to_value(data).ok()
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub(crate) fn load_config(command: &str, options: &LoadOptions) -> Result<AppConfig, CommandResult> {
    AppConfig::load(options.clone()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            EXIT_CONFIG,
        )
    })
}

pub(crate) fn build_runtime(command: &str) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            EXIT_INTERNAL,
        )
    })
}

pub(crate) fn open_repository(config: &AppConfig) -> UserRepository {
    UserRepository::new(Arc::new(JsonFileStore::new(config.storage.path.clone())))
}

pub(crate) fn storage_failure(command: &str, config: &AppConfig) -> CommandResult {
    CommandResult::failure(
        command,
        "storage_failure",
        format!("could not write to `{}`", config.storage.path.display()),
        EXIT_STORAGE,
    )
}
