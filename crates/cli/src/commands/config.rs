use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use coordi_core::config::{LoadOptions, DEFAULT_CONFIG_FILE, NESTED_CONFIG_FILE};
use serde::Serialize;
use toml::Value;

use crate::commands::{load_config, CommandResult};

const COMMAND: &str = "config";

#[derive(Debug, Serialize)]
struct ConfigField {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let config_file_path = detect_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key: &'static str, env_key: &str| {
        field_source(key, env_key, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let fields = vec![
        field("llm.provider", format!("{:?}", config.llm.provider), source("llm.provider", "COORDI_LLM_PROVIDER")),
        field("llm.model", config.llm.model.clone(), source("llm.model", "COORDI_LLM_MODEL")),
        field("llm.base_url", config.llm.base_url.clone(), source("llm.base_url", "COORDI_LLM_BASE_URL")),
        field("llm.api_key", redacted(config.llm.has_api_key()), source("llm.api_key", "COORDI_LLM_API_KEY")),
        field(
            "llm.timeout_secs",
            config.llm.timeout_secs.to_string(),
            source("llm.timeout_secs", "COORDI_LLM_TIMEOUT_SECS"),
        ),
        field(
            "weather.base_url",
            config.weather.base_url.clone(),
            source("weather.base_url", "COORDI_WEATHER_BASE_URL"),
        ),
        field(
            "weather.api_key",
            redacted(config.weather.api_key.is_some()),
            source("weather.api_key", "COORDI_WEATHER_API_KEY"),
        ),
        field(
            "weather.latitude",
            optional(config.weather.latitude),
            source("weather.latitude", "COORDI_WEATHER_LATITUDE"),
        ),
        field(
            "weather.longitude",
            optional(config.weather.longitude),
            source("weather.longitude", "COORDI_WEATHER_LONGITUDE"),
        ),
        field(
            "storage.path",
            config.storage.path.display().to_string(),
            source("storage.path", "COORDI_STORAGE_PATH"),
        ),
        field("logging.level", config.logging.level.clone(), source("logging.level", "COORDI_LOGGING_LEVEL")),
        field(
            "logging.format",
            format!("{:?}", config.logging.format),
            source("logging.format", "COORDI_LOGGING_FORMAT"),
        ),
    ];

    CommandResult::success_with_data(
        COMMAND,
        "effective config (source precedence: env > file > default)",
        &fields,
    )
}

fn field(key: &'static str, value: String, source: String) -> ConfigField {
    ConfigField { key, value, source }
}

fn redacted(present: bool) -> String {
    if present { "<redacted>" } else { "<unset>" }.to_string()
}

fn optional(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_else(|| "<unset>".to_string())
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from(NESTED_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: &str,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

/// Used by `doctor` to describe where the config came from.
pub(crate) fn config_origin(options: &LoadOptions) -> String {
    detect_config_path(options.config_path.as_deref())
        .map(|path| format!("file ({})", path.display()))
        .unwrap_or_else(|| "defaults and environment".to_string())
}
