use coordi_core::config::{AppConfig, LlmProvider, LoadOptions};
use coordi_db::repositories::USER_PREFERENCES_KEY;
use coordi_db::{JsonFileStore, KeyValueStore};
use serde::Serialize;

use crate::commands::config::config_origin;
use crate::commands::{build_runtime, CommandResult, EXIT_CONFIG, EXIT_STORAGE};

const COMMAND: &str = "doctor";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Warn,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    checks: Vec<DoctorCheck>,
}

/// Readiness report. Missing credentials only warn: suggestions still work
/// through the rule-based generator and manual weather entry.
pub fn run(options: &LoadOptions) -> CommandResult {
    let mut checks = Vec::new();

    match AppConfig::load(options.clone()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: format!("configuration loaded from {}", config_origin(options)),
            });
            checks.push(check_llm(&config));
            checks.push(check_weather(&config));
            checks.push(check_storage(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["llm_readiness", "weather_readiness", "storage_access"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let failed = checks.iter().find(|check| check.status == CheckStatus::Fail).map(|check| check.name);
    let overall_status = if failed.is_some() { CheckStatus::Fail } else { CheckStatus::Pass };
    let report = DoctorReport { overall_status, checks };

    match failed {
        None => CommandResult::success_with_data(COMMAND, "doctor: all readiness checks passed", &report),
        Some(name) => {
            let (error_class, exit_code) = if name == "config_validation" {
                ("config_validation", EXIT_CONFIG)
            } else {
                ("storage_failure", EXIT_STORAGE)
            };
            CommandResult::failure_with_data(
                COMMAND,
                error_class,
                "doctor: one or more readiness checks failed",
                &report,
                exit_code,
            )
        }
    }
}

fn check_llm(config: &AppConfig) -> DoctorCheck {
    let (status, details) = match config.llm.provider {
        LlmProvider::Offline => {
            (CheckStatus::Pass, "offline provider: every suggestion is rule-based".to_string())
        }
        LlmProvider::Gemini if config.llm.has_api_key() => {
            (CheckStatus::Pass, format!("gemini model `{}` with api key configured", config.llm.model))
        }
        LlmProvider::Gemini => (
            CheckStatus::Warn,
            "llm.api_key is not set (COORDI_LLM_API_KEY or GEMINI_API_KEY); suggestions will be rule-based"
                .to_string(),
        ),
    };
    DoctorCheck { name: "llm_readiness", status, details }
}

fn check_weather(config: &AppConfig) -> DoctorCheck {
    let (status, details) = match (config.weather.coordinates(), config.weather.api_key.is_some()) {
        (Some((latitude, longitude)), true) => {
            (CheckStatus::Pass, format!("weather lookups for {latitude}, {longitude}"))
        }
        (None, _) => (
            CheckStatus::Warn,
            "weather.latitude/longitude are not set; pass --temperature, --condition and --location to suggest"
                .to_string(),
        ),
        (Some(_), false) => (
            CheckStatus::Warn,
            "weather.api_key is not set; manual weather entry will be required".to_string(),
        ),
    };
    DoctorCheck { name: "weather_readiness", status, details }
}

fn check_storage(config: &AppConfig) -> DoctorCheck {
    let runtime = match build_runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(_) => {
            return DoctorCheck {
                name: "storage_access",
                status: CheckStatus::Fail,
                details: "failed to initialize async runtime".to_string(),
            };
        }
    };

    let store = JsonFileStore::new(config.storage.path.clone());
    match runtime.block_on(store.get(USER_PREFERENCES_KEY)) {
        Ok(_) => DoctorCheck {
            name: "storage_access",
            status: CheckStatus::Pass,
            details: format!("storage readable at `{}`", store.path().display()),
        },
        Err(error) => DoctorCheck {
            name: "storage_access",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}
