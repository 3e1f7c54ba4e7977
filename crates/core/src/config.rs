use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "coordi.toml";
pub const NESTED_CONFIG_FILE: &str = "config/coordi.toml";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub weather: WeatherConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct WeatherConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    Gemini,
    /// Never reaches a model; every suggestion takes the rule-based path.
    Offline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub storage_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub llm_provider: Option<LlmProvider>,
    pub llm_model: Option<String>,
    pub weather_latitude: Option<f64>,
    pub weather_longitude: Option<f64>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                provider: LlmProvider::Gemini,
                api_key: None,
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                model: "gemini-1.5-flash".to_string(),
                timeout_secs: 30,
            },
            weather: WeatherConfig {
                api_key: None,
                base_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
                latitude: None,
                longitude: None,
                timeout_secs: 10,
            },
            storage: StorageConfig { path: PathBuf::from(".coordi/store.json") },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl WeatherConfig {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

fn has_secret(secret: Option<&SecretString>) -> bool {
    secret.map(|value| !value.expose_secret().trim().is_empty()).unwrap_or(false)
}

impl LlmConfig {
    pub fn has_api_key(&self) -> bool {
        has_secret(self.api_key.as_ref())
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "offline" => Ok(Self::Offline),
            other => Err(ConfigError::Validation(format!(
                "unsupported llm provider `{other}` (expected gemini|offline)"
            ))),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(llm) = patch.llm {
            if let Some(provider) = llm.provider {
                self.llm.provider = provider;
            }
            if let Some(api_key) = llm.api_key {
                self.llm.api_key = Some(secret_value(api_key));
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = base_url;
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(weather) = patch.weather {
            if let Some(api_key) = weather.api_key {
                self.weather.api_key = Some(secret_value(api_key));
            }
            if let Some(base_url) = weather.base_url {
                self.weather.base_url = base_url;
            }
            if let Some(latitude) = weather.latitude {
                self.weather.latitude = Some(latitude);
            }
            if let Some(longitude) = weather.longitude {
                self.weather.longitude = Some(longitude);
            }
            if let Some(timeout_secs) = weather.timeout_secs {
                self.weather.timeout_secs = timeout_secs;
            }
        }

        if let Some(storage) = patch.storage {
            if let Some(path) = storage.path {
                self.storage.path = path;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("COORDI_LLM_PROVIDER") {
            self.llm.provider = value.parse()?;
        }
        // The client app reads the bare GEMINI_API_KEY, so accept it as an alias.
        if let Some(value) = read_env("COORDI_LLM_API_KEY").or_else(|| read_env("GEMINI_API_KEY"))
        {
            self.llm.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("COORDI_LLM_BASE_URL") {
            self.llm.base_url = value;
        }
        if let Some(value) = read_env("COORDI_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("COORDI_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("COORDI_LLM_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("COORDI_WEATHER_API_KEY") {
            self.weather.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("COORDI_WEATHER_BASE_URL") {
            self.weather.base_url = value;
        }
        if let Some(value) = read_env("COORDI_WEATHER_LATITUDE") {
            self.weather.latitude = Some(parse_f64("COORDI_WEATHER_LATITUDE", &value)?);
        }
        if let Some(value) = read_env("COORDI_WEATHER_LONGITUDE") {
            self.weather.longitude = Some(parse_f64("COORDI_WEATHER_LONGITUDE", &value)?);
        }
        if let Some(value) = read_env("COORDI_WEATHER_TIMEOUT_SECS") {
            self.weather.timeout_secs = parse_u64("COORDI_WEATHER_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("COORDI_STORAGE_PATH") {
            self.storage.path = PathBuf::from(value);
        }

        let log_level = read_env("COORDI_LOGGING_LEVEL").or_else(|| read_env("COORDI_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("COORDI_LOGGING_FORMAT").or_else(|| read_env("COORDI_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(storage_path) = overrides.storage_path {
            self.storage.path = storage_path;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(llm_provider) = overrides.llm_provider {
            self.llm.provider = llm_provider;
        }
        if let Some(llm_model) = overrides.llm_model {
            self.llm.model = llm_model;
        }
        if let Some(latitude) = overrides.weather_latitude {
            self.weather.latitude = Some(latitude);
        }
        if let Some(longitude) = overrides.weather_longitude {
            self.weather.longitude = Some(longitude);
        }
    }

    /// A missing Gemini key is not a validation error: the completion call
    /// fails at runtime and the rule-based generator takes over.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_llm(&self.llm)?;
        validate_weather(&self.weather)?;
        validate_storage(&self.storage)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from(NESTED_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_http_url(field: &str, url: &str) -> Result<(), ConfigError> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!("{field} must start with http:// or https://")))
    }
}

fn validate_timeout(field: &str, timeout_secs: u64) -> Result<(), ConfigError> {
    if timeout_secs == 0 || timeout_secs > 300 {
        return Err(ConfigError::Validation(format!("{field} must be in range 1..=300")));
    }
    Ok(())
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    validate_timeout("llm.timeout_secs", llm.timeout_secs)?;

    if llm.provider == LlmProvider::Gemini {
        validate_http_url("llm.base_url", &llm.base_url)?;
        if llm.model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "llm.model is required for the gemini provider (for example `gemini-1.5-flash`)"
                    .to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_weather(weather: &WeatherConfig) -> Result<(), ConfigError> {
    validate_timeout("weather.timeout_secs", weather.timeout_secs)?;
    validate_http_url("weather.base_url", &weather.base_url)?;

    match (weather.latitude, weather.longitude) {
        (Some(latitude), Some(longitude)) => {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(ConfigError::Validation(
                    "weather.latitude must be in range -90..=90".to_string(),
                ));
            }
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(ConfigError::Validation(
                    "weather.longitude must be in range -180..=180".to_string(),
                ));
            }
        }
        (None, None) => {}
        _ => {
            return Err(ConfigError::Validation(
                "weather.latitude and weather.longitude must be set together".to_string(),
            ))
        }
    }

    Ok(())
}

fn validate_storage(storage: &StorageConfig) -> Result<(), ConfigError> {
    if storage.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "storage.path must point to a JSON file (for example `.coordi/store.json`)"
                .to_string(),
        ));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    llm: Option<LlmPatch>,
    weather: Option<WeatherPatch>,
    storage: Option<StoragePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    provider: Option<LlmProvider>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct WeatherPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LlmProvider, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    fn missing_path(dir: &TempDir) -> Option<PathBuf> {
        Some(dir.path().join("absent.toml"))
    }

    #[test]
    fn defaults_load_without_any_key() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&["COORDI_LLM_API_KEY", "GEMINI_API_KEY"]);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let config = AppConfig::load(LoadOptions {
            config_path: missing_path(&dir),
            ..LoadOptions::default()
        })
        .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.llm.provider == LlmProvider::Gemini, "gemini is the default provider")?;
        ensure(config.llm.model == "gemini-1.5-flash", "default model should be gemini-1.5-flash")?;
        ensure(!config.llm.has_api_key(), "no key should be configured")?;
        ensure(config.weather.coordinates().is_none(), "no coordinates by default")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_COORDI_GEMINI_KEY", "AIzaFromEnv");
        env::set_var("TEST_COORDI_WEATHER_KEY", "owm-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("coordi.toml");
            fs::write(
                &path,
                r#"
[llm]
api_key = "${TEST_COORDI_GEMINI_KEY}"

[weather]
api_key = "${TEST_COORDI_WEATHER_KEY}"
latitude = 35.68
longitude = 139.76
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.llm.api_key.as_ref().map(|key| key.expose_secret() == "AIzaFromEnv")
                    == Some(true),
                "gemini key should be interpolated from environment",
            )?;
            ensure(
                config.weather.api_key.as_ref().map(|key| key.expose_secret() == "owm-from-env")
                    == Some(true),
                "weather key should be interpolated from environment",
            )?;
            ensure(
                config.weather.coordinates() == Some((35.68, 139.76)),
                "coordinates should come from the file",
            )
        })();

        clear_vars(&["TEST_COORDI_GEMINI_KEY", "TEST_COORDI_WEATHER_KEY"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&["TEST_COORDI_UNSET_VAR"]);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("coordi.toml");
        fs::write(&path, "[llm]\napi_key = \"${TEST_COORDI_UNSET_VAR}\"\n")
            .map_err(|err| err.to_string())?;

        match AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() }) {
            Err(ConfigError::MissingEnvInterpolation { var }) => {
                ensure(var == "TEST_COORDI_UNSET_VAR", "error should name the missing variable")
            }
            Err(other) => Err(format!("unexpected error: {other}")),
            Ok(_) => Err("expected interpolation failure".to_string()),
        }
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("COORDI_LOG_LEVEL", "warn");
        env::set_var("COORDI_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let config = AppConfig::load(LoadOptions {
                config_path: missing_path(&dir),
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&["COORDI_LOG_LEVEL", "COORDI_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("COORDI_STORAGE_PATH", "/tmp/from-env.json");
        env::set_var("COORDI_LLM_MODEL", "gemini-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("coordi.toml");
            fs::write(
                &path,
                r#"
[llm]
provider = "gemini"
model = "gemini-from-file"

[storage]
path = "/tmp/from-file.json"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    storage_path: Some(PathBuf::from("/tmp/from-override.json")),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.storage.path == PathBuf::from("/tmp/from-override.json"),
                "override storage path should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.llm.model == "gemini-from-env", "env model should win over the file")
        })();

        clear_vars(&["COORDI_STORAGE_PATH", "COORDI_LLM_MODEL"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("COORDI_WEATHER_LATITUDE", "35.0");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let error = match AppConfig::load(LoadOptions {
                config_path: missing_path(&dir),
                ..LoadOptions::default()
            }) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("weather.longitude")
            );
            ensure(has_message, "validation failure should mention the missing longitude")
        })();

        clear_vars(&["COORDI_WEATHER_LATITUDE"]);
        result
    }

    #[test]
    fn unparsable_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("COORDI_LLM_TIMEOUT_SECS", "soon");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            match AppConfig::load(LoadOptions {
                config_path: missing_path(&dir),
                ..LoadOptions::default()
            }) {
                Err(ConfigError::InvalidEnvOverride { key, .. }) => {
                    ensure(key == "COORDI_LLM_TIMEOUT_SECS", "error should name the variable")
                }
                Err(other) => Err(format!("unexpected error: {other}")),
                Ok(_) => Err("expected override failure".to_string()),
            }
        })();

        clear_vars(&["COORDI_LLM_TIMEOUT_SECS"]);
        result
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("COORDI_LLM_API_KEY", "AIza-secret-value");
        env::set_var("COORDI_WEATHER_API_KEY", "owm-secret-value");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let config = AppConfig::load(LoadOptions {
                config_path: missing_path(&dir),
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(!debug.contains("AIza-secret-value"), "debug output should not contain llm key")?;
            ensure(
                !debug.contains("owm-secret-value"),
                "debug output should not contain weather key",
            )?;
            ensure(config.llm.has_api_key(), "llm key should be loaded")
        })();

        clear_vars(&["COORDI_LLM_API_KEY", "COORDI_WEATHER_API_KEY"]);
        result
    }

    #[test]
    fn require_file_reports_missing_path() -> Result<(), String> {
        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("nowhere.toml");
        match AppConfig::load(LoadOptions {
            config_path: Some(path.clone()),
            require_file: true,
            ..LoadOptions::default()
        }) {
            Err(ConfigError::MissingConfigFile(reported)) => {
                ensure(reported == path, "error should carry the requested path")
            }
            Err(other) => Err(format!("unexpected error: {other}")),
            Ok(_) => Err("expected missing file error".to_string()),
        }
    }
}
