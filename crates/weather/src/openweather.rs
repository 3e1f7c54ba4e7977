//! OpenWeatherMap current-conditions client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use coordi_core::config::WeatherConfig;
use coordi_core::domain::weather::{WeatherSnapshot, CONDITION_CLEAR, CONDITION_CLOUDY, CONDITION_RAIN};
use coordi_core::errors::SuggestionError;

use crate::WeatherProvider;

pub const CURRENT_LOCATION_LABEL: &str = "Current location";

/// Provider descriptions and main groups mapped to display conditions.
const CONDITION_TABLE: &[(&str, &str)] = &[
    ("clear sky", CONDITION_CLEAR),
    ("few clouds", "partly cloudy"),
    ("scattered clouds", CONDITION_CLOUDY),
    ("broken clouds", CONDITION_CLOUDY),
    ("overcast clouds", CONDITION_CLOUDY),
    ("shower rain", "showers"),
    ("rain", CONDITION_RAIN),
    ("thunderstorm", "thunderstorm"),
    ("snow", "snow"),
    ("mist", "fog"),
    ("fog", "fog"),
    ("haze", "haze"),
];

#[derive(Debug, Deserialize)]
pub struct OpenWeatherResponse {
    pub main: MainReading,
    #[serde(default)]
    pub weather: Vec<ConditionReading>,
    #[serde(default)]
    pub wind: Option<WindReading>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MainReading {
    pub temp: f64,
    #[serde(default)]
    pub humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct ConditionReading {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct WindReading {
    #[serde(default)]
    pub speed: f64,
}

pub struct OpenWeatherProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    coordinates: Option<(f64, f64)>,
}

impl OpenWeatherProvider {
    pub fn from_config(config: &WeatherConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            coordinates: config.coordinates(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self) -> Result<WeatherSnapshot, SuggestionError> {
        let Some((latitude, longitude)) = self.coordinates else {
            return Err(unavailable("location is not configured"));
        };
        let Some(api_key) = self.api_key.as_ref().filter(|key| !key.expose_secret().is_empty())
        else {
            return Err(unavailable("weather api key is not configured"));
        };

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", api_key.expose_secret().to_string()),
                ("units", "metric".to_string()),
                ("lang", "en".to_string()),
            ])
            .send()
            .await
            .map_err(|error| {
                warn!(event_name = "weather.request.failed", error = %error.without_url(), "weather request failed");
                unavailable("weather service could not be reached")
            })?;

        if !response.status().is_success() {
            warn!(event_name = "weather.request.rejected", status = %response.status(), "weather service returned an error");
            return Err(unavailable(format!("weather service returned {}", response.status())));
        }

        let payload: OpenWeatherResponse = response.json().await.map_err(|error| {
            warn!(event_name = "weather.decode.failed", error = %error.without_url(), "could not decode weather response");
            unavailable("weather response could not be decoded")
        })?;

        let snapshot = snapshot_from_response(payload);
        debug!(
            event_name = "weather.observed",
            temperature = snapshot.temperature,
            condition = %snapshot.condition,
            location = %snapshot.location,
            "weather observation received"
        );
        Ok(snapshot)
    }
}

fn unavailable(reason: impl Into<String>) -> SuggestionError {
    SuggestionError::WeatherUnavailable(reason.into())
}

pub fn snapshot_from_response(response: OpenWeatherResponse) -> WeatherSnapshot {
    let condition = response
        .weather
        .first()
        .map(|reading| map_condition(&reading.main, &reading.description))
        .unwrap_or(CONDITION_CLEAR);
    let location = if response.name.trim().is_empty() {
        CURRENT_LOCATION_LABEL.to_string()
    } else {
        response.name
    };

    let mut snapshot = WeatherSnapshot::new(response.main.temp.round() as i32, condition, location)
        .with_wind_speed(response.wind.map(|wind| wind.speed).unwrap_or(0.0));
    if let Some(humidity) = response.main.humidity {
        snapshot = snapshot.with_humidity(humidity);
    }
    snapshot
}

/// Table lookup on the description, then the main group, then keyword
/// heuristics on the description. Defaults to clear.
pub fn map_condition(main: &str, description: &str) -> &'static str {
    let description = description.trim().to_ascii_lowercase();
    let main = main.trim().to_ascii_lowercase();

    let lookup = |key: &str| {
        CONDITION_TABLE.iter().find(|(source, _)| *source == key).map(|(_, condition)| *condition)
    };

    if let Some(condition) = lookup(&description).or_else(|| lookup(&main)) {
        return condition;
    }

    if description.contains("clear") {
        CONDITION_CLEAR
    } else if description.contains("cloud") {
        CONDITION_CLOUDY
    } else if description.contains("rain") || description.contains("drizzle") {
        CONDITION_RAIN
    } else {
        CONDITION_CLEAR
    }
}
