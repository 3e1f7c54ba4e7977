use async_trait::async_trait;

use coordi_core::domain::weather::WeatherSnapshot;
use coordi_core::errors::SuggestionError;

use crate::WeatherProvider;

/// Returns a preset observation, or always fails.
#[derive(Clone, Debug)]
pub struct FixedWeatherProvider {
    outcome: Result<WeatherSnapshot, String>,
}

impl FixedWeatherProvider {
    pub fn new(snapshot: WeatherSnapshot) -> Self {
        Self { outcome: Ok(snapshot) }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { outcome: Err(reason.into()) }
    }
}

#[async_trait]
impl WeatherProvider for FixedWeatherProvider {
    async fn current_weather(&self) -> Result<WeatherSnapshot, SuggestionError> {
        self.outcome.clone().map_err(SuggestionError::WeatherUnavailable)
    }
}
