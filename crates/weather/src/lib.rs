//! Current-weather lookup. Any failure surfaces as
//! `SuggestionError::WeatherUnavailable`, which routes the user to manual entry.

use async_trait::async_trait;

use coordi_core::domain::weather::WeatherSnapshot;
use coordi_core::errors::SuggestionError;

pub mod fixed;
pub mod openweather;

pub use fixed::FixedWeatherProvider;
pub use openweather::OpenWeatherProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self) -> Result<WeatherSnapshot, SuggestionError>;
}
