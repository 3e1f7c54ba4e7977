//! Home-screen flow without rendering: load stored state and weather together
//! (or ask for manual weather), and produce suggestions that are appended to
//! history.

use std::sync::Arc;

use tracing::{info, warn};

use coordi_core::domain::outfit::{History, Outfit};
use coordi_core::domain::profile::{UserPreferences, UserProfile};
use coordi_core::domain::weather::WeatherSnapshot;
use coordi_core::errors::{DomainError, SuggestionError};
use coordi_db::UserRepository;
use coordi_weather::WeatherProvider;

use crate::runtime::SuggestionRuntime;

#[derive(Clone, Debug, PartialEq)]
pub enum SuggestionOutcome {
    /// No style has been chosen yet.
    NeedsPreferences,
    /// Weather lookup failed and nothing was entered manually.
    NeedsManualWeather,
    Suggested { outfit: Outfit, persisted: bool },
}

pub struct HomeSession {
    repository: UserRepository,
    runtime: Arc<SuggestionRuntime>,
    profile: Option<UserProfile>,
    preferences: Option<UserPreferences>,
    history: History,
    weather: Option<WeatherSnapshot>,
    weather_error: Option<SuggestionError>,
}

impl HomeSession {
    pub async fn load(
        repository: UserRepository,
        weather_provider: &dyn WeatherProvider,
        runtime: Arc<SuggestionRuntime>,
    ) -> Self {
        let (preferences, profile, history, weather) = tokio::join!(
            repository.user_preferences(),
            repository.user_profile(),
            repository.outfit_history(),
            weather_provider.current_weather()
        );

        let (weather, weather_error) = match weather {
            Ok(snapshot) => (Some(snapshot), None),
            Err(error) => {
                warn!(
                    event_name = "session.weather.unavailable",
                    error = %error,
                    "weather lookup failed, manual entry required"
                );
                (None, Some(error))
            }
        };

        info!(
            event_name = "session.loaded",
            has_profile = profile.is_some(),
            has_preferences = preferences.is_some(),
            history_len = history.len(),
            has_weather = weather.is_some(),
            "home session loaded"
        );

        Self { repository, runtime, profile, preferences, history, weather, weather_error }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn preferences(&self) -> Option<&UserPreferences> {
        self.preferences.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn weather_error(&self) -> Option<&SuggestionError> {
        self.weather_error.as_ref()
    }

    pub fn needs_manual_weather(&self) -> bool {
        self.weather.is_none()
    }

    /// Uses `style` for this session only; stored preferences are untouched.
    pub fn override_style(&mut self, style: impl Into<String>) {
        let preferences = self.preferences.get_or_insert_with(UserPreferences::default);
        preferences.selected_style = Some(style.into());
    }

    pub fn submit_manual_weather(
        &mut self,
        temperature: &str,
        condition: &str,
        location: &str,
    ) -> Result<&WeatherSnapshot, DomainError> {
        let snapshot = WeatherSnapshot::from_manual(temperature, condition, location)?;
        self.weather_error = None;
        Ok(self.weather.insert(snapshot))
    }

    pub async fn suggest(&mut self) -> SuggestionOutcome {
        let Some(preferences) = self.preferences.as_ref() else {
            return SuggestionOutcome::NeedsPreferences;
        };
        let Some(style) = preferences.style().map(str::to_string) else {
            return SuggestionOutcome::NeedsPreferences;
        };
        let Some(weather) = self.weather.as_ref() else {
            return SuggestionOutcome::NeedsManualWeather;
        };

        let demographic = preferences.demographic(self.profile.as_ref());
        let outfit =
            self.runtime.generate_suggestion(demographic, weather, &style, &self.history).await;

        self.history.record(outfit.clone());
        let persisted = self.repository.save_outfit_history(outfit.clone()).await;

        SuggestionOutcome::Suggested { outfit, persisted }
    }
}
