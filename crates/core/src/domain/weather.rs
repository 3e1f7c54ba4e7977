use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub const CONDITION_CLEAR: &str = "clear";
pub const CONDITION_CLOUDY: &str = "cloudy";
pub const CONDITION_RAIN: &str = "rain";

/// Temperatures strictly below this are cold.
pub const COLD_BELOW_CELSIUS: i32 = 15;
/// Temperatures strictly above this are warm.
pub const WARM_ABOVE_CELSIUS: i32 = 25;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: i32,
    #[serde(rename = "weather")]
    pub condition: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub is_default: bool,
    pub observed_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn new(temperature: i32, condition: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            temperature,
            condition: condition.into(),
            location: location.into(),
            humidity: None,
            wind_speed: None,
            is_default: false,
            observed_at: Utc::now(),
        }
    }

    pub fn with_humidity(mut self, humidity: u8) -> Self {
        self.humidity = Some(humidity);
        self
    }

    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = Some(wind_speed);
        self
    }

    /// Builds a snapshot from the manual-entry form. All three fields are required
    /// and the temperature must be a whole number of degrees.
    pub fn from_manual(
        temperature: &str,
        condition: &str,
        location: &str,
    ) -> Result<Self, DomainError> {
        let temperature = temperature.trim().parse::<i32>().map_err(|_| {
            DomainError::InvalidManualWeather(format!(
                "temperature `{}` is not a whole number of degrees",
                temperature.trim()
            ))
        })?;
        let condition = condition.trim();
        if condition.is_empty() {
            return Err(DomainError::InvalidManualWeather("condition is required".to_string()));
        }
        let location = location.trim();
        if location.is_empty() {
            return Err(DomainError::InvalidManualWeather("location is required".to_string()));
        }

        Ok(Self::new(temperature, condition, location))
    }

    pub fn bucket(&self) -> TemperatureBucket {
        TemperatureBucket::from_celsius(self.temperature)
    }

    pub fn is_rain(&self) -> bool {
        self.condition.trim().eq_ignore_ascii_case(CONDITION_RAIN)
    }

    pub fn is_cloudy(&self) -> bool {
        self.condition.trim().eq_ignore_ascii_case(CONDITION_CLOUDY)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBucket {
    Cold,
    Mild,
    Warm,
}

impl TemperatureBucket {
    pub fn from_celsius(temperature: i32) -> Self {
        if temperature < COLD_BELOW_CELSIUS {
            Self::Cold
        } else if temperature > WARM_ABOVE_CELSIUS {
            Self::Warm
        } else {
            Self::Mild
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Mild => "mild",
            Self::Warm => "warm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TemperatureBucket, WeatherSnapshot};
    use crate::errors::DomainError;

    #[test]
    fn bucket_boundaries_are_strict() {
        assert_eq!(TemperatureBucket::from_celsius(14), TemperatureBucket::Cold);
        assert_eq!(TemperatureBucket::from_celsius(15), TemperatureBucket::Mild);
        assert_eq!(TemperatureBucket::from_celsius(25), TemperatureBucket::Mild);
        assert_eq!(TemperatureBucket::from_celsius(26), TemperatureBucket::Warm);
        assert_eq!(TemperatureBucket::from_celsius(-40), TemperatureBucket::Cold);
    }

    #[test]
    fn manual_entry_trims_and_parses() {
        let snapshot = WeatherSnapshot::from_manual(" 18 ", " cloudy ", " Osaka ")
            .expect("manual weather should parse");
        assert_eq!(snapshot.temperature, 18);
        assert_eq!(snapshot.condition, "cloudy");
        assert_eq!(snapshot.location, "Osaka");
        assert!(!snapshot.is_default);
        assert!(snapshot.is_cloudy());
    }

    #[test]
    fn manual_entry_rejects_non_numeric_temperature() {
        let error = WeatherSnapshot::from_manual("warm", "clear", "Tokyo")
            .expect_err("non-numeric temperature must fail");
        assert!(matches!(error, DomainError::InvalidManualWeather(ref message) if message.contains("warm")));
    }

    #[test]
    fn manual_entry_requires_condition_and_location() {
        assert!(WeatherSnapshot::from_manual("20", "  ", "Tokyo").is_err());
        assert!(WeatherSnapshot::from_manual("20", "rain", "").is_err());
    }

    #[test]
    fn rain_detection_ignores_case() {
        assert!(WeatherSnapshot::new(12, "Rain", "Sapporo").is_rain());
        assert!(!WeatherSnapshot::new(12, "light rain", "Sapporo").is_rain());
    }

    #[test]
    fn serializes_condition_under_weather_key() {
        let snapshot = WeatherSnapshot::new(21, "clear", "Tokyo");
        let value = serde_json::to_value(&snapshot).expect("serialize snapshot");
        assert_eq!(value["weather"], "clear");
        assert_eq!(value["isDefault"], false);
        assert!(value.get("humidity").is_none());
    }
}
