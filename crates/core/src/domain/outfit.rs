use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::weather::WeatherSnapshot;
use crate::errors::DomainError;

pub const HISTORY_CAP: usize = 50;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitItem {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl OutfitItem {
    pub fn named(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self { category: category.into(), name: name.into(), ..Self::default() }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn display_name(&self) -> String {
        if self.color.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.color, self.name)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutfitSource {
    #[serde(rename = "AI")]
    Ai,
    Fallback,
}

/// Item list plus the free-text fields shared by both suggestion paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutfitContent {
    pub items: Vec<OutfitItem>,
    pub description: String,
    pub style_point: String,
    pub weather_note: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub items: Vec<OutfitItem>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub style_point: String,
    #[serde(default)]
    pub weather_note: String,
    pub style: String,
    pub weather: String,
    pub temperature: i32,
    #[serde(default)]
    pub image_url: String,
    pub source: OutfitSource,
    pub timestamp: DateTime<Utc>,
}

impl Outfit {
    /// Temperature and condition are always copied from `weather`.
    pub fn assemble(
        content: OutfitContent,
        style: &str,
        weather: &WeatherSnapshot,
        image_url: String,
        source: OutfitSource,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if content.items.is_empty() {
            return Err(DomainError::InvariantViolation("an outfit needs at least one item".to_string()));
        }

        Ok(Self {
            items: content.items,
            description: content.description,
            style_point: content.style_point,
            weather_note: content.weather_note,
            style: style.to_string(),
            weather: weather.condition.clone(),
            temperature: weather.temperature,
            image_url,
            source,
            timestamp,
        })
    }
}

/// Newest-first log of past suggestions, capped at [`HISTORY_CAP`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<Outfit>);

impl History {
    pub fn new(mut outfits: Vec<Outfit>) -> Self {
        outfits.truncate(HISTORY_CAP);
        Self(outfits)
    }

    pub fn record(&mut self, outfit: Outfit) {
        self.0.insert(0, outfit);
        self.0.truncate(HISTORY_CAP);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn outfits(&self) -> &[Outfit] {
        &self.0
    }

    pub fn recent(&self, count: usize) -> &[Outfit] {
        &self.0[..count.min(self.0.len())]
    }

    /// Every item name across the whole history.
    pub fn item_names(&self) -> HashSet<&str> {
        self.0.iter().flat_map(|outfit| outfit.items.iter()).map(|item| item.name.as_str()).collect()
    }

    pub fn recent_image_urls(&self, count: usize) -> Vec<String> {
        self.recent(count)
            .iter()
            .map(|outfit| outfit.image_url.clone())
            .filter(|url| !url.is_empty())
            .collect()
    }

    pub fn into_inner(self) -> Vec<Outfit> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{History, Outfit, OutfitContent, OutfitItem, OutfitSource, HISTORY_CAP};
    use crate::domain::weather::WeatherSnapshot;
    use crate::errors::DomainError;

    fn outfit(index: i64) -> Outfit {
        let weather = WeatherSnapshot::new(20, "clear", "Tokyo");
        Outfit::assemble(
            OutfitContent {
                items: vec![OutfitItem::named("tops", format!("shirt-{index}"))],
                ..OutfitContent::default()
            },
            "casual",
            &weather,
            format!("https://img.example/{index}"),
            OutfitSource::Fallback,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default()
                + Duration::minutes(index),
        )
        .expect("outfit with one item")
    }

    #[test]
    fn assemble_rejects_empty_items() {
        let weather = WeatherSnapshot::new(20, "clear", "Tokyo");
        let error = Outfit::assemble(
            OutfitContent::default(),
            "casual",
            &weather,
            String::new(),
            OutfitSource::Ai,
            Utc::now(),
        )
        .expect_err("empty items must be rejected");
        assert!(matches!(error, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn assemble_mirrors_weather_snapshot() {
        let outfit = outfit(1);
        assert_eq!(outfit.temperature, 20);
        assert_eq!(outfit.weather, "clear");
    }

    #[test]
    fn fifty_first_entry_evicts_the_oldest() {
        let mut history = History::default();
        for index in 0..HISTORY_CAP as i64 {
            history.record(outfit(index));
        }
        assert_eq!(history.len(), HISTORY_CAP);

        history.record(outfit(999));

        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.outfits()[0].items[0].name, "shirt-999");
        assert!(history.outfits().iter().all(|entry| entry.items[0].name != "shirt-0"));
        assert_eq!(history.outfits()[HISTORY_CAP - 1].items[0].name, "shirt-1");
    }

    #[test]
    fn recent_helpers_respect_short_histories() {
        let history = History::new(vec![outfit(2), outfit(1)]);
        assert_eq!(history.recent(5).len(), 2);
        assert_eq!(history.recent_image_urls(1), vec!["https://img.example/2".to_string()]);
        assert!(history.item_names().contains("shirt-1"));
    }

    #[test]
    fn display_name_prefixes_color_only_when_present() {
        assert_eq!(OutfitItem::named("tops", "knit").with_color("navy").display_name(), "navy knit");
        assert_eq!(OutfitItem::named("shoes", "loafers").display_name(), "loafers");
    }

    #[test]
    fn serializes_with_client_field_names() {
        let value = serde_json::to_value(outfit(3)).expect("serialize outfit");
        assert_eq!(value["source"], "Fallback");
        assert!(value.get("stylePoint").is_some());
        assert!(value.get("imageUrl").is_some());
    }
}
