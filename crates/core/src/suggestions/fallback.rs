//! Rule-based outfit generator used whenever the AI path fails.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::domain::outfit::{Outfit, OutfitItem, OutfitSource};
use crate::domain::style::Style;
use crate::domain::weather::WeatherSnapshot;
use crate::images::ImageSelector;

use super::catalog::{demographic_additions, Category, ClothingCatalog};
use super::SuggestionInput;

pub const WEATHER_CATEGORY: &str = "weather";

const BACKSTOP_ITEMS: [(Category, &str); 4] = [
    (Category::Tops, "white T-shirt"),
    (Category::Bottoms, "blue jeans"),
    (Category::Shoes, "sneakers"),
    (Category::Accessories, "wristwatch"),
];

pub struct FallbackGenerator<'a> {
    catalog: &'a ClothingCatalog,
    images: &'a dyn ImageSelector,
}

impl<'a> FallbackGenerator<'a> {
    pub fn new(catalog: &'a ClothingCatalog, images: &'a dyn ImageSelector) -> Self {
        Self { catalog, images }
    }

    pub fn generate(
        &self,
        input: &SuggestionInput<'_>,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Outfit {
        let style = Style::lookup_key(input.style);
        let weather = input.weather;

        let mut items = self.select_items(input, style, rng);
        if items.is_empty() {
            items = backstop_items();
        } else if let Some(color) = self.catalog.palette(style).choose(rng) {
            items[0].color = color.clone();
        }
        items.extend(weather_extras(weather));

        let description = format!(
            "{}°C, {}: {}. {}",
            weather.temperature,
            weather.condition,
            self.catalog.style_clause(style),
            weather_clause(weather)
        );

        let image_url = self.images.select(
            input.style,
            input.demographic.gender,
            weather.temperature,
            &input.excluded_images(),
            rng,
        );

        Outfit {
            items,
            description,
            style_point: format!("A combination suited to {} style.", input.style),
            weather_note: format!(
                "Recommended for a {}°C, {} day.",
                weather.temperature, weather.condition
            ),
            style: input.style.to_string(),
            weather: weather.condition.clone(),
            temperature: weather.temperature,
            image_url,
            source: OutfitSource::Fallback,
            timestamp: now,
        }
    }

    fn select_items(
        &self,
        input: &SuggestionInput<'_>,
        style: Style,
        rng: &mut dyn RngCore,
    ) -> Vec<OutfitItem> {
        let Some(table) = self.catalog.resolve_table(style, input.weather.bucket()) else {
            return Vec::new();
        };
        let worn = input.history.item_names();

        let mut items = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let pool = table
                .candidates(category)
                .iter()
                .map(String::as_str)
                .chain(demographic_additions(category, &input.demographic))
                .collect::<Vec<_>>();

            let fresh = pool.iter().copied().filter(|name| !worn.contains(name)).collect::<Vec<_>>();
            let picked = if fresh.is_empty() { pool.choose(rng) } else { fresh.choose(rng) };

            if let Some(name) = picked {
                items.push(OutfitItem::named(category.as_str(), *name));
            }
        }
        items
    }
}

fn backstop_items() -> Vec<OutfitItem> {
    BACKSTOP_ITEMS
        .iter()
        .map(|(category, name)| OutfitItem::named(category.as_str(), *name))
        .collect()
}

fn weather_extras(weather: &WeatherSnapshot) -> Vec<OutfitItem> {
    let names: &[&str] = if weather.is_rain() {
        &["rain coat", "folding umbrella"]
    } else if weather.is_cloudy() && weather.temperature < 20 {
        &["light jacket"]
    } else if weather.temperature > 30 {
        &["sunscreen"]
    } else {
        &[]
    };
    names.iter().map(|name| OutfitItem::named(WEATHER_CATEGORY, *name)).collect()
}

fn weather_clause(weather: &WeatherSnapshot) -> &'static str {
    if weather.is_rain() {
        "Waterproof pieces keep you dry through the rain."
    } else if weather.temperature < 10 {
        "Layers focused on warmth keep out the cold."
    } else if weather.temperature > 30 {
        "Breathable, light fabrics keep you cool in the heat."
    } else {
        "A comfortable balance for today's temperature."
    }
}
