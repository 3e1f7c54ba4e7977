use crate::domain::outfit::Outfit;
use crate::domain::profile::{Gender, UserDemographic};
use crate::domain::weather::WeatherSnapshot;

use super::PROMPT_HISTORY_WINDOW;

const OUTPUT_EXAMPLE: &str = r#"{
  "items": [
    {
      "category": "tops",
      "name": "oxford shirt",
      "color": "light blue",
      "material": "100% cotton",
      "details": ["button-down collar", "regular fit", "chest pocket", "sleeves end 5cm above the elbow"]
    },
    {
      "category": "bottoms",
      "name": "chino pants",
      "color": "beige",
      "material": "cotton blend",
      "details": ["straight silhouette", "ankle length", "side pockets"]
    },
    {
      "category": "shoes",
      "name": "loafers",
      "color": "brown",
      "material": "genuine leather",
      "details": ["tassels", "flat heel", "cushioned insole"]
    }
  ],
  "description": "Detailed explanation of the outfit (up to 150 characters)",
  "stylePoint": "Key styling point (up to 100 characters)",
  "weatherNote": "How the outfit accounts for the weather (up to 80 characters)"
}"#;

pub fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
        Gender::Other => "unspecified",
    }
}

/// `"name (color)"` tokens for the most recent outfits, or `"none"`.
pub fn previous_items_hint(history: &[Outfit]) -> String {
    let tokens = history
        .iter()
        .take(PROMPT_HISTORY_WINDOW)
        .flat_map(|outfit| outfit.items.iter())
        .map(|item| format!("{} ({})", item.name, item.color))
        .collect::<Vec<_>>();

    if tokens.is_empty() {
        "none".to_string()
    } else {
        tokens.join(", ")
    }
}

pub fn build_prompt(
    demographic: &UserDemographic,
    weather: &WeatherSnapshot,
    style: &str,
    history: &[Outfit],
) -> String {
    let gender = gender_label(demographic.gender);
    let age = demographic.age;
    let location = &weather.location;
    let temperature = weather.temperature;
    let condition = &weather.condition;
    let previous_items = previous_items_hint(history);
    let output_example = OUTPUT_EXAMPLE;

    format!(
        r#"You are an expert fashion stylist. Based on the conditions below, propose one very specific and detailed outfit.

[User]
- Gender: {gender}
- Age: {age}
- Preferred style: {style}

[Weather and environment]
- Location: {location}
- Temperature: {temperature}°C
- Weather: {condition}

[Previous suggestions (avoid repeating these)]
{previous_items}

[Requirements]
1. Describe each item very specifically (sleeve length, cut, material, color, design details).
2. Match the requested style ({style}).
3. Suit the weather and temperature.
4. Choose items appropriate for the user's age and gender.
5. Do not repeat previous suggestions; propose a new combination.
6. Choose items that are commonly available in local shops.

[Output format]
Answer with a single JSON object in exactly this shape. Every item must be a structured object:
{output_example}

Return only the JSON object with no other text. Item names must be specific."#
    )
}
