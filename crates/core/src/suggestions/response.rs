use serde_json::{Map, Value};

use crate::domain::outfit::{OutfitContent, OutfitItem};
use crate::errors::SuggestionError;

/// Removes one leading "```json"/"```" marker and one trailing "```" marker.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }

    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Parses raw completion text into outfit content. Only `items` is required;
/// item fields are normalized leniently.
pub fn parse_completion(raw: &str) -> Result<OutfitContent, SuggestionError> {
    let stripped = strip_code_fence(raw);
    let value = serde_json::from_str::<Value>(stripped).map_err(|error| {
        SuggestionError::ResponseParse { message: error.to_string(), raw: raw.to_string() }
    })?;

    let Value::Object(object) = value else {
        return Err(SuggestionError::InvalidResponseShape(
            "response is not a JSON object".to_string(),
        ));
    };

    let items = match object.get("items") {
        Some(Value::Array(items)) => items.iter().filter_map(normalize_item).collect(),
        Some(_) => {
            return Err(SuggestionError::InvalidResponseShape(
                "`items` is not an array".to_string(),
            ))
        }
        None => {
            return Err(SuggestionError::InvalidResponseShape("`items` is missing".to_string()))
        }
    };

    Ok(OutfitContent {
        items,
        description: string_field(&object, "description"),
        style_point: string_field(&object, "stylePoint"),
        weather_note: string_field(&object, "weatherNote"),
    })
}

fn normalize_item(value: &Value) -> Option<OutfitItem> {
    match value {
        Value::Object(fields) => Some(OutfitItem {
            category: string_field(fields, "category"),
            name: string_field(fields, "name"),
            color: string_field(fields, "color"),
            material: string_field(fields, "material"),
            details: match fields.get("details") {
                Some(Value::Array(details)) => {
                    details.iter().filter_map(Value::as_str).map(str::to_string).collect()
                }
                _ => Vec::new(),
            },
        }),
        Value::String(name) => Some(OutfitItem { name: name.clone(), ..OutfitItem::default() }),
        _ => None,
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}
