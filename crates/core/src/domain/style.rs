use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    #[default]
    Casual,
    Smart,
    Street,
    Mode,
    Minimal,
    Vintage,
}

impl Style {
    pub const ALL: [Style; 6] =
        [Self::Casual, Self::Smart, Self::Street, Self::Mode, Self::Minimal, Self::Vintage];

    /// Resolves a free-form style identifier to a lookup key. Unknown values
    /// resolve to `Casual`.
    pub fn lookup_key(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "casual" => Some(Self::Casual),
            "smart" => Some(Self::Smart),
            "street" => Some(Self::Street),
            "mode" => Some(Self::Mode),
            "minimal" => Some(Self::Minimal),
            "vintage" => Some(Self::Vintage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Smart => "smart",
            Self::Street => "street",
            Self::Mode => "mode",
            Self::Minimal => "minimal",
            Self::Vintage => "vintage",
        }
    }
}
