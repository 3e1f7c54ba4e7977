pub mod config;
pub mod domain;
pub mod errors;
pub mod images;
pub mod suggestions;

pub use domain::outfit::{History, Outfit, OutfitContent, OutfitItem, OutfitSource};
pub use domain::profile::{Gender, UserDemographic, UserPreferences, UserProfile};
pub use domain::style::Style;
pub use domain::weather::{TemperatureBucket, WeatherSnapshot};
pub use errors::{DomainError, SuggestionError};
pub use images::{ImageSelector, StockImageCatalog};
pub use suggestions::{ClothingCatalog, FallbackGenerator, SuggestionInput};
