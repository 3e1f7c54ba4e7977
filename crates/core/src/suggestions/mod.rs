//! Outfit suggestion building blocks.
//!
//! Everything here is deterministic given its inputs and an injected random
//! source. Network calls and persistence live in the agent and db crates.

pub mod catalog;
pub mod fallback;
pub mod prompt;
pub mod response;

pub use catalog::{CandidateTable, Category, ClothingCatalog};
pub use fallback::FallbackGenerator;
pub use prompt::build_prompt;
pub use response::{parse_completion, strip_code_fence};

use crate::domain::outfit::History;
use crate::domain::profile::UserDemographic;
use crate::domain::weather::WeatherSnapshot;

/// Outfits from history quoted back to the model as "do not repeat".
pub const PROMPT_HISTORY_WINDOW: usize = 5;

/// Recent image URLs the image selector avoids.
pub const IMAGE_HISTORY_WINDOW: usize = 3;

pub const DEFAULT_AI_DESCRIPTION: &str = "An outfit suggested by the AI stylist.";

/// Inputs shared by the AI and rule-based paths.
#[derive(Clone, Copy, Debug)]
pub struct SuggestionInput<'a> {
    pub demographic: UserDemographic,
    pub weather: &'a WeatherSnapshot,
    pub style: &'a str,
    pub history: &'a History,
}

impl SuggestionInput<'_> {
    pub fn excluded_images(&self) -> Vec<String> {
        self.history.recent_image_urls(IMAGE_HISTORY_WINDOW)
    }
}
