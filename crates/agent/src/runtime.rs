use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use coordi_core::domain::outfit::{History, Outfit, OutfitSource};
use coordi_core::domain::profile::UserDemographic;
use coordi_core::domain::weather::WeatherSnapshot;
use coordi_core::errors::SuggestionError;
use coordi_core::images::{ImageSelector, StockImageCatalog};
use coordi_core::suggestions::{
    build_prompt, parse_completion, ClothingCatalog, FallbackGenerator, SuggestionInput,
    DEFAULT_AI_DESCRIPTION,
};

use crate::llm::{redact_key, LlmClient};

/// Produces one outfit per call. The model only proposes content; a failed or
/// malformed proposal is replaced by the rule-based generator, so a call never
/// fails once weather and style are known.
pub struct SuggestionRuntime {
    llm: Arc<dyn LlmClient>,
    images: Arc<dyn ImageSelector>,
    catalog: &'static ClothingCatalog,
    rng: Mutex<StdRng>,
    key_hint: String,
}

impl SuggestionRuntime {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            images: Arc::new(StockImageCatalog::builtin().clone()),
            catalog: ClothingCatalog::builtin(),
            rng: Mutex::new(StdRng::from_entropy()),
            key_hint: redact_key(""),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_images(mut self, images: Arc<dyn ImageSelector>) -> Self {
        self.images = images;
        self
    }

    pub fn with_catalog(mut self, catalog: &'static ClothingCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Key used only for the redacted auth diagnostic.
    pub fn with_api_key(mut self, api_key: Option<&SecretString>) -> Self {
        self.key_hint = redact_key(api_key.map(|key| key.expose_secret()).unwrap_or_default());
        self
    }

    pub async fn generate_suggestion(
        &self,
        demographic: UserDemographic,
        weather: &WeatherSnapshot,
        style: &str,
        history: &History,
    ) -> Outfit {
        let input = SuggestionInput { demographic, weather, style, history };

        match self.suggest_with_model(&input).await {
            Ok(outfit) => {
                info!(
                    event_name = "suggestion.ai.succeeded",
                    style,
                    items = outfit.items.len(),
                    "model suggestion accepted"
                );
                outfit
            }
            Err(error) => {
                warn!(
                    event_name = "suggestion.ai.failed",
                    error_class = error.error_class(),
                    error = %error,
                    "model suggestion failed, using rule-based outfit"
                );
                if let SuggestionError::ResponseParse { raw, .. } = &error {
                    debug!(event_name = "suggestion.ai.raw_response", raw = %raw, "unparsable model output");
                }
                if error.looks_like_auth_problem() {
                    warn!(
                        event_name = "suggestion.ai.auth_diagnostic",
                        api_key = %self.key_hint,
                        "completion failure looks like an API key problem; check llm.api_key"
                    );
                }

                let outfit = {
                    let mut rng = self.lock_rng();
                    FallbackGenerator::new(self.catalog, self.images.as_ref()).generate(
                        &input,
                        Utc::now(),
                        &mut *rng,
                    )
                };
                info!(
                    event_name = "suggestion.fallback.used",
                    style,
                    items = outfit.items.len(),
                    "rule-based suggestion produced"
                );
                outfit
            }
        }
    }

    async fn suggest_with_model(
        &self,
        input: &SuggestionInput<'_>,
    ) -> Result<Outfit, SuggestionError> {
        let prompt =
            build_prompt(&input.demographic, input.weather, input.style, input.history.outfits());

        let raw = self
            .llm
            .complete(&prompt)
            .await
            .map_err(|error| SuggestionError::CompletionFailure(format!("{error:#}")))?;

        let mut content = parse_completion(&raw)?;
        if content.items.is_empty() {
            return Err(SuggestionError::InvalidResponseShape("`items` is empty".to_string()));
        }
        if content.description.trim().is_empty() {
            content.description = DEFAULT_AI_DESCRIPTION.to_string();
        }

        let image_url = {
            let mut rng = self.lock_rng();
            self.images.select(
                input.style,
                input.demographic.gender,
                input.weather.temperature,
                &input.excluded_images(),
                &mut *rng,
            )
        };

        Outfit::assemble(content, input.style, input.weather, image_url, OutfitSource::Ai, Utc::now())
            .map_err(|error| SuggestionError::InvalidResponseShape(error.to_string()))
    }

    fn lock_rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use chrono::Utc;

    use coordi_core::domain::outfit::{History, Outfit, OutfitContent, OutfitItem, OutfitSource};
    use coordi_core::domain::profile::{Gender, UserDemographic};
    use coordi_core::domain::weather::WeatherSnapshot;
    use coordi_core::images::StockImageCatalog;

    use super::SuggestionRuntime;
    use crate::llm::LlmClient;

    struct ScriptedClient {
        reply: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self { reply: Ok(text.to_string()), prompts: Mutex::new(Vec::new()) })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self { reply: Err(message.to_string()), prompts: Mutex::new(Vec::new()) })
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().expect("prompt log").push(prompt.to_string());
            self.reply.clone().map_err(|message| anyhow!(message))
        }
    }

    const AI_REPLY: &str = r#"```json
{
  "items": [
    {"category": "tops", "name": "linen shirt", "color": "white", "material": "linen", "details": ["open collar"]},
    {"category": "bottoms", "name": "wide chinos", "color": "beige", "material": "cotton", "details": []}
  ],
  "stylePoint": "Relaxed summer layering",
  "weatherNote": "Breathable for a warm day"
}
```"#;

    fn tokyo() -> WeatherSnapshot {
        WeatherSnapshot::new(25, "clear", "Tokyo")
    }

    fn female_25() -> UserDemographic {
        UserDemographic::new(Gender::Female, 25)
    }

    #[tokio::test]
    async fn valid_model_reply_becomes_an_ai_outfit() {
        let client = ScriptedClient::replying(AI_REPLY);
        let runtime = SuggestionRuntime::new(client.clone()).with_seed(1);

        let outfit =
            runtime.generate_suggestion(female_25(), &tokyo(), "casual", &History::default()).await;

        assert_eq!(outfit.source, OutfitSource::Ai);
        assert_eq!(outfit.items.len(), 2);
        assert_eq!(outfit.items[0].name, "linen shirt");
        assert_eq!(outfit.description, "An outfit suggested by the AI stylist.");
        assert_eq!(outfit.style_point, "Relaxed summer layering");
        assert_eq!(outfit.temperature, 25);
        assert_eq!(outfit.weather, "clear");
        assert!(StockImageCatalog::builtin()
            .images_for("casual", Gender::Female)
            .contains(&outfit.image_url));

        let prompts = client.prompts.lock().expect("prompt log");
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- Gender: female"));
    }

    #[tokio::test]
    async fn completion_failure_falls_back() {
        let runtime = SuggestionRuntime::new(ScriptedClient::failing("connection reset")).with_seed(3);

        let outfit =
            runtime.generate_suggestion(female_25(), &tokyo(), "casual", &History::default()).await;

        assert_eq!(outfit.source, OutfitSource::Fallback);
        assert!(outfit.items.len() >= 4);
        assert!(!outfit.items[0].color.is_empty());
        assert!(outfit.items[1..].iter().all(|item| item.color.is_empty()));
        assert_eq!(outfit.temperature, 25);
        assert_eq!(outfit.weather, "clear");
    }

    #[tokio::test]
    async fn unparsable_or_empty_replies_fall_back() {
        for reply in ["not json", "{\"foo\":1}", "```json\n{\"items\":[]}\n```"] {
            let runtime = SuggestionRuntime::new(ScriptedClient::replying(reply)).with_seed(5);
            let outfit = runtime
                .generate_suggestion(female_25(), &tokyo(), "street", &History::default())
                .await;
            assert_eq!(outfit.source, OutfitSource::Fallback, "reply: {reply}");
            assert!(!outfit.items.is_empty());
        }
    }

    #[tokio::test]
    async fn auth_failure_still_yields_an_outfit() {
        let runtime = SuggestionRuntime::new(ScriptedClient::failing("API key not valid"))
            .with_api_key(Some(&"AIzaSecret".to_string().into()))
            .with_seed(8);

        let outfit = runtime
            .generate_suggestion(UserDemographic::default(), &tokyo(), "smart", &History::default())
            .await;
        assert_eq!(outfit.source, OutfitSource::Fallback);
    }

    #[tokio::test]
    async fn prompt_quotes_recent_history() {
        let client = ScriptedClient::replying(AI_REPLY);
        let runtime = SuggestionRuntime::new(client.clone()).with_seed(2);
        let previous = Outfit::assemble(
            OutfitContent {
                items: vec![OutfitItem::named("tops", "mohair cardigan").with_color("ivory")],
                ..OutfitContent::default()
            },
            "vintage",
            &tokyo(),
            String::new(),
            OutfitSource::Ai,
            Utc::now(),
        )
        .expect("history outfit");

        runtime
            .generate_suggestion(female_25(), &tokyo(), "vintage", &History::new(vec![previous]))
            .await;

        let prompts = client.prompts.lock().expect("prompt log");
        assert!(prompts[0].contains("mohair cardigan (ivory)"));
    }

    #[tokio::test]
    async fn same_seed_gives_same_fallback_items() {
        let first = SuggestionRuntime::new(ScriptedClient::failing("timeout"))
            .with_seed(99)
            .generate_suggestion(female_25(), &tokyo(), "casual", &History::default())
            .await;
        let second = SuggestionRuntime::new(ScriptedClient::failing("timeout"))
            .with_seed(99)
            .generate_suggestion(female_25(), &tokyo(), "casual", &History::default())
            .await;

        assert_eq!(first.items, second.items);
        assert_eq!(first.image_url, second.image_url);
    }
}
