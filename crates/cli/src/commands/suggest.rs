use std::sync::Arc;

use clap::Args;
use coordi_agent::{build_client, HomeSession, SuggestionOutcome, SuggestionRuntime};
use coordi_core::config::LoadOptions;
use coordi_core::domain::outfit::{Outfit, OutfitItem, OutfitSource};
use coordi_core::errors::SuggestionError;
use coordi_weather::OpenWeatherProvider;

use crate::commands::{
    build_runtime, load_config, open_repository, CommandResult, EXIT_INPUT, EXIT_STORAGE,
};

const COMMAND: &str = "suggest";

#[derive(Debug, Clone, Default, Args)]
pub struct SuggestArgs {
    #[arg(long, help = "Current temperature in whole degrees Celsius (manual weather entry)")]
    pub temperature: Option<String>,
    #[arg(long, help = "Current condition, for example clear, cloudy or rain")]
    pub condition: Option<String>,
    #[arg(long, help = "Location label shown with the suggestion")]
    pub location: Option<String>,
    #[arg(long, help = "Style for this suggestion only; stored preferences are unchanged")]
    pub style: Option<String>,
    #[arg(long, help = "Seed the random source for reproducible rule-based output")]
    pub seed: Option<u64>,
}

impl SuggestArgs {
    fn manual_weather(&self) -> Option<(&str, &str, &str)> {
        match (&self.temperature, &self.condition, &self.location) {
            (None, None, None) => None,
            (temperature, condition, location) => Some((
                temperature.as_deref().unwrap_or_default(),
                condition.as_deref().unwrap_or_default(),
                location.as_deref().unwrap_or_default(),
            )),
        }
    }
}

pub fn run(options: &LoadOptions, args: SuggestArgs) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match build_runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    runtime.block_on(async {
        let mut engine = SuggestionRuntime::new(build_client(&config.llm))
            .with_api_key(config.llm.api_key.as_ref());
        if let Some(seed) = args.seed {
            engine = engine.with_seed(seed);
        }

        let weather_provider = OpenWeatherProvider::from_config(&config.weather);
        let mut session =
            HomeSession::load(open_repository(&config), &weather_provider, Arc::new(engine)).await;

        if let Some((temperature, condition, location)) = args.manual_weather() {
            if let Err(error) = session.submit_manual_weather(temperature, condition, location) {
                return CommandResult::failure(COMMAND, "invalid_input", error.to_string(), EXIT_INPUT);
            }
        }
        if let Some(style) = args.style.as_deref().filter(|style| !style.trim().is_empty()) {
            session.override_style(style);
        }

        match session.suggest().await {
            SuggestionOutcome::NeedsPreferences => CommandResult::failure(
                COMMAND,
                "preferences_required",
                "No style selected. Run `coordi preferences --style <style>` or pass --style.",
                EXIT_INPUT,
            ),
            SuggestionOutcome::NeedsManualWeather => {
                let detail = session
                    .weather_error()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "no weather observation".to_string());
                let unavailable = SuggestionError::WeatherUnavailable(detail.clone());
                CommandResult::failure(
                    COMMAND,
                    unavailable.error_class(),
                    format!(
                        "{} Use --temperature, --condition and --location. ({detail})",
                        unavailable.user_message()
                    ),
                    EXIT_INPUT,
                )
            }
            SuggestionOutcome::Suggested { outfit, persisted: true } => {
                let message = format!(
                    "{} suggestion for {}°C, {}: {}",
                    source_label(&outfit.source),
                    outfit.temperature,
                    outfit.weather,
                    item_summary(&outfit)
                );
                CommandResult::success_with_data(COMMAND, message, &outfit)
            }
            SuggestionOutcome::Suggested { outfit, persisted: false } => {
                let failure = SuggestionError::StorageFailure(config.storage.path.display().to_string());
                CommandResult::failure_with_data(
                    COMMAND,
                    failure.error_class(),
                    format!(
                        "{} The suggestion was produced but not added to history.",
                        failure.user_message()
                    ),
                    &outfit,
                    EXIT_STORAGE,
                )
            }
        }
    })
}

fn item_summary(outfit: &Outfit) -> String {
    outfit.items.iter().map(OutfitItem::display_name).collect::<Vec<_>>().join(", ")
}

fn source_label(source: &OutfitSource) -> &'static str {
    match source {
        OutfitSource::Ai => "AI",
        OutfitSource::Fallback => "rule-based",
    }
}
