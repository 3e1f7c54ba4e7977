use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid manual weather input: {0}")]
    InvalidManualWeather(String),
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Failures along the suggestion flow. Only `WeatherUnavailable` ever reaches
/// the user; the AI-path variants are absorbed by the fallback generator and
/// storage failures are logged and swallowed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SuggestionError {
    #[error("weather unavailable: {0}")]
    WeatherUnavailable(String),
    #[error("completion call failed: {0}")]
    CompletionFailure(String),
    #[error("could not parse generation response: {message}")]
    ResponseParse { message: String, raw: String },
    #[error("generation response has an invalid shape: {0}")]
    InvalidResponseShape(String),
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl SuggestionError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::WeatherUnavailable(_) => "weather_unavailable",
            Self::CompletionFailure(_) => "completion_failure",
            Self::ResponseParse { .. } => "response_parse",
            Self::InvalidResponseShape(_) => "invalid_response_shape",
            Self::StorageFailure(_) => "storage_failure",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::WeatherUnavailable(_) => {
                "Location is unavailable. Enter the temperature, condition and location manually."
            }
            Self::CompletionFailure(_)
            | Self::ResponseParse { .. }
            | Self::InvalidResponseShape(_) => {
                "The AI stylist is unavailable right now, so a standard suggestion was used."
            }
            Self::StorageFailure(_) => "Your data could not be saved on this device.",
        }
    }

    /// True when a completion failure reads like a credential problem.
    pub fn looks_like_auth_problem(&self) -> bool {
        match self {
            Self::CompletionFailure(message) => {
                let lowered = message.to_ascii_lowercase();
                lowered.contains("api key")
                    || lowered.contains("api_key")
                    || lowered.contains("unauthorized")
                    || lowered.contains("permission denied")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::SuggestionError;

    #[test]
    fn weather_unavailable_routes_user_to_manual_entry() {
        let error = SuggestionError::WeatherUnavailable("geolocation denied".to_owned());
        assert_eq!(error.error_class(), "weather_unavailable");
        assert!(error.user_message().contains("manually"));
    }

    #[test]
    fn ai_path_failures_share_a_user_safe_message() {
        let parse = SuggestionError::ResponseParse {
            message: "expected value".to_owned(),
            raw: "not json".to_owned(),
        };
        let shape = SuggestionError::InvalidResponseShape("items missing".to_owned());
        assert_eq!(parse.user_message(), shape.user_message());
        assert!(!parse.to_string().contains("not json"));
    }

    #[test]
    fn auth_heuristic_only_applies_to_completion_failures() {
        assert!(SuggestionError::CompletionFailure("API key not valid".to_owned())
            .looks_like_auth_problem());
        assert!(!SuggestionError::CompletionFailure("timeout".to_owned()).looks_like_auth_problem());
        assert!(!SuggestionError::StorageFailure("api key".to_owned()).looks_like_auth_problem());
    }
}
