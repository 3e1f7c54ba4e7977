//! Gemini `generateContent` client.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use coordi_core::config::LlmConfig;

use crate::llm::LlmClient;

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GeminiClient {
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or_else(|| anyhow!("Gemini API key is not configured"))?;

        let request = GenerateRequest { contents: [Content { parts: [Part { text: prompt }] }] };
        debug!(event_name = "llm.request.sent", model = %self.model, prompt_chars = prompt.len(), "sending completion request");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key.expose_secret())])
            .json(&request)
            .send()
            .await
            .map_err(|error| anyhow!("gemini request failed: {}", error.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| anyhow!("gemini response could not be read: {}", error.without_url()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_default();
            return Err(anyhow!("gemini returned {status}: {message}"));
        }

        let parsed = serde_json::from_str::<GenerateResponse>(&body)
            .context("gemini response envelope is not valid JSON")?;
        extract_text(parsed)
    }
}

/// Concatenated text parts of the first candidate.
pub fn extract_text(response: GenerateResponse) -> Result<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content.parts.into_iter().filter_map(|part| part.text).collect::<Vec<_>>().join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(anyhow!("gemini returned no text candidates"));
    }
    Ok(text)
}
