use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use coordi_core::config::{LlmConfig, LlmProvider};

use crate::gemini::GeminiClient;

/// Opaque text completion. Calls are not retried.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Refuses every request so suggestions always take the rule-based path.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineClient;

#[async_trait]
impl LlmClient for OfflineClient {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(anyhow!("llm provider is offline"))
    }
}

pub fn build_client(config: &LlmConfig) -> Arc<dyn LlmClient> {
    match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::from_config(config)),
        LlmProvider::Offline => Arc::new(OfflineClient),
    }
}

/// First four characters of a credential, for diagnostics.
pub fn redact_key(key: &str) -> String {
    let key = key.trim();
    if key.is_empty() {
        return "<unset>".to_string();
    }
    let prefix = key.chars().take(4).collect::<String>();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use coordi_core::config::{AppConfig, LlmProvider};

    use super::{build_client, redact_key, LlmClient, OfflineClient};

    #[tokio::test]
    async fn offline_client_always_fails() {
        let error = OfflineClient.complete("anything").await.expect_err("offline");
        assert!(error.to_string().contains("offline"));
    }

    #[tokio::test]
    async fn offline_provider_builds_offline_client() {
        let mut config = AppConfig::default().llm;
        config.provider = LlmProvider::Offline;
        let client = build_client(&config);
        assert!(client.complete("prompt").await.is_err());
    }

    #[test]
    fn redaction_keeps_four_characters() {
        assert_eq!(redact_key("AIzaSyD-long-secret"), "AIza...");
        assert_eq!(redact_key("ab"), "ab...");
        assert_eq!(redact_key("  "), "<unset>");
    }
}
