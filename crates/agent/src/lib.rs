//! Suggestion orchestration.
//!
//! - `llm` - completion port plus the offline client
//! - `gemini` - Gemini `generateContent` client
//! - `runtime` - `SuggestionRuntime`: model proposal, validation, rule-based fallback
//! - `session` - `HomeSession`: stored state, weather and history around the runtime
//!
//! The model is strictly a proposer. Item tables, history limits and every
//! fallback decision are deterministic code in `coordi-core`.

pub mod gemini;
pub mod llm;
pub mod runtime;
pub mod session;

pub use llm::{build_client, LlmClient, OfflineClient};
pub use runtime::SuggestionRuntime;
pub use session::{HomeSession, SuggestionOutcome};
