//! LLM paraphrase clients
//!
//! The paraphrase step ships masked text to a chat-completion endpoint
//! that was instructed to preserve the bracketed tags, and returns the
//! rewritten text. Whether the model actually preserved every tag is
//! checked later by the unmask audit, not here.

pub mod ollama;

use crate::domain::LlmError;
use async_trait::async_trait;

pub use ollama::OllamaClient;

/// Chat-completion client used for the paraphrase step
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Rewrite the masked text, preserving bracketed tags
    async fn paraphrase(&self, masked_text: &str) -> Result<String, LlmError>;

    /// Human-readable client name for logging
    fn name(&self) -> &str;
}
