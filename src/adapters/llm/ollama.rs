//! Ollama chat-completion client
//!
//! Talks to a local Ollama `/api/chat` endpoint. Reasoning models wrap
//! their deliberation in `<think>` blocks; those are scrubbed before the
//! reply is handed back. The request timeout is long by design: large
//! local models take on the order of minutes per document.

use super::LlmClient;
use crate::config::LlmConfig;
use crate::domain::LlmError;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

fn think_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<think>.*?</think>").unwrap())
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

/// Client for an Ollama-style chat endpoint
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: Url,
    model: String,
    system_prompt: String,
    user_template: String,
    temperature: f32,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| LlmError::ConnectionFailed(format!("invalid endpoint: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::ConnectionFailed(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            user_template: config.user_template.clone(),
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else if err.is_decode() {
            LlmError::InvalidResponse(err.to_string())
        } else {
            LlmError::ConnectionFailed(err.to_string())
        }
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn paraphrase(&self, masked_text: &str) -> Result<String, LlmError> {
        let user_content = self.user_template.replace("{text}", masked_text);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &user_content,
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
        };

        tracing::info!(model = %self.model, endpoint = %self.endpoint, "sending masked text to LLM");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| self.map_error(e))?;
        let reply = think_regex()
            .replace_all(&chat.message.content, "")
            .trim()
            .to_string();

        if reply.is_empty() {
            return Err(LlmError::EmptyCompletion);
        }
        Ok(reply)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: String) -> LlmConfig {
        LlmConfig {
            endpoint,
            ..LlmConfig::default()
        }
    }

    #[tokio::test]
    async fn test_paraphrase_strips_think_blocks() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"message": {"content": "<think>reasoning here</think>請聯絡 [NAME-1]。"}}"#,
            )
            .create_async()
            .await;

        let client = OllamaClient::new(&config(format!("{}/api/chat", server.url()))).unwrap();
        let reply = client.paraphrase("請聯絡 [NAME-1]。").await.unwrap();

        mock.assert_async().await;
        assert_eq!(reply, "請聯絡 [NAME-1]。");
    }

    #[tokio::test]
    async fn test_empty_completion_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": {"content": "<think>only thoughts</think>  "}}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(&config(format!("{}/api/chat", server.url()))).unwrap();
        let err = client.paraphrase("text").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_http_error_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("model crashed")
            .create_async()
            .await;

        let client = OllamaClient::new(&config(format!("{}/api/chat", server.url()))).unwrap();
        let err = client.paraphrase("text").await.unwrap_err();
        assert!(matches!(err, LlmError::Http { status: 500, .. }));
    }
}
