//! OpenAI-compatible chat-completion client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::LlmConfig;
use crate::error::{KickoffError, Result};

/// A language model that answers a single prompt
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Raw text of the first choice
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct ChatCompletionClient {
    config: LlmConfig,
    http: Client,
}

impl ChatCompletionClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KickoffError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    fn request_for(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: self
                .config
                .json_mode
                .then_some(ResponseFormat { kind: "json_object" }),
        }
    }
}

#[async_trait]
impl CompletionModel for ChatCompletionClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        if !self.is_configured() {
            return Err(KickoffError::Internal("OPENAI_API_KEY not configured".to_string()));
        }

        debug!("Sending chat completion request");

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&self.request_for(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Chat completion error: {} - {}", status, body);
            return Err(KickoffError::Upstream {
                service: "Chat completion",
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        debug!(reply_len = content.len(), "Chat completion received");
        Ok(content)
    }
}
