//! OpenAI-compatible chat-completions client.
//!
//! Sends `POST {base_url}/chat/completions` and returns the text of the first
//! choice. No retries: a failed or slow call surfaces as a single
//! [`LlmError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::provider::{ChatMessage, GenerationRequest, LlmError, TextGenerator};

/// HTTP client for an OpenAI-compatible provider.
pub struct OpenAiClient {
    client: reqwest::Client,
    /// Pre-computed `"Bearer <key>"` header value.
    auth_header: String,
    completions_url: String,
    model_name: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Build a client whose every call is bounded by `config.timeout`.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            auth_header: format!("Bearer {}", config.api_key),
            completions_url: format!("{}/chat/completions", config.base_url),
            model_name: config.model_name.clone(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn build_body<'a>(&'a self, request: &'a GenerationRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model_name,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

/// Text of the first choice, trimmed. `None` if absent or blank.
fn first_choice_text(response: ChatResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.completions_url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(LlmError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), model = %self.model_name, "Provider returned error status");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(LlmError::from_transport)?;
        first_choice_text(parsed).ok_or(LlmError::EmptyResponse)
    }
}
