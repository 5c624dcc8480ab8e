//! The provider-agnostic generation interface.

use async_trait::async_trait;
use serde::Serialize;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A complete prompt plus sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    /// Completion length cap; `None` leaves it to the provider.
    pub max_tokens: Option<u32>,
}

/// Errors from a text-generation call.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider did not answer within the configured timeout.
    #[error("Provider request timed out")]
    Timeout,

    /// The provider returned a non-2xx status.
    #[error("Provider API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The provider answered but the completion held no text.
    #[error("Provider returned an empty completion")]
    EmptyResponse,
}

impl LlmError {
    /// Classify a transport error, separating timeouts from other failures.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Request(err)
        }
    }
}

/// Anything that can turn a prompt into a single text completion.
///
/// Implementations must be cheap to share across requests (`Arc<dyn TextGenerator>`).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}
