//! Text-generation provider client.
//!
//! The rest of the system only sees the [`TextGenerator`] trait: a list of
//! role-tagged messages in, a single completion out. [`OpenAiClient`] is the
//! production implementation (any OpenAI-compatible `/chat/completions`
//! endpoint); tests substitute their own.
//!
//! [`prompts`] holds the screenplay conversion, scoring and summary prompts.

pub mod config;
pub mod openai;
pub mod prompts;
pub mod provider;

pub use config::LlmConfig;
pub use openai::OpenAiClient;
pub use provider::{ChatMessage, GenerationRequest, LlmError, Role, TextGenerator};
