use std::fmt;
use std::time::Duration;

/// Default OpenAI-compatible API root.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default chat model.
const DEFAULT_MODEL: &str = "gpt-4o";
/// Default upper bound on a single provider call, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the text-generation provider.
///
/// Passed explicitly to [`OpenAiClient::new`](crate::OpenAiClient::new);
/// there is no process-wide client.
#[derive(Clone)]
pub struct LlmConfig {
    /// Bearer credential sent to the provider.
    pub api_key: String,
    /// API root, without a trailing slash (e.g. `https://api.openai.com/v1`).
    pub base_url: String,
    /// Model selector sent with every request.
    pub model_name: String,
    /// Total time allowed for one provider call, connect included.
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model_name: model_name.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load provider configuration from environment variables.
    ///
    /// | Env Var            | Required | Default                     |
    /// |--------------------|----------|-----------------------------|
    /// | `LLM_API_KEY`      | **yes**  | --                          |
    /// | `LLM_BASE_URL`     | no       | `https://api.openai.com/v1` |
    /// | `LLM_MODEL`        | no       | `gpt-4o`                    |
    /// | `LLM_TIMEOUT_SECS` | no       | `30`                        |
    ///
    /// # Panics
    ///
    /// Panics if `LLM_API_KEY` is missing or empty, or if `LLM_TIMEOUT_SECS`
    /// is not a number.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("LLM_API_KEY").expect("LLM_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "LLM_API_KEY must not be empty");

        let base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model_name = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("LLM_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            model_name,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// The API key must never reach logs.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}
