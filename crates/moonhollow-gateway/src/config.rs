//! Gateway configuration.

use std::time::Duration;

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo-preview";

/// Default Groq endpoint (OpenAI-compatible).
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default Groq model.
pub const DEFAULT_GROQ_MODEL: &str = "mixtral-8x7b-32768";

/// Default Anthropic endpoint.
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Default Anthropic model.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-opus-20240229";

/// Provider calls can be slow; a stalled call must fail the owning task
/// rather than hang a voting barrier, so every client carries this timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for every provider the gateway can reach.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// OpenAI API key.
    pub openai_api_key: String,
    /// OpenAI-compatible base URL.
    pub openai_base_url: String,
    /// OpenAI model name.
    pub openai_model: String,
    /// Groq API key.
    pub groq_api_key: String,
    /// Groq base URL.
    pub groq_base_url: String,
    /// Groq model name.
    pub groq_model: String,
    /// Anthropic API key.
    pub anthropic_api_key: String,
    /// Anthropic base URL.
    pub anthropic_base_url: String,
    /// Anthropic model name.
    pub anthropic_model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Reads the configuration from environment variables, falling back to
    /// the published endpoints and models. Keys default to empty strings so
    /// tests can construct a config without any environment.
    #[must_use]
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        let var_or = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.to_owned())
        };

        Self {
            openai_api_key: var("OPENAI_API_KEY"),
            openai_base_url: var_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            openai_model: var_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            groq_api_key: var("GROQ_API_KEY"),
            groq_base_url: var_or("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
            groq_model: var_or("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            anthropic_api_key: var("ANTHROPIC_API_KEY"),
            anthropic_base_url: var_or("ANTHROPIC_BASE_URL", DEFAULT_ANTHROPIC_BASE_URL),
            anthropic_model: var_or("ANTHROPIC_MODEL", DEFAULT_ANTHROPIC_MODEL),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
