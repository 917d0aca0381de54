//! Model construction seam.
//!
//! The session layer asks for models by [`ProviderKind`]; tests inject a
//! scripted factory instead of touching the network.

use std::sync::Arc;

use moonhollow_core::error::GameError;

use crate::anthropic::AnthropicClient;
use crate::config::GatewayConfig;
use crate::model::{LanguageModel, LanguageModelClient};
use crate::openai::OpenAiClient;
use crate::provider::ProviderKind;

/// Builds a language model for a provider kind.
pub trait ModelFactory: Send + Sync {
    /// Returns the model to use for `kind`.
    ///
    /// # Errors
    ///
    /// `Provider` if the factory cannot construct a client for `kind`.
    fn model_for(&self, kind: ProviderKind) -> Result<Arc<dyn LanguageModel>, GameError>;
}

/// Production factory building reqwest-backed clients from configuration.
#[derive(Debug, Clone)]
pub struct HttpModelFactory {
    config: GatewayConfig,
}

impl HttpModelFactory {
    /// Creates a factory over the given configuration.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }
}

impl ModelFactory for HttpModelFactory {
    fn model_for(&self, kind: ProviderKind) -> Result<Arc<dyn LanguageModel>, GameError> {
        let config = &self.config;
        let client = match kind {
            ProviderKind::OpenAi => LanguageModelClient::OpenAiCompatible(OpenAiClient::new(
                &config.openai_base_url,
                &config.openai_api_key,
                &config.openai_model,
                config.timeout,
            )),
            ProviderKind::Groq => LanguageModelClient::OpenAiCompatible(OpenAiClient::new(
                &config.groq_base_url,
                &config.groq_api_key,
                &config.groq_model,
                config.timeout,
            )),
            ProviderKind::Anthropic => LanguageModelClient::Anthropic(AnthropicClient::new(
                &config.anthropic_base_url,
                &config.anthropic_api_key,
                &config.anthropic_model,
                config.timeout,
            )),
        };
        Ok(Arc::new(client))
    }
}
