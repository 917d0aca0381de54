//! The language-model capability and its closed provider set.

use async_trait::async_trait;

use moonhollow_core::error::GameError;
use moonhollow_transcript::view::ChatTurn;

use crate::anthropic::AnthropicClient;
use crate::json_repair::parse_repaired;
use crate::openai::OpenAiClient;

/// The single capability the engine needs from a provider: given an ordered
/// transcript, produce a reply string.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Ask with a full assembled view.
    ///
    /// # Errors
    ///
    /// `Provider` on transport/auth/rate-limit failure; `EmptyReply` when the
    /// provider returns no text. Neither is retried here.
    async fn ask(&self, view: &[ChatTurn]) -> Result<String, GameError>;

    /// Ask a single free-text question with no transcript context.
    async fn ask_with_text(&self, question: &str) -> Result<String, GameError>;

    /// Ask for structured output, repairing and parsing the reply as JSON.
    ///
    /// # Errors
    ///
    /// As [`LanguageModel::ask`], plus `MalformedJson` if the reply is not a
    /// JSON object even after fence-stripping and prefix repair.
    async fn ask_for_json(&self, view: &[ChatTurn]) -> Result<serde_json::Value, GameError> {
        let reply = self.ask(view).await?;
        parse_repaired(&reply)
    }
}

/// The closed set of provider clients, selected by
/// [`crate::provider::ProviderKind`] at construction time. No runtime type
/// inspection: dispatch is a plain match.
#[derive(Debug, Clone)]
pub enum LanguageModelClient {
    /// OpenAI or any OpenAI-compatible endpoint (Groq included).
    OpenAiCompatible(OpenAiClient),
    /// Anthropic's messages API with its strict-alternation transcript rule.
    Anthropic(AnthropicClient),
}

#[async_trait]
impl LanguageModel for LanguageModelClient {
    async fn ask(&self, view: &[ChatTurn]) -> Result<String, GameError> {
        match self {
            Self::OpenAiCompatible(client) => client.ask(view).await,
            Self::Anthropic(client) => client.ask(view).await,
        }
    }

    async fn ask_with_text(&self, question: &str) -> Result<String, GameError> {
        match self {
            Self::OpenAiCompatible(client) => client.ask_with_text(question).await,
            Self::Anthropic(client) => client.ask_with_text(question).await,
        }
    }

    async fn ask_for_json(&self, view: &[ChatTurn]) -> Result<serde_json::Value, GameError> {
        match self {
            Self::OpenAiCompatible(client) => client.ask_for_json(view).await,
            Self::Anthropic(client) => {
                let reply = client.ask(view).await?;
                parse_repaired(&reply)
            }
        }
    }
}
