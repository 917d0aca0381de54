//! Provider selection.

use serde::{Deserialize, Serialize};

/// Which provider a participant's calls go through. Stored on the game for
/// the arbiter and on each bot for its replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions.
    #[default]
    OpenAi,
    /// Groq's OpenAI-compatible endpoint.
    Groq,
    /// Anthropic messages API.
    Anthropic,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Groq => write!(f, "groq"),
            Self::Anthropic => write!(f, "anthropic"),
        }
    }
}
