//! Anthropic messages API client.
//!
//! Anthropic requires strict User/Assistant alternation and takes the system
//! instruction through a separate slot, so the assembled view is squashed
//! (see [`crate::squash`]) before the call.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use moonhollow_core::error::GameError;
use moonhollow_transcript::message::MessageTag;
use moonhollow_transcript::view::ChatTurn;

use crate::model::LanguageModel;
use crate::squash::squash;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_OUTPUT_TOKENS: u32 = 4096;

/// Client for the Anthropic messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    /// Creates a client for the given endpoint.
    #[must_use]
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        }
    }

    async fn complete(
        &self,
        system: Option<String>,
        messages: Vec<WireMessage>,
    ) -> Result<String, GameError> {
        let request = MessagesRequest {
            model: self.model.clone(),
            system,
            messages,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        debug!(model = %self.model, turns = request.messages.len(), "messages request");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GameError::Provider(format!("{status}: {body}")));
        }

        let reply: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GameError::Provider(format!("invalid messages body: {e}")))?;

        let text = reply
            .content
            .into_iter()
            .find_map(|block| block.text)
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(GameError::EmptyReply);
        }
        Ok(text)
    }
}

fn to_wire(turns: &[ChatTurn]) -> Vec<WireMessage> {
    turns
        .iter()
        .map(|turn| WireMessage {
            role: if turn.tag == MessageTag::Assistant {
                "assistant"
            } else {
                "user"
            },
            content: turn.text.clone(),
        })
        .collect()
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    async fn ask(&self, view: &[ChatTurn]) -> Result<String, GameError> {
        let squashed = squash(view);
        self.complete(squashed.system, to_wire(&squashed.turns))
            .await
    }

    async fn ask_with_text(&self, question: &str) -> Result<String, GameError> {
        let messages = vec![WireMessage {
            role: "user",
            content: question.to_owned(),
        }];
        self.complete(None, messages).await
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<WireMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}
