//! OpenAI-compatible chat completions client.
//!
//! Serves both OpenAI and Groq; the two differ only in base URL, key, and
//! model. These endpoints accept heterogeneous role sequences, so the
//! assembled view passes through unchanged.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use moonhollow_core::error::GameError;
use moonhollow_transcript::message::MessageTag;
use moonhollow_transcript::view::ChatTurn;

use crate::json_repair::parse_repaired;
use crate::model::LanguageModel;

const TEMPERATURE: f64 = 0.5;

/// Client for OpenAI-compatible chat completion endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
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
        messages: Vec<WireMessage>,
        json_mode: bool,
    ) -> Result<String, GameError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: TEMPERATURE,
            response_format: json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_owned(),
            }),
        };

        debug!(model = %self.model, turns = request.messages.len(), "chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GameError::Provider(format!("{status}: {body}")));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| GameError::Provider(format!("invalid completion body: {e}")))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(GameError::EmptyReply);
        }
        Ok(text)
    }
}

fn to_wire(view: &[ChatTurn]) -> Vec<WireMessage> {
    view.iter()
        .map(|turn| WireMessage {
            role: match turn.tag {
                MessageTag::System => "system",
                MessageTag::User => "user",
                MessageTag::Assistant => "assistant",
            },
            content: turn.text.clone(),
        })
        .collect()
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn ask(&self, view: &[ChatTurn]) -> Result<String, GameError> {
        self.complete(to_wire(view), false).await
    }

    async fn ask_with_text(&self, question: &str) -> Result<String, GameError> {
        let messages = vec![WireMessage {
            role: "user",
            content: question.to_owned(),
        }];
        self.complete(messages, false).await
    }

    async fn ask_for_json(&self, view: &[ChatTurn]) -> Result<serde_json::Value, GameError> {
        let reply = self.complete(to_wire(view), true).await?;
        parse_repaired(&reply)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
