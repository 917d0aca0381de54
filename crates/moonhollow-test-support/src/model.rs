//! Scripted language-model fakes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use moonhollow_core::error::GameError;
use moonhollow_gateway::factory::ModelFactory;
use moonhollow_gateway::model::LanguageModel;
use moonhollow_gateway::provider::ProviderKind;
use moonhollow_transcript::message::MessageTag;
use moonhollow_transcript::view::ChatTurn;

/// A model that replays queued replies and records every view it was asked
/// with. Fails with `Provider` once the queue runs dry, so a test that makes
/// more calls than it scripted fails loudly.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedModel {
    /// A model scripted with the given replies, returned in order.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues one more reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(reply.into());
    }

    /// Every view this model was asked with, in call order.
    ///
    /// Concurrent fan-out calls land in completion order.
    #[must_use]
    pub fn requests(&self) -> Vec<Vec<ChatTurn>> {
        self.requests.lock().unwrap().clone()
    }

    fn pop(&self) -> Result<String, GameError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GameError::Provider("scripted model exhausted".to_owned()))
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn ask(&self, view: &[ChatTurn]) -> Result<String, GameError> {
        self.requests.lock().unwrap().push(view.to_vec());
        self.pop()
    }

    async fn ask_with_text(&self, question: &str) -> Result<String, GameError> {
        self.requests
            .lock()
            .unwrap()
            .push(vec![ChatTurn::new(MessageTag::User, question)]);
        self.pop()
    }
}

/// A factory that hands out the same scripted model for every provider kind.
#[derive(Debug, Clone)]
pub struct ScriptedFactory {
    model: Arc<ScriptedModel>,
}

impl ScriptedFactory {
    /// A factory over one shared scripted model.
    #[must_use]
    pub fn new(model: Arc<ScriptedModel>) -> Self {
        Self { model }
    }
}

impl ModelFactory for ScriptedFactory {
    fn model_for(&self, _kind: ProviderKind) -> Result<Arc<dyn LanguageModel>, GameError> {
        Ok(Arc::clone(&self.model) as Arc<dyn LanguageModel>)
    }
}
