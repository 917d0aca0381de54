//! Shared dependencies of the application operations.

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use moonhollow_cast::participant::BotPlayer;
use moonhollow_cast::store::PlayerStore;
use moonhollow_core::clock::Clock;
use moonhollow_core::error::GameError;
use moonhollow_core::rng::DeterministicRng;
use moonhollow_gateway::factory::ModelFactory;
use moonhollow_gateway::model::LanguageModel;
use moonhollow_transcript::channel::ChannelKey;
use moonhollow_transcript::message::{ChatMessage, GM_NAME, MessageTag};
use moonhollow_transcript::store::TranscriptStore;
use moonhollow_transcript::view::{ChatTurn, build_view};

use crate::domain::game::{Game, GameStore};
use crate::prompts;

/// Everything an operation needs, as injectable trait objects.
///
/// Cheap to clone; fan-out tasks each take their own copy.
#[derive(Clone)]
pub struct SessionContext {
    /// Game session records.
    pub games: Arc<dyn GameStore>,
    /// Bot player records.
    pub players: Arc<dyn PlayerStore>,
    /// Append-only transcript channels.
    pub transcripts: Arc<dyn TranscriptStore>,
    /// Language-model construction seam.
    pub models: Arc<dyn ModelFactory>,
    /// Timestamp source.
    pub clock: Arc<dyn Clock>,
    /// Randomness source for role assignment and night tie-breaks.
    pub rng: Arc<Mutex<dyn DeterministicRng>>,
}

impl SessionContext {
    /// Loads a game or fails with `NotFound`.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id; `Infrastructure` from the store.
    pub async fn load_game(&self, game_id: Uuid) -> Result<Game, GameError> {
        self.games
            .get(game_id)
            .await?
            .ok_or_else(|| GameError::game_not_found(game_id))
    }

    /// Loads a bot player or fails with `NotFound`.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id; `Infrastructure` from the store.
    pub async fn load_bot(&self, bot_id: Uuid) -> Result<BotPlayer, GameError> {
        self.players
            .get(bot_id)
            .await?
            .ok_or_else(|| GameError::player_not_found(bot_id))
    }

    /// Loads every bot of a game, in creation order.
    ///
    /// # Errors
    ///
    /// `NotFound` if a referenced bot record is missing.
    pub async fn load_bots(&self, game: &Game) -> Result<Vec<BotPlayer>, GameError> {
        let mut bots = Vec::with_capacity(game.bot_ids.len());
        for id in &game.bot_ids {
            bots.push(self.load_bot(*id).await?);
        }
        Ok(bots)
    }

    /// Resolves a bot by display name.
    ///
    /// # Errors
    ///
    /// `NotFound` when no bot of that name exists in the game.
    pub async fn bot_by_name(&self, game: &Game, name: &str) -> Result<BotPlayer, GameError> {
        let id = game
            .bot_names
            .get(name)
            .ok_or_else(|| GameError::player_not_found(name))?;
        self.load_bot(*id).await
    }

    /// Assembles the transcript a bot's model call will see, optionally with
    /// one unpersisted trailing Game Master command.
    ///
    /// # Errors
    ///
    /// `Infrastructure` from the transcript store.
    pub async fn bot_view(
        &self,
        game: &Game,
        bot: &BotPlayer,
        trailing_command: Option<&str>,
    ) -> Result<Vec<ChatTurn>, GameError> {
        let shared = self
            .transcripts
            .read(ChannelKey::shared(game.id))
            .await?;
        let private = self
            .transcripts
            .read(ChannelKey::private(game.id, bot.id))
            .await?;
        let instruction = prompts::player_instruction(bot, game);
        let mut view = build_view(&instruction, &shared, &private, &bot.id.to_string());
        if let Some(command) = trailing_command {
            view.push(ChatTurn::new(
                MessageTag::User,
                format!("{GM_NAME}: {command}"),
            ));
        }
        Ok(view)
    }

    /// Asks a bot for a free-text reply to a Game Master command without
    /// persisting anything. The caller appends the command and reply once the
    /// whole operation succeeded.
    ///
    /// # Errors
    ///
    /// Provider-side errors from the model; `Infrastructure` from the store.
    pub async fn ask_bot(
        &self,
        game: &Game,
        bot: &BotPlayer,
        command: &str,
    ) -> Result<String, GameError> {
        let model = self.models.model_for(game.bot_provider)?;
        let view = self.bot_view(game, bot, Some(command)).await?;
        model.ask(&view).await
    }

    /// As [`SessionContext::ask_bot`], but parses the reply as JSON.
    ///
    /// # Errors
    ///
    /// As [`SessionContext::ask_bot`], plus `MalformedJson`.
    pub async fn ask_bot_for_json(
        &self,
        game: &Game,
        bot: &BotPlayer,
        command: &str,
    ) -> Result<serde_json::Value, GameError> {
        let model = self.models.model_for(game.bot_provider)?;
        let view = self.bot_view(game, bot, Some(command)).await?;
        model.ask_for_json(&view).await
    }

    /// The model used for arbiter calls.
    ///
    /// # Errors
    ///
    /// `Provider` if the factory cannot build a client.
    pub fn arbiter_model(&self, game: &Game) -> Result<Arc<dyn LanguageModel>, GameError> {
        self.models.model_for(game.arbiter_provider)
    }

    /// Appends one Game Master command to a bot's private channel.
    ///
    /// # Errors
    ///
    /// `Infrastructure` from the transcript store.
    pub async fn append_private_command(
        &self,
        game: &Game,
        bot: &BotPlayer,
        command: &str,
    ) -> Result<(), GameError> {
        let message = ChatMessage::from_game_master(
            ChannelKey::private(game.id, bot.id),
            command,
            self.clock.now_millis(),
        );
        self.transcripts.append(&message).await?;
        Ok(())
    }

    /// Appends one Game Master announcement to the shared channel.
    ///
    /// # Errors
    ///
    /// `Infrastructure` from the transcript store.
    pub async fn broadcast(&self, game: &Game, body: &str) -> Result<(), GameError> {
        let message = ChatMessage::from_game_master(
            ChannelKey::shared(game.id),
            body,
            self.clock.now_millis(),
        );
        self.transcripts.append(&message).await?;
        Ok(())
    }

    /// Appends a bot's utterance to the shared channel.
    ///
    /// # Errors
    ///
    /// `Infrastructure` from the transcript store.
    pub async fn append_bot_utterance(
        &self,
        game: &Game,
        bot: &BotPlayer,
        body: &str,
    ) -> Result<(), GameError> {
        let message = ChatMessage::from_participant(
            ChannelKey::shared(game.id),
            bot.id,
            bot.name.as_str(),
            body,
            self.clock.now_millis(),
        );
        self.transcripts.append(&message).await?;
        Ok(())
    }
}
