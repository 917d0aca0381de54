//! A seeded six-participant game over in-memory stores and a scripted model.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use moonhollow_cast::assembly::wire_knowledge;
use moonhollow_cast::participant::{BotPlayer, HumanPlayer};
use moonhollow_cast::role::Role;
use moonhollow_core::error::GameError;
use moonhollow_gateway::provider::ProviderKind;
use moonhollow_test_support::{
    FixedClock, InMemoryPlayerStore, InMemoryTranscriptStore, ScriptedFactory, ScriptedModel,
    SequenceRng,
};

use crate::application::context::SessionContext;
use crate::domain::game::{Game, GameStore, GameSummary};

/// An in-memory `GameStore`. Defined here rather than in the shared
/// test-support crate so that crate never depends on this one.
#[derive(Debug, Default)]
pub(crate) struct InMemoryGameStore {
    games: StdMutex<HashMap<Uuid, Game>>,
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn get(&self, id: Uuid) -> Result<Option<Game>, GameError> {
        Ok(self.games.lock().unwrap().get(&id).cloned())
    }

    async fn upsert(&self, game: &Game) -> Result<(), GameError> {
        self.games.lock().unwrap().insert(game.id, game.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), GameError> {
        self.games.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn list_active_summaries(&self) -> Result<Vec<GameSummary>, GameError> {
        let mut summaries: Vec<GameSummary> = self
            .games
            .lock()
            .unwrap()
            .values()
            .filter(|g| g.is_active)
            .map(|g| GameSummary {
                id: g.id,
                name: g.human.name.clone(),
                day: g.day,
                updated_at: g.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }
}

pub(crate) struct Harness {
    pub ctx: SessionContext,
    pub model: Arc<ScriptedModel>,
    pub game: Game,
    pub bots: Vec<BotPlayer>,
}

impl Harness {
    pub async fn store_game(&self, game: &Game) {
        self.ctx.games.upsert(game).await.unwrap();
    }

    pub async fn stored_game(&self) -> Game {
        self.ctx.games.get(self.game.id).await.unwrap().unwrap()
    }

    pub async fn shared_bodies(&self) -> Vec<String> {
        self.ctx
            .transcripts
            .read(moonhollow_transcript::channel::ChannelKey::shared(
                self.game.id,
            ))
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.body)
            .collect()
    }

    pub async fn private_bodies(&self, bot_id: Uuid) -> Vec<String> {
        self.ctx
            .transcripts
            .read(moonhollow_transcript::channel::ChannelKey::private(
                self.game.id,
                bot_id,
            ))
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.body)
            .collect()
    }

    pub fn bot_named(&self, name: &str) -> &BotPlayer {
        self.bots.iter().find(|b| b.name == name).unwrap()
    }
}

/// A game with the fixed cast Wolfram/Willa (werewolves), Dot (doctor),
/// Kit (detective), Van (villager) and the human villager Hugh, in day
/// discussion. The scripted model starts with `replies` queued.
pub(crate) async fn seeded_game<I, S>(replies: I) -> Harness
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let model = Arc::new(ScriptedModel::new(replies));
    let ctx = SessionContext {
        games: Arc::new(InMemoryGameStore::default()),
        players: Arc::new(InMemoryPlayerStore::default()),
        transcripts: Arc::new(InMemoryTranscriptStore::default()),
        models: Arc::new(ScriptedFactory::new(Arc::clone(&model))),
        clock: Arc::new(FixedClock(Utc::now())),
        rng: Arc::new(Mutex::new(SequenceRng::identity())),
    };

    let game_id = Uuid::new_v4();
    let mut bots = vec![
        BotPlayer::new(game_id, "Wolfram", Role::Werewolf, "a trapper", "grim"),
        BotPlayer::new(game_id, "Willa", Role::Werewolf, "a midwife", "sly"),
        BotPlayer::new(game_id, "Dot", Role::Doctor, "a herbalist", "kind"),
        BotPlayer::new(game_id, "Kit", Role::Detective, "a clerk", "sharp"),
        BotPlayer::new(game_id, "Van", Role::Villager, "a farmer", "loud"),
    ];
    let human = HumanPlayer::new("Hugh", Role::Villager);
    wire_knowledge(&mut bots, &human);
    let game = Game::new(
        game_id,
        "a fog-bound mill town",
        human,
        &bots,
        ProviderKind::OpenAi,
        ProviderKind::OpenAi,
        "",
        Utc::now(),
    );

    for bot in &bots {
        ctx.players.upsert(bot).await.unwrap();
    }
    ctx.games.upsert(&game).await.unwrap();
    Harness {
        ctx,
        model,
        game,
        bots,
    }
}
