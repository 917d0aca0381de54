//! In-memory store fakes backing the application and route tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use moonhollow_cast::participant::BotPlayer;
use moonhollow_cast::store::PlayerStore;
use moonhollow_core::error::GameError;
use moonhollow_transcript::channel::ChannelKey;
use moonhollow_transcript::message::ChatMessage;
use moonhollow_transcript::store::TranscriptStore;

// The `GameStore` fake cannot live here: the trait sits in
// `moonhollow-session`, and depending on that crate from a crate it
// dev-depends on would link a second `moonhollow-session` into its own test
// builds. Crates that need one define it next to their tests instead.

/// An in-memory `PlayerStore`.
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    players: Mutex<HashMap<Uuid, BotPlayer>>,
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn get(&self, id: Uuid) -> Result<Option<BotPlayer>, GameError> {
        Ok(self.players.lock().unwrap().get(&id).cloned())
    }

    async fn upsert(&self, player: &BotPlayer) -> Result<(), GameError> {
        self.players
            .lock()
            .unwrap()
            .insert(player.id, player.clone());
        Ok(())
    }

    async fn delete_by_game(&self, game_id: Uuid) -> Result<(), GameError> {
        self.players
            .lock()
            .unwrap()
            .retain(|_, p| p.game_id != game_id);
        Ok(())
    }
}

/// An in-memory `TranscriptStore` that assigns `seq` per channel at append
/// time, like the production store.
#[derive(Debug, Default)]
pub struct InMemoryTranscriptStore {
    channels: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

#[async_trait]
impl TranscriptStore for InMemoryTranscriptStore {
    async fn append(&self, message: &ChatMessage) -> Result<ChatMessage, GameError> {
        let mut channels = self.channels.lock().unwrap();
        let log = channels.entry(message.channel.storage_key()).or_default();
        let mut stored = message.clone();
        stored.seq = log.last().map_or(1, |m| m.seq + 1);
        log.push(stored.clone());
        Ok(stored)
    }

    async fn read(&self, channel: ChannelKey) -> Result<Vec<ChatMessage>, GameError> {
        let mut log = self
            .channels
            .lock()
            .unwrap()
            .get(&channel.storage_key())
            .cloned()
            .unwrap_or_default();
        log.sort_by_key(|m| (m.ts, m.seq));
        Ok(log)
    }

    async fn delete_channel(&self, channel: ChannelKey) -> Result<(), GameError> {
        self.channels.lock().unwrap().remove(&channel.storage_key());
        Ok(())
    }
}
