//! Player persistence boundary.

use async_trait::async_trait;
use uuid::Uuid;

use moonhollow_core::error::GameError;

use crate::participant::BotPlayer;

/// Repository trait for bot player records.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Load a bot player by id.
    async fn get(&self, id: Uuid) -> Result<Option<BotPlayer>, GameError>;

    /// Insert or replace a bot player record.
    async fn upsert(&self, player: &BotPlayer) -> Result<(), GameError>;

    /// Remove every bot player belonging to a game.
    async fn delete_by_game(&self, game_id: Uuid) -> Result<(), GameError>;
}
