//! `PostgreSQL` implementation of the `PlayerStore` trait.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use moonhollow_cast::participant::BotPlayer;
use moonhollow_cast::store::PlayerStore;
use moonhollow_core::error::GameError;

use crate::{corrupt, infra};

/// PostgreSQL-backed player store.
#[derive(Debug, Clone)]
pub struct PgPlayerStore {
    pool: PgPool,
}

impl PgPlayerStore {
    /// Creates a new `PgPlayerStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerStore for PgPlayerStore {
    async fn get(&self, id: Uuid) -> Result<Option<BotPlayer>, GameError> {
        let row = sqlx::query("SELECT document FROM players WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.map(|row| {
            let document: serde_json::Value = row.try_get("document").map_err(infra)?;
            serde_json::from_value(document).map_err(corrupt)
        })
        .transpose()
    }

    async fn upsert(&self, player: &BotPlayer) -> Result<(), GameError> {
        let document = serde_json::to_value(player)
            .map_err(|e| GameError::Infrastructure(format!("player failed to encode: {e}")))?;
        sqlx::query(
            "INSERT INTO players (id, game_id, document) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET document = EXCLUDED.document",
        )
        .bind(player.id)
        .bind(player.game_id)
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn delete_by_game(&self, game_id: Uuid) -> Result<(), GameError> {
        sqlx::query("DELETE FROM players WHERE game_id = $1")
            .bind(game_id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }
}
