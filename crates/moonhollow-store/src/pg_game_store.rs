//! `PostgreSQL` implementation of the `GameStore` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use moonhollow_core::error::GameError;
use moonhollow_session::domain::game::{Game, GameStore, GameSummary};

use crate::{corrupt, infra};

/// PostgreSQL-backed game store.
#[derive(Debug, Clone)]
pub struct PgGameStore {
    pool: PgPool,
}

impl PgGameStore {
    /// Creates a new `PgGameStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameStore for PgGameStore {
    async fn get(&self, id: Uuid) -> Result<Option<Game>, GameError> {
        let row = sqlx::query("SELECT document FROM games WHERE id = $1")
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

    async fn upsert(&self, game: &Game) -> Result<(), GameError> {
        let document = serde_json::to_value(game)
            .map_err(|e| GameError::Infrastructure(format!("game failed to encode: {e}")))?;
        sqlx::query(
            "INSERT INTO games (id, document, is_active, human_name, day, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                 document = EXCLUDED.document,
                 is_active = EXCLUDED.is_active,
                 human_name = EXCLUDED.human_name,
                 day = EXCLUDED.day,
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(game.id)
        .bind(document)
        .bind(game.is_active)
        .bind(&game.human.name)
        .bind(i64::from(game.day))
        .bind(game.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), GameError> {
        sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn list_active_summaries(&self) -> Result<Vec<GameSummary>, GameError> {
        let rows = sqlx::query(
            "SELECT id, human_name, day, updated_at FROM games
             WHERE is_active ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        rows.into_iter()
            .map(|row| {
                let id: Uuid = row.try_get("id").map_err(infra)?;
                let name: String = row.try_get("human_name").map_err(infra)?;
                let day: i64 = row.try_get("day").map_err(infra)?;
                let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(infra)?;
                let day = u32::try_from(day).map_err(|_| {
                    GameError::Infrastructure(format!("stored day out of range: {day}"))
                })?;
                Ok(GameSummary {
                    id,
                    name,
                    day,
                    updated_at,
                })
            })
            .collect()
    }
}
