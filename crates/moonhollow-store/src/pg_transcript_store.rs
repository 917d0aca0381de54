//! `PostgreSQL` implementation of the `TranscriptStore` trait.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use moonhollow_core::error::GameError;
use moonhollow_transcript::channel::ChannelKey;
use moonhollow_transcript::message::ChatMessage;
use moonhollow_transcript::store::TranscriptStore;

use crate::{corrupt, infra};

/// PostgreSQL-backed transcript store. `seq` is assigned per channel inside
/// the insert, so appends racing on one channel still get distinct values.
#[derive(Debug, Clone)]
pub struct PgTranscriptStore {
    pool: PgPool,
}

impl PgTranscriptStore {
    /// Creates a new `PgTranscriptStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TranscriptStore for PgTranscriptStore {
    async fn append(&self, message: &ChatMessage) -> Result<ChatMessage, GameError> {
        let document = serde_json::to_value(message)
            .map_err(|e| GameError::Infrastructure(format!("message failed to encode: {e}")))?;
        let row = sqlx::query(
            "INSERT INTO messages (channel, ts, seq, document)
             VALUES (
                 $1, $2,
                 (SELECT COALESCE(MAX(seq), 0) + 1 FROM messages WHERE channel = $1),
                 $3
             )
             RETURNING seq",
        )
        .bind(message.channel.storage_key())
        .bind(message.ts)
        .bind(document)
        .fetch_one(&self.pool)
        .await
        .map_err(infra)?;

        let mut stored = message.clone();
        stored.seq = row.try_get("seq").map_err(infra)?;
        Ok(stored)
    }

    async fn read(&self, channel: ChannelKey) -> Result<Vec<ChatMessage>, GameError> {
        let rows = sqlx::query(
            "SELECT seq, document FROM messages WHERE channel = $1 ORDER BY ts, seq",
        )
        .bind(channel.storage_key())
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        rows.into_iter()
            .map(|row| {
                let document: serde_json::Value = row.try_get("document").map_err(infra)?;
                let mut message: ChatMessage =
                    serde_json::from_value(document).map_err(corrupt)?;
                message.seq = row.try_get("seq").map_err(infra)?;
                Ok(message)
            })
            .collect()
    }

    async fn delete_channel(&self, channel: ChannelKey) -> Result<(), GameError> {
        sqlx::query("DELETE FROM messages WHERE channel = $1")
            .bind(channel.storage_key())
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }
}
