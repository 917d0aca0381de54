//! PostgreSQL-backed implementations of the Moonhollow store traits.
//!
//! Games and players are stored as JSONB documents with the columns the
//! queries need lifted out; transcripts are a flat table keyed
//! `(channel, seq)` with `seq` assigned at append time.

mod pg_game_store;
mod pg_player_store;
mod pg_transcript_store;
pub mod schema;

pub use pg_game_store::PgGameStore;
pub use pg_player_store::PgPlayerStore;
pub use pg_transcript_store::PgTranscriptStore;

use moonhollow_core::error::GameError;

pub(crate) fn infra(err: sqlx::Error) -> GameError {
    GameError::Infrastructure(err.to_string())
}

pub(crate) fn corrupt(err: serde_json::Error) -> GameError {
    GameError::Infrastructure(format!("stored document failed to decode: {err}"))
}
