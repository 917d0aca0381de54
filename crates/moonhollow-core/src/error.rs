//! Game error types.

use thiserror::Error;

/// The kind of record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A game session.
    Game,
    /// A participant (human or bot).
    Player,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Game => write!(f, "game"),
            Self::Player => write!(f, "player"),
        }
    }
}

/// Top-level error type for the game engine.
///
/// Every variant is raised to the caller unrecovered; the engine performs no
/// silent retries. Any failing operation leaves persisted state unchanged.
#[derive(Debug, Error)]
pub enum GameError {
    /// Transport, auth, or quota failure calling a language-model provider.
    #[error("provider error: {0}")]
    Provider(String),

    /// The provider returned no usable text.
    #[error("provider returned an empty reply")]
    EmptyReply,

    /// A structured reply failed to parse even after repair heuristics.
    #[error("malformed JSON reply: {0}")]
    MalformedJson(String),

    /// The turn arbiter's reply could not be interpreted.
    #[error("arbiter reply could not be parsed: {0}")]
    ArbiterParse(String),

    /// An unknown game or participant identifier.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What kind of record was missing.
        kind: RecordKind,
        /// The identifier that was looked up.
        id: String,
    },

    /// An operation was requested in a phase that does not permit it.
    #[error("operation requires phase {expected}, but game is in {actual}")]
    InvalidPhase {
        /// The phase the operation requires.
        expected: String,
        /// The phase the game is actually in.
        actual: String,
    },

    /// The final elimination vote produced no single winner.
    #[error("final vote tied between: {}", .0.join(", "))]
    TiedVote(Vec<String>),

    /// A validation error in game logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl GameError {
    /// Shorthand for a missing game.
    #[must_use]
    pub fn game_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind: RecordKind::Game,
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing player.
    #[must_use]
    pub fn player_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind: RecordKind::Player,
            id: id.to_string(),
        }
    }
}
