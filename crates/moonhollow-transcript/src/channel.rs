//! Transcript channel keys.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Suffix of the shared broadcast channel.
pub const RECIPIENT_ALL: &str = "all";

/// Identifies one transcript channel within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKey {
    /// The broadcast channel every participant sees.
    Shared {
        /// The owning game.
        game_id: Uuid,
    },
    /// A channel visible to exactly one participant.
    Private {
        /// The owning game.
        game_id: Uuid,
        /// The participant the channel belongs to.
        participant_id: Uuid,
    },
}

impl ChannelKey {
    /// The broadcast channel for a game.
    #[must_use]
    pub fn shared(game_id: Uuid) -> Self {
        Self::Shared { game_id }
    }

    /// The private channel for one participant.
    #[must_use]
    pub fn private(game_id: Uuid, participant_id: Uuid) -> Self {
        Self::Private {
            game_id,
            participant_id,
        }
    }

    /// The owning game id.
    #[must_use]
    pub fn game_id(&self) -> Uuid {
        match self {
            Self::Shared { game_id } | Self::Private { game_id, .. } => *game_id,
        }
    }

    /// The storage key, `{game_id}_all` or `{game_id}_{participant_id}`.
    #[must_use]
    pub fn storage_key(&self) -> String {
        match self {
            Self::Shared { game_id } => format!("{game_id}_{RECIPIENT_ALL}"),
            Self::Private {
                game_id,
                participant_id,
            } => format!("{game_id}_{participant_id}"),
        }
    }
}

impl std::fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.storage_key())
    }
}
