//! Participant records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

/// The human participant. Created once at game initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanPlayer {
    /// Participant identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Secret role, immutable after assignment.
    pub role: Role,
    /// Liveness flag; transitions true → false exactly once.
    pub is_alive: bool,
}

impl HumanPlayer {
    /// Creates a new, alive human player.
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            is_alive: true,
        }
    }
}

/// A language-model-driven participant.
///
/// Mutated only by the voting and night engines (liveness) and by
/// instruction-state refreshes after an elimination; never deleted during an
/// active game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotPlayer {
    /// Participant identifier.
    pub id: Uuid,
    /// The game this participant belongs to.
    pub game_id: Uuid,
    /// Display name, unique within the game.
    pub name: String,
    /// Secret role, immutable after assignment.
    pub role: Role,
    /// Liveness flag; transitions true → false exactly once.
    pub is_alive: bool,
    /// Generated character backstory (opaque to the engine).
    pub backstory: String,
    /// Generated temperament text (opaque to the engine).
    pub temperament: String,
    /// Names of allies this participant knows about (werewolves know their
    /// pack mates), or a fixed "no allies" sentence.
    pub known_ally_names: String,
    /// Comma-separated names of all other participants.
    pub other_player_names: String,
}

/// The ally line used when a participant knows no allies.
pub const NO_ALLIES: &str = "you don't know any allies";

impl BotPlayer {
    /// Creates a new, alive bot player with empty knowledge fields.
    #[must_use]
    pub fn new(
        game_id: Uuid,
        name: impl Into<String>,
        role: Role,
        backstory: impl Into<String>,
        temperament: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_id,
            name: name.into(),
            role,
            is_alive: true,
            backstory: backstory.into(),
            temperament: temperament.into(),
            known_ally_names: NO_ALLIES.to_owned(),
            other_player_names: String::new(),
        }
    }

    /// Marks the participant eliminated. Liveness never reverses.
    pub fn eliminate(&mut self) {
        self.is_alive = false;
    }
}
