//! The game session aggregate.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use moonhollow_cast::participant::{BotPlayer, HumanPlayer};
use moonhollow_cast::role::Role;
use moonhollow_core::clock::Clock;
use moonhollow_core::error::GameError;
use moonhollow_gateway::provider::ProviderKind;

/// The dead-roster line before anyone has been eliminated.
pub const NO_ELIMINATED_PLAYERS: &str = "no eliminated players yet";

/// Where in the day/night cycle a game currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Open discussion between all alive participants.
    DayDiscussion,
    /// First elimination vote; produces the leader set.
    VotingRoundOne,
    /// Final elimination vote over the leader set.
    VotingRoundTwo,
    /// Hidden role actions.
    Night,
    /// Terminal: a faction's win condition became true, or the human was
    /// eliminated.
    GameOver,
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::DayDiscussion => "day discussion",
            Self::VotingRoundOne => "voting round one",
            Self::VotingRoundTwo => "voting round two",
            Self::Night => "night",
            Self::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// Which faction won a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Alive werewolves reached parity with the rest of the town.
    WerewolvesWin,
    /// No werewolf is left alive.
    VillagersWin,
}

/// The aggregate root for one game session.
///
/// Mutated only by the voting and night engines and the turn arbiter's
/// counters; callers must serialize phase-transition operations per game id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Narrative scene text generated at creation.
    pub story: String,
    /// Current phase.
    pub phase: GamePhase,
    /// Day counter; increments when night wraps back to day discussion.
    pub day: u32,
    /// The human participant.
    pub human: HumanPlayer,
    /// Bot participant ids, in creation order.
    pub bot_ids: Vec<Uuid>,
    /// Bot display name → id.
    pub bot_names: BTreeMap<String, Uuid>,
    /// Roster text for the arbiter instruction: "Name (Role)" per bot.
    pub roster_text: String,
    /// Dead participants as "Name (Role)", or [`NO_ELIMINATED_PLAYERS`].
    pub dead_roster: String,
    /// Leader names carried from Round One into Round Two.
    pub round_one_leaders: Vec<String>,
    /// Human messages sent this day.
    pub user_moves_day_counter: u32,
    /// Human messages sent over the whole game.
    pub user_moves_total_counter: u32,
    /// Provider used for arbiter calls.
    pub arbiter_provider: ProviderKind,
    /// Provider used for bot reply and ballot calls.
    pub bot_provider: ProviderKind,
    /// Optional instruction pinning the language bots reply in.
    pub reply_language_instruction: String,
    /// False once the game reached a terminal state.
    pub is_active: bool,
    /// Last mutation time, set by [`Game::touch`].
    pub updated_at: DateTime<Utc>,
}

impl Game {
    /// Creates a new game in day discussion, day 1. The id is supplied by
    /// the caller so bot records can carry it before the aggregate exists.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        story: impl Into<String>,
        human: HumanPlayer,
        bots: &[BotPlayer],
        arbiter_provider: ProviderKind,
        bot_provider: ProviderKind,
        reply_language_instruction: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let roster_text = bots
            .iter()
            .map(|bot| format!("{} ({})", bot.name, bot.role.display_name()))
            .collect::<Vec<_>>()
            .join(",");
        Self {
            id,
            story: story.into(),
            phase: GamePhase::DayDiscussion,
            day: 1,
            human,
            bot_ids: bots.iter().map(|b| b.id).collect(),
            bot_names: bots.iter().map(|b| (b.name.clone(), b.id)).collect(),
            roster_text,
            dead_roster: NO_ELIMINATED_PLAYERS.to_owned(),
            round_one_leaders: Vec::new(),
            user_moves_day_counter: 0,
            user_moves_total_counter: 0,
            arbiter_provider,
            bot_provider,
            reply_language_instruction: reply_language_instruction.into(),
            is_active: true,
            updated_at: now,
        }
    }

    /// Fails with `InvalidPhase` unless the game is in `expected`.
    pub fn require_phase(&self, expected: GamePhase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::InvalidPhase {
                expected: expected.to_string(),
                actual: self.phase.to_string(),
            })
        }
    }

    /// Records one human turn accepted by the arbiter.
    pub fn record_user_move(&mut self) {
        self.user_moves_day_counter += 1;
        self.user_moves_total_counter += 1;
    }

    /// Day discussion → voting round one, carrying the leader set forward.
    pub fn begin_voting(&mut self, leaders: Vec<String>) -> Result<(), GameError> {
        self.require_phase(GamePhase::DayDiscussion)?;
        self.phase = GamePhase::VotingRoundOne;
        self.round_one_leaders = leaders;
        Ok(())
    }

    /// Voting round one → voting round two.
    pub fn begin_final_vote(&mut self) -> Result<(), GameError> {
        self.require_phase(GamePhase::VotingRoundOne)?;
        self.phase = GamePhase::VotingRoundTwo;
        Ok(())
    }

    /// Voting round two → night, after an elimination was applied.
    pub fn begin_night(&mut self) -> Result<(), GameError> {
        self.require_phase(GamePhase::VotingRoundTwo)?;
        self.phase = GamePhase::Night;
        self.round_one_leaders.clear();
        Ok(())
    }

    /// Night → next day's discussion; the day counter increments on this
    /// wrap and the per-day move counter resets.
    pub fn begin_next_day(&mut self) -> Result<(), GameError> {
        self.require_phase(GamePhase::Night)?;
        self.phase = GamePhase::DayDiscussion;
        self.day += 1;
        self.user_moves_day_counter = 0;
        Ok(())
    }

    /// Moves the game to its terminal state.
    pub fn finish(&mut self) {
        self.phase = GamePhase::GameOver;
        self.is_active = false;
    }

    /// Rebuilds the dead-roster text from the given eliminated bots.
    pub fn update_dead_roster(&mut self, dead_bots: &[&BotPlayer]) {
        let mut lines: Vec<String> = dead_bots
            .iter()
            .map(|bot| format!("{} ({})", bot.name, bot.role.display_name()))
            .collect();
        if !self.human.is_alive {
            lines.push(format!(
                "{} ({})",
                self.human.name,
                self.human.role.display_name()
            ));
        }
        self.dead_roster = if lines.is_empty() {
            NO_ELIMINATED_PLAYERS.to_owned()
        } else {
            lines.join(",")
        };
    }

    /// Stamps the aggregate with its last mutation time.
    pub fn touch(&mut self, clock: &dyn Clock) {
        self.updated_at = clock.now();
    }

    /// Evaluates win conditions over the alive roster.
    ///
    /// Werewolves win at parity (alive werewolves ≥ alive non-werewolves,
    /// human counted); villagers win once no werewolf remains. `None` while
    /// the game should continue.
    #[must_use]
    pub fn verdict(&self, alive_bots: &[&BotPlayer]) -> Option<Verdict> {
        let mut wolves = alive_bots.iter().filter(|b| b.role.is_werewolf()).count();
        let mut town = alive_bots.iter().filter(|b| !b.role.is_werewolf()).count();
        if self.human.is_alive {
            if self.human.role == Role::Werewolf {
                wolves += 1;
            } else {
                town += 1;
            }
        }

        if wolves == 0 {
            Some(Verdict::VillagersWin)
        } else if wolves >= town {
            Some(Verdict::WerewolvesWin)
        } else {
            None
        }
    }
}

/// Row returned by [`GameStore::list_active_summaries`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    /// Game identifier.
    pub id: Uuid,
    /// The human player's display name.
    pub name: String,
    /// Current day counter.
    pub day: u32,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for game session records.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Load a game by id.
    async fn get(&self, id: Uuid) -> Result<Option<Game>, GameError>;

    /// Insert or replace a game record.
    async fn upsert(&self, game: &Game) -> Result<(), GameError>;

    /// Remove a game record.
    async fn delete(&self, id: Uuid) -> Result<(), GameError>;

    /// Summaries of all active games, newest first.
    async fn list_active_summaries(&self) -> Result<Vec<GameSummary>, GameError>;
}
