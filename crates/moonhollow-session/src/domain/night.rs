//! Nightly role actions and their resolution.

use moonhollow_cast::role::Role;
use serde::{Deserialize, Serialize};

/// Fixed role order for night sequencing. Ties within a role are resolved by
/// uniform-random choice among the alive holders; one action per role per
/// night.
pub const NIGHT_ORDER: [Role; 3] = [Role::Doctor, Role::Werewolf, Role::Detective];

/// A night-action reply from a role holder.
#[derive(Debug, Clone, Deserialize)]
pub struct NightReply {
    /// The target player's name.
    pub target: String,
    /// The actor's stated reason.
    #[serde(default)]
    pub reason: String,
}

/// The collected actions of one night.
#[derive(Debug, Clone, Default)]
pub struct NightActions {
    /// The Doctor's protected player, if a Doctor acted.
    pub save: Option<String>,
    /// The Werewolves' victim, if a Werewolf acted.
    pub kill: Option<String>,
    /// The Detective's suspect, if a Detective acted.
    pub investigate: Option<String>,
}

/// The aggregated outcome that writes the morning report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NightOutcome {
    /// Who dies this night, after the save is applied.
    pub victim: Option<String>,
    /// True when the Doctor's save cancelled the kill.
    pub kill_prevented: bool,
    /// Who the Detective investigated; the finding goes only to the
    /// Detective's private channel.
    pub investigated: Option<String>,
}

/// Merges the night's actions into one outcome: the kill is prevented iff
/// the Doctor saved exactly the Werewolves' victim.
#[must_use]
pub fn resolve(actions: &NightActions) -> NightOutcome {
    let kill_prevented = matches!(
        (&actions.save, &actions.kill),
        (Some(saved), Some(killed)) if saved == killed
    );
    NightOutcome {
        victim: if kill_prevented {
            None
        } else {
            actions.kill.clone()
        },
        kill_prevented,
        investigated: actions.investigate.clone(),
    }
}
