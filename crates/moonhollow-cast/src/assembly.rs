//! Cast assembly — role lists and knowledge wiring at game creation.

use moonhollow_core::error::GameError;
use moonhollow_core::rng::DeterministicRng;

use crate::participant::{BotPlayer, HumanPlayer, NO_ALLIES};
use crate::role::Role;

/// Builds the shuffled role list for a new game: `wolf_count` werewolves,
/// the given special roles, and villagers to fill `total_players` slots.
pub fn build_role_list(
    total_players: usize,
    wolf_count: usize,
    special_roles: &[Role],
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<Role>, GameError> {
    if total_players < wolf_count + special_roles.len() {
        return Err(GameError::Validation(
            "total players cannot be less than the werewolves plus special roles".to_owned(),
        ));
    }

    let mut roles = vec![Role::Werewolf; wolf_count];
    roles.extend_from_slice(special_roles);
    roles.resize(total_players, Role::Villager);

    // Fisher–Yates over the role list.
    for i in (1..roles.len()).rev() {
        let j = rng.pick_index(i + 1);
        roles.swap(i, j);
    }
    Ok(roles)
}

/// Removes and returns one role at random — the human player's role.
pub fn pick_role_for_human(
    roles: &mut Vec<Role>,
    rng: &mut dyn DeterministicRng,
) -> Result<Role, GameError> {
    if roles.is_empty() {
        return Err(GameError::Validation("role list is empty".to_owned()));
    }
    let index = rng.pick_index(roles.len());
    Ok(roles.remove(index))
}

/// Fills in each bot's ally knowledge and visible roster.
///
/// Werewolves learn their pack mates by name and role; everyone else knows
/// no allies. Every bot sees all other participant names, human included.
pub fn wire_knowledge(bots: &mut [BotPlayer], human: &HumanPlayer) {
    let snapshot: Vec<(uuid::Uuid, String, Role)> = bots
        .iter()
        .map(|b| (b.id, b.name.clone(), b.role))
        .collect();

    for bot in bots.iter_mut() {
        if bot.role == Role::Werewolf {
            let allies: Vec<String> = snapshot
                .iter()
                .filter(|(id, _, role)| *role == Role::Werewolf && *id != bot.id)
                .map(|(_, name, role)| format!("{name} (role: {})", role.display_name()))
                .collect();
            bot.known_ally_names = if allies.is_empty() {
                NO_ALLIES.to_owned()
            } else {
                allies.join(",")
            };
        } else {
            bot.known_ally_names = NO_ALLIES.to_owned();
        }

        let mut others: Vec<String> = snapshot
            .iter()
            .filter(|(id, _, _)| *id != bot.id)
            .map(|(_, name, _)| name.clone())
            .collect();
        others.push(human.name.clone());
        bot.other_player_names = others.join(",");
    }
}
