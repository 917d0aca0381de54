//! The Werewolf role system.

use serde::{Deserialize, Serialize};

/// A participant's secret role. Assigned once at game creation, immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A member of the Werewolf team.
    Werewolf,
    /// Can protect one player from elimination each night.
    Doctor,
    /// Can investigate one player's alignment each night.
    Detective,
    /// A regular townsperson without special abilities.
    Villager,
}

impl Role {
    /// The display name used in prompts and result messages.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Werewolf => "Werewolf",
            Self::Doctor => "Doctor",
            Self::Detective => "Detective",
            Self::Villager => "Villager",
        }
    }

    /// Whether the role belongs to the Werewolf faction.
    #[must_use]
    pub fn is_werewolf(self) -> bool {
        self == Self::Werewolf
    }

    /// Secret motivation text woven into the role's instruction prompt.
    #[must_use]
    pub fn motivation(self) -> &'static str {
        match self {
            Self::Werewolf => {
                "Seeks to control the town from the shadows, operating with cunning and secrecy. \
                 Their goal is to eliminate non-Werewolf players while protecting their own. They \
                 must act covertly, executing their plans under the cover of night and misleading \
                 others during the day to conceal their true identity."
            }
            Self::Doctor => {
                "Dedicated to saving lives, the Doctor works to protect those in danger from \
                 Werewolf attacks. Their main goal is to identify and eliminate the Werewolf \
                 threat, using their night actions to safeguard potential targets. All \
                 non-Werewolf players are allies in the quest for peace."
            }
            Self::Detective => {
                "With a keen eye for deceit, the Detective investigates players to uncover their \
                 true alignments. Their mission is to use this knowledge to guide the town in \
                 rooting out the Werewolf menace, employing their night actions to gather crucial \
                 intelligence."
            }
            Self::Villager => {
                "As a regular townsperson, the Villager lacks special actions but plays a \
                 critical role in discussions and votes to eliminate the Werewolf threat. \
                 Vigilance and collaboration with fellow non-Werewolf players are their main \
                 weapons in the quest for safety and order."
            }
        }
    }

    /// Roles aligned with this one.
    #[must_use]
    pub fn ally_roles(self) -> &'static [Role] {
        match self {
            Self::Werewolf => &[Self::Werewolf],
            _ => &[Self::Doctor, Self::Detective, Self::Villager],
        }
    }

    /// Roles opposed to this one.
    #[must_use]
    pub fn enemy_roles(self) -> &'static [Role] {
        match self {
            Self::Werewolf => &[Self::Doctor, Self::Detective, Self::Villager],
            _ => &[Self::Werewolf],
        }
    }

    /// The win-condition sentence for this role's instruction prompt.
    #[must_use]
    pub fn win_condition(self) -> &'static str {
        if self.is_werewolf() {
            "You win if the Werewolves are the majority of the remaining players."
        } else {
            "You win if all the Werewolves are eliminated."
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Renders a role slice as a comma-separated list of display names.
#[must_use]
pub fn roles_as_str(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_werewolf_is_its_own_ally() {
        assert_eq!(Role::Werewolf.ally_roles(), &[Role::Werewolf]);
        assert!(Role::Werewolf.enemy_roles().contains(&Role::Doctor));
    }

    #[test]
    fn test_town_roles_oppose_the_werewolf() {
        for role in [Role::Doctor, Role::Detective, Role::Villager] {
            assert_eq!(role.enemy_roles(), &[Role::Werewolf]);
            assert!(!role.is_werewolf());
        }
    }

    #[test]
    fn test_roles_as_str_joins_display_names() {
        assert_eq!(
            roles_as_str(&[Role::Doctor, Role::Detective]),
            "Doctor, Detective"
        );
    }
}
