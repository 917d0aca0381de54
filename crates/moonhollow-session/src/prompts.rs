//! Game Master prompt templates.
//!
//! Instruction text is rebuilt from current game state on every call, so a
//! dead-roster update after an elimination reaches every later call without
//! rewriting stored messages.

use moonhollow_cast::participant::BotPlayer;
use moonhollow_cast::role::roles_as_str;

use crate::domain::game::{Game, Verdict};
use crate::domain::night::NightOutcome;

/// Game rules section shared by every player instruction.
const GAME_RULES: &str = "\
[START OF GAME RULES FOR WEREWOLF PARTY GAME]
Each player receives a secret role that defines their abilities and team alignment.

Roles and Teams: Players are divided into two main groups - the Werewolves and the Villagers. \
There are also special roles like the Doctor and the Detective.

Werewolves: Aim to eliminate the Villagers, Doctor, and Detective or simply outnumber the \
non-Werewolf players.
Villagers: Aim to identify and eliminate all the Werewolves.
Doctor: Plays on the Villagers' side. Can choose someone to save each night, potentially \
preventing a Werewolf attack.
Detective: Plays on the Villagers' side. Can investigate a player's role each night.

Game Phases: The game alternates between two phases - Day and Night.
- Night Phase: The Werewolves secretly choose a player to eliminate, the Doctor chooses \
someone to save, and the Detective investigates a player's role.
- Day Phase: All players discuss the events, share information, accusations, and defenses. \
At the end of the day phase, players vote to eliminate someone they suspect is a Werewolf.

Players cannot share their roles or night actions. They must pretend to be a regular \
Villager during the Day Phase.

Winning Conditions:
- The Villagers win if they eliminate all Werewolves.
- The Werewolves win if they equal or outnumber the Villagers.

Communication Rules:
- Players can talk to each other during the Day.
- Eliminated players leave the game and cannot participate in the discussion or the Night.
- Players must follow the Game Master instructions; these start with the \"Game Master:\" prefix.
[END OF GAME RULES FOR WEREWOLF PARTY GAME]";

/// Builds a bot's personal instruction: identity, knowledge, rules, and the
/// current game state (alive names, dead roster).
#[must_use]
pub fn player_instruction(bot: &BotPlayer, game: &Game) -> String {
    format!(
        "You are an AI participant in a verbal chat game called Werewolf, played with multiple \
         human players. Your paramount objective is to blend in seamlessly as a human player; \
         your true nature must remain concealed from other participants.\n\n\
         Your assigned identity in the game is as follows:\n\
         - Your name: {name}\n\
         - Your temperament: {temperament}\n\
         - Your secret game role: {role}\n\
         - Your winning condition: {win_condition}\n\
         - Ally roles: {ally_roles}\n\
         - Enemy roles: {enemy_roles}\n\
         - Known allies: {known_allies}\n\
         - Known enemies: All your enemies are unknown to you.\n\
         - Your secret role motivation: {role_motivation}\n\n\
         [START OF GAME STORY]\n{game_story}\n[END OF GAME STORY]\n\n\
         [START OF YOUR PERSONAL STORY]\n{personal_story}\n[END OF YOUR PERSONAL STORY]\n\n\
         {game_rules}\n\n\
         You will interact with other players. Here are the names of alive players: \
         {players_names}\n\
         You can only interact with alive players. Be aware of dead players and their roles: \
         {dead_players}\n\n\
         You will receive user inputs comprising multiple messages from different players, \
         each prefixed with the player's name, for example:\n\
         Player Name 1: the latest message from Player 1\n\
         Some messages come from the Game Master as general game updates.\n\n\
         Try to figure out which player has which role; this can help you win. Keep your own \
         goal secret. Try not to repeat the style of other players; come up with your own.\n\n\
         Reply with plain text without any formatting, new lines, lists, or markdown. Don't \
         add your name to the beginning of your reply.\n{language_instruction}",
        name = bot.name,
        temperament = bot.temperament,
        role = bot.role.display_name(),
        win_condition = bot.role.win_condition(),
        ally_roles = roles_as_str(bot.role.ally_roles()),
        enemy_roles = roles_as_str(bot.role.enemy_roles()),
        known_allies = bot.known_ally_names,
        role_motivation = bot.role.motivation(),
        game_story = game.story,
        personal_story = bot.backstory,
        game_rules = GAME_RULES,
        players_names = bot.other_player_names,
        dead_players = game.dead_roster,
        language_instruction = game.reply_language_instruction,
    )
}

/// Builds the turn arbiter's instruction.
#[must_use]
pub fn arbiter_instruction(game: &Game) -> String {
    format!(
        "As the Game Master and arbiter in the Werewolf Party Game, your role is to moderate \
         the conversation among players. Analyze the messages and decide which up to three \
         players should respond next, keeping the narrative suspenseful and engaging. Try to \
         understand who is talking to whom: if one player asks another, the asked player \
         should reply. Don't let players be silent for too long; if somebody hasn't spoken \
         for a while, include them.\n\n\
         [START OF GAME STORY]\n{game_story}\n[END OF GAME STORY]\n\n\
         [START OF PLAYERS NAMES AND ROLES]\n{roster}\n[END OF PLAYERS NAMES AND ROLES]\n\n\
         There is one more player named {human_name}. Never include this player in your \
         responses; they make a turn whenever they want.\n\n\
         Messages arrive prefixed with the author's name. Respond in JSON, listing the names \
         of up to three selected players in the order they should reply, always at least one \
         name. Your response format: \
         {{\"players_to_reply\": [\"player_name1\", \"player_name2\", \"player_name3\"]}}",
        game_story = game.story,
        roster = game.roster_text,
        human_name = game.human.name,
    )
}

/// Instruction for one structured call that generates the scene and cast.
#[must_use]
pub fn game_generation_instruction(theme: &str, bot_count: usize, human_name: &str) -> String {
    format!(
        "You are creating a new game of Werewolf set in the following theme: {theme}. \
         Invent an atmospheric opening scene for the game and {bot_count} distinct \
         characters. One more player named {human_name} joins as themselves; do not create \
         a character for them and do not reuse their name. Respond in JSON only, with this \
         exact shape: {{\"game_scene\": \"string\", \"players\": [{{\"name\": \"string\", \
         \"backstory\": \"string\", \"temperament\": \"string\"}}]}}"
    )
}

/// Private command asking a bot to introduce itself.
pub const INTRODUCE_COMMAND: &str = "Please introduce yourself to the other players.";

/// Private command for a Round One ballot.
pub const ROUND_ONE_VOTE_COMMAND: &str = "It's time to vote! Choose one player to eliminate. \
     You must pick somebody even if you don't see a reason. You cannot choose yourself or \
     nobody. Respond in JSON only. Your response format: \
     {\"player_to_eliminate\": \"player_name\", \"reason\": \"your_reason\"}";

/// Broadcast announcing the Round One leaders.
#[must_use]
pub fn round_one_result(leaders: &[String]) -> String {
    format!(
        "There are few leaders in this first round of voting: {}. Let's hear from each of \
         them. They have 1 message to speak for themselves. Then you all will vote to \
         eliminate one of them.",
        leaders.join(", ")
    )
}

/// Private command asking a leader to defend themselves.
pub const DEFENCE_COMMAND: &str = "Players have chosen you as a candidate for elimination. \
     Protect yourself. Explain why you should not be eliminated.";

/// Private command for a Round Two ballot, restricted to the leader set.
#[must_use]
pub fn round_two_vote_command(candidates: &[String]) -> String {
    format!(
        "It's time for the final vote! Choose one player to eliminate from the following \
         list: {}. Respond in JSON only. Your response format: \
         {{\"player_to_eliminate\": \"player_name\", \"reason\": \"your_reason\"}}",
        candidates.join(", ")
    )
}

/// Broadcast revealing the eliminated player and their role.
#[must_use]
pub fn round_two_result(name: &str, role: &str) -> String {
    format!(
        "You decided to eliminate the following player: {name}. This player had the role of \
         {role}. Now it is time to start the night."
    )
}

/// Night command for the Doctor.
pub const NIGHT_DOCTOR_COMMAND: &str = "Night has fallen. Choose a player you are going to \
     save from elimination tonight. You must choose somebody. Respond in JSON only. Your \
     response format: {\"target\": \"player_name\", \"reason\": \"your_reason\"}";

/// Night command for the Werewolves' actor.
pub const NIGHT_WEREWOLF_COMMAND: &str = "Night has fallen. Choose a player you are going to \
     eliminate from the game. You must choose somebody even if you don't see a reason. You \
     cannot choose yourself or nobody. Respond in JSON only. Your response format: \
     {\"target\": \"player_name\", \"reason\": \"your_reason\"}";

/// Night command for the Detective.
pub const NIGHT_DETECTIVE_COMMAND: &str = "Night has fallen. Choose a player whose role you \
     want to investigate. Respond in JSON only. Your response format: \
     {\"target\": \"player_name\", \"reason\": \"your_reason\"}";

/// Private report of the Detective's finding.
#[must_use]
pub fn investigation_report(name: &str, role: &str) -> String {
    format!("Your investigation is complete: {name} has the role of {role}.")
}

/// Broadcast opening the next day with the night's outcome.
#[must_use]
pub fn morning_report(outcome: &NightOutcome) -> String {
    match (&outcome.victim, outcome.kill_prevented) {
        (Some(victim), _) => format!(
            "The night is over. When the town awoke, {victim} was gone, eliminated during \
             the night. The day begins; discuss and find the Werewolves."
        ),
        (None, true) => "The night is over. The Werewolves struck, but their victim was \
             saved. Nobody died tonight. The day begins; discuss and find the Werewolves."
            .to_owned(),
        (None, false) => "The night is over. Nobody died tonight. The day begins; discuss \
             and find the Werewolves."
            .to_owned(),
    }
}

/// Broadcast ending the game with the winning faction.
#[must_use]
pub fn verdict_message(verdict: Verdict) -> String {
    match verdict {
        Verdict::WerewolvesWin => {
            "The game is over. The Werewolves equal the townsfolk in number; the town has \
             fallen. The Werewolves win."
                .to_owned()
        }
        Verdict::VillagersWin => {
            "The game is over. Every Werewolf has been eliminated. The Villagers win."
                .to_owned()
        }
    }
}
