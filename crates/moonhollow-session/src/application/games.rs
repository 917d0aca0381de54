//! Game lifecycle operations: creation, introductions, lookup, deletion.

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use uuid::Uuid;

use moonhollow_cast::assembly::{build_role_list, pick_role_for_human, wire_knowledge};
use moonhollow_cast::participant::{BotPlayer, HumanPlayer};
use moonhollow_cast::role::Role;
use moonhollow_core::error::GameError;
use moonhollow_gateway::provider::ProviderKind;
use moonhollow_transcript::channel::ChannelKey;
use moonhollow_transcript::message::MessageTag;
use moonhollow_transcript::view::ChatTurn;

use crate::application::context::SessionContext;
use crate::domain::game::{Game, GamePhase, GameSummary};
use crate::prompts;

/// Total participants per game, human included.
const TOTAL_PLAYERS: usize = 6;

/// Werewolves per game.
const WOLF_COUNT: usize = 2;

/// One-of-each special roles per game.
const SPECIAL_ROLES: [Role; 2] = [Role::Doctor, Role::Detective];

/// Command to create a new game session.
#[derive(Debug, Clone, Deserialize)]
pub struct InitGame {
    /// The human player's display name.
    pub human_name: String,
    /// Free-text theme the scene generation builds on.
    pub theme: String,
    /// Optional instruction pinning the language bots reply in.
    #[serde(default)]
    pub reply_language_instruction: String,
    /// Provider for arbiter calls.
    #[serde(default)]
    pub arbiter_provider: ProviderKind,
    /// Provider for bot reply and ballot calls.
    #[serde(default)]
    pub bot_provider: ProviderKind,
}

/// A freshly created game with its cast.
#[derive(Debug, Clone)]
pub struct NewGame {
    /// The persisted aggregate.
    pub game: Game,
    /// The persisted bot players, in creation order.
    pub bots: Vec<BotPlayer>,
}

/// One bot's utterance, for operations that return several.
#[derive(Debug, Clone, Serialize)]
pub struct BotUtterance {
    /// The speaking bot's display name.
    pub name: String,
    /// What it said.
    pub text: String,
}

/// A loaded game with its cast.
#[derive(Debug, Clone)]
pub struct GameView {
    /// The aggregate.
    pub game: Game,
    /// All bot players, in creation order.
    pub bots: Vec<BotPlayer>,
}

#[derive(Debug, Deserialize)]
struct GeneratedCast {
    game_scene: String,
    players: Vec<GeneratedPlayer>,
}

#[derive(Debug, Deserialize)]
struct GeneratedPlayer {
    name: String,
    backstory: String,
    temperament: String,
}

/// Creates a new game: one structured generation call produces the scene and
/// the bot cast, roles are dealt at random (the human draws one too), ally
/// knowledge is wired, and the scene opens the shared channel.
///
/// # Errors
///
/// Provider errors from the generation call; `MalformedJson` when its reply
/// does not match the expected shape; `Validation` on an unusable cast.
pub async fn init_game(ctx: &SessionContext, command: InitGame) -> Result<NewGame, GameError> {
    let bot_count = TOTAL_PLAYERS - 1;
    let model = ctx.models.model_for(command.bot_provider)?;
    let instruction =
        prompts::game_generation_instruction(&command.theme, bot_count, &command.human_name);
    let reply = model
        .ask_for_json(&[ChatTurn::new(MessageTag::User, instruction)])
        .await?;
    let cast: GeneratedCast = serde_json::from_value(reply)
        .map_err(|e| GameError::MalformedJson(format!("generated cast: {e}")))?;

    if cast.players.len() < bot_count {
        return Err(GameError::Validation(format!(
            "scene generation produced {} characters, need {bot_count}",
            cast.players.len()
        )));
    }
    let generated: Vec<GeneratedPlayer> =
        cast.players.into_iter().take(bot_count).collect();
    let mut seen: Vec<&str> = vec![command.human_name.as_str()];
    for player in &generated {
        if seen.contains(&player.name.as_str()) {
            return Err(GameError::Validation(format!(
                "scene generation produced a duplicate name: {}",
                player.name
            )));
        }
        seen.push(player.name.as_str());
    }

    let (roles, human_role) = {
        let mut rng = ctx.rng.lock().await;
        let mut roles =
            build_role_list(TOTAL_PLAYERS, WOLF_COUNT, &SPECIAL_ROLES, &mut *rng)?;
        let human_role = pick_role_for_human(&mut roles, &mut *rng)?;
        (roles, human_role)
    };

    let game_id = Uuid::new_v4();
    let human = HumanPlayer::new(command.human_name, human_role);
    let mut bots: Vec<BotPlayer> = generated
        .into_iter()
        .zip(roles)
        .map(|(player, role)| {
            BotPlayer::new(game_id, player.name, role, player.backstory, player.temperament)
        })
        .collect();
    wire_knowledge(&mut bots, &human);

    let game = Game::new(
        game_id,
        cast.game_scene,
        human,
        &bots,
        command.arbiter_provider,
        command.bot_provider,
        command.reply_language_instruction,
        ctx.clock.now(),
    );

    for bot in &bots {
        ctx.players.upsert(bot).await?;
    }
    ctx.games.upsert(&game).await?;
    ctx.broadcast(&game, &game.story).await?;

    tracing::info!(game_id = %game.id, human_role = %human_role.display_name(), "game created");
    Ok(NewGame { game, bots })
}

/// Asks one bot to introduce itself; the introduction lands on the shared
/// channel.
///
/// # Errors
///
/// `NotFound` for unknown ids, `InvalidPhase` outside day discussion,
/// `Validation` for an eliminated bot, provider errors unrecovered.
pub async fn get_welcome_message(
    ctx: &SessionContext,
    game_id: Uuid,
    bot_id: Uuid,
) -> Result<String, GameError> {
    let game = ctx.load_game(game_id).await?;
    game.require_phase(GamePhase::DayDiscussion)?;
    let bot = ctx.load_bot(bot_id).await?;
    if bot.game_id != game.id {
        return Err(GameError::player_not_found(bot_id));
    }
    if !bot.is_alive {
        return Err(GameError::Validation(format!("{} is eliminated", bot.name)));
    }

    let reply = ctx.ask_bot(&game, &bot, prompts::INTRODUCE_COMMAND).await?;
    ctx.append_private_command(&game, &bot, prompts::INTRODUCE_COMMAND)
        .await?;
    ctx.append_bot_utterance(&game, &bot, &reply).await?;
    Ok(reply)
}

/// Fan-out introductions: every alive bot is asked concurrently; transcripts
/// are written only after all calls succeeded, in cast order.
///
/// # Errors
///
/// As [`get_welcome_message`]; one failing call fails the whole operation
/// with nothing persisted.
pub async fn get_welcome_messages_from_all_players(
    ctx: &SessionContext,
    game_id: Uuid,
) -> Result<Vec<BotUtterance>, GameError> {
    let game = ctx.load_game(game_id).await?;
    game.require_phase(GamePhase::DayDiscussion)?;
    let bots: Vec<BotPlayer> = ctx
        .load_bots(&game)
        .await?
        .into_iter()
        .filter(|b| b.is_alive)
        .collect();

    let mut tasks: JoinSet<(usize, Result<String, GameError>)> = JoinSet::new();
    for (index, bot) in bots.iter().enumerate() {
        let ctx = ctx.clone();
        let game = game.clone();
        let bot = bot.clone();
        tasks.spawn(async move {
            let reply = ctx.ask_bot(&game, &bot, prompts::INTRODUCE_COMMAND).await;
            (index, reply)
        });
    }

    let mut replies: Vec<Option<String>> = vec![None; bots.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, reply) =
            joined.map_err(|e| GameError::Infrastructure(format!("join error: {e}")))?;
        replies[index] = Some(reply?);
    }

    let mut utterances = Vec::with_capacity(bots.len());
    for (bot, reply) in bots.iter().zip(replies) {
        let reply = reply.ok_or_else(|| {
            GameError::Infrastructure("introduction task produced no reply".to_owned())
        })?;
        ctx.append_private_command(&game, bot, prompts::INTRODUCE_COMMAND)
            .await?;
        ctx.append_bot_utterance(&game, bot, &reply).await?;
        utterances.push(BotUtterance {
            name: bot.name.clone(),
            text: reply,
        });
    }
    Ok(utterances)
}

/// Loads a game and its cast.
///
/// # Errors
///
/// `NotFound` for an unknown game id.
pub async fn load_game(ctx: &SessionContext, game_id: Uuid) -> Result<GameView, GameError> {
    let game = ctx.load_game(game_id).await?;
    let bots = ctx.load_bots(&game).await?;
    Ok(GameView { game, bots })
}

/// Summaries of all active games, newest first.
///
/// # Errors
///
/// `Infrastructure` from the store.
pub async fn list_games(ctx: &SessionContext) -> Result<Vec<GameSummary>, GameError> {
    ctx.games.list_active_summaries().await
}

/// Removes a game with its players and every transcript channel.
///
/// # Errors
///
/// `NotFound` for an unknown game id; `Infrastructure` from the stores.
pub async fn delete_game(ctx: &SessionContext, game_id: Uuid) -> Result<(), GameError> {
    let game = ctx.load_game(game_id).await?;
    ctx.transcripts
        .delete_channel(ChannelKey::shared(game.id))
        .await?;
    for bot_id in &game.bot_ids {
        ctx.transcripts
            .delete_channel(ChannelKey::private(game.id, *bot_id))
            .await?;
    }
    ctx.players.delete_by_game(game.id).await?;
    ctx.games.delete(game.id).await?;
    tracing::info!(game_id = %game.id, "game deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::seeded_game;

    fn generation_reply() -> String {
        let players: Vec<serde_json::Value> = ["Ash", "Brier", "Carden", "Dell", "Ember"]
            .iter()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "backstory": format!("{name} grew up by the mill"),
                    "temperament": "wary",
                })
            })
            .collect();
        serde_json::json!({
            "game_scene": "Lanterns gutter over the square.",
            "players": players,
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_init_game_deals_roles_and_opens_the_shared_channel() {
        let harness = seeded_game([generation_reply()]).await;

        let new_game = init_game(
            &harness.ctx,
            InitGame {
                human_name: "Mara".to_owned(),
                theme: "a mill town".to_owned(),
                reply_language_instruction: String::new(),
                arbiter_provider: ProviderKind::OpenAi,
                bot_provider: ProviderKind::OpenAi,
            },
        )
        .await
        .unwrap();

        // Identity RNG: no shuffle, the human draws the last role (Villager).
        assert_eq!(new_game.game.human.role, Role::Villager);
        let roles: Vec<Role> = new_game.bots.iter().map(|b| b.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::Werewolf,
                Role::Werewolf,
                Role::Doctor,
                Role::Detective,
                Role::Villager
            ]
        );

        // Werewolves know their pack mates; others know nobody.
        assert!(new_game.bots[0].known_ally_names.contains("Brier"));
        assert!(new_game.bots[2].known_ally_names.contains("don't know"));

        let stored = harness
            .ctx
            .games
            .get(new_game.game.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.phase, GamePhase::DayDiscussion);
        assert_eq!(stored.day, 1);

        let shared = harness
            .ctx
            .transcripts
            .read(ChannelKey::shared(new_game.game.id))
            .await
            .unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].body, "Lanterns gutter over the square.");
    }

    #[tokio::test]
    async fn test_init_game_rejects_an_undersized_cast() {
        let harness = seeded_game(
            [r#"{"game_scene": "dusk", "players": [{"name": "Ash", "backstory": "", "temperament": ""}]}"#],
        )
        .await;

        let err = init_game(
            &harness.ctx,
            InitGame {
                human_name: "Mara".to_owned(),
                theme: "a mill town".to_owned(),
                reply_language_instruction: String::new(),
                arbiter_provider: ProviderKind::OpenAi,
                bot_provider: ProviderKind::OpenAi,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GameError::Validation(_)));
    }

    #[tokio::test]
    async fn test_welcome_fan_out_persists_only_after_every_reply() {
        let harness = seeded_game([
            "greetings", "greetings", "greetings", "greetings", "greetings",
        ])
        .await;

        let utterances =
            get_welcome_messages_from_all_players(&harness.ctx, harness.game.id)
                .await
                .unwrap();

        assert_eq!(utterances.len(), 5);
        assert_eq!(harness.shared_bodies().await.len(), 5);
        for bot in &harness.bots {
            assert_eq!(
                harness.private_bodies(bot.id).await,
                vec![prompts::INTRODUCE_COMMAND]
            );
        }
    }

    #[tokio::test]
    async fn test_welcome_fan_out_fails_atomically() {
        // Three replies for five bots: the fan-out must fail without writes.
        let harness = seeded_game(["hi", "hi", "hi"]).await;

        let err = get_welcome_messages_from_all_players(&harness.ctx, harness.game.id)
            .await
            .unwrap_err();

        assert!(matches!(err, GameError::Provider(_)));
        assert!(harness.shared_bodies().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_game_removes_players_and_transcripts() {
        let harness = seeded_game(["a word"]).await;
        let bot_id = harness.bots[0].id;
        get_welcome_message(&harness.ctx, harness.game.id, bot_id)
            .await
            .unwrap();

        delete_game(&harness.ctx, harness.game.id).await.unwrap();

        assert!(harness.ctx.games.get(harness.game.id).await.unwrap().is_none());
        assert!(harness.ctx.players.get(bot_id).await.unwrap().is_none());
        assert!(harness.shared_bodies().await.is_empty());
        assert!(harness.private_bodies(bot_id).await.is_empty());
    }
}
