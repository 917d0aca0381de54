//! The night phase: hidden role actions and their resolution.

use serde::Serialize;
use uuid::Uuid;

use moonhollow_cast::participant::BotPlayer;
use moonhollow_cast::role::Role;
use moonhollow_core::error::GameError;
use moonhollow_transcript::channel::ChannelKey;
use moonhollow_transcript::message::ChatMessage;

use crate::application::context::SessionContext;
use crate::domain::game::{Game, GamePhase, Verdict};
use crate::domain::night::{NIGHT_ORDER, NightActions, NightOutcome, NightReply, resolve};
use crate::prompts;

/// Outcome of [`start_game_night`].
#[derive(Debug, Clone, Serialize)]
pub struct NightResolution {
    /// What the night did.
    pub outcome: NightOutcome,
    /// A faction's win, when the night decided the game.
    pub verdict: Option<Verdict>,
    /// The investigation result, present only when the human is the
    /// Detective. A bot Detective receives it on its private channel instead.
    pub detective_finding: Option<String>,
}

/// Runs one night: Doctor, then Werewolf, then Detective act in fixed order,
/// one action per role. A bot actor is drawn uniformly from the role's alive
/// holders; a human holding a role acts through `human_action`. Resolution
/// applies the kill (unless saved), delivers the investigation privately,
/// broadcasts one morning report, and wraps to the next day.
///
/// # Errors
///
/// `InvalidPhase` outside night; `Validation` when the human holds a night
/// role but `human_action` is missing, or an action names no alive
/// participant; provider errors unrecovered with nothing persisted.
pub async fn start_game_night(
    ctx: &SessionContext,
    game_id: Uuid,
    human_action: Option<String>,
) -> Result<NightResolution, GameError> {
    let mut game = ctx.load_game(game_id).await?;
    game.require_phase(GamePhase::Night)?;
    let mut bots = ctx.load_bots(&game).await?;

    let mut actions = NightActions::default();
    let mut bot_detective: Option<Uuid> = None;
    for role in NIGHT_ORDER {
        let action = collect_action(ctx, &game, &bots, role, human_action.as_deref()).await?;
        let Some(action) = action else { continue };
        validate_target(&game, &bots, &action.target)?;
        match role {
            Role::Doctor => actions.save = Some(action.target),
            Role::Werewolf => actions.kill = Some(action.target),
            Role::Detective => {
                actions.investigate = Some(action.target);
                bot_detective = action.actor_id;
            }
            Role::Villager => {}
        }
    }

    let outcome = resolve(&actions);
    if let Some(victim) = &outcome.victim {
        if *victim == game.human.name {
            game.human.is_alive = false;
        } else if let Some(bot) = bots.iter_mut().find(|b| b.name == *victim) {
            bot.eliminate();
            let bot = bot.clone();
            ctx.players.upsert(&bot).await?;
        }
    }

    let detective_finding = deliver_investigation(ctx, &game, &bots, &outcome, bot_detective)
        .await?;

    let dead: Vec<&BotPlayer> = bots.iter().filter(|b| !b.is_alive).collect();
    game.update_dead_roster(&dead);
    ctx.broadcast(&game, &prompts::morning_report(&outcome)).await?;

    let alive: Vec<&BotPlayer> = bots.iter().filter(|b| b.is_alive).collect();
    let verdict = game.verdict(&alive);
    if let Some(verdict) = verdict {
        ctx.broadcast(&game, &prompts::verdict_message(verdict)).await?;
        game.finish();
    } else if game.human.is_alive {
        game.begin_next_day()?;
    } else {
        game.finish();
    }

    game.touch(ctx.clock.as_ref());
    ctx.games.upsert(&game).await?;

    tracing::info!(
        game_id = %game.id,
        victim = ?outcome.victim,
        verdict = ?verdict,
        "night resolved"
    );
    Ok(NightResolution {
        outcome,
        verdict,
        detective_finding,
    })
}

/// One role's night action, with the acting bot's id when a bot acted.
struct RoleAction {
    target: String,
    actor_id: Option<Uuid>,
}

/// Collects one role's action: the human's out-of-band target when the human
/// holds the role, otherwise one bot drawn from the role's alive holders.
/// Returns `None` when nobody alive holds the role.
async fn collect_action(
    ctx: &SessionContext,
    game: &Game,
    bots: &[BotPlayer],
    role: Role,
    human_action: Option<&str>,
) -> Result<Option<RoleAction>, GameError> {
    if game.human.is_alive && game.human.role == role {
        let target = human_action.ok_or_else(|| {
            GameError::Validation(format!(
                "a night action is required: the human player is the {}",
                role.display_name()
            ))
        })?;
        return Ok(Some(RoleAction {
            target: target.to_owned(),
            actor_id: None,
        }));
    }

    let actors: Vec<&BotPlayer> = bots
        .iter()
        .filter(|b| b.is_alive && b.role == role)
        .collect();
    if actors.is_empty() {
        return Ok(None);
    }
    let index = {
        let mut rng = ctx.rng.lock().await;
        rng.pick_index(actors.len())
    };
    let actor = actors[index];

    let command = match role {
        Role::Doctor => prompts::NIGHT_DOCTOR_COMMAND,
        Role::Werewolf => prompts::NIGHT_WEREWOLF_COMMAND,
        Role::Detective => prompts::NIGHT_DETECTIVE_COMMAND,
        Role::Villager => return Ok(None),
    };
    let reply = ctx.ask_bot_for_json(game, actor, command).await?;
    let reply: NightReply = serde_json::from_value(reply.clone())
        .map_err(|e| GameError::MalformedJson(format!("night action {reply}: {e}")))?;
    Ok(Some(RoleAction {
        target: reply.target,
        actor_id: Some(actor.id),
    }))
}

/// Night targets must name an alive participant.
fn validate_target(game: &Game, bots: &[BotPlayer], target: &str) -> Result<(), GameError> {
    let known = (game.human.is_alive && target == game.human.name)
        || bots.iter().any(|b| b.is_alive && b.name == target);
    if known {
        Ok(())
    } else {
        Err(GameError::Validation(format!(
            "night action targets no alive player: {target}"
        )))
    }
}

/// Delivers the Detective's finding: privately to a bot Detective, or back
/// through the response for a human Detective.
async fn deliver_investigation(
    ctx: &SessionContext,
    game: &Game,
    bots: &[BotPlayer],
    outcome: &NightOutcome,
    bot_detective: Option<Uuid>,
) -> Result<Option<String>, GameError> {
    let Some(target) = &outcome.investigated else {
        return Ok(None);
    };
    let role = if *target == game.human.name {
        game.human.role
    } else {
        bots.iter()
            .find(|b| b.name == *target)
            .map(|b| b.role)
            .ok_or_else(|| GameError::player_not_found(target))?
    };
    let report = prompts::investigation_report(target, role.display_name());

    if let Some(detective_id) = bot_detective {
        let message = ChatMessage::from_game_master(
            ChannelKey::private(game.id, detective_id),
            report.as_str(),
            ctx.clock.now_millis(),
        );
        ctx.transcripts.append(&message).await?;
        Ok(None)
    } else {
        Ok(Some(report))
    }
}
