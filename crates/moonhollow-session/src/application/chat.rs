//! Day-discussion conversation operations.

use uuid::Uuid;

use moonhollow_core::error::GameError;
use moonhollow_transcript::channel::ChannelKey;
use moonhollow_transcript::message::ChatMessage;

use crate::application::arbiter;
use crate::application::context::SessionContext;
use crate::domain::game::GamePhase;

/// Routes one human message: the arbiter picks which bots reply next, the
/// message lands on the shared channel, and the move counters bump.
///
/// The human message is persisted only after the arbiter call succeeded, so
/// an arbiter failure leaves the transcript untouched.
///
/// # Errors
///
/// `InvalidPhase` outside day discussion; `ArbiterParse` when the arbiter
/// names no usable player; provider errors unrecovered.
pub async fn talk_to_all(
    ctx: &SessionContext,
    game_id: Uuid,
    user_message: &str,
) -> Result<Vec<String>, GameError> {
    let mut game = ctx.load_game(game_id).await?;
    game.require_phase(GamePhase::DayDiscussion)?;

    let alive_names: Vec<String> = ctx
        .load_bots(&game)
        .await?
        .iter()
        .filter(|b| b.is_alive)
        .map(|b| b.name.clone())
        .collect();
    let repliers = arbiter::choose_repliers(ctx, &game, &alive_names, user_message).await?;

    let message = ChatMessage::from_participant(
        ChannelKey::shared(game.id),
        game.human.id,
        game.human.name.as_str(),
        user_message,
        ctx.clock.now_millis(),
    );
    ctx.transcripts.append(&message).await?;

    game.record_user_move();
    game.touch(ctx.clock.as_ref());
    ctx.games.upsert(&game).await?;

    tracing::debug!(game_id = %game.id, repliers = ?repliers, "arbiter routed a turn");
    Ok(repliers)
}

/// Asks one bot, by name, to speak given the transcript it can see. The reply
/// lands on the shared channel.
///
/// # Errors
///
/// `NotFound` for an unknown name, `Validation` for an eliminated bot,
/// `InvalidPhase` outside day discussion, provider errors unrecovered.
pub async fn talk_to_certain_player(
    ctx: &SessionContext,
    game_id: Uuid,
    name: &str,
) -> Result<String, GameError> {
    let game = ctx.load_game(game_id).await?;
    game.require_phase(GamePhase::DayDiscussion)?;
    let bot = ctx.bot_by_name(&game, name).await?;
    if !bot.is_alive {
        return Err(GameError::Validation(format!("{name} is eliminated")));
    }

    let model = ctx.models.model_for(game.bot_provider)?;
    let view = ctx.bot_view(&game, &bot, None).await?;
    let reply = model.ask(&view).await?;

    ctx.append_bot_utterance(&game, &bot, &reply).await?;
    Ok(reply)
}
