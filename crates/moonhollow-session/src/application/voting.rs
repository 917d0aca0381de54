//! The two-round elimination vote.

use serde::Serialize;
use tokio::task::JoinSet;
use uuid::Uuid;

use moonhollow_cast::participant::BotPlayer;
use moonhollow_core::error::GameError;

use crate::application::context::SessionContext;
use crate::domain::ballot::{Ballot, round_one_leaders, round_two_winner, tally};
use crate::domain::game::{Game, GamePhase, Verdict};
use crate::prompts;

/// Outcome of [`process_voting_result`].
#[derive(Debug, Clone, Serialize)]
pub struct VoteResolution {
    /// The eliminated participant's display name.
    pub eliminated: String,
    /// The eliminated participant's revealed role.
    pub eliminated_role: String,
    /// A faction's win, when the elimination decided the game.
    pub verdict: Option<Verdict>,
}

/// Round One: every alive bot casts a ballot concurrently, the human ballot
/// arrives with the request, and the leader set is announced on the shared
/// channel.
///
/// # Errors
///
/// `InvalidPhase` outside day discussion; `MalformedJson` on an unusable
/// ballot; one failing ballot call fails the round with nothing persisted.
pub async fn start_voting(
    ctx: &SessionContext,
    game_id: Uuid,
    human_ballot: Ballot,
) -> Result<Vec<String>, GameError> {
    let mut game = ctx.load_game(game_id).await?;
    game.require_phase(GamePhase::DayDiscussion)?;
    let bots = ctx.load_bots(&game).await?;
    let voters: Vec<&BotPlayer> = bots.iter().filter(|b| b.is_alive).collect();

    let ballots =
        collect_ballots(ctx, &game, &voters, |_| prompts::ROUND_ONE_VOTE_COMMAND.to_owned())
            .await?;

    let mut votes: Vec<&str> = ballots.iter().map(|b| b.player_to_eliminate.as_str()).collect();
    votes.push(human_ballot.player_to_eliminate.as_str());
    let leaders = round_one_leaders(&tally(votes));

    game.begin_voting(leaders.clone())?;
    ctx.broadcast(&game, &prompts::round_one_result(&leaders)).await?;
    game.touch(ctx.clock.as_ref());
    ctx.games.upsert(&game).await?;

    tracing::info!(game_id = %game.id, leaders = ?leaders, "round one resolved");
    Ok(leaders)
}

/// Asks one Round One leader for its defence message, broadcast to all.
///
/// # Errors
///
/// `Validation` when the named player is not a leader or is the human;
/// `NotFound` for an unknown name; provider errors unrecovered.
pub async fn ask_certain_player_to_vote(
    ctx: &SessionContext,
    game_id: Uuid,
    name: &str,
) -> Result<String, GameError> {
    let game = ctx.load_game(game_id).await?;
    game.require_phase(GamePhase::VotingRoundOne)?;
    if !game.round_one_leaders.iter().any(|l| l == name) {
        return Err(GameError::Validation(format!(
            "{name} is not a candidate for elimination"
        )));
    }
    if name == game.human.name {
        return Err(GameError::Validation(
            "the human player speaks for themselves directly".to_owned(),
        ));
    }
    let bot = ctx.bot_by_name(&game, name).await?;

    let reply = ctx.ask_bot(&game, &bot, prompts::DEFENCE_COMMAND).await?;
    ctx.append_private_command(&game, &bot, prompts::DEFENCE_COMMAND)
        .await?;
    ctx.append_bot_utterance(&game, &bot, &reply).await?;
    Ok(reply)
}

/// Round Two and resolution: non-leader alive bots vote over the leader set,
/// the human ballot arrives with the request, and a unique winner is
/// eliminated with its role revealed.
///
/// A tied final vote fails with `TiedVote` before anything persists; the
/// caller may re-run the round.
///
/// # Errors
///
/// `InvalidPhase` outside voting round one; `TiedVote` on a tie;
/// `Validation` when any ballot names a non-candidate or a required human
/// ballot is missing.
pub async fn process_voting_result(
    ctx: &SessionContext,
    game_id: Uuid,
    human_ballot: Option<Ballot>,
) -> Result<VoteResolution, GameError> {
    let mut game = ctx.load_game(game_id).await?;
    game.require_phase(GamePhase::VotingRoundOne)?;
    let leaders = game.round_one_leaders.clone();
    if leaders.is_empty() {
        return Err(GameError::Validation("no elimination candidates".to_owned()));
    }
    game.begin_final_vote()?;

    let mut bots = ctx.load_bots(&game).await?;
    let voters: Vec<&BotPlayer> = bots
        .iter()
        .filter(|b| b.is_alive && !leaders.contains(&b.name))
        .collect();

    let ballots = collect_ballots(ctx, &game, &voters, |voter| {
        let candidates: Vec<String> =
            leaders.iter().filter(|l| **l != voter.name).cloned().collect();
        prompts::round_two_vote_command(&candidates)
    })
    .await?;

    let mut votes: Vec<&str> = ballots.iter().map(|b| b.player_to_eliminate.as_str()).collect();
    if game.human.is_alive {
        let ballot = human_ballot
            .as_ref()
            .ok_or_else(|| GameError::Validation("the human ballot is required".to_owned()))?;
        votes.push(ballot.player_to_eliminate.as_str());
    }
    // The final vote is restricted to the leader set; a stray name must not
    // reach the tally, where it could manufacture a tie.
    for vote in &votes {
        if !leaders.iter().any(|l| l == vote) {
            return Err(GameError::Validation(format!(
                "{vote} is not a candidate for elimination"
            )));
        }
    }

    let winner = round_two_winner(&tally(votes))?;

    let resolution = apply_elimination(ctx, &mut game, &mut bots, &winner).await?;
    game.touch(ctx.clock.as_ref());
    ctx.games.upsert(&game).await?;

    tracing::info!(
        game_id = %game.id,
        eliminated = %resolution.eliminated,
        verdict = ?resolution.verdict,
        "round two resolved"
    );
    Ok(resolution)
}

/// Fans ballot requests out over `voters` and parses every reply. Nothing is
/// persisted; ballots survive only as the derived result message.
async fn collect_ballots(
    ctx: &SessionContext,
    game: &Game,
    voters: &[&BotPlayer],
    command_for: impl Fn(&BotPlayer) -> String,
) -> Result<Vec<Ballot>, GameError> {
    let mut tasks: JoinSet<(usize, Result<serde_json::Value, GameError>)> = JoinSet::new();
    for (index, voter) in voters.iter().enumerate() {
        let command = command_for(voter);
        let ctx = ctx.clone();
        let game = game.clone();
        let voter = (*voter).clone();
        tasks.spawn(async move {
            let reply = ctx.ask_bot_for_json(&game, &voter, &command).await;
            (index, reply)
        });
    }

    let mut replies: Vec<Option<serde_json::Value>> = vec![None; voters.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, reply) =
            joined.map_err(|e| GameError::Infrastructure(format!("join error: {e}")))?;
        replies[index] = Some(reply?);
    }

    replies
        .into_iter()
        .flatten()
        .map(|value| {
            serde_json::from_value(value.clone())
                .map_err(|e| GameError::MalformedJson(format!("ballot {value}: {e}")))
        })
        .collect()
}

/// Eliminates `winner`, reveals the role, refreshes the dead roster, and
/// either finishes the game (human death or a faction win) or moves to night.
pub(crate) async fn apply_elimination(
    ctx: &SessionContext,
    game: &mut Game,
    bots: &mut [BotPlayer],
    winner: &str,
) -> Result<VoteResolution, GameError> {
    let eliminated_role;
    if winner == game.human.name {
        game.human.is_alive = false;
        eliminated_role = game.human.role.display_name().to_owned();
    } else {
        let bot = bots
            .iter_mut()
            .find(|b| b.name == winner)
            .ok_or_else(|| GameError::player_not_found(winner))?;
        bot.eliminate();
        eliminated_role = bot.role.display_name().to_owned();
        let bot = bot.clone();
        ctx.players.upsert(&bot).await?;
    }

    let dead: Vec<&BotPlayer> = bots.iter().filter(|b| !b.is_alive).collect();
    game.update_dead_roster(&dead);
    ctx.broadcast(game, &prompts::round_two_result(winner, &eliminated_role))
        .await?;

    let alive: Vec<&BotPlayer> = bots.iter().filter(|b| b.is_alive).collect();
    let verdict = game.verdict(&alive);
    if let Some(verdict) = verdict {
        ctx.broadcast(game, &prompts::verdict_message(verdict)).await?;
        game.finish();
    } else if game.human.is_alive {
        game.begin_night()?;
    } else {
        // The controlling player is gone; the session ends without a verdict.
        game.finish();
    }

    Ok(VoteResolution {
        eliminated: winner.to_owned(),
        eliminated_role,
        verdict,
    })
}
