//! Routes for the two-round elimination vote.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use moonhollow_session::application::voting;
use moonhollow_session::application::voting::VoteResolution;
use moonhollow_session::domain::ballot::Ballot;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{game_id}/voting/start.
#[derive(Debug, Deserialize)]
pub struct StartVotingRequest {
    /// The human player's Round One ballot.
    pub ballot: Ballot,
}

/// Response body for POST /{game_id}/voting/start.
#[derive(Debug, Serialize)]
pub struct LeadersResponse {
    /// The elimination candidates carried into Round Two.
    pub leaders: Vec<String>,
}

/// Request body for POST /{game_id}/voting/defence.
#[derive(Debug, Deserialize)]
pub struct DefenceRequest {
    /// The candidate asked to defend themselves.
    pub name: String,
}

/// Response body for POST /{game_id}/voting/defence.
#[derive(Debug, Serialize)]
pub struct DefenceResponse {
    /// The defending bot's display name.
    pub name: String,
    /// Its defence message.
    pub text: String,
}

/// Request body for POST /{game_id}/voting/result.
#[derive(Debug, Deserialize)]
pub struct VotingResultRequest {
    /// The human player's Round Two ballot; required while the human is
    /// alive.
    #[serde(default)]
    pub ballot: Option<Ballot>,
}

/// POST /{game_id}/voting/start
#[instrument(skip(state, request))]
async fn start_voting(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<StartVotingRequest>,
) -> Result<Json<LeadersResponse>, ApiError> {
    info!("handling start_voting");
    let leaders = voting::start_voting(&state.ctx, game_id, request.ballot).await?;
    Ok(Json(LeadersResponse { leaders }))
}

/// POST /{game_id}/voting/defence
#[instrument(skip(state, request), fields(name = %request.name))]
async fn defence(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<DefenceRequest>,
) -> Result<Json<DefenceResponse>, ApiError> {
    let text = voting::ask_certain_player_to_vote(&state.ctx, game_id, &request.name).await?;
    Ok(Json(DefenceResponse {
        name: request.name,
        text,
    }))
}

/// POST /{game_id}/voting/result
#[instrument(skip(state, request))]
async fn voting_result(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<VotingResultRequest>,
) -> Result<Json<VoteResolution>, ApiError> {
    info!("handling process_voting_result");
    let resolution =
        voting::process_voting_result(&state.ctx, game_id, request.ballot).await?;
    Ok(Json(resolution))
}

/// Returns the router for voting operations.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{game_id}/voting/start", post(start_voting))
        .route("/{game_id}/voting/defence", post(defence))
        .route("/{game_id}/voting/result", post(voting_result))
}
