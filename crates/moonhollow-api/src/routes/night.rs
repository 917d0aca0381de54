//! Route for the night phase.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use moonhollow_session::application::night;
use moonhollow_session::domain::game::Verdict;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{game_id}/night.
#[derive(Debug, Deserialize)]
pub struct NightRequest {
    /// The human player's night-action target; required when the human
    /// holds a night role.
    #[serde(default)]
    pub action: Option<String>,
}

/// Response body for POST /{game_id}/night. The Detective's target stays
/// hidden from the human client unless the human is the Detective.
#[derive(Debug, Serialize)]
pub struct NightResponse {
    /// Who died this night, if anyone.
    pub victim: Option<String>,
    /// Whether the Doctor's save cancelled the kill.
    pub kill_prevented: bool,
    /// A faction's win, when the night decided the game.
    pub verdict: Option<Verdict>,
    /// The investigation result, for a human Detective.
    pub detective_finding: Option<String>,
}

/// POST /{game_id}/night
#[instrument(skip(state, request))]
async fn run_night(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<NightRequest>,
) -> Result<Json<NightResponse>, ApiError> {
    info!("handling start_game_night");
    let resolution = night::start_game_night(&state.ctx, game_id, request.action).await?;
    Ok(Json(NightResponse {
        victim: resolution.outcome.victim,
        kill_prevented: resolution.outcome.kill_prevented,
        verdict: resolution.verdict,
        detective_finding: resolution.detective_finding,
    }))
}

/// Returns the router for the night phase.
pub fn router() -> Router<AppState> {
    Router::new().route("/{game_id}/night", post(run_night))
}
