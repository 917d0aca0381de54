//! Routes for day-discussion conversation.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use moonhollow_session::application::chat;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{game_id}/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The human player's message.
    pub message: String,
}

/// Response body for POST /{game_id}/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Bot names that should reply next, in order.
    pub players_to_reply: Vec<String>,
}

/// Response body for POST /{game_id}/chat/{name}.
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    /// The speaking bot's display name.
    pub name: String,
    /// What it said.
    pub text: String,
}

/// POST /{game_id}/chat
#[instrument(skip(state, request))]
async fn talk_to_all(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    info!("handling talk_to_all");
    let players_to_reply = chat::talk_to_all(&state.ctx, game_id, &request.message).await?;
    Ok(Json(ChatResponse { players_to_reply }))
}

/// POST /{game_id}/chat/{name}
#[instrument(skip(state))]
async fn talk_to_player(
    State(state): State<AppState>,
    Path((game_id, name)): Path<(Uuid, String)>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let text = chat::talk_to_certain_player(&state.ctx, game_id, &name).await?;
    Ok(Json(ReplyResponse { name, text }))
}

/// Returns the router for chat operations.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{game_id}/chat", post(talk_to_all))
        .route("/{game_id}/chat/{name}", post(talk_to_player))
}
