//! Routes for the game lifecycle: creation, introductions, lookup, deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use moonhollow_cast::participant::BotPlayer;
use moonhollow_session::application::games;
use moonhollow_session::application::games::{BotUtterance, InitGame};
use moonhollow_session::domain::game::{Game, GameSummary};

use crate::error::ApiError;
use crate::state::AppState;

/// A game as the human client sees it. Bot roles never leave the server;
/// only the dead roster reveals them, after elimination.
#[derive(Debug, Serialize)]
pub struct GameResponse {
    /// Game identifier.
    pub id: Uuid,
    /// Opening scene text.
    pub story: String,
    /// Current phase, as display text.
    pub phase: String,
    /// Day counter.
    pub day: u32,
    /// The human participant, role included.
    pub human: HumanView,
    /// The bot cast, names and liveness only.
    pub players: Vec<PlayerView>,
    /// Dead participants with revealed roles.
    pub dead_roster: String,
}

/// The human participant's view of themselves.
#[derive(Debug, Serialize)]
pub struct HumanView {
    /// Display name.
    pub name: String,
    /// The secret role the human drew.
    pub role: String,
    /// Liveness flag.
    pub is_alive: bool,
}

/// One bot, as visible to the human client.
#[derive(Debug, Serialize)]
pub struct PlayerView {
    /// Display name.
    pub name: String,
    /// Liveness flag.
    pub is_alive: bool,
}

impl GameResponse {
    fn from_parts(game: &Game, bots: &[BotPlayer]) -> Self {
        Self {
            id: game.id,
            story: game.story.clone(),
            phase: game.phase.to_string(),
            day: game.day,
            human: HumanView {
                name: game.human.name.clone(),
                role: game.human.role.display_name().to_owned(),
                is_alive: game.human.is_alive,
            },
            players: bots
                .iter()
                .map(|b| PlayerView {
                    name: b.name.clone(),
                    is_alive: b.is_alive,
                })
                .collect(),
            dead_roster: game.dead_roster.clone(),
        }
    }
}

/// Request body for POST /{game_id}/welcome.
#[derive(Debug, Deserialize)]
pub struct WelcomeRequest {
    /// The bot to introduce.
    pub name: String,
}

/// Response body carrying one bot utterance.
#[derive(Debug, Serialize)]
pub struct UtteranceResponse {
    /// The speaking bot's display name.
    pub name: String,
    /// What it said.
    pub text: String,
}

/// Response body for POST /{game_id}/welcome-all.
#[derive(Debug, Serialize)]
pub struct WelcomeAllResponse {
    /// One introduction per alive bot, in cast order.
    pub messages: Vec<BotUtterance>,
}

/// POST /
#[instrument(skip(state, request), fields(human_name = %request.human_name))]
async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<InitGame>,
) -> Result<Json<GameResponse>, ApiError> {
    info!("handling init_game");
    let new_game = games::init_game(&state.ctx, request).await?;
    Ok(Json(GameResponse::from_parts(&new_game.game, &new_game.bots)))
}

/// GET /
#[instrument(skip(state))]
async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<Vec<GameSummary>>, ApiError> {
    Ok(Json(games::list_games(&state.ctx).await?))
}

/// GET /{game_id}
#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, ApiError> {
    let view = games::load_game(&state.ctx, game_id).await?;
    Ok(Json(GameResponse::from_parts(&view.game, &view.bots)))
}

/// DELETE /{game_id}
#[instrument(skip(state))]
async fn remove_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    games::delete_game(&state.ctx, game_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /{game_id}/welcome
#[instrument(skip(state, request), fields(name = %request.name))]
async fn welcome(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<WelcomeRequest>,
) -> Result<Json<UtteranceResponse>, ApiError> {
    let game = state.ctx.load_game(game_id).await?;
    let bot = state.ctx.bot_by_name(&game, &request.name).await?;
    let text = games::get_welcome_message(&state.ctx, game_id, bot.id).await?;
    Ok(Json(UtteranceResponse {
        name: request.name,
        text,
    }))
}

/// POST /{game_id}/welcome-all
#[instrument(skip(state))]
async fn welcome_all(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<WelcomeAllResponse>, ApiError> {
    let messages = games::get_welcome_messages_from_all_players(&state.ctx, game_id).await?;
    Ok(Json(WelcomeAllResponse { messages }))
}

/// Returns the router for the game lifecycle.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_game).get(list_games))
        .route("/{game_id}", get(get_game).delete(remove_game))
        .route("/{game_id}/welcome", post(welcome))
        .route("/{game_id}/welcome-all", post(welcome_all))
}
