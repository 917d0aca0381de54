//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use moonhollow_api::routes;
use moonhollow_api::state::AppState;
use moonhollow_core::clock::Clock;
use moonhollow_core::error::GameError;
use moonhollow_core::rng::DeterministicRng;
use moonhollow_session::application::context::SessionContext;
use moonhollow_session::domain::game::{Game, GameStore, GameSummary};
use moonhollow_test_support::{
    FixedClock, InMemoryPlayerStore, InMemoryTranscriptStore, ScriptedFactory, ScriptedModel,
    SequenceRng,
};

/// An in-memory `GameStore`. The shared test-support crate cannot provide
/// one: the trait lives in `moonhollow-session`, which dev-depends on it.
#[derive(Debug, Default)]
struct InMemoryGameStore {
    games: StdMutex<HashMap<Uuid, Game>>,
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn get(&self, id: Uuid) -> Result<Option<Game>, GameError> {
        Ok(self.games.lock().unwrap().get(&id).cloned())
    }

    async fn upsert(&self, game: &Game) -> Result<(), GameError> {
        self.games.lock().unwrap().insert(game.id, game.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), GameError> {
        self.games.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn list_active_summaries(&self) -> Result<Vec<GameSummary>, GameError> {
        let mut summaries: Vec<GameSummary> = self
            .games
            .lock()
            .unwrap()
            .values()
            .filter(|g| g.is_active)
            .map(|g| GameSummary {
                id: g.id,
                name: g.human.name.clone(),
                day: g.day,
                updated_at: g.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }
}

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router over in-memory stores and one scripted model.
/// Uses the same route structure as `main.rs`; the returned handle queues
/// model replies between requests.
pub fn build_test_app() -> (Router, Arc<ScriptedModel>) {
    let model = Arc::new(ScriptedModel::default());
    let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(SequenceRng::identity()));
    let ctx = SessionContext {
        games: Arc::new(InMemoryGameStore::default()),
        players: Arc::new(InMemoryPlayerStore::default()),
        transcripts: Arc::new(InMemoryTranscriptStore::default()),
        models: Arc::new(ScriptedFactory::new(Arc::clone(&model))),
        clock: fixed_clock(),
        rng,
    };
    let app_state = AppState::new(ctx);

    let app = Router::new()
        .merge(routes::health::router())
        .nest(
            "/api/v1/games",
            Router::new()
                .merge(routes::games::router())
                .merge(routes::chat::router())
                .merge(routes::voting::router())
                .merge(routes::night::router()),
        )
        .with_state(app_state);

    (app, model)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a DELETE request and return the status; the body is expected empty.
pub async fn send_delete(app: Router, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap().status()
}
