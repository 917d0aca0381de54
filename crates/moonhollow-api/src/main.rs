//! Moonhollow API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use moonhollow_api::error::AppError;
use moonhollow_api::routes;
use moonhollow_api::state::AppState;
use moonhollow_core::clock::SystemClock;
use moonhollow_core::rng::{DeterministicRng, ThreadRng};
use moonhollow_gateway::config::GatewayConfig;
use moonhollow_gateway::factory::HttpModelFactory;
use moonhollow_session::application::context::SessionContext;
use moonhollow_store::schema;
use moonhollow_store::{PgGameStore, PgPlayerStore, PgTranscriptStore};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Moonhollow API server");

    // Read configuration from environment.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::Config("DATABASE_URL environment variable must be set".into()))?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

    // Create database connection pool and apply the schema.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    sqlx::query(schema::CREATE_GAMES_TABLE).execute(&pool).await?;
    sqlx::query(schema::CREATE_PLAYERS_TABLE).execute(&pool).await?;
    sqlx::query(schema::CREATE_MESSAGES_TABLE).execute(&pool).await?;

    // Build application state.
    let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(ThreadRng));
    let ctx = SessionContext {
        games: Arc::new(PgGameStore::new(pool.clone())),
        players: Arc::new(PgPlayerStore::new(pool.clone())),
        transcripts: Arc::new(PgTranscriptStore::new(pool)),
        models: Arc::new(HttpModelFactory::new(GatewayConfig::from_env())),
        clock: Arc::new(SystemClock),
        rng,
    };
    let app_state = AppState::new(ctx);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
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
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
