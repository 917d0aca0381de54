//! Shared application state.

use moonhollow_session::application::context::SessionContext;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The session operations' dependencies.
    pub ctx: SessionContext,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }
}
