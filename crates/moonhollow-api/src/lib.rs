//! Moonhollow API — HTTP surface over the game session operations.

pub mod error;
pub mod routes;
pub mod state;
