//! Domain model for the game session.

pub mod ballot;
pub mod game;
pub mod night;
