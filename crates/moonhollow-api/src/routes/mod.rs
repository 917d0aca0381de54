//! Route modules for the game surface.

pub mod chat;
pub mod games;
pub mod health;
pub mod night;
pub mod voting;
