//! Moonhollow Transcript — append-only per-channel message logs.
//!
//! Every game has one shared broadcast channel plus one private channel per
//! participant. Messages are immutable once appended and totally ordered by
//! `(ts, seq)` within a channel. The view module turns the two logs a
//! participant can see into the ordered transcript its language-model call
//! receives.

pub mod channel;
pub mod message;
pub mod store;
pub mod view;
