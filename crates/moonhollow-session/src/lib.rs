//! Moonhollow Session — the game orchestration engine.
//!
//! The aggregate root tying the cast, transcripts, and gateway together:
//! phase transitions (Day Discussion → Voting Round One → Voting Round Two →
//! Night → next Day), the turn-routing arbiter, the two-round elimination
//! vote, and nightly role resolution.

pub mod application;
pub mod domain;
pub mod prompts;
