//! Moonhollow Core — shared abstractions.
//!
//! This crate defines the error taxonomy and the determinism seams (clock,
//! random number generation) that every other crate depends on. It contains
//! no infrastructure code.

pub mod clock;
pub mod error;
pub mod rng;
