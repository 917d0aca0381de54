//! Application-level operations.
//!
//! Each operation loads the aggregate, runs the provider calls it needs, and
//! persists results only after every call succeeded, so a failing operation
//! leaves stored state untouched.

pub mod arbiter;
pub mod chat;
pub mod context;
pub mod games;
pub mod night;
pub mod voting;

#[cfg(test)]
pub(crate) mod testing;
