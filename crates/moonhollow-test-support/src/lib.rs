//! Shared test fakes for the Moonhollow game engine.

mod clock;
mod model;
mod rng;
mod store;

pub use clock::FixedClock;
pub use model::{ScriptedFactory, ScriptedModel};
pub use rng::SequenceRng;
pub use store::{InMemoryPlayerStore, InMemoryTranscriptStore};
