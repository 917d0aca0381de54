//! Moonhollow Cast — participant registry for the Werewolf game.
//!
//! Defines the role system (alignments, motivations, win conditions), the
//! participant records for the human player and the language-model bots, the
//! `PlayerStore` persistence boundary, and cast assembly at game creation.

pub mod assembly;
pub mod participant;
pub mod role;
pub mod store;
