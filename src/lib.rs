//! Lexigen — procedural word generation for games.
//!
//! Trains character-level Markov chains on word lists and walks them to
//! produce novel, plausible-looking words, then composes those words into
//! creature, item, move and nationality names.

pub mod core;
pub mod schema;

pub use crate::core::markov::{MarkovError, State, WordModel};
