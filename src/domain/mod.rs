//! Domain layer types and invariants.

pub mod blocks;
pub mod credential;
pub mod preferences;
pub mod state;
