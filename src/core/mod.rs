//! Core engine types: characters, configuration, errors, RNG.
//!
//! Everything here is leaf-level: the board, deck, player and turn modules
//! build on these types but nothing here depends on them.

pub mod character;
pub mod config;
pub mod error;
pub mod rng;

pub use character::{Character, NON_PIRATE_CHARACTERS, PIRATE_MAX_NUMBER};
pub use config::GameConfig;
pub use error::{GameError, Result, SelectionFault};
pub use rng::GameRng;
