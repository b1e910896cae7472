//! # fiery-dragons
//!
//! Rules engine for a circular-track matching-card race.
//!
//! Players race around a ring of character-tagged subsections. On a turn
//! the current player flips face-down cards: a card matching the character
//! under their token moves them forward, a pirate card moves them back, and
//! anything else ends the turn. The first player to complete a lap wins.
//!
//! ## Design Principles
//!
//! 1. **Pure Engine**: No rendering, input, audio or timing. The engine
//!    answers one selection at a time and never blocks.
//!
//! 2. **Caller-Owned State**: A [`GameSession`] holds everything; a
//!    [`Turn`] borrows it for the duration of one player's turn.
//!
//! 3. **Data-Only Persistence**: A [`GameSnapshot`] holds plain data; the
//!    board is rebuilt and every invariant re-checked on restore.
//!
//! ## Modules
//!
//! - `core`: characters, errors, configuration, RNG
//! - `board`: the circular track
//! - `cards`: cards and the deck
//! - `player`: player progress and lap counting
//! - `turn`: the per-turn state machine
//! - `session`: the game aggregate and turn loop
//! - `snapshot`: capture and validated restore
//! - `persist`: named save slots on disk
//! - `assets`: presentation asset keys
//!
//! ## Example
//!
//! ```
//! use fiery_dragons::{Board, Character, Deck, PlayerColor, PlayerState, Turn, TurnState};
//! use std::collections::BTreeSet;
//!
//! let board = Board::new(8).unwrap();
//! let mut deck = Deck::build(&BTreeSet::from([1, 2, 3]), 4).unwrap();
//! let mut player = PlayerState::new("Alice", PlayerColor::RED, &board);
//! assert_eq!(player.character(), Character::Dragon);
//!
//! // Unshuffled, index 4 is a dragon 2.
//! let mut turn = Turn::begin(&board, &mut deck, &mut player);
//! let outcome = turn.select_card(4).unwrap();
//! assert_eq!(outcome.message(), "Alice moves forward 2 steps.");
//! assert_eq!(turn.state(), TurnState::AwaitingSelection);
//! ```

pub mod core;
pub mod board;
pub mod cards;
pub mod player;
pub mod turn;
pub mod session;
pub mod snapshot;
pub mod persist;
pub mod assets;

// Re-export commonly used types
pub use crate::core::{
    Character, NON_PIRATE_CHARACTERS, PIRATE_MAX_NUMBER,
    GameConfig, GameError, Result, SelectionFault,
    GameRng,
};

pub use crate::board::{Board, Subsection};

pub use crate::cards::{Card, Deck};

pub use crate::player::{PlayerColor, PlayerState};

pub use crate::turn::{Turn, TurnOutcome, TurnState};

pub use crate::session::{CardSelector, GameSession, TurnSummary, DEFAULT_ROSTER};

pub use crate::snapshot::{BoardConfig, CardRecord, GameSnapshot, PlayerRecord};

pub use crate::persist::{PersistError, SaveSlots};

pub use crate::assets::{AssetCatalog, AssetKey};
