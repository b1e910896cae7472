//! Engine error taxonomy.
//!
//! - `InvalidConfiguration`: bad setup parameters, nothing is constructed.
//! - `InvalidSelection`: bad per-turn input, engine state is unchanged and
//!   the caller should re-prompt.
//! - `IndexOutOfRange`: a board position that cannot exist; a caller defect.
//! - `CorruptSnapshot`: persisted state failed validation on restore.
//! - `GameOver`: a turn was requested after the game was already won.
//! - `TurnNotFinished`: the session's state does not agree with the turn
//!   result it was handed.

use derive_more::{Display, Error};

/// Why a card selection was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum SelectionFault {
    /// Index past the end of the deck.
    #[display("deck has only {deck_len} cards")]
    OutOfRange { deck_len: usize },
    /// The card is already face-up.
    #[display("card is already face-up")]
    AlreadyFlipped,
    /// The turn already reached a terminal state.
    #[display("turn is already over")]
    TurnOver,
}

/// Errors raised by the game engine.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum GameError {
    #[display("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[display("invalid selection of card {index}: {fault}")]
    InvalidSelection { index: usize, fault: SelectionFault },

    #[display("position {position} is outside a track of {len} subsections")]
    IndexOutOfRange { position: usize, len: usize },

    #[display("corrupt snapshot: {reason}")]
    CorruptSnapshot { reason: String },

    #[display("game is over, player {winner} has already won")]
    GameOver { winner: usize },

    #[display("turn of player {player} is not finished")]
    TurnNotFinished { player: usize },
}

impl GameError {
    /// Build an `InvalidConfiguration` error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Build a `CorruptSnapshot` error.
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptSnapshot {
            reason: reason.into(),
        }
    }

    /// Can the caller simply retry with different input?
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::InvalidSelection { .. })
    }
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, GameError>;
