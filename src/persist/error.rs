//! Persistence errors.

use derive_more::{Display, Error, From};

use crate::core::GameError;

/// Failure to read, write, or decode a save slot.
#[derive(Debug, Display, Error, From)]
pub enum PersistError {
    #[display("save file i/o failed: {_0}")]
    Io(std::io::Error),

    #[display("save file encoding failed: {_0}")]
    Codec(bincode::Error),

    #[display("invalid save slot name '{name}'")]
    #[from(skip)]
    InvalidSlotName { name: String },

    #[display("saved game rejected: {_0}")]
    Snapshot(GameError),
}

impl PersistError {
    /// Is this a decode or validation failure of an existing file?
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, PersistError::Codec(_) | PersistError::Snapshot(_))
    }
}

/// Persistence result alias.
pub type PersistResult<T> = std::result::Result<T, PersistError>;
