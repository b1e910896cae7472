//! A single face-down/face-up card.

use crate::core::{Character, GameError, Result};

/// A card in the deck.
///
/// Matching is by `character`; `number` is how far the card moves a
/// player. Pirate cards never carry a number above
/// [`PIRATE_MAX_NUMBER`](crate::core::PIRATE_MAX_NUMBER).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    character: Character,
    number: u32,
    is_flipped: bool,
}

impl Card {
    /// Create a face-down card, checking the number rules.
    pub fn new(character: Character, number: u32) -> Result<Self> {
        if !character.allows_number(number) {
            return Err(GameError::config(format!(
                "{character} card cannot carry number {number}"
            )));
        }
        Ok(Self {
            character,
            number,
            is_flipped: false,
        })
    }

    /// Rebuild a card from persisted fields.
    ///
    /// Fails with `CorruptSnapshot` if the fields break the number rules.
    pub fn restore(character: Character, number: u32, is_flipped: bool) -> Result<Self> {
        if !character.allows_number(number) {
            return Err(GameError::corrupt(format!(
                "{character} card with number {number}"
            )));
        }
        Ok(Self {
            character,
            number,
            is_flipped,
        })
    }

    #[must_use]
    pub fn character(&self) -> Character {
        self.character
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    #[must_use]
    pub fn is_pirate(&self) -> bool {
        self.character.is_pirate()
    }

    pub(crate) fn set_flipped(&mut self, flipped: bool) {
        self.is_flipped = flipped;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.character, self.number)
    }
}
