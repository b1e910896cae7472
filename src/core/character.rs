//! Character tags shared by board subsections and cards.
//!
//! Four characters own track subsections. The pirate never does: it only
//! appears on cards, with a restricted number range, and always sends the
//! player backwards.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Highest number a pirate card may carry.
pub const PIRATE_MAX_NUMBER: u32 = 2;

/// Thematic category used for board tagging and card matching.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Character {
    Dragon,
    Salamander,
    Bat,
    Spider,
    Pirate,
}

/// Characters that tag board subsections, in round-robin order.
pub const NON_PIRATE_CHARACTERS: [Character; 4] = [
    Character::Dragon,
    Character::Salamander,
    Character::Bat,
    Character::Spider,
];

impl Character {
    /// Is this the pirate?
    #[must_use]
    pub const fn is_pirate(self) -> bool {
        matches!(self, Character::Pirate)
    }

    /// Check whether `number` is a legal card number for this character.
    ///
    /// Every card number is positive; pirate cards stop at
    /// [`PIRATE_MAX_NUMBER`].
    #[must_use]
    pub const fn allows_number(self, number: u32) -> bool {
        if number == 0 {
            return false;
        }
        !self.is_pirate() || number <= PIRATE_MAX_NUMBER
    }

    /// Character owning subsection `index` of any board.
    #[must_use]
    pub const fn for_subsection(index: usize) -> Self {
        NON_PIRATE_CHARACTERS[index % NON_PIRATE_CHARACTERS.len()]
    }
}
