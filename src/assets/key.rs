//! `AssetKey`: the name of one piece of art.

use std::collections::BTreeSet;

use derive_more::Display;
use strum::IntoEnumIterator;

use crate::board::Subsection;
use crate::cards::Card;
use crate::core::Character;

/// Stable asset name, rendered the way art files are named on disk.
///
/// ```
/// use fiery_dragons::assets::AssetKey;
/// use fiery_dragons::Character;
///
/// assert_eq!(AssetKey::Card { character: Character::Dragon, number: 2 }.to_string(), "dragon_2");
/// assert_eq!(AssetKey::Board(Character::Bat).to_string(), "bat");
/// assert_eq!(AssetKey::CardBack.to_string(), "card_cover");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum AssetKey {
    /// Face of a card.
    #[display("{character}_{number}")]
    Card { character: Character, number: u32 },

    /// Board art for a character.
    #[display("{_0}")]
    Board(Character),

    /// Shared back of every card.
    #[display("card_cover")]
    CardBack,
}

impl AssetKey {
    /// Face art for `card`.
    #[must_use]
    pub fn for_card(card: &Card) -> Self {
        AssetKey::Card {
            character: card.character(),
            number: card.number(),
        }
    }

    /// Board art for `subsection`.
    #[must_use]
    pub fn for_subsection(subsection: &Subsection) -> Self {
        AssetKey::Board(subsection.character)
    }

    /// File name with the given extension, e.g. `dragon_2.png`.
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        format!("{self}.{extension}")
    }

    /// Every card face a deck built from `card_numbers` can show.
    ///
    /// Pirate faces exist only for the numbers a pirate card may carry.
    #[must_use]
    pub fn expected_card_keys(card_numbers: &BTreeSet<u32>) -> Vec<AssetKey> {
        Character::iter()
            .flat_map(|character| {
                card_numbers
                    .iter()
                    .filter(move |&&n| character.allows_number(n))
                    .map(move |&number| AssetKey::Card { character, number })
            })
            .collect()
    }

    /// Board art for every character, pirate included.
    #[must_use]
    pub fn expected_board_keys() -> Vec<AssetKey> {
        Character::iter().map(AssetKey::Board).collect()
    }
}
