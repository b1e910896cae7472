//! The ordered deck of cards.
//!
//! Order only matters for display layout and deterministic tests; matching
//! is by card content. The deck never grows or shrinks during play: only
//! individual flip flags change.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use super::card::Card;
use crate::core::config::validate_card_numbers;
use crate::core::{Character, GameError, GameRng, Result, NON_PIRATE_CHARACTERS, PIRATE_MAX_NUMBER};

/// Ordered collection of cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build an unshuffled deck.
    ///
    /// For each non-pirate character (fixed order) and each number
    /// (ascending), `num_cards_per_character` copies. Then, for each number
    /// up to the pirate limit, `num_cards_per_character / 2` pirate cards.
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use fiery_dragons::cards::Deck;
    ///
    /// let deck = Deck::build(&BTreeSet::from([1, 2, 3]), 4).unwrap();
    /// assert_eq!(deck.len(), 52);
    /// ```
    #[instrument]
    pub fn build(card_numbers: &BTreeSet<u32>, num_cards_per_character: usize) -> Result<Self> {
        validate_card_numbers(card_numbers)?;
        if num_cards_per_character == 0 {
            return Err(GameError::config(
                "number of cards per character must be positive",
            ));
        }

        let mut cards = Vec::new();
        for character in NON_PIRATE_CHARACTERS {
            for &number in card_numbers {
                let card = Card::new(character, number)?;
                cards.extend(std::iter::repeat(card).take(num_cards_per_character));
            }
        }

        let pirate_copies = num_cards_per_character / 2;
        for &number in card_numbers.range(..=PIRATE_MAX_NUMBER) {
            let card = Card::new(Character::Pirate, number)?;
            cards.extend(std::iter::repeat(card).take(pirate_copies));
        }

        debug!(size = cards.len(), "Deck built");
        Ok(Self { cards })
    }

    /// Wrap already-validated cards (used by snapshot restore).
    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Permute the deck using `rng`.
    #[instrument(skip(self, rng), fields(seed = rng.seed()))]
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in deck order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Are all cards face-up?
    #[must_use]
    pub fn all_flipped(&self) -> bool {
        self.cards.iter().all(Card::is_flipped)
    }

    /// Number of face-up cards.
    #[must_use]
    pub fn flipped_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_flipped()).count()
    }

    /// Indices of the face-down cards, in deck order.
    pub fn face_down_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_flipped())
            .map(|(i, _)| i)
    }

    /// Number of cards with the given character.
    #[must_use]
    pub fn count_of(&self, character: Character) -> usize {
        self.cards
            .iter()
            .filter(|c| c.character() == character)
            .count()
    }

    /// Turn every card face-down. Idempotent.
    pub fn reset_all_flips(&mut self) {
        for card in &mut self.cards {
            card.set_flipped(false);
        }
    }

    /// Set one card's flip flag. The index must be in range.
    pub(crate) fn set_flipped(&mut self, index: usize, flipped: bool) {
        self.cards[index].set_flipped(flipped);
    }
}
