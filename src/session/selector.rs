//! Source of player-selected card indices.

use crate::cards::Deck;
use crate::core::SelectionFault;
use crate::player::PlayerState;

/// Supplies card selections for a turn.
///
/// Implemented by the shell (mouse clicks, a test script, ...). Closures
/// of the form `FnMut(&PlayerState, &Deck) -> Option<usize>` work as
/// selectors directly.
pub trait CardSelector {
    /// Next card index, or `None` to abandon the turn.
    fn select(&mut self, player: &PlayerState, deck: &Deck) -> Option<usize>;

    /// Called when a selection was rejected, before re-prompting.
    fn rejected(&mut self, _index: usize, _fault: SelectionFault) {}
}

impl<F> CardSelector for F
where
    F: FnMut(&PlayerState, &Deck) -> Option<usize>,
{
    fn select(&mut self, player: &PlayerState, deck: &Deck) -> Option<usize> {
        self(player, deck)
    }
}
