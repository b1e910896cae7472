//! The turn engine.

use tracing::{debug, info, instrument, warn};

use super::outcome::{TurnEnd, TurnOutcome, TurnState};
use crate::board::Board;
use crate::cards::Deck;
use crate::core::{GameError, Result, SelectionFault};
use crate::player::PlayerState;

/// A single player's turn.
///
/// Borrows the board, the deck and the current player for its lifetime.
/// Use one `Turn` per player-turn. Once [`Turn::is_over`], turn it into a
/// [`TurnEnd`] with [`Turn::conclude`]; dropping an unfinished turn leaves
/// its reveals in place for a later resume.
///
/// ```
/// use std::collections::BTreeSet;
/// use fiery_dragons::{Board, Deck, PlayerColor, PlayerState, Turn, TurnState};
///
/// let board = Board::new(8).unwrap();
/// let mut deck = Deck::build(&BTreeSet::from([1, 2, 3]), 4).unwrap();
/// let mut alice = PlayerState::new("Alice", PlayerColor::RED, &board);
///
/// let mut turn = Turn::begin(&board, &mut deck, &mut alice);
/// // Unshuffled decks start with the dragon cards; Alice stands on a dragon.
/// let outcome = turn.select_card(4).unwrap();
/// assert_eq!(outcome.message(), "Alice moves forward 2 steps.");
/// assert_eq!(turn.state(), TurnState::AwaitingSelection);
/// ```
#[derive(Debug)]
pub struct Turn<'a> {
    board: &'a Board,
    deck: &'a mut Deck,
    player: &'a mut PlayerState,
    state: TurnState,
    cleaned_up: bool,
}

impl<'a> Turn<'a> {
    /// Start a turn for `player`, awaiting the first selection.
    pub fn begin(board: &'a Board, deck: &'a mut Deck, player: &'a mut PlayerState) -> Self {
        debug!(player = %player.name(), position = player.position(), "Turn started");
        Self {
            board,
            deck,
            player,
            state: TurnState::AwaitingSelection,
            cleaned_up: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Has the turn reached a terminal state?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// The player whose turn this is.
    #[must_use]
    pub fn player(&self) -> &PlayerState {
        self.player
    }

    /// Current deck view.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        self.deck
    }

    /// Close a finished turn. `None` while the turn is still open.
    pub fn conclude(self) -> Option<TurnEnd> {
        TurnEnd::new(self.state)
    }

    /// Reveal the card at `index` and apply it.
    ///
    /// Fails with a recoverable `InvalidSelection` (state untouched) when
    /// the index is out of range, the card is already face-up, or the turn
    /// is over.
    #[instrument(skip(self), fields(player = %self.player.name()))]
    pub fn select_card(&mut self, index: usize) -> Result<TurnOutcome> {
        self.check_selection(index).inspect_err(|err| {
            warn!(%err, "Selection rejected");
        })?;

        self.state = TurnState::Resolving;
        self.deck.set_flipped(index, true);
        let card = self.deck.cards()[index];
        let name = self.player.name().to_string();
        debug!(%card, character = %self.player.character(), "Card revealed");

        let (mut outcome, mut next) = if card.is_pirate() {
            self.player.move_backward(card.number(), self.board);
            (
                TurnOutcome::PirateSetback {
                    message: format!("{name} moves backward {} steps.", card.number()),
                },
                TurnState::TurnEnded,
            )
        } else if card.character() == self.player.character() {
            self.player.move_forward(card.number(), self.board);
            self.player.record_flipped(index);
            let turn_continues = !self.deck.all_flipped();
            (
                TurnOutcome::MatchAdvance {
                    message: format!("{name} moves forward {} steps.", card.number()),
                    turn_continues,
                },
                if turn_continues {
                    TurnState::AwaitingSelection
                } else {
                    TurnState::TurnEnded
                },
            )
        } else {
            self.deck.set_flipped(index, false);
            (
                TurnOutcome::Mismatch {
                    message: "No match. Turn ends.".to_string(),
                },
                TurnState::TurnEnded,
            )
        };

        let moved = !matches!(outcome, TurnOutcome::Mismatch { .. });
        if moved && self.player.has_won() {
            outcome = TurnOutcome::Won {
                message: format!("{} {name} has won the game!", outcome.message()),
            };
            next = TurnState::GameWon;
        }

        self.state = next;
        if next.is_terminal() {
            self.finish();
        }
        Ok(outcome)
    }

    fn check_selection(&self, index: usize) -> Result<()> {
        let fault = if self.state != TurnState::AwaitingSelection {
            SelectionFault::TurnOver
        } else {
            match self.deck.get(index) {
                None => SelectionFault::OutOfRange {
                    deck_len: self.deck.len(),
                },
                Some(card) if card.is_flipped() => SelectionFault::AlreadyFlipped,
                Some(_) => return Ok(()),
            }
        };
        Err(GameError::InvalidSelection { index, fault })
    }

    /// End-of-turn cleanup. Runs at most once per turn.
    fn finish(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.deck.reset_all_flips();
        self.player.clear_flipped();
        self.cleaned_up = true;
        info!(
            player = %self.player.name(),
            state = ?self.state,
            position = self.player.position(),
            laps = self.player.laps_completed(),
            "Turn over"
        );
    }
}
