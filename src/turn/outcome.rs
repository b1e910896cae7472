//! Turn states and the per-selection outcome reported to the shell.

use serde::{Deserialize, Serialize};

/// Where a turn is in its life cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for the player to pick a face-down card.
    AwaitingSelection,
    /// A selected card is being applied.
    Resolving,
    /// The turn is over; the next player goes.
    TurnEnded,
    /// The current player completed a lap.
    GameWon,
}

impl TurnState {
    /// Is this a terminal state for the turn?
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, TurnState::TurnEnded | TurnState::GameWon)
    }
}

/// Proof that a turn reached a terminal state.
///
/// Only [`Turn::conclude`](super::Turn::conclude) hands one out, and
/// `GameSession::end_turn` consumes it.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct TurnEnd {
    state: TurnState,
}

impl TurnEnd {
    pub(crate) fn new(state: TurnState) -> Option<Self> {
        state.is_terminal().then_some(Self { state })
    }

    /// `TurnEnded` or `GameWon`.
    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }
}

/// What a single card selection did.
///
/// Every variant carries a human-readable description of the movement,
/// for the shell to display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The card did not match; it was turned back face-down.
    Mismatch { message: String },

    /// The card matched and the player moved forward.
    ///
    /// `turn_continues` is false when the match turned the last face-down
    /// card and the player must yield.
    MatchAdvance {
        message: String,
        turn_continues: bool,
    },

    /// A pirate card moved the player backward and ended the turn.
    PirateSetback { message: String },

    /// The move completed a lap.
    Won { message: String },
}

impl TurnOutcome {
    /// Display text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            TurnOutcome::Mismatch { message }
            | TurnOutcome::MatchAdvance { message, .. }
            | TurnOutcome::PirateSetback { message }
            | TurnOutcome::Won { message } => message,
        }
    }

    /// Does this outcome end the turn?
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        !matches!(
            self,
            TurnOutcome::MatchAdvance {
                turn_continues: true,
                ..
            }
        )
    }

    /// Is this the winning outcome?
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, TurnOutcome::Won { .. })
    }
}

impl std::fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
