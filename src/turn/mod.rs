//! One player's turn as a request/response state machine.
//!
//! ```text
//!                 select_card(i)
//! AwaitingSelection ──────────────► Resolving
//!        ▲                              │
//!        │ match, deck not exhausted    │ pirate / mismatch / exhausted
//!        └──────────────────────────────┤
//!                                       ├──► TurnEnded
//!                                       └──► GameWon   (laps >= 1 after a move)
//! ```
//!
//! `TurnEnded` and `GameWon` are terminal: the deck flips and the player's
//! matched cards are cleared once, and the `Turn` concludes into a
//! `TurnEnd` that the session consumes to record the result. The
//! engine never blocks; the shell decides when to ask for the next card.

pub mod engine;
pub mod outcome;

pub use engine::Turn;
pub use outcome::{TurnEnd, TurnOutcome, TurnState};
