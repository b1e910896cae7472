//! Caller-owned game session.
//!
//! `GameSession` is the single aggregate a shell holds: configuration,
//! board, deck, players, whose turn it is, and the winner once there is
//! one. There is no hidden shared state; every turn borrows the session.
//!
//! ## Driving a turn
//!
//! - `begin_turn()` hands out a [`Turn`](crate::turn::Turn) over the
//!   current player; feed it selections, then hand the `TurnEnd` from
//!   `Turn::conclude()` to `end_turn()`. The session checks the result
//!   against its own state, so an unfinished turn never passes play.
//! - `play_turn()` does the same loop against a [`CardSelector`].

pub mod game;
pub mod selector;

pub use game::{GameSession, TurnSummary, DEFAULT_ROSTER};
pub use selector::CardSelector;
