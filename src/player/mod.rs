//! Player progress around the track.
//!
//! ## PlayerState
//!
//! Position, lap count and the cards matched this turn. The player's
//! character is never set directly: every move re-derives it from the
//! subsection under the token.
//!
//! ## Lap counting
//!
//! Laps are counted purely from wraparound direction. A forward move whose
//! new position is below the old one crossed index 0 going forward (+1); a
//! backward move whose new position is above the old one crossed it going
//! backward (-1).

pub mod state;

pub use state::{PlayerColor, PlayerState};
