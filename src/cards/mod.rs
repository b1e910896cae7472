//! Cards and the deck.
//!
//! ## Key Types
//!
//! - `Card`: character + number + flip flag, with the pirate number rule
//!   enforced at construction
//! - `Deck`: the ordered card sequence, built once per game from
//!   configuration and optionally shuffled

pub mod card;
pub mod deck;

pub use card::Card;
pub use deck::Deck;
