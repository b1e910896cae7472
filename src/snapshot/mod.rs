//! Data-only game snapshots.
//!
//! A `GameSnapshot` is the only unit exchanged with storage. It holds plain
//! data: no board geometry and no presentation assets. Restoring rebuilds
//! the board from `num_sections` and re-checks every invariant, so
//! hand-edited or older saves cannot produce an inconsistent game.

pub mod record;

pub use record::{BoardConfig, CardRecord, GameSnapshot, PlayerRecord};
