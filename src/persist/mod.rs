//! Named save slots on disk.
//!
//! Each slot is one file, `<dir>/<slot>.sav`, holding a bincode-encoded
//! [`GameSnapshot`](crate::snapshot::GameSnapshot). Loading always
//! validates by restoring, so a slot that loads is a slot that plays.

pub mod error;
pub mod slots;

pub use error::{PersistError, PersistResult};
pub use slots::{decode, encode, SaveSlots, DEFAULT_SLOT, SAVE_EXTENSION};
