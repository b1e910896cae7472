//! Circular track topology.
//!
//! A board with `n` sections has `3n` subsections. Subsection `i` is tagged
//! with `NON_PIRATE_CHARACTERS[i % 4]`, independent of `n`. The board is
//! immutable once built and is always rebuilt from `num_sections` rather
//! than persisted.

pub mod track;

pub use track::{Board, Subsection, MAX_SECTIONS, SUBSECTIONS_PER_SECTION};
