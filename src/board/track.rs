//! Board and subsection types.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::core::{Character, GameError, Result};

/// Each logical section splits into this many subsections.
pub const SUBSECTIONS_PER_SECTION: usize = 3;

/// Largest supported number of sections.
pub const MAX_SECTIONS: usize = 1 << 16;

/// One discrete slot on the track.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    /// Index on the track, contiguous from 0.
    pub index: usize,

    /// Owning character (never the pirate).
    pub character: Character,

    /// Angular position in degrees, `index * 360 / total_subsections`.
    pub angle_degrees: f64,
}

/// The circular track.
///
/// ```
/// use fiery_dragons::board::Board;
/// use fiery_dragons::Character;
///
/// let board = Board::new(8).unwrap();
/// assert_eq!(board.total_subsections(), 24);
/// assert_eq!(board.subsection_at(5).unwrap().character, Character::Salamander);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    num_sections: usize,
    subsections: Vec<Subsection>,
}

impl Board {
    /// Build the track for `num_sections` sections.
    ///
    /// Fails with `InvalidConfiguration` when `num_sections` is 0 or above
    /// [`MAX_SECTIONS`].
    #[instrument]
    pub fn new(num_sections: usize) -> Result<Self> {
        if num_sections == 0 {
            return Err(GameError::config("number of sections must be positive"));
        }
        if num_sections > MAX_SECTIONS {
            return Err(GameError::config(format!(
                "{num_sections} sections exceeds the limit of {MAX_SECTIONS}"
            )));
        }

        let total = num_sections * SUBSECTIONS_PER_SECTION;
        let angle_step = 360.0 / total as f64;
        let subsections = (0..total)
            .map(|index| Subsection {
                index,
                character: Character::for_subsection(index),
                angle_degrees: index as f64 * angle_step,
            })
            .collect();

        Ok(Self {
            num_sections,
            subsections,
        })
    }

    /// Number of logical sections.
    #[must_use]
    pub fn num_sections(&self) -> usize {
        self.num_sections
    }

    /// Number of subsections (always `3 * num_sections`).
    #[must_use]
    pub fn total_subsections(&self) -> usize {
        self.subsections.len()
    }

    /// All subsections in track order.
    #[must_use]
    pub fn subsections(&self) -> &[Subsection] {
        &self.subsections
    }

    /// Subsection at `position`.
    ///
    /// An out-of-range position is a caller defect and reported as
    /// `IndexOutOfRange`.
    pub fn subsection_at(&self, position: usize) -> Result<&Subsection> {
        self.subsections
            .get(position)
            .ok_or(GameError::IndexOutOfRange {
                position,
                len: self.subsections.len(),
            })
    }

    /// Character owning `position`, wrapped onto the track.
    #[must_use]
    pub(crate) fn character_at_wrapped(&self, position: usize) -> Character {
        self.subsections[position % self.subsections.len()].character
    }
}
