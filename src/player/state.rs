//! `PlayerState` and display colours.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::board::Board;
use crate::core::{Character, Result};

/// Opaque RGB display attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerColor(pub u8, pub u8, pub u8);

impl PlayerColor {
    pub const RED: Self = Self(255, 0, 0);
    pub const GREEN: Self = Self(0, 255, 0);
    pub const BLUE: Self = Self(0, 0, 255);
    pub const YELLOW: Self = Self(255, 255, 0);
    pub const WHITE: Self = Self(255, 255, 255);
}

/// A participant's mutable progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    name: String,
    character: Character,
    position: usize,
    laps_completed: i32,
    color: PlayerColor,
    /// Deck indices of the cards matched so far this turn, in order.
    flipped_cards_this_turn: SmallVec<[usize; 8]>,
}

impl PlayerState {
    /// Create a player at position 0 of `board`.
    pub fn new(name: impl Into<String>, color: PlayerColor, board: &Board) -> Self {
        Self {
            name: name.into(),
            character: board.character_at_wrapped(0),
            position: 0,
            laps_completed: 0,
            color,
            flipped_cards_this_turn: SmallVec::new(),
        }
    }

    /// Place a player at an explicit position with a lap count.
    ///
    /// Fails with `IndexOutOfRange` if `position` is not on `board`.
    pub fn at_position(
        name: impl Into<String>,
        color: PlayerColor,
        board: &Board,
        position: usize,
        laps_completed: i32,
    ) -> Result<Self> {
        let character = board.subsection_at(position)?.character;
        Ok(Self {
            name: name.into(),
            character,
            position,
            laps_completed,
            color,
            flipped_cards_this_turn: SmallVec::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Character of the subsection the player stands on.
    #[must_use]
    pub fn character(&self) -> Character {
        self.character
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn laps_completed(&self) -> i32 {
        self.laps_completed
    }

    #[must_use]
    pub fn color(&self) -> PlayerColor {
        self.color
    }

    /// Deck indices matched this turn.
    #[must_use]
    pub fn flipped_cards_this_turn(&self) -> &[usize] {
        &self.flipped_cards_this_turn
    }

    /// Has this player completed a full lap?
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.laps_completed >= 1
    }

    /// Move `steps` subsections clockwise.
    ///
    /// Gains a lap when the move wraps past index 0.
    pub fn move_forward(&mut self, steps: u32, board: &Board) {
        let total = board.total_subsections();
        let previous = self.position;
        let new_position = (previous + steps as usize % total) % total;
        if new_position < previous {
            self.laps_completed += 1;
        }
        self.settle(new_position, board);
        debug!(
            player = %self.name,
            steps,
            from = previous,
            to = self.position,
            laps = self.laps_completed,
            "Moved forward"
        );
    }

    /// Move `steps` subsections counter-clockwise.
    ///
    /// Loses a lap when the move wraps back past index 0.
    pub fn move_backward(&mut self, steps: u32, board: &Board) {
        let total = board.total_subsections();
        let previous = self.position;
        let back = steps as usize % total;
        let new_position = (previous + total - back) % total;
        if new_position > previous {
            self.laps_completed -= 1;
        }
        self.settle(new_position, board);
        debug!(
            player = %self.name,
            steps,
            from = previous,
            to = self.position,
            laps = self.laps_completed,
            "Moved backward"
        );
    }

    fn settle(&mut self, position: usize, board: &Board) {
        self.position = position;
        self.character = board.character_at_wrapped(position);
    }

    pub(crate) fn record_flipped(&mut self, card_index: usize) {
        self.flipped_cards_this_turn.push(card_index);
    }

    pub(crate) fn clear_flipped(&mut self) {
        self.flipped_cards_this_turn.clear();
    }

    /// Restore the matched-card list of a mid-turn save.
    pub(crate) fn with_flipped(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.flipped_cards_this_turn = indices.into_iter().collect();
        self
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: Position {}, Character {}, Laps Completed {}",
            self.name, self.position, self.character, self.laps_completed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameError;
    use proptest::prelude::*;

    fn board() -> Board {
        Board::new(8).unwrap()
    }

    #[test]
    fn test_new_player_derives_character() {
        let board = board();
        let player = PlayerState::new("Alice", PlayerColor::RED, &board);

        assert_eq!(player.position(), 0);
        assert_eq!(player.character(), Character::Dragon);
        assert_eq!(player.laps_completed(), 0);
        assert!(player.flipped_cards_this_turn().is_empty());
    }

    #[test]
    fn test_at_position() {
        let board = board();
        let player = PlayerState::at_position("Bob", PlayerColor::GREEN, &board, 6, -1).unwrap();
        assert_eq!(player.character(), Character::Bat);
        assert_eq!(player.laps_completed(), -1);

        assert_eq!(
            PlayerState::at_position("Bob", PlayerColor::GREEN, &board, 24, 0),
            Err(GameError::IndexOutOfRange { position: 24, len: 24 })
        );
    }

    #[test]
    fn test_forward_without_wrap() {
        let board = board();
        let mut player = PlayerState::new("Alice", PlayerColor::RED, &board);

        player.move_forward(2, &board);
        assert_eq!(player.position(), 2);
        assert_eq!(player.character(), Character::Bat);
        assert_eq!(player.laps_completed(), 0);
    }

    #[test]
    fn test_forward_wrap_gains_lap() {
        let board = board();
        let mut player = PlayerState::at_position("Alice", PlayerColor::RED, &board, 23, 0).unwrap();

        player.move_forward(1, &board);
        assert_eq!(player.position(), 0);
        assert_eq!(player.laps_completed(), 1);
        assert_eq!(player.character(), Character::Dragon);
        assert!(player.has_won());
    }

    #[test]
    fn test_backward_wrap_loses_lap() {
        let board = board();
        let mut player = PlayerState::new("Alice", PlayerColor::RED, &board);

        player.move_backward(1, &board);
        assert_eq!(player.position(), 23);
        assert_eq!(player.laps_completed(), -1);
        assert_eq!(player.character(), Character::Spider);
    }

    #[test]
    fn test_backward_without_wrap() {
        let board = board();
        let mut player = PlayerState::at_position("Alice", PlayerColor::RED, &board, 5, 0).unwrap();

        player.move_backward(2, &board);
        assert_eq!(player.position(), 3);
        assert_eq!(player.laps_completed(), 0);
    }

    #[test]
    fn test_full_track_step_is_noop() {
        let board = board();
        let mut player = PlayerState::at_position("Alice", PlayerColor::RED, &board, 4, 0).unwrap();

        player.move_forward(24, &board);
        assert_eq!(player.position(), 4);
        assert_eq!(player.laps_completed(), 0);

        player.move_backward(48, &board);
        assert_eq!(player.position(), 4);
        assert_eq!(player.laps_completed(), 0);
    }

    #[test]
    fn test_flipped_tracking() {
        let board = board();
        let mut player = PlayerState::new("Alice", PlayerColor::RED, &board);

        player.record_flipped(3);
        player.record_flipped(9);
        assert_eq!(player.flipped_cards_this_turn(), &[3, 9]);

        player.clear_flipped();
        assert!(player.flipped_cards_this_turn().is_empty());
    }

    #[test]
    fn test_display() {
        let board = board();
        let player = PlayerState::new("Diana", PlayerColor::YELLOW, &board);
        assert_eq!(
            player.to_string(),
            "Diana: Position 0, Character dragon, Laps Completed 0"
        );
    }

    proptest! {
        #[test]
        fn prop_forward_move(
            num_sections in 1usize..20,
            start_seed in 0usize..1000,
            steps in 1u32..200,
        ) {
            let board = Board::new(num_sections).unwrap();
            let total = board.total_subsections();
            let start = start_seed % total;
            let mut player = PlayerState::at_position("P", PlayerColor::WHITE, &board, start, 0).unwrap();

            player.move_forward(steps, &board);

            let expected = (start + steps as usize) % total;
            prop_assert_eq!(player.position(), expected);
            prop_assert_eq!(player.laps_completed(), i32::from(expected < start));
            prop_assert_eq!(player.character(), board.subsection_at(expected).unwrap().character);
        }

        #[test]
        fn prop_backward_move(
            num_sections in 1usize..20,
            start_seed in 0usize..1000,
            steps in 1u32..200,
        ) {
            let board = Board::new(num_sections).unwrap();
            let total = board.total_subsections();
            let start = start_seed % total;
            let mut player = PlayerState::at_position("P", PlayerColor::WHITE, &board, start, 0).unwrap();

            player.move_backward(steps, &board);

            let expected = (start as i64 - i64::from(steps)).rem_euclid(total as i64) as usize;
            prop_assert_eq!(player.position(), expected);
            prop_assert_eq!(player.laps_completed(), -i32::from(expected > start));
            prop_assert_eq!(player.character(), board.subsection_at(expected).unwrap().character);
        }
    }
}
