//! Snapshot record types and restore validation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::board::Board;
use crate::cards::{Card, Deck};
use crate::core::{Character, GameConfig, GameError, Result};
use crate::player::{PlayerColor, PlayerState};
use crate::session::GameSession;

/// Board parameters. The board itself is always rebuilt from these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub num_sections: usize,
}

/// One card: content and flip state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub character: Character,
    pub number: u32,
    pub is_flipped: bool,
}

/// One player's persisted progress.
///
/// The character is not stored; it is re-derived from the position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub position: usize,
    pub laps_completed: i32,
    pub color: PlayerColor,
    /// Deck indices matched so far in an unfinished turn.
    #[serde(default)]
    pub flipped_cards_this_turn: Vec<usize>,
}

/// Complete persisted representation of a game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board_config: BoardConfig,
    pub card_numbers: BTreeSet<u32>,
    pub num_cards_per_character: usize,
    pub deck: Vec<CardRecord>,
    pub players: Vec<PlayerRecord>,
    pub current_player_index: usize,
}

impl GameSnapshot {
    /// Capture state. Pure: nothing is mutated.
    #[must_use]
    pub fn capture(
        board: &Board,
        deck: &Deck,
        players: &[PlayerState],
        current_index: usize,
        config: &GameConfig,
    ) -> Self {
        Self {
            board_config: BoardConfig {
                num_sections: board.num_sections(),
            },
            card_numbers: config.card_numbers.clone(),
            num_cards_per_character: config.num_cards_per_character,
            deck: deck
                .cards()
                .iter()
                .map(|card| CardRecord {
                    character: card.character(),
                    number: card.number(),
                    is_flipped: card.is_flipped(),
                })
                .collect(),
            players: players
                .iter()
                .map(|player| PlayerRecord {
                    name: player.name().to_string(),
                    position: player.position(),
                    laps_completed: player.laps_completed(),
                    color: player.color(),
                    flipped_cards_this_turn: player.flipped_cards_this_turn().to_vec(),
                })
                .collect(),
            current_player_index: current_index,
        }
    }

    /// Rebuild a game session, validating every invariant.
    ///
    /// Fails with `CorruptSnapshot` on any violation.
    #[instrument(skip(self), fields(sections = self.board_config.num_sections))]
    pub fn restore(&self) -> Result<GameSession> {
        self.try_restore().inspect_err(|err| {
            warn!(%err, "Snapshot rejected");
        })
    }

    fn try_restore(&self) -> Result<GameSession> {
        let config = GameConfig {
            num_sections: self.board_config.num_sections,
            card_numbers: self.card_numbers.clone(),
            num_cards_per_character: self.num_cards_per_character,
        };
        config.validate().map_err(as_corrupt)?;
        let board = Board::new(config.num_sections).map_err(as_corrupt)?;

        let cards = self
            .deck
            .iter()
            .map(|r| Card::restore(r.character, r.number, r.is_flipped))
            .collect::<Result<Vec<_>>>()?;
        let deck = Deck::from_cards(cards);
        if deck.is_empty() {
            return Err(GameError::corrupt("snapshot has no cards"));
        }

        if self.players.is_empty() {
            return Err(GameError::corrupt("snapshot has no players"));
        }
        if self.current_player_index >= self.players.len() {
            return Err(GameError::corrupt(format!(
                "current player index {} out of range for {} players",
                self.current_player_index,
                self.players.len()
            )));
        }

        self.check_reveals(&deck)?;

        let players = self
            .players
            .iter()
            .map(|record| restore_player(record, &board))
            .collect::<Result<Vec<_>>>()?;

        Ok(GameSession::from_parts(
            config,
            board,
            deck,
            players,
            self.current_player_index,
        ))
    }

    /// Face-up cards must be exactly the current player's matches.
    ///
    /// Only the current player can hold matches, each at most once, and a
    /// fully face-up deck would have ended the turn.
    fn check_reveals(&self, deck: &Deck) -> Result<()> {
        let current = self.current_player_index;
        if let Some(idle) = self
            .players
            .iter()
            .enumerate()
            .find(|&(i, record)| i != current && !record.flipped_cards_this_turn.is_empty())
            .map(|(_, record)| record)
        {
            return Err(GameError::corrupt(format!(
                "{} holds matched cards outside their turn",
                idle.name
            )));
        }

        let record = &self.players[current];
        let tracked: BTreeSet<usize> = record.flipped_cards_this_turn.iter().copied().collect();
        if tracked.len() != record.flipped_cards_this_turn.len() {
            return Err(GameError::corrupt(format!(
                "{} tracks a card twice",
                record.name
            )));
        }

        let face_up: BTreeSet<usize> = deck
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_flipped())
            .map(|(index, _)| index)
            .collect();
        if face_up != tracked {
            return Err(GameError::corrupt(format!(
                "face-up cards {face_up:?} differ from {}'s matches {tracked:?}",
                record.name
            )));
        }
        if deck.all_flipped() {
            return Err(GameError::corrupt("every card is face-up"));
        }
        Ok(())
    }
}

fn restore_player(record: &PlayerRecord, board: &Board) -> Result<PlayerState> {
    let player = PlayerState::at_position(
        record.name.clone(),
        record.color,
        board,
        record.position,
        record.laps_completed,
    )
    .map_err(as_corrupt)?;
    Ok(player.with_flipped(record.flipped_cards_this_turn.iter().copied()))
}

fn as_corrupt(err: GameError) -> GameError {
    GameError::corrupt(err.to_string())
}
