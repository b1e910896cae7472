//! The `GameSession` aggregate.

use tracing::{debug, info, instrument, warn};

use super::selector::CardSelector;
use crate::board::Board;
use crate::cards::Deck;
use crate::core::{GameConfig, GameError, GameRng, Result};
use crate::player::{PlayerColor, PlayerState};
use crate::snapshot::GameSnapshot;
use crate::turn::{Turn, TurnEnd, TurnOutcome, TurnState};

/// The four seats of a standard game.
pub const DEFAULT_ROSTER: [(&str, PlayerColor); 4] = [
    ("Alice", PlayerColor::RED),
    ("Bob", PlayerColor::GREEN),
    ("Charlie", PlayerColor::BLUE),
    ("Diana", PlayerColor::YELLOW),
];

/// What happened during one [`GameSession::play_turn`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSummary {
    /// Index of the player who took the turn.
    pub player_index: usize,

    /// Outcome of every accepted selection, in order.
    pub outcomes: Vec<TurnOutcome>,

    /// Terminal state reached, or `None` if the selector abandoned the turn.
    pub final_state: Option<TurnState>,
}

impl TurnSummary {
    /// Did the selector walk away mid-turn?
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.final_state.is_none()
    }

    /// Did this turn win the game?
    #[must_use]
    pub fn won(&self) -> bool {
        self.final_state == Some(TurnState::GameWon)
    }
}

/// A game in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    deck: Deck,
    players: Vec<PlayerState>,
    current_player: usize,
    winner: Option<usize>,
}

impl GameSession {
    /// Start a new game.
    ///
    /// Validates the configuration before building anything, then builds
    /// the board, builds and shuffles the deck, and seats `roster` in order
    /// at position 0.
    #[instrument(skip(rng))]
    pub fn new(
        config: GameConfig,
        roster: &[(&str, PlayerColor)],
        rng: &mut GameRng,
    ) -> Result<Self> {
        config.validate()?;
        if roster.is_empty() {
            return Err(GameError::config("at least one player is required"));
        }

        let board = Board::new(config.num_sections)?;
        let mut deck = Deck::build(&config.card_numbers, config.num_cards_per_character)?;
        deck.shuffle(&mut rng.for_context("deck"));

        let players = roster
            .iter()
            .map(|&(name, color)| PlayerState::new(name, color, &board))
            .collect();

        info!(
            sections = config.num_sections,
            deck_size = deck.len(),
            players = roster.len(),
            "New game"
        );

        Ok(Self {
            config,
            board,
            deck,
            players,
            current_player: 0,
            winner: None,
        })
    }

    /// Start a new game with [`DEFAULT_ROSTER`] and a seeded shuffle.
    pub fn with_default_roster(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, &DEFAULT_ROSTER, &mut GameRng::new(seed))
    }

    /// Assemble a session from validated parts.
    pub(crate) fn from_parts(
        config: GameConfig,
        board: Board,
        deck: Deck,
        players: Vec<PlayerState>,
        current_player: usize,
    ) -> Self {
        let winner = players.iter().position(PlayerState::has_won);
        Self {
            config,
            board,
            deck,
            players,
            current_player,
            winner,
        }
    }

    /// Rebuild a session from a snapshot.
    pub fn restore(snapshot: &GameSnapshot) -> Result<Self> {
        snapshot.restore()
    }

    /// Capture the full game state for persistence.
    #[must_use]
    pub fn capture(&self) -> GameSnapshot {
        GameSnapshot::capture(
            &self.board,
            &self.deck,
            &self.players,
            self.current_player,
            &self.config,
        )
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    #[must_use]
    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.current_player]
    }

    /// Index of the winning player, once the game is won.
    #[must_use]
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Begin the current player's turn.
    ///
    /// Fails with `GameOver` once somebody has won.
    pub fn begin_turn(&mut self) -> Result<Turn<'_>> {
        if let Some(winner) = self.winner {
            return Err(GameError::GameOver { winner });
        }
        let player = &mut self.players[self.current_player];
        Ok(Turn::begin(&self.board, &mut self.deck, player))
    }

    /// Record how the current turn finished.
    ///
    /// `GameWon` records the winner, `TurnEnded` passes play to the next
    /// seat. The result is checked against the session: a win needs a
    /// current player with a completed lap, and a plain end needs every
    /// card face-down and no matched cards left on the player. Anything
    /// else is `TurnNotFinished` and nothing changes.
    #[instrument(skip(self), fields(current = self.current_player))]
    pub fn end_turn(&mut self, end: TurnEnd) -> Result<TurnState> {
        if let Some(winner) = self.winner {
            return Err(GameError::GameOver { winner });
        }

        let current = &self.players[self.current_player];
        let state = end.state();
        let consistent = match state {
            TurnState::GameWon => current.has_won(),
            TurnState::TurnEnded => {
                !current.has_won()
                    && current.flipped_cards_this_turn().is_empty()
                    && self.deck.flipped_count() == 0
            }
            TurnState::AwaitingSelection | TurnState::Resolving => false,
        };
        if !consistent {
            warn!(?state, "Turn result does not match the session");
            return Err(GameError::TurnNotFinished {
                player: self.current_player,
            });
        }

        if state == TurnState::GameWon {
            self.winner = Some(self.current_player);
            info!(winner = %current.name(), "Game won");
        } else {
            self.current_player = (self.current_player + 1) % self.players.len();
        }
        self.log_status();
        Ok(state)
    }

    /// Play the current player's turn against `selector`.
    ///
    /// Rejected selections are reported to the selector and re-prompted.
    /// If the selector returns `None` the turn is abandoned: nothing is
    /// cleaned up and play does not pass.
    pub fn play_turn(&mut self, selector: &mut impl CardSelector) -> Result<TurnSummary> {
        let player_index = self.current_player;
        let mut outcomes = Vec::new();

        let end = {
            let mut turn = self.begin_turn()?;
            loop {
                if turn.is_over() {
                    break turn.conclude();
                }
                let Some(index) = selector.select(turn.player(), turn.deck()) else {
                    debug!("Turn abandoned");
                    break None;
                };
                match turn.select_card(index) {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(GameError::InvalidSelection { index, fault }) => {
                        selector.rejected(index, fault);
                    }
                    Err(err) => return Err(err),
                }
            }
        };

        let final_state = match end {
            Some(end) => Some(self.end_turn(end)?),
            None => None,
        };

        Ok(TurnSummary {
            player_index,
            outcomes,
            final_state,
        })
    }

    /// Log every player's progress.
    pub fn log_status(&self) {
        for player in &self.players {
            info!(status = %player, "Player status");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::core::{Character, SelectionFault};

    fn small_config() -> GameConfig {
        GameConfig::new(4, [1, 2], 2)
    }

    /// Default roster over an unshuffled hand-built deck, Alice at `position`.
    fn session_over(sections: usize, cards: &[(Character, u32)], position: usize) -> GameSession {
        let config = GameConfig::new(sections, [1, 2, 3], 1);
        let board = Board::new(sections).unwrap();
        let deck = Deck::from_cards(
            cards
                .iter()
                .map(|&(c, n)| Card::new(c, n).unwrap())
                .collect(),
        );
        let mut players: Vec<PlayerState> = DEFAULT_ROSTER
            .iter()
            .map(|&(name, color)| PlayerState::new(name, color, &board))
            .collect();
        players[0] = PlayerState::at_position("Alice", PlayerColor::RED, &board, position, 0).unwrap();
        GameSession::from_parts(config, board, deck, players, 0)
    }

    /// Select the first face-down card, expecting a mismatch, and end the turn.
    fn mismatch_turn(session: &mut GameSession) -> Result<TurnState> {
        let mut turn = session.begin_turn()?;
        let index = turn.deck().face_down_indices().next().unwrap();
        turn.select_card(index)?;
        let end = turn.conclude().unwrap();
        session.end_turn(end)
    }

    /// Always pick the first face-down card.
    fn first_face_down(_: &PlayerState, deck: &Deck) -> Option<usize> {
        deck.face_down_indices().next()
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::with_default_roster(GameConfig::default(), 1).unwrap();

        assert_eq!(session.board().total_subsections(), 24);
        assert_eq!(session.deck().len(), 52);
        assert_eq!(session.players().len(), 4);
        assert_eq!(session.current_player_index(), 0);
        assert_eq!(session.current_player().name(), "Alice");
        assert!(session
            .players()
            .iter()
            .all(|p| p.position() == 0 && p.character() == Character::Dragon));
        assert!(!session.is_over());
    }

    #[test]
    fn test_seeded_deal_is_reproducible() {
        let a = GameSession::with_default_roster(GameConfig::default(), 5).unwrap();
        let b = GameSession::with_default_roster(GameConfig::default(), 5).unwrap();
        let c = GameSession::with_default_roster(GameConfig::default(), 6).unwrap();

        assert_eq!(a.deck(), b.deck());
        assert_ne!(a.deck(), c.deck());
    }

    #[test]
    fn test_invalid_setup() {
        let mut rng = GameRng::new(0);
        assert!(matches!(
            GameSession::new(GameConfig::default().with_num_sections(0), &DEFAULT_ROSTER, &mut rng),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            GameSession::new(GameConfig::default(), &[], &mut rng),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_end_turn_rotates_and_wraps() {
        let mut session = session_over(4, &[(Character::Spider, 1); 3], 0);

        for expected in [1, 2, 3, 0, 1] {
            assert_eq!(mismatch_turn(&mut session), Ok(TurnState::TurnEnded));
            assert_eq!(session.current_player_index(), expected);
        }
    }

    #[test]
    fn test_abandoned_turn_cannot_be_passed_on() {
        let mut session = session_over(4, &[(Character::Dragon, 1), (Character::Spider, 1)], 0);
        let mut other = session_over(4, &[(Character::Spider, 1)], 0);

        let mut turn = session.begin_turn().unwrap();
        turn.select_card(0).unwrap();
        assert!(turn.conclude().is_none());

        let mut turn = other.begin_turn().unwrap();
        turn.select_card(0).unwrap();
        let foreign_end = turn.conclude().unwrap();

        assert_eq!(
            session.end_turn(foreign_end),
            Err(GameError::TurnNotFinished { player: 0 })
        );
        assert_eq!(session.current_player_index(), 0);
        assert!(session.deck().cards()[0].is_flipped());
        assert_eq!(session.current_player().flipped_cards_this_turn(), &[0]);

        // Resuming and finishing the turn passes play with a clean deck.
        assert_eq!(mismatch_turn(&mut session), Ok(TurnState::TurnEnded));
        assert_eq!(session.current_player_index(), 1);
        assert_eq!(session.deck().flipped_count(), 0);
        assert!(session.players()[0].flipped_cards_this_turn().is_empty());
        assert_eq!(GameSession::restore(&session.capture()).unwrap(), session);
    }

    #[test]
    fn test_win_needs_completed_lap() {
        // 7 sections: position 20 is a dragon, three steps wrap to 2.
        let mut winner = session_over(7, &[(Character::Dragon, 3), (Character::Bat, 1)], 20);
        let mut fresh = session_over(7, &[(Character::Dragon, 3)], 0);

        let mut turn = winner.begin_turn().unwrap();
        assert!(turn.select_card(0).unwrap().is_win());
        let won = turn.conclude().unwrap();
        assert_eq!(won.state(), TurnState::GameWon);

        assert_eq!(
            fresh.end_turn(won),
            Err(GameError::TurnNotFinished { player: 0 })
        );
        assert_eq!(fresh.winner(), None);
    }

    #[test]
    fn test_game_over_blocks_turns() {
        let mut session = session_over(7, &[(Character::Dragon, 3), (Character::Bat, 1)], 20);

        let mut turn = session.begin_turn().unwrap();
        turn.select_card(0).unwrap();
        let end = turn.conclude().unwrap();
        assert_eq!(session.end_turn(end), Ok(TurnState::GameWon));

        assert_eq!(session.winner(), Some(0));
        assert!(matches!(
            session.begin_turn(),
            Err(GameError::GameOver { winner: 0 })
        ));

        let restored = GameSession::restore(&session.capture()).unwrap();
        assert_eq!(restored.winner(), Some(0));
    }

    #[test]
    fn test_play_turn_runs_to_terminal_state() {
        let mut session = GameSession::with_default_roster(small_config(), 9).unwrap();
        let mut selector = first_face_down;

        let summary = session.play_turn(&mut selector).unwrap();

        assert_eq!(summary.player_index, 0);
        assert!(!summary.outcomes.is_empty());
        assert!(summary.outcomes.last().unwrap().ends_turn());
        assert!(summary.final_state.unwrap().is_terminal());
        assert_eq!(session.deck().flipped_count(), 0);
        if !summary.won() {
            assert_eq!(session.current_player_index(), 1);
        }
    }

    #[test]
    fn test_play_turn_abandoned() {
        let mut session = GameSession::with_default_roster(small_config(), 9).unwrap();
        let mut selector = |_: &PlayerState, _: &Deck| -> Option<usize> { None };

        let summary = session.play_turn(&mut selector).unwrap();

        assert!(summary.is_abandoned());
        assert!(summary.outcomes.is_empty());
        assert_eq!(session.current_player_index(), 0);
    }

    #[test]
    fn test_play_turn_reprompts_on_rejection() {
        struct Scripted {
            picks: Vec<usize>,
            rejected: Vec<(usize, SelectionFault)>,
        }

        impl CardSelector for Scripted {
            fn select(&mut self, _: &PlayerState, deck: &Deck) -> Option<usize> {
                if self.picks.is_empty() {
                    deck.face_down_indices().next()
                } else {
                    Some(self.picks.remove(0))
                }
            }

            fn rejected(&mut self, index: usize, fault: SelectionFault) {
                self.rejected.push((index, fault));
            }
        }

        let mut session = GameSession::with_default_roster(small_config(), 9).unwrap();
        let deck_len = session.deck().len();
        let mut selector = Scripted {
            picks: vec![deck_len + 5],
            rejected: Vec::new(),
        };

        let summary = session.play_turn(&mut selector).unwrap();

        assert_eq!(
            selector.rejected,
            vec![(deck_len + 5, SelectionFault::OutOfRange { deck_len })]
        );
        assert!(!summary.is_abandoned());
    }
}
