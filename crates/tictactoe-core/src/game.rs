//! Core game state machine.
//!
//! This module contains the `GameEngine`, which owns the move history and the
//! cursor into it. Everything a renderer needs (turn, outcome, last move,
//! highlights, phase) is derived from `(history, cursor)` rather than stored
//! alongside it, so the pieces cannot drift apart.

use crate::actions::{GameAction, GameEvent};
use crate::board::{Board, BoardSize};
use crate::detector::Outcome;
use crate::player::Player;
use crate::view::GameView;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Game phase as seen by a presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a board size to be chosen
    Selecting,
    /// Moves can be played from the current snapshot
    Playing,
    /// The latest snapshot is a win or a draw
    GameOver,
}

/// Errors that can occur when operating on the engine.
///
/// Every error leaves the engine untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Cell {index} is already taken")]
    IllegalMove { index: usize },

    #[error("Game over! The game has already been decided")]
    GameAlreadyDecided,

    #[error("Index {index} is out of range (expected less than {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unsupported board size: {0}")]
    InvalidSize(u8),

    #[error("Select a board size first")]
    AwaitingSizeSelection,
}

/// One entry in the move history: a board and the outcome it produces.
///
/// The outcome is computed once when the snapshot is created; snapshots are
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    board: Board,
    outcome: Outcome,
}

impl Snapshot {
    fn new(board: Board) -> Self {
        let outcome = board.outcome();
        Self { board, outcome }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

/// What `play_move` hands back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    /// Cell that was just marked
    pub index: usize,
    /// Player who made the move
    pub player: Player,
    /// The new snapshot
    pub board: Board,
    /// Outcome of the new snapshot
    pub outcome: Outcome,
    /// Number of future snapshots discarded because the move was played from
    /// an earlier point in history
    pub discarded: usize,
}

/// The Tic-Tac-Toe engine
#[derive(Debug, Clone)]
pub struct GameEngine {
    /// Size of the current board
    size: BoardSize,
    /// Snapshots; entry 0 is always the empty board
    history: Vec<Snapshot>,
    /// Index of the displayed snapshot
    cursor: usize,
    /// Whether a size selection is pending
    selecting: bool,
}

impl GameEngine {
    /// Create an engine waiting for a board size.
    ///
    /// A 2x2 board is held until a size is chosen.
    pub fn new() -> Self {
        Self {
            size: BoardSize::MIN,
            history: vec![Snapshot::new(Board::empty(BoardSize::MIN))],
            cursor: 0,
            selecting: true,
        }
    }

    /// Create an engine already playing on a `size × size` board
    pub fn with_size(size: u8) -> Result<Self, GameError> {
        let mut engine = Self::new();
        engine.select_size(size)?;
        Ok(engine)
    }

    // ==================== Lifecycle ====================

    /// Start a fresh game on a `size × size` board, discarding all history
    pub fn select_size(&mut self, size: u8) -> Result<(), GameError> {
        let size = BoardSize::new(size).inspect_err(|_| {
            debug!("Rejected board size {}", size);
        })?;
        self.start(size);
        Ok(())
    }

    /// Start a fresh game on the current board size
    pub fn reset(&mut self) {
        self.start(self.size);
    }

    /// Ask for a new board size. The current game is discarded and play is
    /// suspended until `select_size`.
    pub fn change_size(&mut self) {
        debug!("Board size selection opened");
        self.start(self.size);
        self.selecting = true;
    }

    fn start(&mut self, size: BoardSize) {
        debug!("Starting {} game, {} in a row wins", size, size.win_length());
        self.size = size;
        self.history = vec![Snapshot::new(Board::empty(size))];
        self.cursor = 0;
        self.selecting = false;
    }

    // ==================== Moves ====================

    /// Place the current player's mark at `index` on the displayed snapshot.
    ///
    /// When the cursor is not at the end of history, the recorded future is
    /// discarded and the new move starts a branch.
    pub fn play_move(&mut self, index: usize) -> Result<PlayedMove, GameError> {
        self.ensure_size_selected()?;

        let current = self.current();
        let len = current.board.len();
        if index >= len {
            debug!("Rejected move at {}: board has {} cells", index, len);
            return Err(GameError::IndexOutOfRange { index, len });
        }
        if current.outcome.is_decided() && self.is_at_end() {
            debug!("Rejected move at {}: game already decided", index);
            return Err(GameError::GameAlreadyDecided);
        }
        if !current.board[index].is_empty() {
            debug!("Rejected move at {}: cell taken", index);
            return Err(GameError::IllegalMove { index });
        }

        let player = self.turn();
        let board = current.board.with_mark(index, player);

        let discarded = self.history.len() - (self.cursor + 1);
        if discarded > 0 {
            debug!(
                "Branching at move {}, discarding {} later snapshots",
                self.cursor, discarded
            );
        }
        self.history.truncate(self.cursor + 1);
        self.history.push(Snapshot::new(board));
        self.cursor += 1;

        let snapshot = self.current();
        debug!(
            "Move {}: {} at {} ({})",
            self.cursor,
            player,
            index,
            snapshot.outcome
        );

        Ok(PlayedMove {
            index,
            player,
            board: snapshot.board.clone(),
            outcome: snapshot.outcome.clone(),
            discarded,
        })
    }

    // ==================== History Navigation ====================

    /// Display snapshot `cursor`. History itself is not modified.
    pub fn jump_to(&mut self, cursor: usize) -> Result<(), GameError> {
        self.ensure_size_selected()?;

        let len = self.history.len();
        if cursor >= len {
            debug!("Rejected jump to {}: history has {} entries", cursor, len);
            return Err(GameError::IndexOutOfRange { index: cursor, len });
        }

        self.cursor = cursor;
        debug!("Jumped to move {}", cursor);
        Ok(())
    }

    /// Display the empty starting board
    pub fn jump_to_start(&mut self) -> Result<(), GameError> {
        self.jump_to(0)
    }

    /// Display the latest snapshot
    pub fn jump_to_end(&mut self) -> Result<(), GameError> {
        self.jump_to(self.history.len() - 1)
    }

    /// Display the previous snapshot
    pub fn step_back(&mut self) -> Result<(), GameError> {
        match self.cursor.checked_sub(1) {
            Some(previous) => self.jump_to(previous),
            None => {
                self.ensure_size_selected()?;
                Err(GameError::IndexOutOfRange {
                    index: 0,
                    len: self.history.len(),
                })
            }
        }
    }

    /// Display the next snapshot
    pub fn step_forward(&mut self) -> Result<(), GameError> {
        self.jump_to(self.cursor + 1)
    }

    // ==================== Actions ====================

    /// Apply a serialized action and report what happened
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();

        match action {
            GameAction::SelectSize(size) => {
                self.select_size(size)?;
                events.push(self.size_selected_event());
            }

            GameAction::Reset => {
                self.reset();
                events.push(self.size_selected_event());
            }

            GameAction::ChangeSize => {
                self.change_size();
                events.push(GameEvent::SizeSelectionOpened);
            }

            GameAction::PlayMove(index) => {
                let played = self.play_move(index)?;

                if played.discarded > 0 {
                    events.push(GameEvent::BranchStarted {
                        from: self.cursor - 1,
                        discarded: played.discarded,
                    });
                }

                events.push(GameEvent::MovePlayed {
                    player: played.player,
                    index: played.index,
                    move_number: self.cursor,
                });

                match played.outcome {
                    Outcome::Win { player, cells } => {
                        events.push(GameEvent::GameWon { player, cells });
                    }
                    Outcome::Draw { .. } => events.push(GameEvent::GameDrawn),
                    Outcome::Undecided => {}
                }
            }

            GameAction::JumpTo(cursor) => {
                self.jump_to(cursor)?;
                events.push(self.jumped_event());
            }
            GameAction::JumpToStart => {
                self.jump_to_start()?;
                events.push(self.jumped_event());
            }
            GameAction::StepBack => {
                self.step_back()?;
                events.push(self.jumped_event());
            }
            GameAction::StepForward => {
                self.step_forward()?;
                events.push(self.jumped_event());
            }
            GameAction::JumpToEnd => {
                self.jump_to_end()?;
                events.push(self.jumped_event());
            }
        }

        Ok(events)
    }

    // ==================== Queries ====================

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Run length needed to win on the current board
    pub fn win_length(&self) -> usize {
        self.size.win_length()
    }

    /// The displayed snapshot's board
    pub fn board(&self) -> &Board {
        &self.current().board
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Every recorded snapshot, oldest first
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Player to move from the displayed snapshot
    pub fn turn(&self) -> Player {
        Player::for_cursor(self.cursor)
    }

    /// Outcome of the displayed snapshot
    pub fn outcome(&self) -> &Outcome {
        &self.current().outcome
    }

    /// The cell marked by the move that produced the displayed snapshot
    pub fn last_move(&self) -> Option<usize> {
        let previous = self.history.get(self.cursor.checked_sub(1)?)?;
        previous.board.first_difference(&self.current().board)
    }

    /// Cells a renderer should emphasise: the deciding cells when the
    /// displayed snapshot is decided, otherwise the last move
    pub fn highlighted_cells(&self) -> Vec<usize> {
        let outcome = self.outcome();
        if outcome.is_decided() {
            outcome.cells().to_vec()
        } else {
            self.last_move().into_iter().collect()
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.selecting {
            GamePhase::Selecting
        } else if self.outcome().is_decided() && self.is_at_end() {
            GamePhase::GameOver
        } else {
            GamePhase::Playing
        }
    }

    /// Whether the cursor is on the latest snapshot
    pub fn is_at_end(&self) -> bool {
        self.cursor + 1 == self.history.len()
    }

    pub fn can_step_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_step_forward(&self) -> bool {
        !self.is_at_end()
    }

    /// Serializable snapshot of everything a renderer needs
    pub fn view(&self) -> GameView {
        GameView::from(self)
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Snapshot {
        &self.history[self.cursor]
    }

    fn ensure_size_selected(&self) -> Result<(), GameError> {
        if self.selecting {
            debug!("Rejected operation: board size not selected");
            return Err(GameError::AwaitingSizeSelection);
        }
        Ok(())
    }

    fn size_selected_event(&self) -> GameEvent {
        GameEvent::SizeSelected {
            size: self.size,
            win_length: self.win_length(),
        }
    }

    fn jumped_event(&self) -> GameEvent {
        GameEvent::Jumped {
            cursor: self.cursor,
            last_move: self.last_move(),
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_new_engine_waits_for_size() {
        let mut engine = GameEngine::new();
        assert_eq!(engine.phase(), GamePhase::Selecting);
        assert_eq!(engine.play_move(0), Err(GameError::AwaitingSizeSelection));
        assert_eq!(engine.jump_to(0), Err(GameError::AwaitingSizeSelection));
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_select_size_starts_fresh_game() {
        let mut engine = GameEngine::new();
        engine.select_size(4).unwrap();
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.board().len(), 16);
        assert_eq!(engine.win_length(), 4);
        assert_eq!(engine.turn(), Player::X);
        assert_eq!(engine.cursor(), 0);
        assert_eq!(engine.outcome(), &Outcome::Undecided);
    }

    #[test]
    fn test_invalid_size_leaves_game_untouched() {
        let mut engine = GameEngine::with_size(3).unwrap();
        engine.play_move(4).unwrap();
        assert_eq!(engine.select_size(11), Err(GameError::InvalidSize(11)));
        assert_eq!(engine.size().get(), 3);
        assert_eq!(engine.history_len(), 2);
    }

    #[test]
    fn test_play_move_alternates_players() {
        let mut engine = GameEngine::with_size(3).unwrap();
        let first = engine.play_move(0).unwrap();
        let second = engine.play_move(1).unwrap();
        assert_eq!(first.player, Player::X);
        assert_eq!(second.player, Player::O);
        assert_eq!(engine.board()[0], Cell::X);
        assert_eq!(engine.board()[1], Cell::O);
        assert_eq!(engine.turn(), Player::X);
        assert_eq!(engine.last_move(), Some(1));
    }

    #[test]
    fn test_out_of_range_move_rejected() {
        let mut engine = GameEngine::with_size(2).unwrap();
        assert_eq!(
            engine.play_move(4),
            Err(GameError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut engine = GameEngine::with_size(3).unwrap();
        engine.play_move(4).unwrap();
        assert_eq!(engine.play_move(4), Err(GameError::IllegalMove { index: 4 }));
        assert_eq!(engine.history_len(), 2);
        assert_eq!(engine.turn(), Player::O);
    }

    #[test]
    fn test_step_navigation_bounds() {
        let mut engine = GameEngine::with_size(3).unwrap();
        assert!(matches!(
            engine.step_back(),
            Err(GameError::IndexOutOfRange { index: 0, len: 1 })
        ));
        assert!(matches!(
            engine.step_forward(),
            Err(GameError::IndexOutOfRange { index: 1, len: 1 })
        ));

        engine.play_move(0).unwrap();
        engine.play_move(1).unwrap();
        engine.step_back().unwrap();
        assert_eq!(engine.cursor(), 1);
        assert!(engine.can_step_forward());
        engine.jump_to_start().unwrap();
        assert_eq!(engine.last_move(), None);
        engine.jump_to_end().unwrap();
        assert_eq!(engine.cursor(), 2);
        assert!(!engine.can_step_forward());
    }

    #[test]
    fn test_change_size_suspends_play_until_selection() {
        let mut engine = GameEngine::with_size(3).unwrap();
        for index in [0, 4, 1, 5, 2] {
            engine.play_move(index).unwrap();
        }
        assert_eq!(engine.phase(), GamePhase::GameOver);

        engine.change_size();
        assert_eq!(engine.phase(), GamePhase::Selecting);
        assert_eq!(engine.history_len(), 1);
        assert_eq!(engine.cursor(), 0);
        assert_eq!(engine.outcome(), &Outcome::Undecided);
        assert_eq!(engine.board().mark_count(), 0);
        assert!(!engine.can_step_back());
        assert!(engine.highlighted_cells().is_empty());
        assert_eq!(engine.play_move(1), Err(GameError::AwaitingSizeSelection));
        assert_eq!(engine.step_back(), Err(GameError::AwaitingSizeSelection));

        engine.select_size(5).unwrap();
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.history_len(), 1);
        assert_eq!(engine.board().len(), 25);
    }

    #[test]
    fn test_reset_keeps_size() {
        let mut engine = GameEngine::with_size(6).unwrap();
        engine.play_move(7).unwrap();
        engine.reset();
        assert_eq!(engine.size().get(), 6);
        assert_eq!(engine.history_len(), 1);
        assert_eq!(engine.board().mark_count(), 0);
    }

    #[test]
    fn test_apply_action_reports_win() {
        let mut engine = GameEngine::with_size(2).unwrap();
        engine.apply_action(GameAction::PlayMove(0)).unwrap();
        engine.apply_action(GameAction::PlayMove(2)).unwrap();
        let events = engine.apply_action(GameAction::PlayMove(1)).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::MovePlayed {
                    player: Player::X,
                    index: 1,
                    move_number: 3,
                },
                GameEvent::GameWon {
                    player: Player::X,
                    cells: vec![0, 1],
                },
            ]
        );
        assert_eq!(engine.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_apply_action_reports_branch() {
        let mut engine = GameEngine::with_size(3).unwrap();
        for index in [0, 1, 2] {
            engine.play_move(index).unwrap();
        }
        engine.apply_action(GameAction::JumpTo(1)).unwrap();
        let events = engine.apply_action(GameAction::PlayMove(8)).unwrap();
        assert_eq!(
            events[0],
            GameEvent::BranchStarted {
                from: 1,
                discarded: 2
            }
        );
        assert_eq!(engine.history_len(), 3);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GameError::IllegalMove { index: 3 }.to_string(),
            "Cell 3 is already taken"
        );
        assert_eq!(
            GameError::InvalidSize(1).to_string(),
            "Unsupported board size: 1"
        );
    }
}
