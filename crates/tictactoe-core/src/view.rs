//! Render snapshot of the engine.
//!
//! `GameView` flattens everything a presentation layer reads after each
//! operation into one serializable value.

use crate::board::Cell;
use crate::detector::Outcome;
use crate::game::{GameEngine, GamePhase};
use crate::player::Player;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Board edge length
    pub size: u8,
    /// Run length needed to win
    pub win_length: usize,
    /// Cells of the displayed snapshot, row-major
    pub cells: Vec<Cell>,
    /// Index of the displayed snapshot
    pub cursor: usize,
    /// Number of recorded snapshots
    pub history_len: usize,
    /// Player to move from the displayed snapshot
    pub turn: Player,
    pub outcome: Outcome,
    /// Cell marked by the move that produced the displayed snapshot
    pub last_move: Option<usize>,
    /// Cells to emphasise
    pub highlighted: Vec<usize>,
    pub phase: GamePhase,
    pub can_step_back: bool,
    pub can_step_forward: bool,
}

impl From<&GameEngine> for GameView {
    fn from(engine: &GameEngine) -> Self {
        Self {
            size: engine.size().get(),
            win_length: engine.win_length(),
            cells: engine.board().cells().to_vec(),
            cursor: engine.cursor(),
            history_len: engine.history_len(),
            turn: engine.turn(),
            outcome: engine.outcome().clone(),
            last_move: engine.last_move(),
            highlighted: engine.highlighted_cells(),
            phase: engine.phase(),
            can_step_back: engine.can_step_back(),
            can_step_forward: engine.can_step_forward(),
        }
    }
}
