//! Actions a presentation layer can request and the events they produce.
//!
//! Both types are serializable so they can cross the WebAssembly boundary or
//! a line-oriented JSON protocol unchanged.

use crate::board::BoardSize;
use crate::player::Player;
use serde::{Deserialize, Serialize};

/// All operations the engine accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Board Setup ====================
    /// Start a fresh game on an `n × n` board
    SelectSize(u8),
    /// Start a fresh game on the current board size
    Reset,
    /// Suspend play until a new size is selected
    ChangeSize,

    // ==================== Play ====================
    /// Mark a cell for the player to move
    PlayMove(usize),

    // ==================== History ====================
    /// Display a specific snapshot
    JumpTo(usize),
    /// Display the empty starting board
    JumpToStart,
    /// Display the previous snapshot
    StepBack,
    /// Display the next snapshot
    StepForward,
    /// Display the latest snapshot
    JumpToEnd,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game started
    SizeSelected { size: BoardSize, win_length: usize },

    /// Play is suspended until a size is chosen
    SizeSelectionOpened,

    /// A move was played from an earlier snapshot, discarding the future
    BranchStarted { from: usize, discarded: usize },

    /// A mark was placed
    MovePlayed {
        player: Player,
        index: usize,
        move_number: usize,
    },

    /// The last move completed a winning run
    GameWon { player: Player, cells: Vec<usize> },

    /// The last move filled the board without a winner
    GameDrawn,

    /// The displayed snapshot changed
    Jumped {
        cursor: usize,
        last_move: Option<usize>,
    },
}
