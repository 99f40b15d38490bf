//! Player marks.
//!
//! This module contains:
//! - The two players, `X` and `O`
//! - Turn derivation from a history cursor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

/// One of the two players. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Both players in move order
    pub const ALL: [Player; 2] = [Player::X, Player::O];

    /// The player to move once `cursor` moves have been played.
    ///
    /// Snapshot 0 is the empty board, so even cursors are X's turn.
    pub fn for_cursor(cursor: usize) -> Self {
        if cursor % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Single-letter symbol used when rendering a cell
    pub fn symbol(&self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_moves_first() {
        assert_eq!(Player::for_cursor(0), Player::X);
        assert_eq!(Player::for_cursor(1), Player::O);
        assert_eq!(Player::for_cursor(8), Player::X);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(!Player::X, Player::O);
        assert_eq!(!!Player::O, Player::O);
    }

    #[test]
    fn test_display() {
        assert_eq!(Player::X.to_string(), "X");
        assert_eq!(format!("{}", Player::O), "O");
    }
}
