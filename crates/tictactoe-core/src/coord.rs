//! Grid coordinates and line directions on a square board.
//!
//! Boards are stored flat in row-major order. This module maps between a flat
//! cell index and its `(x, y)` position and provides the four line directions
//! used for win detection:
//! - `Coord`: a column/row pair that may lie off the board
//! - `Direction`: horizontal, vertical and the two diagonals
//!
//! `y` grows downward, so `(1, 1)` runs toward the bottom-right and `(1, -1)`
//! toward the top-right.

use serde::{Deserialize, Serialize};

/// A line direction, expressed as a unit step `(dx, dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right, `(1, 0)`
    Horizontal,
    /// Top to bottom, `(0, 1)`
    Vertical,
    /// Top-left to bottom-right, `(1, 1)`
    Diagonal,
    /// Bottom-left to top-right, `(1, -1)`
    AntiDiagonal,
}

impl Direction {
    /// All directions in detection order. The order is the tie-break when a
    /// cell completes runs in more than one direction.
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// The unit step of this direction
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Column/row position on the grid.
///
/// Components are signed so that walking past an edge yields a coordinate
/// that `to_index` rejects rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Coord {
    /// Column, increases to the right
    pub x: i32,
    /// Row, increases downward
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position of a flat row-major index on a board of `size` columns
    pub fn from_index(index: usize, size: usize) -> Self {
        Self::new((index % size) as i32, (index / size) as i32)
    }

    /// Flat index of this coordinate, or `None` if it lies off a
    /// `size × size` board
    pub fn to_index(&self, size: usize) -> Option<usize> {
        if self.is_within(size) {
            Some(self.y as usize * size + self.x as usize)
        } else {
            None
        }
    }

    /// Whether both components are in `[0, size)`
    pub fn is_within(&self, size: usize) -> bool {
        let size = size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    /// The coordinate `steps` unit steps away along `direction`.
    /// Negative `steps` walk the opposite sense.
    pub fn offset(&self, direction: Direction, steps: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + steps * dx, self.y + steps * dy)
    }
}
