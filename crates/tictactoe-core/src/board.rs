//! Board representation and size rules.
//!
//! This module contains:
//! - Cell contents (empty or marked by a player)
//! - `BoardSize`, the allow-listed square sizes and their win lengths
//! - `Board`, an immutable-by-convention snapshot of `size²` cells in
//!   row-major order
//! - Board queries used by the engine and the win detector

use crate::coord::Coord;
use crate::detector::{self, Outcome};
use crate::game::GameError;
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, RangeInclusive};

/// Contents of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// The player owning this cell, if any
    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// A supported board edge length.
///
/// Construction is the only place sizes are validated; every `BoardSize` in
/// circulation has a defined win length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BoardSize(u8);

impl BoardSize {
    /// Every size the engine accepts
    pub const SUPPORTED: RangeInclusive<u8> = 2..=10;

    /// Sizes presented by a size-selection menu
    pub const OFFERED: [u8; 6] = [2, 3, 4, 5, 6, 10];

    /// Smallest board, used before any size is chosen
    pub const MIN: BoardSize = BoardSize(2);

    /// Validate a board edge length
    pub fn new(size: u8) -> Result<Self, GameError> {
        if Self::SUPPORTED.contains(&size) {
            Ok(Self(size))
        } else {
            Err(GameError::InvalidSize(size))
        }
    }

    /// Edge length in cells
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Edge length as a `usize` for indexing
    pub fn edge(&self) -> usize {
        self.0 as usize
    }

    /// Number of cells on the board (`size²`)
    pub fn cell_count(&self) -> usize {
        self.edge() * self.edge()
    }

    /// Length of the straight run needed to win on this size
    pub fn win_length(&self) -> usize {
        match self.0 {
            2 => 2,
            3 => 3,
            4 | 5 => 4,
            _ => 5,
        }
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for BoardSize {
    type Error = GameError;

    fn try_from(size: u8) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<BoardSize> for u8 {
    fn from(size: BoardSize) -> Self {
        size.0
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// A board snapshot: `size²` cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl Board {
    /// An all-empty board
    pub fn empty(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.cell_count()],
        }
    }

    /// Build a board from explicit cells.
    ///
    /// Returns `None` unless `cells.len()` is `size²`.
    pub fn from_cells(size: BoardSize, cells: Vec<Cell>) -> Option<Self> {
        (cells.len() == size.cell_count()).then_some(Self { size, cells })
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Number of cells (`size²`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a board has at least four cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `index`, or `None` if out of range
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// The cell at a grid coordinate, or `None` if it lies off the board
    pub fn at(&self, coord: Coord) -> Option<Cell> {
        coord
            .to_index(self.size.edge())
            .and_then(|index| self.get(index))
    }

    /// Rows of the board from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.size.edge())
    }

    /// Whether no empty cell remains
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of marked cells
    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// A copy of this board with `player`'s mark written at `index`.
    ///
    /// The caller is responsible for checking that the index is in range and
    /// the cell is empty.
    pub fn with_mark(&self, index: usize, player: Player) -> Self {
        let mut next = self.clone();
        next.cells[index] = Cell::from(player);
        next
    }

    /// The first cell index where `self` and `other` differ.
    ///
    /// Consecutive history snapshots differ in exactly one cell, so this is
    /// the move that led from one to the other.
    pub fn first_difference(&self, other: &Board) -> Option<usize> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .position(|(a, b)| a != b)
    }

    /// Run the win detector on this snapshot with the size's win length
    pub fn outcome(&self) -> Outcome {
        detector::detect(&self.cells, self.size.edge(), self.size.win_length())
    }
}

impl Index<usize> for Board {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                match cell.player() {
                    Some(player) => write!(f, "{player}")?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}
