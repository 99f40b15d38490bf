//! Win and draw detection.
//!
//! Detection is stateless and works on a flat row-major slice of cells, so it
//! can be run on any history snapshot. For every occupied cell (in index order)
//! and every direction (in [`Direction::ALL`] order) the detector walks away
//! from the cell in both senses, collecting matching cells, and reports the
//! first run that reaches the required length.
//!
//! The cell order inside a run is fixed: the origin cell, then the cells found
//! walking in the negative sense, then the cells found walking in the positive
//! sense. Callers may rely on it for highlighting.

use crate::board::Cell;
use crate::coord::{Coord, Direction};
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of inspecting a board snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// No winner yet and at least one empty cell
    #[default]
    Undecided,
    /// `player` completed a run; `cells` are the run's indices
    Win { player: Player, cells: Vec<usize> },
    /// Board full without a winning run; `cells` is every index
    Draw { cells: Vec<usize> },
}

impl Outcome {
    /// Whether the game on this snapshot is over
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::Undecided)
    }

    /// The winning player, if any
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Cells to highlight for this outcome (empty while undecided)
    pub fn cells(&self) -> &[usize] {
        match self {
            Outcome::Undecided => &[],
            Outcome::Win { cells, .. } | Outcome::Draw { cells } => cells,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Undecided => write!(f, "Undecided"),
            Outcome::Win { player, .. } => write!(f, "Player {player} wins!"),
            Outcome::Draw { .. } => write!(f, "It's a draw!"),
        }
    }
}

/// Inspect a board and report a win, a draw, or neither.
///
/// `cells` should hold `size * size` entries; a slice of any other length is
/// not a board and reports `Undecided`. A `win_length` of zero or one makes
/// any single mark a winning run.
pub fn detect(cells: &[Cell], size: usize, win_length: usize) -> Outcome {
    if size == 0 || cells.len() != size * size {
        return Outcome::Undecided;
    }

    for (index, cell) in cells.iter().enumerate() {
        let Some(player) = cell.player() else {
            continue;
        };

        for direction in Direction::ALL {
            let run = run_through(cells, size, index, direction, win_length);
            if run.len() >= win_length {
                return Outcome::Win { player, cells: run };
            }
        }
    }

    if cells.iter().all(|cell| !cell.is_empty()) {
        return Outcome::Draw {
            cells: (0..cells.len()).collect(),
        };
    }

    Outcome::Undecided
}

/// Collect the run of cells matching `origin`'s mark along `direction`.
///
/// Each sense walks at most `win_length - 1` steps, so the result never holds
/// more than `2 * win_length - 1` cells. An `origin` outside `cells` yields an
/// empty run, and the walk stops at the end of a short slice.
pub fn run_through(
    cells: &[Cell],
    size: usize,
    origin: usize,
    direction: Direction,
    win_length: usize,
) -> Vec<usize> {
    let Some(&mark) = cells.get(origin).filter(|_| size > 0) else {
        return Vec::new();
    };
    let start = Coord::from_index(origin, size);
    let mut run = vec![origin];

    for sense in [-1, 1] {
        for step in 1..win_length as i32 {
            let Some(index) = start.offset(direction, step * sense).to_index(size) else {
                break;
            };
            if cells.get(index) != Some(&mark) {
                break;
            }
            run.push(index);
        }
    }

    run
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse a board from rows like `"XO."`
    fn parse(rows: &[&str]) -> (Vec<Cell>, usize) {
        let size = rows.len();
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                'X' => Cell::X,
                'O' => Cell::O,
                _ => Cell::Empty,
            })
            .collect::<Vec<_>>();
        assert_eq!(cells.len(), size * size);
        (cells, size)
    }

    #[test]
    fn test_empty_board_is_undecided() {
        let (cells, size) = parse(&["...", "...", "..."]);
        assert_eq!(detect(&cells, size, 3), Outcome::Undecided);
    }

    #[test]
    fn test_two_by_two_horizontal() {
        let (cells, size) = parse(&["XX", "O."]);
        assert_eq!(
            detect(&cells, size, 2),
            Outcome::Win {
                player: Player::X,
                cells: vec![0, 1]
            }
        );
    }

    #[test]
    fn test_vertical_run() {
        let (cells, size) = parse(&[".O.", "XO.", "XO."]);
        assert_eq!(
            detect(&cells, size, 3),
            Outcome::Win {
                player: Player::O,
                cells: vec![1, 4, 7]
            }
        );
    }

    #[test]
    fn test_main_diagonal() {
        let (cells, size) = parse(&["X.O", ".XO", "..X"]);
        assert_eq!(
            detect(&cells, size, 3),
            Outcome::Win {
                player: Player::X,
                cells: vec![0, 4, 8]
            }
        );
    }

    #[test]
    fn test_anti_diagonal() {
        // First occupied cell of the run in index order is 2 (top-right);
        // the negative sense of (1, -1) walks down-left from it.
        let (cells, size) = parse(&["XXO", ".O.", "O.X"]);
        assert_eq!(
            detect(&cells, size, 3),
            Outcome::Win {
                player: Player::O,
                cells: vec![2, 4, 6]
            }
        );
    }

    #[test]
    fn test_direction_tie_break_prefers_horizontal() {
        // Cell 0 completes both a row and a column.
        let (cells, size) = parse(&["XXX", "XO.", "XOO"]);
        assert_eq!(
            detect(&cells, size, 3),
            Outcome::Win {
                player: Player::X,
                cells: vec![0, 1, 2]
            }
        );
    }

    #[test]
    fn test_run_does_not_wrap_rows() {
        // 2 and 3 are adjacent in memory but on different rows.
        let (cells, size) = parse(&["..X", "X..", "..."]);
        assert_eq!(detect(&cells, size, 2), Outcome::Undecided);
    }

    #[test]
    fn test_draw_highlights_every_cell() {
        let (cells, size) = parse(&["XOX", "XOO", "OXX"]);
        assert_eq!(
            detect(&cells, size, 3),
            Outcome::Draw {
                cells: (0..9).collect()
            }
        );
    }

    #[test]
    fn test_win_on_full_board_is_not_a_draw() {
        let (cells, size) = parse(&["XXX", "OOX", "XOO"]);
        assert_eq!(detect(&cells, size, 3).winner(), Some(Player::X));
    }

    #[test]
    fn test_run_collects_both_senses_from_origin() {
        let (cells, size) = parse(&["....", "XXXX", "....", "...."]);
        assert_eq!(
            run_through(&cells, size, 5, Direction::Horizontal, 4),
            vec![5, 4, 6, 7]
        );
    }

    #[test]
    fn test_win_length_shorter_than_row() {
        let (cells, size) = parse(&[".....", ".OOOO", ".....", "XXX..", "....."]);
        assert_eq!(
            detect(&cells, size, 4),
            Outcome::Win {
                player: Player::O,
                cells: vec![6, 7, 8, 9]
            }
        );
    }

    #[test]
    fn test_detect_is_deterministic() {
        let (cells, size) = parse(&["XOX", "OXO", "X.."]);
        let first = detect(&cells, size, 3);
        for _ in 0..10 {
            assert_eq!(detect(&cells, size, 3), first);
        }
        assert!(first.is_decided());
    }

    #[test]
    fn test_slice_of_wrong_length_is_undecided() {
        assert_eq!(detect(&[Cell::X], 2, 2), Outcome::Undecided);
        assert_eq!(detect(&[Cell::X; 5], 2, 2), Outcome::Undecided);
        assert_eq!(detect(&[], 0, 2), Outcome::Undecided);
    }

    #[test]
    fn test_run_stops_at_end_of_short_slice() {
        let cells = [Cell::X, Cell::X, Cell::X];
        assert_eq!(run_through(&cells, 2, 0, Direction::Horizontal, 2), vec![0, 1]);
        assert_eq!(run_through(&cells, 2, 1, Direction::Vertical, 2), vec![1]);
        assert_eq!(run_through(&cells, 2, 7, Direction::Horizontal, 2), Vec::<usize>::new());
    }

    #[test]
    fn test_outcome_display() {
        let win = Outcome::Win {
            player: Player::O,
            cells: vec![0],
        };
        assert_eq!(win.to_string(), "Player O wins!");
        assert_eq!(Outcome::Draw { cells: vec![] }.to_string(), "It's a draw!");
    }
}
