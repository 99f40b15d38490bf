//! Plain-text rendering of replies.

use crate::protocol::{HistoryEntry, Reply};
use std::fmt::Write;
use tictactoe_core::{BoardSize, GameEvent, GamePhase, GameView, Outcome};

pub const HELP: &str = "\
Commands:
  size N      start a game on an NxN board
  play I      mark cell I (a bare number works too)
  jump N      go to move N
  start, <    go to the start / one move back
  end, >      go to the latest move / one move forward
  reset       restart on the current board size
  resize      choose a different board size
  show        print the board
  history     list moves
  quit        leave";

/// Render any reply as text. The result has no trailing newline.
pub fn render_reply(reply: &Reply) -> String {
    match reply {
        Reply::State { view } => render_view(view),
        Reply::Events { events } => events
            .iter()
            .filter_map(render_event)
            .collect::<Vec<_>>()
            .join("\n"),
        Reply::Sizes { offered } => render_sizes(offered),
        Reply::History { entries } => render_history(entries),
        Reply::Help { text } => text.clone(),
        Reply::Error { message } => format!("! {}", message),
        Reply::Goodbye => "Bye!".to_string(),
    }
}

/// Description, status line and board
pub fn render_view(view: &GameView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", describe_phase(view));
    if view.phase == GamePhase::Selecting {
        out.push_str(&render_sizes(&BoardSize::OFFERED));
        return out;
    }

    let status = match &view.outcome {
        Outcome::Undecided => format!("Next player: {}", view.turn),
        decided => decided.to_string(),
    };
    let _ = writeln!(
        out,
        "{}   (move {} of {})",
        status,
        view.cursor,
        view.history_len - 1
    );
    out.push_str(&render_grid(view));
    out
}

fn describe_phase(view: &GameView) -> String {
    let base = "A simple logic game";
    match view.phase {
        GamePhase::Selecting => format!("{}, select a board size to begin.", base),
        GamePhase::Playing => format!(
            "{}, place X and O in turn, collect {} in a row, a column, or diagonally to win.",
            base, view.win_length
        ),
        GamePhase::GameOver => format!(
            "{}. The game is over. You can reset or select a new board size. \
             Or go back to a previous move and continue playing.",
            base
        ),
    }
}

/// The board as a grid. Column headers and row labels are cell indices, so the
/// index of a cell is its row label plus its column header. Highlighted cells
/// are bracketed.
fn render_grid(view: &GameView) -> String {
    let size = view.size as usize;
    let mut out = String::from("    ");
    for x in 0..size {
        let _ = write!(out, "{:^3}", x);
    }

    for (y, row) in view.cells.chunks(size).enumerate() {
        let _ = write!(out, "\n{:>3} ", y * size);
        for (x, cell) in row.iter().enumerate() {
            let symbol = cell.player().map_or('.', |player| player.symbol());
            if view.highlighted.contains(&(y * size + x)) {
                let _ = write!(out, "[{}]", symbol);
            } else {
                let _ = write!(out, " {} ", symbol);
            }
        }
    }
    out
}

fn render_sizes(offered: &[u8]) -> String {
    let sizes = offered
        .iter()
        .map(|n| format!("{}x{}", n, n))
        .collect::<Vec<_>>()
        .join(" ");
    format!("Select Board Size: {}  (\"size N\")", sizes)
}

fn render_history(entries: &[HistoryEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let marker = if entry.current { ">" } else { " " };
            format!("{} {:>3}. {}", marker, entry.move_number, entry.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per notable event. Routine events are left to the board render.
fn render_event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::SizeSelected { size, win_length } => {
            Some(format!("New {} game: {} in a row wins.", size, win_length))
        }
        GameEvent::BranchStarted { from, discarded } => Some(format!(
            "Continuing from move {}; {} later move(s) discarded.",
            from, discarded
        )),
        GameEvent::GameWon { player, .. } => Some(format!("Player {} wins!", player)),
        GameEvent::GameDrawn => Some("It's a draw!".to_string()),
        GameEvent::SizeSelectionOpened
        | GameEvent::MovePlayed { .. }
        | GameEvent::Jumped { .. } => None,
    }
}
