//! Line protocol between the terminal and a game session.
//!
//! Commands arrive either as short text (`play 4`) or, in JSON mode, as one
//! tagged object per line (`{"type":"Play","payload":{"index":4}}`). Replies use
//! the same tagged form.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tictactoe_core::{GameAction, GameEvent, GameView};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0} (try \"help\")")]
    Unknown(String),

    #[error("\"{0}\" needs a number")]
    MissingArgument(&'static str),

    #[error("Not a number: {0}")]
    InvalidNumber(String),

    /// A size too large to name any board; the engine validates the rest
    #[error("Unsupported board size: {0}")]
    InvalidSize(usize),

    #[error("Invalid JSON command: {0}")]
    Json(#[from] serde_json::Error),
}

/// Messages sent from the terminal to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    /// Start a game on an `n × n` board
    SelectSize { size: u8 },

    /// Mark a cell
    Play { index: usize },

    /// Display a history snapshot
    JumpTo { cursor: usize },

    /// Display the empty board
    Start,

    /// Step one move back
    Back,

    /// Step one move forward
    Forward,

    /// Display the latest move
    End,

    /// Restart on the current size
    Reset,

    /// Open board size selection
    ChangeSize,

    /// Print the current state
    Show,

    /// List the move history
    History,

    /// List commands
    Help,

    /// End the session
    Quit,
}

impl Command {
    /// Parse a text command such as `play 4` or `back`
    pub fn parse_text(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let mut number = |command: &'static str| -> Result<usize, CommandError> {
            let word = words.next().ok_or(CommandError::MissingArgument(command))?;
            word.parse()
                .map_err(|_| CommandError::InvalidNumber(word.to_string()))
        };

        let command = match name.as_str() {
            "size" => {
                let size = number("size")?;
                let size = u8::try_from(size).map_err(|_| CommandError::InvalidSize(size))?;
                Command::SelectSize { size }
            }
            "play" | "p" => Command::Play {
                index: number("play")?,
            },
            "jump" | "j" => Command::JumpTo {
                cursor: number("jump")?,
            },
            "start" | "<<" => Command::Start,
            "back" | "<" => Command::Back,
            "forward" | ">" => Command::Forward,
            "end" | ">>" => Command::End,
            "reset" => Command::Reset,
            "resize" => Command::ChangeSize,
            "show" => Command::Show,
            "history" | "h" => Command::History,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                // A bare number is shorthand for `play N`.
                match other.parse() {
                    Ok(index) => Command::Play { index },
                    Err(_) => return Err(CommandError::Unknown(other.to_string())),
                }
            }
        };

        Ok(command)
    }

    /// Parse a JSON command line
    pub fn parse_json(line: &str) -> Result<Self, CommandError> {
        Ok(serde_json::from_str(line)?)
    }

    /// The engine action this command maps to, if any
    pub fn action(&self) -> Option<GameAction> {
        match *self {
            Command::SelectSize { size } => Some(GameAction::SelectSize(size)),
            Command::Play { index } => Some(GameAction::PlayMove(index)),
            Command::JumpTo { cursor } => Some(GameAction::JumpTo(cursor)),
            Command::Start => Some(GameAction::JumpToStart),
            Command::Back => Some(GameAction::StepBack),
            Command::Forward => Some(GameAction::StepForward),
            Command::End => Some(GameAction::JumpToEnd),
            Command::Reset => Some(GameAction::Reset),
            Command::ChangeSize => Some(GameAction::ChangeSize),
            Command::Show | Command::History | Command::Help | Command::Quit => None,
        }
    }
}

/// One line of the history list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub move_number: usize,
    pub label: String,
    pub current: bool,
}

impl HistoryEntry {
    pub fn new(move_number: usize, current: bool) -> Self {
        let label = if move_number == 0 {
            "Go to game start".to_string()
        } else {
            format!("Go to move #{}", move_number)
        };
        Self {
            move_number,
            label,
            current,
        }
    }
}

/// Messages sent from the session to the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Reply {
    /// Current render state
    State { view: GameView },

    /// Events produced by the last action
    Events { events: Vec<GameEvent> },

    /// Board sizes that can be selected
    Sizes { offered: Vec<u8> },

    /// Move history
    History { entries: Vec<HistoryEntry> },

    /// Command reference
    Help { text: String },

    /// The command was rejected; nothing changed
    Error { message: String },

    /// Session ending
    Goodbye,
}
