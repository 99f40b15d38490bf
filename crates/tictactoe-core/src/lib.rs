//! Tic-Tac-Toe on square boards from 2x2 up to 10x10
//!
//! This crate provides the core game logic, including:
//! - Board representation and the size-dependent win-length rule
//! - Win and draw detection in all four line directions
//! - A game state machine with move history, jumps and branching
//!
//! # Architecture
//!
//! The engine is pure and synchronous and performs no I/O. It can be compiled to:
//! - Native Rust for terminal or test hosts
//! - WebAssembly for a browser front end (`wasm` feature)
//!
//! # Modules
//!
//! - [`player`]: The two players and turn order
//! - [`coord`]: Grid coordinates and line directions
//! - [`board`]: Cells, board snapshots and supported sizes
//! - [`detector`]: Win and draw detection
//! - [`game`]: The history-backed game state machine
//! - [`actions`]: Serializable actions and events
//! - [`view`]: Serializable render state

pub mod actions;
pub mod board;
pub mod coord;
pub mod detector;
pub mod game;
pub mod player;
pub mod view;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use board::{Board, BoardSize, Cell};
pub use coord::{Coord, Direction};
pub use detector::{detect, Outcome};
pub use game::{GameEngine, GameError, GamePhase, PlayedMove, Snapshot};
pub use player::Player;
pub use view::GameView;
