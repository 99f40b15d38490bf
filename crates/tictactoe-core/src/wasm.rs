//! WebAssembly bindings for the Tic-Tac-Toe engine.
//!
//! This module exposes the engine to JavaScript through wasm-bindgen. Rich
//! values cross the boundary as JSON strings; errors become string `JsValue`s.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::GameAction;
#[cfg(feature = "wasm")]
use crate::board::BoardSize;
#[cfg(feature = "wasm")]
use crate::game::{GameEngine, GameError};
#[cfg(feature = "wasm")]
use crate::player::Player;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Sizes the size-selection menu should offer
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = offeredSizes)]
pub fn offered_sizes() -> Vec<u8> {
    BoardSize::OFFERED.to_vec()
}

/// Win length for a board size, or an error for unsupported sizes
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = winLengthFor)]
pub fn win_length_for(size: u8) -> Result<usize, JsValue> {
    BoardSize::new(size)
        .map(|size| size.win_length())
        .map_err(to_js)
}

#[cfg(feature = "wasm")]
fn to_js(error: GameError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    engine: GameEngine,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a game waiting for a board size
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            engine: GameEngine::new(),
        }
    }

    /// Start a fresh game on an `n × n` board
    #[wasm_bindgen(js_name = selectSize)]
    pub fn select_size(&mut self, size: u8) -> Result<(), JsValue> {
        self.engine.select_size(size).map_err(to_js)
    }

    /// Start a fresh game on the current size
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Return to the size-selection screen
    #[wasm_bindgen(js_name = changeSize)]
    pub fn change_size(&mut self) {
        self.engine.change_size();
    }

    /// Play a move, returning the played cell index for highlighting
    #[wasm_bindgen(js_name = playMove)]
    pub fn play_move(&mut self, index: usize) -> Result<usize, JsValue> {
        self.engine
            .play_move(index)
            .map(|played| played.index)
            .map_err(to_js)
    }

    /// Display a history snapshot
    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, cursor: usize) -> Result<(), JsValue> {
        self.engine.jump_to(cursor).map_err(to_js)
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        match self.engine.apply_action(action) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
        }
    }

    /// Get the full render state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.engine.view()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the displayed board's cells as JSON
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        serde_json::to_string(self.engine.board().cells()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the displayed snapshot's outcome as JSON
    #[wasm_bindgen(js_name = getOutcome)]
    pub fn get_outcome(&self) -> String {
        serde_json::to_string(self.engine.outcome()).unwrap_or_else(|_| "null".to_string())
    }

    /// Number of recorded snapshots
    #[wasm_bindgen(js_name = getHistoryLength)]
    pub fn get_history_length(&self) -> usize {
        self.engine.history_len()
    }

    /// Index of the displayed snapshot
    #[wasm_bindgen(js_name = getCursor)]
    pub fn get_cursor(&self) -> usize {
        self.engine.cursor()
    }

    /// Whether X is to move
    #[wasm_bindgen(js_name = isXNext)]
    pub fn is_x_next(&self) -> bool {
        self.engine.turn() == Player::X
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
