//! Engine abstraction shared by the built-in move selectors.
//!
//! Callers drive an engine with a `GameState` snapshot and receive the chosen
//! action plus a few human-readable diagnostic lines.

use crate::game_errors::GameErrors;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::GameMove;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOutput {
    /// `None` when the side to move has nothing to play.
    pub best_move: Option<GameMove>,
    /// Heuristic score of `best_move`, when the engine scores moves.
    pub score: Option<f64>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Reset per-game state. Engines without any keep the default.
    fn new_game(&mut self) {}

    /// Apply a named runtime option. Unknown names are rejected.
    fn set_option(&mut self, name: &str, _value: &str) -> Result<(), GameErrors> {
        Err(GameErrors::InvalidOption(format!("unknown option {name}")))
    }

    fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, GameErrors>;
}
