//! Tunable weights for the heuristic move selector.
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! defense_weight = 1.25
//! flip_base_score = 12
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game_errors::GameErrors;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Multiplier on the opponent's score for a cell in stone games.
    pub defense_weight: f64,
    /// Score of any legal step before capture bonuses.
    pub move_base_score: i32,
    /// Banqi flips score this minus the mover's revealed piece count.
    pub flip_base_score: i32,
    /// Banqi capture score per rank of the captured piece.
    pub banqi_capture_multiplier: i32,
    /// Banqi penalty per mover rank for each threatening neighbour.
    pub banqi_exposure_penalty: i32,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            defense_weight: 1.1,
            move_base_score: 5,
            flip_base_score: 15,
            banqi_capture_multiplier: 10,
            banqi_exposure_penalty: 5,
        }
    }
}

impl HeuristicConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, GameErrors> {
        toml::from_str(text).map_err(|e| GameErrors::Config(format!("failed to parse: {e}")))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, GameErrors> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GameErrors::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, GameErrors> {
        toml::to_string_pretty(self)
            .map_err(|e| GameErrors::Config(format!("failed to serialize: {e}")))
    }
}
