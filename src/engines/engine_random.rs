//! Uniform random baseline engine.
//!
//! Picks any legal action for the side to move. Used as a sparring partner in
//! match series and in tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_errors::GameErrors;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::legal_actions;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "PlumGames Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), GameErrors> {
        if name != "Seed" {
            return Err(GameErrors::InvalidOption(format!("unknown option {name}")));
        }
        let seed: u64 = value.trim().parse().map_err(|_| {
            GameErrors::InvalidOption(format!("Seed expects an integer, got {value}"))
        })?;
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, GameErrors> {
        let actions = legal_actions(game_state);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            actions.len()
        ));

        out.best_move = actions.as_slice().choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_types::{Side, Variant};

    #[test]
    fn picks_a_legal_action() {
        let state = GameState::new(Variant::Chess);
        let mut engine = RandomEngine::with_seed(4);
        let out = engine.choose_move(&state).expect("engine runs");
        let picked = out.best_move.expect("opening has moves");
        assert!(legal_actions(&state).contains(&picked));
        assert_eq!(out.info_lines, vec!["info string random_engine legal_moves 20".to_owned()]);
    }

    #[test]
    fn same_seed_same_choice() {
        let state = GameState::new(Variant::Go);
        let a = RandomEngine::with_seed(99).choose_move(&state).expect("engine runs");
        let b = RandomEngine::with_seed(99).choose_move(&state).expect("engine runs");
        assert_eq!(a.best_move, b.best_move);
    }

    #[test]
    fn finished_game_yields_no_move() {
        let state = GameState::new(Variant::Gomoku)
            .forfeit(Side::White)
            .expect("in progress");
        let out = RandomEngine::with_seed(1).choose_move(&state).expect("engine runs");
        assert!(out.best_move.is_none());
    }
}
