//! Crate root module declarations for the Plum Games rule engine.
//!
//! One grid model serves five games (Xiangqi, Chess, Banqi, Go and Gomoku).
//! This file exposes the game state, per-variant rules, move generation and
//! application, the heuristic engines, and utility helpers so binaries, tests
//! and benchmarks can import stable module paths.

pub mod game_errors;

pub mod game_state {
    pub mod board;
    pub mod game_rules;
    pub mod game_state;
    pub mod game_types;
}

pub mod rules {
    pub mod banqi_moves;
    pub mod chess_moves;
    pub mod go_captures;
    pub mod gomoku_lines;
    pub mod legal_move_shared;
    pub mod ruleset;
    pub mod xiangqi_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_generator;
}

pub mod engines {
    pub mod engine_config;
    pub mod engine_heuristic;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod render_game_state;
}
