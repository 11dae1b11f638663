//! Legal action enumeration.
//!
//! Destinations come from a row-major scan of the board filtered by the
//! ruleset's legality predicate. `legal_actions` lists every action the side
//! to move may take: steps for movement games, flips of face-down Banqi
//! pieces, and placements for stone games.

use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{GameMove, Piece, Position, Variant};
use crate::rules::ruleset::Ruleset;

/// Every cell `piece` may step to under `ruleset`, in row-major order.
/// Placement rulesets never yield destinations.
pub fn enumerate_moves(piece: &Piece, board: &Board, ruleset: Ruleset) -> Vec<Position> {
    let Some(is_legal) = ruleset.movement() else {
        return Vec::new();
    };
    board
        .positions()
        .filter(|&target| is_legal(piece, target, board))
        .collect()
}

/// Destinations for `piece` in `state`; empty once the game is decided.
pub fn legal_destinations(state: &GameState, piece: &Piece) -> Vec<Position> {
    if state.is_terminal() {
        return Vec::new();
    }
    enumerate_moves(piece, &state.board, state.ruleset)
}

/// Empty cells a stone may be placed on, in row-major order.
pub fn legal_placements(state: &GameState) -> Vec<Position> {
    if state.is_terminal() {
        return Vec::new();
    }
    state
        .board
        .positions()
        .filter(|&pos| state.ruleset.is_legal_placement(pos, &state.board))
        .collect()
}

/// Face-down Banqi pieces of either side, in row-major order.
pub fn legal_flips(state: &GameState) -> Vec<Position> {
    if state.is_terminal() || state.variant() != Variant::Banqi {
        return Vec::new();
    }
    state
        .board
        .pieces()
        .filter(|p| !p.revealed)
        .map(|p| p.position)
        .collect()
}

/// Every step of every piece owned by the side to move.
pub fn legal_steps(state: &GameState) -> Vec<GameMove> {
    if state.is_terminal() {
        return Vec::new();
    }
    state
        .board
        .pieces_of(state.side_to_move)
        .flat_map(|piece| {
            let from = piece.position;
            enumerate_moves(piece, &state.board, state.ruleset)
                .into_iter()
                .map(move |to| GameMove::Step { from, to })
        })
        .collect()
}

/// All actions available to the side to move.
pub fn legal_actions(state: &GameState) -> Vec<GameMove> {
    if state.variant().is_placement() {
        return legal_placements(state)
            .into_iter()
            .map(|at| GameMove::Place { at })
            .collect();
    }

    let mut actions = legal_steps(state);
    actions.extend(legal_flips(state).into_iter().map(|at| GameMove::Flip { at }));
    actions
}
