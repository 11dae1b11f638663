//! Banqi (dark chess) move legality.
//!
//! Pieces start face down. Only revealed pieces move, and face-down pieces
//! can never be captured. Capture follows rank order, with the soldier/general
//! reversal; the cannon captures by jumping exactly one piece.

use crate::game_state::board::Board;
use crate::game_state::game_types::{Piece, PieceKind, Position};
use crate::rules::legal_move_shared::{
    count_between, is_candidate_target, is_orthogonal_line, is_orthogonal_step,
};

/// Rank dominance between two Banqi kinds, ignoring geometry.
///
/// Soldier beats general; general never takes soldier; otherwise the higher
/// or equal rank wins.
#[inline]
pub fn captures_by_rank(attacker: PieceKind, defender: PieceKind) -> bool {
    match (attacker, defender) {
        (PieceKind::Soldier, PieceKind::General) => true,
        (PieceKind::General, PieceKind::Soldier) => false,
        _ => attacker.banqi_rank() >= defender.banqi_rank(),
    }
}

/// Whether `piece` may move to `target` on `board`.
pub fn is_legal(piece: &Piece, target: Position, board: &Board) -> bool {
    if !piece.revealed || !is_candidate_target(piece, target, board) {
        return false;
    }

    let from = piece.position;
    let occupant = board.get(target);
    if occupant.is_some_and(|p| !p.revealed) {
        return false;
    }

    if piece.kind == PieceKind::Cannon {
        return match occupant {
            Some(_) => is_orthogonal_line(from, target) && count_between(from, target, board) == 1,
            None => is_orthogonal_step(from, target),
        };
    }

    if !is_orthogonal_step(from, target) {
        return false;
    }

    match occupant {
        None => true,
        Some(defender) => captures_by_rank(piece.kind, defender.kind),
    }
}
