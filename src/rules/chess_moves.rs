//! International chess move legality without castling, en passant,
//! promotion or check detection.
//!
//! White starts on rows 6–7 and moves toward row 0.

use crate::game_state::board::Board;
use crate::game_state::game_types::{Piece, PieceKind, Position, Side};
use crate::rules::legal_move_shared::{is_candidate_target, is_path_clear, line_step};

#[inline]
fn pawn_direction(side: Side) -> i16 {
    if side == Side::White {
        -1
    } else {
        1
    }
}

#[inline]
fn pawn_start_row(side: Side) -> u8 {
    if side == Side::White {
        6
    } else {
        1
    }
}

/// Whether `piece` may move to `target` on `board`.
pub fn is_legal(piece: &Piece, target: Position, board: &Board) -> bool {
    if !is_candidate_target(piece, target, board) {
        return false;
    }

    let from = piece.position;
    let (dx, dy) = from.delta_to(target);
    let (adx, ady) = (dx.abs(), dy.abs());
    let target_occupied = board.is_occupied(target);

    match piece.kind {
        PieceKind::Pawn => {
            let dir = pawn_direction(piece.side);
            if dx == 0 && dy == dir {
                return !target_occupied;
            }
            if dx == 0 && dy == 2 * dir && from.y == pawn_start_row(piece.side) {
                return !target_occupied && is_path_clear(from, target, board);
            }
            adx == 1 && dy == dir && target_occupied
        }
        PieceKind::Rook => (dx == 0 || dy == 0) && is_path_clear(from, target, board),
        PieceKind::Bishop => adx == ady && is_path_clear(from, target, board),
        PieceKind::Queen => line_step(from, target).is_some() && is_path_clear(from, target, board),
        PieceKind::Knight => (adx == 1 && ady == 2) || (adx == 2 && ady == 1),
        PieceKind::King => adx <= 1 && ady <= 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_rules::CHESS_LAYOUT;
    use crate::game_state::game_types::{LayoutEntry, Variant};

    fn destinations(piece: &Piece, board: &Board) -> Vec<Position> {
        board
            .positions()
            .filter(|&pos| is_legal(piece, pos, board))
            .collect()
    }

    #[test]
    fn pawn_on_start_rank_has_two_forward_moves() {
        let board = Board::initialize(Variant::Chess, &CHESS_LAYOUT).expect("valid layout");
        let pawn = *board.get(Position::new(4, 6)).expect("white e-pawn");
        assert_eq!(
            destinations(&pawn, &board),
            vec![Position::new(4, 4), Position::new(4, 5)]
        );
    }

    #[test]
    fn pawn_captures_diagonally_and_loses_double_step_after_moving() {
        let board = Board::initialize(
            Variant::Chess,
            &[
                LayoutEntry::new(PieceKind::Pawn, Side::White, 3, 6),
                LayoutEntry::new(PieceKind::Knight, Side::Black, 2, 5),
                LayoutEntry::new(PieceKind::Bishop, Side::Black, 4, 5),
            ],
        )
        .expect("valid layout");
        let pawn = *board.get(Position::new(3, 6)).expect("pawn");
        assert_eq!(destinations(&pawn, &board).len(), 4);

        let moved = board.place(Position::new(3, 5), pawn).expect("in bounds");
        let pawn = *moved.get(Position::new(3, 5)).expect("pawn");
        assert_eq!(destinations(&pawn, &moved), vec![Position::new(3, 4)]);
    }

    #[test]
    fn pawn_double_step_blocked_by_piece_in_between() {
        let board = Board::initialize(
            Variant::Chess,
            &[
                LayoutEntry::new(PieceKind::Pawn, Side::Black, 0, 1),
                LayoutEntry::new(PieceKind::Rook, Side::White, 0, 2),
            ],
        )
        .expect("valid layout");
        let pawn = *board.get(Position::new(0, 1)).expect("pawn");
        assert!(destinations(&pawn, &board).is_empty());
    }

    #[test]
    fn sliders_respect_path_and_knight_jumps() {
        let board = Board::initialize(Variant::Chess, &CHESS_LAYOUT).expect("valid layout");
        let queen = *board.get(Position::new(3, 7)).expect("queen");
        let knight = *board.get(Position::new(1, 7)).expect("knight");
        assert!(destinations(&queen, &board).is_empty());
        assert_eq!(
            destinations(&knight, &board),
            vec![Position::new(0, 5), Position::new(2, 5)]
        );
    }

    #[test]
    fn king_moves_one_cell_any_direction() {
        let board = Board::initialize(
            Variant::Chess,
            &[LayoutEntry::new(PieceKind::King, Side::White, 4, 4)],
        )
        .expect("valid layout");
        let king = *board.get(Position::new(4, 4)).expect("king");
        assert_eq!(destinations(&king, &board).len(), 8);
    }
}
