//! Xiangqi move legality.
//!
//! Board orientation: Black occupies rows 0–4 and Red rows 5–9, the river
//! running between rows 4 and 5. Palaces span columns 3–5.

use crate::game_state::board::Board;
use crate::game_state::game_types::{Piece, PieceKind, Position, Side};
use crate::rules::legal_move_shared::{
    count_between, is_candidate_target, is_orthogonal_line, is_path_clear,
};

#[inline]
fn in_palace(side: Side, pos: Position) -> bool {
    let rows_ok = if side == Side::Red {
        pos.y >= 7
    } else {
        pos.y <= 2
    };
    (3..=5).contains(&pos.x) && rows_ok
}

/// Whether `pos` lies on `side`'s own half of the river.
#[inline]
fn on_home_side(side: Side, pos: Position) -> bool {
    if side == Side::Red {
        pos.y >= 5
    } else {
        pos.y <= 4
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

    match piece.kind {
        PieceKind::General => in_palace(piece.side, target) && adx + ady == 1,
        PieceKind::Advisor => in_palace(piece.side, target) && adx == 1 && ady == 1,
        PieceKind::Elephant => {
            if !on_home_side(piece.side, target) || adx != 2 || ady != 2 {
                return false;
            }
            let eye = Position::new(
                ((i16::from(from.x) + i16::from(target.x)) / 2) as u8,
                ((i16::from(from.y) + i16::from(target.y)) / 2) as u8,
            );
            !board.is_occupied(eye)
        }
        PieceKind::Horse => {
            let leg = match (adx, ady) {
                (1, 2) => from.offset(0, (dy / 2) as i8),
                (2, 1) => from.offset((dx / 2) as i8, 0),
                _ => return false,
            };
            leg.is_some_and(|leg| !board.is_occupied(leg))
        }
        PieceKind::Chariot => {
            is_orthogonal_line(from, target) && is_path_clear(from, target, board)
        }
        PieceKind::Cannon => {
            if !is_orthogonal_line(from, target) {
                return false;
            }
            let screens = count_between(from, target, board);
            if board.is_occupied(target) {
                screens == 1
            } else {
                screens == 0
            }
        }
        PieceKind::Soldier => {
            let forward = if piece.side == Side::Red { -1 } else { 1 };
            let crossed_river = !on_home_side(piece.side, from);
            (dx == 0 && dy == forward) || (crossed_river && dy == 0 && adx == 1)
        }
        _ => false,
    }
}

/// Detects two generals facing each other on an open file.
///
/// Provided as a rule-compliance probe; move application does not consult it.
pub fn flying_general_violated(board: &Board) -> bool {
    let general_of = |side: Side| {
        board
            .pieces_of(side)
            .find(|p| p.kind == PieceKind::General)
            .map(|p| p.position)
    };

    match (general_of(Side::Red), general_of(Side::Black)) {
        (Some(red), Some(black)) if red.x == black.x => is_path_clear(red, black, board),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_rules::XIANGQI_LAYOUT;
    use crate::game_state::game_types::{LayoutEntry, Variant};

    fn board_with(entries: &[LayoutEntry]) -> Board {
        Board::initialize(Variant::Xiangqi, entries).expect("valid layout")
    }

    fn piece_at(board: &Board, x: u8, y: u8) -> Piece {
        *board.get(Position::new(x, y)).expect("piece present")
    }

    #[test]
    fn elephant_blocked_eye() {
        let open = board_with(&[LayoutEntry::new(PieceKind::Elephant, Side::Red, 2, 9)]);
        let elephant = piece_at(&open, 2, 9);
        assert!(is_legal(&elephant, Position::new(4, 7), &open));

        let blocked = board_with(&[
            LayoutEntry::new(PieceKind::Elephant, Side::Red, 2, 9),
            LayoutEntry::new(PieceKind::Soldier, Side::Black, 3, 8),
        ]);
        let elephant = piece_at(&blocked, 2, 9);
        assert!(!is_legal(&elephant, Position::new(4, 7), &blocked));
    }

    #[test]
    fn elephant_cannot_cross_river() {
        let board = board_with(&[LayoutEntry::new(PieceKind::Elephant, Side::Red, 4, 5)]);
        let elephant = piece_at(&board, 4, 5);
        assert!(!is_legal(&elephant, Position::new(2, 3), &board));
        assert!(is_legal(&elephant, Position::new(2, 7), &board));
    }

    #[test]
    fn cannon_needs_exactly_one_screen_to_capture() {
        let no_screen = board_with(&[
            LayoutEntry::new(PieceKind::Cannon, Side::Red, 1, 7),
            LayoutEntry::new(PieceKind::Horse, Side::Black, 1, 2),
        ]);
        let cannon = piece_at(&no_screen, 1, 7);
        assert!(!is_legal(&cannon, Position::new(1, 2), &no_screen));

        let one_screen = board_with(&[
            LayoutEntry::new(PieceKind::Cannon, Side::Red, 1, 7),
            LayoutEntry::new(PieceKind::Soldier, Side::Red, 1, 5),
            LayoutEntry::new(PieceKind::Horse, Side::Black, 1, 2),
        ]);
        let cannon = piece_at(&one_screen, 1, 7);
        assert!(is_legal(&cannon, Position::new(1, 2), &one_screen));
        assert!(!is_legal(&cannon, Position::new(1, 3), &one_screen));

        let friendly_target = board_with(&[
            LayoutEntry::new(PieceKind::Cannon, Side::Red, 1, 7),
            LayoutEntry::new(PieceKind::Soldier, Side::Black, 1, 5),
            LayoutEntry::new(PieceKind::Horse, Side::Red, 1, 2),
        ]);
        let cannon = piece_at(&friendly_target, 1, 7);
        assert!(!is_legal(&cannon, Position::new(1, 2), &friendly_target));
    }

    #[test]
    fn horse_leg_blocks_long_axis_only() {
        let board = board_with(&[
            LayoutEntry::new(PieceKind::Horse, Side::Red, 4, 5),
            LayoutEntry::new(PieceKind::Soldier, Side::Red, 4, 4),
        ]);
        let horse = piece_at(&board, 4, 5);
        assert!(!is_legal(&horse, Position::new(3, 3), &board));
        assert!(!is_legal(&horse, Position::new(5, 3), &board));
        assert!(is_legal(&horse, Position::new(6, 4), &board));
        assert!(is_legal(&horse, Position::new(3, 7), &board));
    }

    #[test]
    fn general_and_advisor_stay_in_palace() {
        let board = board_with(&[
            LayoutEntry::new(PieceKind::General, Side::Black, 3, 1),
            LayoutEntry::new(PieceKind::Advisor, Side::Black, 4, 1),
        ]);
        let general = piece_at(&board, 3, 1);
        assert!(!is_legal(&general, Position::new(2, 1), &board));
        assert!(is_legal(&general, Position::new(3, 2), &board));
        assert!(!is_legal(&general, Position::new(4, 2), &board));

        let advisor = piece_at(&board, 4, 1);
        assert!(is_legal(&advisor, Position::new(5, 2), &board));
        assert!(!is_legal(&advisor, Position::new(4, 2), &board));
    }

    #[test]
    fn soldier_moves_sideways_only_after_crossing() {
        let board = board_with(&[
            LayoutEntry::new(PieceKind::Soldier, Side::Red, 4, 6),
            LayoutEntry::new(PieceKind::Soldier, Side::Red, 0, 4),
        ]);
        let home = piece_at(&board, 4, 6);
        assert!(is_legal(&home, Position::new(4, 5), &board));
        assert!(!is_legal(&home, Position::new(3, 6), &board));
        assert!(!is_legal(&home, Position::new(4, 7), &board));

        let crossed = piece_at(&board, 0, 4);
        assert!(is_legal(&crossed, Position::new(1, 4), &board));
        assert!(is_legal(&crossed, Position::new(0, 3), &board));
        assert!(!is_legal(&crossed, Position::new(0, 5), &board));
    }

    #[test]
    fn chariot_blocked_by_intervening_piece() {
        let board = Board::initialize(Variant::Xiangqi, &XIANGQI_LAYOUT).expect("valid layout");
        let chariot = piece_at(&board, 0, 9);
        assert!(is_legal(&chariot, Position::new(0, 7), &board));
        assert!(!is_legal(&chariot, Position::new(0, 5), &board));
    }

    #[test]
    fn flying_generals_detected_on_open_file() {
        let facing = board_with(&[
            LayoutEntry::new(PieceKind::General, Side::Black, 4, 0),
            LayoutEntry::new(PieceKind::General, Side::Red, 4, 9),
        ]);
        assert!(flying_general_violated(&facing));

        let screened = board_with(&[
            LayoutEntry::new(PieceKind::General, Side::Black, 4, 0),
            LayoutEntry::new(PieceKind::Soldier, Side::Black, 4, 3),
            LayoutEntry::new(PieceKind::General, Side::Red, 4, 9),
        ]);
        assert!(!flying_general_violated(&screened));

        let start = Board::initialize(Variant::Xiangqi, &XIANGQI_LAYOUT).expect("valid layout");
        assert!(!flying_general_violated(&start));
    }
}
