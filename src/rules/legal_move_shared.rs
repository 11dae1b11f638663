//! Geometry helpers shared by the per-variant legality predicates.

use crate::game_state::board::Board;
use crate::game_state::game_types::{Piece, Position};

pub const ORTHOGONAL_STEPS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Common preconditions for a step: in bounds, not the origin, and not onto
/// a friendly piece.
#[inline]
pub fn is_candidate_target(piece: &Piece, target: Position, board: &Board) -> bool {
    if !board.contains(target) || target == piece.position {
        return false;
    }
    !matches!(board.get(target), Some(occupant) if occupant.side == piece.side)
}

/// Unit step from `from` toward `to` when the two lie on a rank, file or
/// diagonal; `None` otherwise (including `from == to`).
#[inline]
pub fn line_step(from: Position, to: Position) -> Option<(i8, i8)> {
    let (dx, dy) = from.delta_to(to);
    if (dx, dy) == (0, 0) {
        return None;
    }
    let aligned = dx == 0 || dy == 0 || dx.abs() == dy.abs();
    aligned.then(|| (dx.signum() as i8, dy.signum() as i8))
}

/// Cells strictly between `from` and `to`, walking unit steps.
/// Empty when the two are not aligned.
pub fn cells_between(from: Position, to: Position) -> Vec<Position> {
    let Some((sx, sy)) = line_step(from, to) else {
        return Vec::new();
    };

    let mut cells = Vec::new();
    let mut current = from.offset(sx, sy);
    while let Some(pos) = current {
        if pos == to {
            break;
        }
        cells.push(pos);
        current = pos.offset(sx, sy);
    }
    cells
}

/// Number of occupied cells strictly between two aligned positions.
#[inline]
pub fn count_between(from: Position, to: Position, board: &Board) -> usize {
    cells_between(from, to)
        .into_iter()
        .filter(|&pos| board.is_occupied(pos))
        .count()
}

/// True when no intermediate cell is occupied. The destination itself is not
/// inspected.
#[inline]
pub fn is_path_clear(from: Position, to: Position, board: &Board) -> bool {
    count_between(from, to, board) == 0
}

/// True when `from` and `to` share a rank or file.
#[inline]
pub fn is_orthogonal_line(from: Position, to: Position) -> bool {
    from != to && (from.x == to.x || from.y == to.y)
}

/// True for a single orthogonal step.
#[inline]
pub fn is_orthogonal_step(from: Position, to: Position) -> bool {
    let (dx, dy) = from.delta_to(to);
    dx.abs() + dy.abs() == 1
}
