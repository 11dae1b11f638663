//! Gomoku five-in-a-row detection and the line heuristic used by the AI.
//!
//! Freestyle rules: any run of five or more wins, no forbidden moves.

use crate::game_state::board::Board;
use crate::game_state::game_types::{Position, Side};

/// Horizontal, vertical and both diagonals.
pub const AXES: [(i8, i8); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

pub const WIN_LENGTH: usize = 5;

/// Contiguous `side` stones starting one step from `pos` along `(dx, dy)`.
/// Returns the count and the first cell past the run (if on the board).
fn run_from(board: &Board, pos: Position, dx: i8, dy: i8, side: Side) -> (usize, Option<Position>) {
    let mut count = 0;
    let mut current = pos.offset(dx, dy).filter(|&p| board.contains(p));
    while let Some(cell) = current {
        match board.get(cell) {
            Some(stone) if stone.side == side => {
                count += 1;
                current = cell.offset(dx, dy).filter(|&p| board.contains(p));
            }
            _ => break,
        }
    }
    (count, current)
}

/// Length of the `side` line through `pos` along one axis, counting `pos`.
pub fn line_length(board: &Board, pos: Position, axis: (i8, i8), side: Side) -> usize {
    let (dx, dy) = axis;
    let (forward, _) = run_from(board, pos, dx, dy, side);
    let (backward, _) = run_from(board, pos, -dx, -dy, side);
    1 + forward + backward
}

/// Whether the stone just placed at `last` completes five or more in a row.
pub fn check_win(board: &Board, last: Position, side: Side) -> bool {
    AXES.iter()
        .any(|&axis| line_length(board, last, axis, side) >= WIN_LENGTH)
}

/// Per-axis contribution of a run of `run` stones with `open_ends` free ends.
#[inline]
pub fn pattern_score(run: usize, open_ends: usize) -> i32 {
    match (run, open_ends) {
        (r, _) if r >= 4 => 10_000,
        (3, 2) => 5_000,
        (3, 1) => 1_000,
        (2, 2) => 500,
        (r, _) => r as i32 * 10,
    }
}

/// Heuristic value of `side` playing the empty cell `pos`.
///
/// For each axis the neighbouring `side` stones on both sides are counted
/// (the cell itself excluded) along with how many of the two cells just past
/// the run are empty and on the board. Axis scores are summed.
pub fn score(board: &Board, pos: Position, side: Side) -> i32 {
    AXES.iter()
        .map(|&(dx, dy)| {
            let (forward, forward_end) = run_from(board, pos, dx, dy, side);
            let (backward, backward_end) = run_from(board, pos, -dx, -dy, side);
            let open_ends = [forward_end, backward_end]
                .into_iter()
                .flatten()
                .filter(|&cell| !board.is_occupied(cell))
                .count();
            pattern_score(forward + backward, open_ends)
        })
        .sum()
}
