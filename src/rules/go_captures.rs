//! Go placement legality and group capture.
//!
//! After a stone is placed, every opponent group without liberties is
//! removed. No ko and no suicide rule.

use std::collections::{HashSet, VecDeque};

use crate::game_state::board::Board;
use crate::game_state::game_types::{Piece, Position, Side, Variant};
use crate::rules::legal_move_shared::ORTHOGONAL_STEPS;

/// A maximal set of orthogonally connected same-side stones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoneGroup {
    pub side: Side,
    /// Members in BFS discovery order, seed first.
    pub stones: Vec<Position>,
    /// Distinct empty cells adjacent to any member.
    pub liberties: usize,
}

/// In bounds and empty.
#[inline]
pub fn is_legal_placement(pos: Position, board: &Board) -> bool {
    board.is_vacant(pos)
}

fn neighbors(board: &Board, pos: Position) -> impl Iterator<Item = Position> + '_ {
    ORTHOGONAL_STEPS
        .iter()
        .filter_map(move |&(dx, dy)| pos.offset(dx, dy))
        .filter(move |&n| board.contains(n))
}

/// Breadth-first search from `seed`, marking every member in `visited`.
fn flood_group(
    board: &Board,
    seed: Position,
    visited: &mut HashSet<Position>,
) -> Option<StoneGroup> {
    let side = board.get(seed)?.side;

    let mut stones = Vec::new();
    let mut liberties = HashSet::new();
    let mut queue = VecDeque::from([seed]);
    visited.insert(seed);

    while let Some(current) = queue.pop_front() {
        stones.push(current);
        for n in neighbors(board, current) {
            match board.get(n) {
                None => {
                    liberties.insert(n);
                }
                Some(stone) if stone.side == side && visited.insert(n) => queue.push_back(n),
                Some(_) => {}
            }
        }
    }

    Some(StoneGroup {
        side,
        stones,
        liberties: liberties.len(),
    })
}

/// The group containing the stone at `pos`, if any.
pub fn group_at(board: &Board, pos: Position) -> Option<StoneGroup> {
    flood_group(board, pos, &mut HashSet::new())
}

/// Every group of `side`, discovered in row-major order of their first stone.
pub fn groups_of(board: &Board, side: Side) -> Vec<StoneGroup> {
    let mut visited = HashSet::new();
    let seeds: Vec<Position> = board.pieces_of(side).map(|p| p.position).collect();
    seeds
        .into_iter()
        .filter_map(|seed| {
            if visited.contains(&seed) {
                None
            } else {
                flood_group(board, seed, &mut visited)
            }
        })
        .collect()
}

/// Remove every opponent group left without liberties by `just_moved`'s stone.
///
/// All groups are judged against the board as it stood before this pass, then
/// removed together. Returns the new board and the captured stones in the
/// order they were found.
pub fn apply_captures(board: &Board, just_moved: Side) -> (Board, Vec<Piece>) {
    let opponent = just_moved.opponent_in(Variant::Go);
    let dead: Vec<Position> = groups_of(board, opponent)
        .into_iter()
        .filter(|group| group.liberties == 0)
        .flat_map(|group| group.stones)
        .collect();

    if dead.is_empty() {
        return (board.clone(), Vec::new());
    }

    let captured = dead.iter().filter_map(|&pos| board.get(pos).copied()).collect();
    (board.remove_all(&dead), captured)
}
