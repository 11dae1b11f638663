//! State transitions: steps, stone placements, Banqi flips and engine moves.
//!
//! Every function takes the current state by reference and returns a fresh
//! `GameState`; on error the caller still holds the untouched original.

use tracing::debug;

use crate::engines::engine_trait::Engine;
use crate::game_errors::GameErrors;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{GameMove, MoveRecord, Piece, PieceKind, Position, Variant};
use crate::rules::{go_captures, gomoku_lines};

/// Move the piece on `from` to `to`, capturing whatever stands there.
///
/// In Xiangqi, Chess and Banqi the mover wins as soon as the opponent's
/// general or king is no longer on the board.
pub fn apply_move(
    state: &GameState,
    from: Position,
    to: Position,
) -> Result<GameState, GameErrors> {
    state.ensure_in_progress()?;
    let variant = state.variant();
    if variant.is_placement() {
        return Err(GameErrors::WrongActionForVariant(variant));
    }
    for pos in [from, to] {
        if !state.board.contains(pos) {
            return Err(GameErrors::OutOfBounds(pos));
        }
    }

    let piece = *state.board.get(from).ok_or(GameErrors::EmptySquare(from))?;
    if piece.side != state.side_to_move {
        return Err(GameErrors::NotYourTurn(state.side_to_move));
    }
    if !state.ruleset.is_legal_move(&piece, to, &state.board) {
        return Err(GameErrors::IllegalMove { from, to });
    }

    let mover = state.side_to_move;
    let opponent = state.opponent();
    let taken = state.board.get(to).copied();
    let board = state.board.place(to, piece)?;

    let mut next = GameState {
        board,
        side_to_move: opponent,
        ..state.clone()
    };
    if let Some(victim) = taken {
        next.captured[victim.side.index()].push(victim);
    }
    if variant.has_royal_piece() && !next.board.is_king_present(opponent) {
        next.winner = Some(mover);
    }
    next.history.push(MoveRecord {
        side: mover,
        game_move: GameMove::Step { from, to },
        piece_kind: piece.kind,
        captured: taken.into_iter().collect(),
    });

    debug!(
        %variant,
        side = %mover,
        piece = piece.kind.name(),
        %from,
        %to,
        captured = taken.map(|p| p.kind.name()),
        "move applied"
    );
    if let Some(winner) = next.winner {
        debug!(%variant, %winner, "royal piece captured, game over");
    }
    Ok(next)
}

/// Drop a stone for the side to move on the empty cell `pos`.
///
/// Go removes every enemy group left without liberties. Gomoku checks for a
/// line of five through the new stone.
pub fn apply_placement(state: &GameState, pos: Position) -> Result<GameState, GameErrors> {
    state.ensure_in_progress()?;
    let variant = state.variant();
    if !variant.is_placement() {
        return Err(GameErrors::WrongActionForVariant(variant));
    }
    if !state.board.contains(pos) {
        return Err(GameErrors::OutOfBounds(pos));
    }
    if !state.ruleset.is_legal_placement(pos, &state.board) {
        return Err(GameErrors::IllegalPlacement(pos));
    }

    let mover = state.side_to_move;
    let opponent = state.opponent();
    let stone = Piece::new(state.next_piece_id, PieceKind::Stone, mover, pos);
    let placed = state.board.place(pos, stone)?;

    let (board, taken) = match variant {
        Variant::Go => go_captures::apply_captures(&placed, mover),
        _ => (placed, Vec::new()),
    };
    let won = variant == Variant::Gomoku && gomoku_lines::check_win(&board, pos, mover);

    let mut next = GameState {
        board,
        side_to_move: opponent,
        next_piece_id: state.next_piece_id.saturating_add(1),
        ..state.clone()
    };
    let taken_count = taken.len();
    next.captured[opponent.index()].extend(taken.iter().copied());
    if won {
        next.winner = Some(mover);
    }
    next.history.push(MoveRecord {
        side: mover,
        game_move: GameMove::Place { at: pos },
        piece_kind: PieceKind::Stone,
        captured: taken,
    });

    debug!(%variant, side = %mover, %pos, captured = taken_count, "stone placed");
    if won {
        debug!(%variant, winner = %mover, "five in a row, game over");
    }
    Ok(next)
}

/// Turn a face-down Banqi piece face up. Any hidden piece may be flipped by
/// the side to move; the turn passes afterwards.
pub fn apply_flip(state: &GameState, pos: Position) -> Result<GameState, GameErrors> {
    state.ensure_in_progress()?;
    let variant = state.variant();
    if variant != Variant::Banqi {
        return Err(GameErrors::WrongActionForVariant(variant));
    }
    if !state.board.contains(pos) {
        return Err(GameErrors::OutOfBounds(pos));
    }
    let piece = *state.board.get(pos).ok_or(GameErrors::EmptySquare(pos))?;
    if piece.revealed {
        return Err(GameErrors::AlreadyRevealed(pos));
    }

    let mover = state.side_to_move;
    let board = state.board.with_piece(pos, |p| Piece { revealed: true, ..p })?;
    let mut next = GameState {
        board,
        side_to_move: state.opponent(),
        ..state.clone()
    };
    next.history.push(MoveRecord {
        side: mover,
        game_move: GameMove::Flip { at: pos },
        piece_kind: piece.kind,
        captured: Vec::new(),
    });

    debug!(
        %variant,
        side = %mover,
        %pos,
        revealed = piece.kind.name(),
        owner = %piece.side,
        "piece flipped"
    );
    Ok(next)
}

/// Dispatch any `GameMove` to the matching transition.
pub fn apply_action(state: &GameState, action: GameMove) -> Result<GameState, GameErrors> {
    match action {
        GameMove::Step { from, to } => apply_move(state, from, to),
        GameMove::Flip { at } => apply_flip(state, at),
        GameMove::Place { at } => apply_placement(state, at),
    }
}

/// Let `engine` play for the side to move. When it finds nothing to play the
/// opponent is declared the winner.
pub fn apply_ai_move(state: &GameState, engine: &mut dyn Engine) -> Result<GameState, GameErrors> {
    state.ensure_in_progress()?;
    let output = engine.choose_move(state)?;
    for line in &output.info_lines {
        debug!(engine = engine.name(), "{line}");
    }

    match output.best_move {
        Some(action) => apply_action(state, action),
        None => {
            let winner = state.opponent();
            debug!(
                variant = %state.variant(),
                stuck = %state.side_to_move,
                %winner,
                "no legal moves, game over"
            );
            Ok(GameState {
                winner: Some(winner),
                ..state.clone()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engines::engine_config::HeuristicConfig;
    use crate::engines::engine_heuristic::HeuristicEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::game_state::board::Board;
    use crate::game_state::game_types::{LayoutEntry, Side};

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y)
    }

    fn custom(variant: Variant, layout: &[LayoutEntry], to_move: Side) -> GameState {
        let board = Board::initialize(variant, layout).expect("valid layout");
        GameState {
            side_to_move: to_move,
            ..GameState::from_board(variant, board)
        }
    }

    #[test]
    fn xiangqi_soldier_advance_vacates_origin() {
        let state = GameState::new(Variant::Xiangqi);
        let next = apply_move(&state, pos(4, 6), pos(4, 5)).expect("soldier may advance");
        assert!(next.board.get(pos(4, 6)).is_none());
        let soldier = next.board.get(pos(4, 5)).expect("soldier moved");
        assert_eq!((soldier.kind, soldier.side), (PieceKind::Soldier, Side::Red));
        assert_eq!(next.side_to_move, Side::Black);
        assert_eq!(next.history.len(), 1);
        assert_eq!(state.board.get(pos(4, 6)).map(|p| p.kind), Some(PieceKind::Soldier));
    }

    #[test]
    fn xiangqi_opening_cannon_cannot_slide_through_a_screen() {
        let state = GameState::new(Variant::Xiangqi);
        assert_eq!(
            apply_move(&state, pos(1, 7), pos(1, 1)),
            Err(GameErrors::IllegalMove {
                from: pos(1, 7),
                to: pos(1, 1)
            })
        );
        assert_eq!(
            apply_move(&state, pos(1, 7), pos(1, 3)).map(|s| s.side_to_move),
            Ok(Side::Black)
        );
    }

    #[test]
    fn xiangqi_cannon_capture_records_the_horse() {
        let state = GameState::new(Variant::Xiangqi);
        let next = apply_move(&state, pos(1, 7), pos(1, 0)).expect("one screen at (1,2)");
        let lost = next.captured(Side::Black);
        assert_eq!(lost.len(), 1);
        assert_eq!(lost[0].kind, PieceKind::Horse);
        assert!(next.captured(Side::Red).is_empty());
        assert_eq!(next.history[0].captured.len(), 1);
        assert!(next.winner.is_none());
    }

    #[test]
    fn wrong_side_and_empty_squares_are_rejected() {
        let state = GameState::new(Variant::Chess);
        assert_eq!(
            apply_move(&state, pos(4, 1), pos(4, 2)),
            Err(GameErrors::NotYourTurn(Side::White))
        );
        assert_eq!(
            apply_move(&state, pos(4, 4), pos(4, 3)),
            Err(GameErrors::EmptySquare(pos(4, 4)))
        );
        assert_eq!(
            apply_move(&state, pos(4, 6), pos(4, 8)),
            Err(GameErrors::OutOfBounds(pos(4, 8)))
        );
        assert_eq!(
            apply_placement(&state, pos(4, 4)),
            Err(GameErrors::WrongActionForVariant(Variant::Chess))
        );
        assert_eq!(
            apply_flip(&state, pos(4, 6)),
            Err(GameErrors::WrongActionForVariant(Variant::Chess))
        );
    }

    #[test]
    fn capturing_the_king_ends_the_game() {
        let state = custom(
            Variant::Chess,
            &[
                LayoutEntry::new(PieceKind::Rook, Side::White, 0, 0),
                LayoutEntry::new(PieceKind::King, Side::Black, 5, 0),
                LayoutEntry::new(PieceKind::King, Side::White, 4, 7),
            ],
            Side::White,
        );
        let next = apply_move(&state, pos(0, 0), pos(5, 0)).expect("rook takes king");
        assert_eq!(next.winner, Some(Side::White));
        assert_eq!(
            apply_move(&next, pos(4, 7), pos(4, 6)),
            Err(GameErrors::TerminalStateViolation(Side::White))
        );
    }

    #[test]
    fn gomoku_fifth_stone_wins() {
        let mut state = GameState::new(Variant::Gomoku);
        for x in 0..4 {
            state = apply_placement(&state, pos(x, 0)).expect("black");
            state = apply_placement(&state, pos(x, 1)).expect("white");
        }
        assert!(state.winner.is_none());
        let done = apply_placement(&state, pos(4, 0)).expect("black completes five");
        assert_eq!(done.winner, Some(Side::Black));
        assert_eq!(
            apply_placement(&done, pos(4, 1)),
            Err(GameErrors::TerminalStateViolation(Side::Black))
        );
    }

    #[test]
    fn occupied_cell_is_not_placeable() {
        let state = apply_placement(&GameState::new(Variant::Go), pos(3, 3)).expect("black");
        assert_eq!(
            apply_placement(&state, pos(3, 3)),
            Err(GameErrors::IllegalPlacement(pos(3, 3)))
        );
        assert_eq!(apply_placement(&state, pos(19, 3)), Err(GameErrors::OutOfBounds(pos(19, 3))));
    }

    #[test]
    fn go_capture_lands_in_captured_collection() {
        // Black surrounds the white stone at (1,1) and takes it with (1,2).
        let mut state = GameState::new(Variant::Go);
        for (black, white) in [((1, 0), (1, 1)), ((0, 1), (9, 9)), ((2, 1), (9, 10))] {
            state = apply_placement(&state, pos(black.0, black.1)).expect("black");
            state = apply_placement(&state, pos(white.0, white.1)).expect("white");
        }
        let next = apply_placement(&state, pos(1, 2)).expect("black captures");
        assert!(next.board.get(pos(1, 1)).is_none());
        assert_eq!(next.captured(Side::White).len(), 1);
        assert_eq!(next.history.last().map(|r| r.captured.len()), Some(1));
        assert_eq!(next.side_to_move, Side::White);
        assert!(next.winner.is_none());
        assert_eq!(next.next_piece_id, 7);
    }

    #[test]
    fn flip_reveals_in_place_and_passes_the_turn() {
        let state = GameState::new_with_rng(Variant::Banqi, &mut StdRng::seed_from_u64(8));
        let target = pos(3, 2);
        let before = *state.board.get(target).expect("full board");
        let next = apply_flip(&state, target).expect("hidden piece");

        let after = next.board.get(target).expect("still there");
        assert!(after.revealed);
        assert_eq!((after.id, after.kind, after.side), (before.id, before.kind, before.side));
        assert_eq!(next.side_to_move, Side::Black);
        assert_eq!(next.board.pieces().count(), 32);
        assert_eq!(apply_flip(&next, target), Err(GameErrors::AlreadyRevealed(target)));
    }

    #[test]
    fn banqi_hidden_piece_cannot_be_moved() {
        let state = GameState::new_with_rng(Variant::Banqi, &mut StdRng::seed_from_u64(8));
        let red_hidden = state
            .board
            .pieces_of(Side::Red)
            .map(|p| p.position)
            .find(|p| p.x + 1 < 8)
            .expect("red pieces exist");
        let result = apply_move(&state, red_hidden, pos(red_hidden.x + 1, red_hidden.y));
        assert!(matches!(result, Err(GameErrors::IllegalMove { .. })));
    }

    #[test]
    fn engine_without_moves_concedes() {
        let state = custom(
            Variant::Chess,
            &[LayoutEntry::new(PieceKind::King, Side::Black, 0, 0)],
            Side::White,
        );
        let mut engine = HeuristicEngine::with_seed(HeuristicConfig::default(), 1);
        let next = apply_ai_move(&state, &mut engine).expect("engine runs");
        assert_eq!(next.winner, Some(Side::Black));
        assert!(next.history.is_empty());
    }

    #[test]
    fn engine_move_is_applied_for_the_side_to_move() {
        let state = GameState::new(Variant::Gomoku);
        let mut engine = RandomEngine::with_seed(12);
        let next = apply_ai_move(&state, &mut engine).expect("engine runs");
        assert_eq!(next.board.pieces_of(Side::Black).count(), 1);
        assert_eq!(next.side_to_move, Side::White);
    }
}
