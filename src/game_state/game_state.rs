//! Complete game snapshot.
//!
//! `GameState` bundles the variant's ruleset, the current board, whose turn it
//! is, the winner once decided, captured pieces per seat and the action
//! history. Transitions live in `move_generation::legal_move_apply` and always
//! produce a new state.

use rand::Rng;
use tracing::debug;

use crate::game_errors::GameErrors;
use crate::game_state::board::Board;
use crate::game_state::game_rules::starting_board;
use crate::game_state::game_types::{MoveRecord, Piece, Side, Variant};
use crate::rules::ruleset::Ruleset;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub ruleset: Ruleset,
    pub board: Board,
    pub side_to_move: Side,
    pub winner: Option<Side>,
    /// Captured pieces by owner seat (`Side::index`).
    pub captured: [Vec<Piece>; 2],
    pub history: Vec<MoveRecord>,
    /// Next id handed to a freshly placed stone.
    pub next_piece_id: u32,
}

impl GameState {
    /// New game with an OS-seeded random source (only Banqi's deal uses it).
    pub fn new(variant: Variant) -> Self {
        Self::new_with_rng(variant, &mut rand::rng())
    }

    pub fn new_with_rng<R: Rng + ?Sized>(variant: Variant, rng: &mut R) -> Self {
        Self::from_board(variant, starting_board(variant, rng))
    }

    /// Start from an arbitrary board with the variant's first mover to play.
    pub fn from_board(variant: Variant, board: Board) -> Self {
        let next_piece_id = board
            .pieces()
            .map(|p| p.id.saturating_add(1))
            .max()
            .unwrap_or(0);
        Self {
            ruleset: Ruleset::for_variant(variant),
            board,
            side_to_move: variant.first_to_move(),
            winner: None,
            captured: [Vec::new(), Vec::new()],
            history: Vec::new(),
            next_piece_id,
        }
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.ruleset.variant()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    #[inline]
    pub fn opponent(&self) -> Side {
        self.side_to_move.opponent_in(self.variant())
    }

    /// Pieces of `side` that have been captured.
    #[inline]
    pub fn captured(&self, side: Side) -> &[Piece] {
        &self.captured[side.index()]
    }

    /// Rejects any action once a winner is set.
    #[inline]
    pub fn ensure_in_progress(&self) -> Result<(), GameErrors> {
        match self.winner {
            Some(side) => Err(GameErrors::TerminalStateViolation(side)),
            None => Ok(()),
        }
    }

    /// Declare `loser`'s opponent the winner without consulting legality, for
    /// example when an external clock runs out.
    pub fn forfeit(&self, loser: Side) -> Result<GameState, GameErrors> {
        self.ensure_in_progress()?;
        let winner = loser.opponent_in(self.variant());
        debug!(variant = %self.variant(), %loser, %winner, "game forfeited");
        Ok(GameState {
            winner: Some(winner),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game_state::game_types::{PieceKind, Position};

    #[test]
    fn first_movers_per_variant() {
        let mut rng = StdRng::seed_from_u64(1);
        let expected = [
            (Variant::Xiangqi, Side::Red),
            (Variant::Chess, Side::White),
            (Variant::Banqi, Side::Red),
            (Variant::Go, Side::Black),
            (Variant::Gomoku, Side::Black),
        ];
        for (variant, side) in expected {
            let state = GameState::new_with_rng(variant, &mut rng);
            assert_eq!(state.side_to_move, side, "{variant}");
            assert_eq!(state.variant(), variant);
            assert!(state.winner.is_none());
        }
    }

    #[test]
    fn initial_xiangqi_board_matches_layout() {
        let state = GameState::new(Variant::Xiangqi);
        assert_eq!((state.board.width(), state.board.height()), (9, 10));
        let cannon = state.board.get(Position::new(1, 7)).expect("red cannon");
        assert_eq!((cannon.kind, cannon.side), (PieceKind::Cannon, Side::Red));
        assert_eq!(state.next_piece_id, 32);
    }

    #[test]
    fn forfeit_sets_winner_once() {
        let state = GameState::new(Variant::Gomoku);
        let over = state.forfeit(Side::Black).expect("game in progress");
        assert_eq!(over.winner, Some(Side::White));
        assert!(state.winner.is_none());
        assert_eq!(
            over.forfeit(Side::White),
            Err(GameErrors::TerminalStateViolation(Side::White))
        );
    }
}
