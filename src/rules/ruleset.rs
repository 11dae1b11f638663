//! Per-variant rule selection.
//!
//! A `Ruleset` is chosen once when a game starts and travels with the
//! `GameState`; movement variants carry their legality predicate so callers
//! never branch on the variant to find it.

use std::fmt;

use crate::game_state::board::Board;
use crate::game_state::game_types::{Piece, Position, Variant};
use crate::rules::{banqi_moves, chess_moves, go_captures, xiangqi_moves};

/// Signature shared by the movement legality predicates.
pub type LegalityFn = fn(&Piece, Position, &Board) -> bool;

#[derive(Clone, Copy)]
pub enum Ruleset {
    Xiangqi(LegalityFn),
    Chess(LegalityFn),
    Banqi(LegalityFn),
    Go,
    Gomoku,
}

impl Ruleset {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Xiangqi => Ruleset::Xiangqi(xiangqi_moves::is_legal),
            Variant::Chess => Ruleset::Chess(chess_moves::is_legal),
            Variant::Banqi => Ruleset::Banqi(banqi_moves::is_legal),
            Variant::Go => Ruleset::Go,
            Variant::Gomoku => Ruleset::Gomoku,
        }
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        match self {
            Ruleset::Xiangqi(_) => Variant::Xiangqi,
            Ruleset::Chess(_) => Variant::Chess,
            Ruleset::Banqi(_) => Variant::Banqi,
            Ruleset::Go => Variant::Go,
            Ruleset::Gomoku => Variant::Gomoku,
        }
    }

    /// The step predicate, `None` for stone-placement games.
    #[inline]
    pub fn movement(&self) -> Option<LegalityFn> {
        match *self {
            Ruleset::Xiangqi(f) | Ruleset::Chess(f) | Ruleset::Banqi(f) => Some(f),
            Ruleset::Go | Ruleset::Gomoku => None,
        }
    }

    /// Whether `piece` may step to `target`. Always false for placement games.
    #[inline]
    pub fn is_legal_move(&self, piece: &Piece, target: Position, board: &Board) -> bool {
        self.movement()
            .is_some_and(|is_legal| is_legal(piece, target, board))
    }

    /// Whether a stone may be placed at `pos`. Always false for movement games.
    #[inline]
    pub fn is_legal_placement(&self, pos: Position, board: &Board) -> bool {
        match self {
            Ruleset::Go | Ruleset::Gomoku => go_captures::is_legal_placement(pos, board),
            _ => false,
        }
    }
}

impl fmt::Debug for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ruleset::{:?}", self.variant())
    }
}

impl PartialEq for Ruleset {
    fn eq(&self, other: &Self) -> bool {
        self.variant() == other.variant()
    }
}

impl Eq for Ruleset {}
