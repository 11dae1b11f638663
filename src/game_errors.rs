//! Errors used throughout the game engine.
//!
//! `GameErrors` is the single error type returned by state transitions,
//! layout construction, engine selection and configuration loading.
//!
//! Usage guidelines:
//! - Legality predicates never return errors; they answer `bool` and an empty
//!   destination list means "nothing to do".
//! - Transition functions (`apply_move`, `apply_placement`, `apply_flip`,
//!   `apply_ai_move`) return `Result<GameState, GameErrors>` and never touch the
//!   state they were given, so a rejected request can simply be re-prompted.
//! - `MalformedLayout` signals a programmer error in a starting layout and is
//!   not expected at runtime.

use thiserror::Error;

use crate::game_state::game_types::{Position, Side, Variant};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameErrors {
    /// The requested step fails the variant's legality predicate.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// Stone placement onto an occupied cell.
    #[error("cannot place a stone at {0}")]
    IllegalPlacement(Position),

    /// Coordinates outside the active board.
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),

    /// The piece at the origin does not belong to the side to move.
    #[error("it is {0}'s turn")]
    NotYourTurn(Side),

    #[error("no piece at {0}")]
    EmptySquare(Position),

    /// Flip requested on a Banqi piece that is already face up.
    #[error("piece at {0} is already revealed")]
    AlreadyRevealed(Position),

    /// For example a placement in Xiangqi or a flip in Chess.
    #[error("action not available in {0}")]
    WrongActionForVariant(Variant),

    /// Any action after a winner has been decided.
    #[error("game is over, {0} has won")]
    TerminalStateViolation(Side),

    /// Inconsistent starting layout; payload describes the offending entry.
    #[error("malformed layout: {0}")]
    MalformedLayout(String),

    /// The engine found nothing to play for the side to move.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// Unknown engine option name or unparsable option value.
    #[error("invalid engine option: {0}")]
    InvalidOption(String),

    /// Engine configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}
