//! Plain-text board renderer for logs, tests and the match binary.
//!
//! Seat-0 pieces (Red or White) print in upper case, Black in lower case.
//! Face-down Banqi pieces print as `?`, Go/Gomoku stones as `●` (Black) and
//! `○` (White). Row indices run down the left edge, column indices across
//! the top, both zero-based to match `Position`.

use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Piece, PieceKind, Position, Side};

/// Render the board alone.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("   ");
    for x in 0..board.width() {
        out.push_str(&format!("{:>2}", x % 10));
    }
    out.push('\n');

    for y in 0..board.height() {
        out.push_str(&format!("{y:>2} "));
        for x in 0..board.width() {
            out.push(' ');
            match board.get(Position::new(x, y)) {
                Some(piece) => out.push(piece_char(piece)),
                None => out.push('·'),
            }
        }
        out.push('\n');
    }

    out
}

/// Render the board followed by turn, winner and capture counts.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = render_board(&game_state.board);
    let [first, second] = game_state.variant().sides();

    match game_state.winner {
        Some(winner) => out.push_str(&format!("{} over, {winner} wins\n", game_state.variant())),
        None => out.push_str(&format!(
            "{} ply {}, {} to move\n",
            game_state.variant(),
            game_state.history.len(),
            game_state.side_to_move
        )),
    }
    out.push_str(&format!(
        "captured: {first} {}, {second} {}",
        game_state.captured(first).len(),
        game_state.captured(second).len()
    ));

    out
}

fn piece_char(piece: &Piece) -> char {
    if !piece.revealed {
        return '?';
    }
    let letter = match piece.kind {
        PieceKind::Stone => {
            return if piece.side == Side::Black { '●' } else { '○' };
        }
        PieceKind::General => 'g',
        PieceKind::Advisor => 'a',
        PieceKind::Elephant => 'e',
        PieceKind::Horse => 'h',
        PieceKind::Chariot => 'r',
        PieceKind::Cannon => 'c',
        PieceKind::Soldier => 's',
        PieceKind::King => 'k',
        PieceKind::Queen => 'q',
        PieceKind::Rook => 'r',
        PieceKind::Bishop => 'b',
        PieceKind::Knight => 'n',
        PieceKind::Pawn => 'p',
    };
    if piece.side.index() == 0 {
        letter.to_ascii_uppercase()
    } else {
        letter
    }
}
