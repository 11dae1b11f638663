/// Core value types shared by every variant: sides, piece kinds, variants,
/// board coordinates and the piece record itself.
use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::game_state::board::Board;
pub use crate::game_state::game_state::GameState;

/// Which of the five games is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Xiangqi,
    Chess,
    Banqi,
    Go,
    Gomoku,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Xiangqi,
        Variant::Chess,
        Variant::Banqi,
        Variant::Go,
        Variant::Gomoku,
    ];

    /// Fixed `(width, height)` of the variant's board.
    #[inline]
    pub const fn dimensions(self) -> (u8, u8) {
        match self {
            Variant::Xiangqi => (9, 10),
            Variant::Chess => (8, 8),
            Variant::Banqi => (8, 4),
            Variant::Go => (19, 19),
            Variant::Gomoku => (15, 15),
        }
    }

    /// The two active sides, first mover first.
    #[inline]
    pub const fn sides(self) -> [Side; 2] {
        match self {
            Variant::Xiangqi | Variant::Banqi => [Side::Red, Side::Black],
            Variant::Chess => [Side::White, Side::Black],
            Variant::Go | Variant::Gomoku => [Side::Black, Side::White],
        }
    }

    #[inline]
    pub const fn first_to_move(self) -> Side {
        self.sides()[0]
    }

    /// Stone-placement games have no moving pieces.
    #[inline]
    pub const fn is_placement(self) -> bool {
        matches!(self, Variant::Go | Variant::Gomoku)
    }

    /// Variants that end when a general or king leaves the board.
    #[inline]
    pub const fn has_royal_piece(self) -> bool {
        matches!(self, Variant::Xiangqi | Variant::Chess | Variant::Banqi)
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Xiangqi => "xiangqi",
            Variant::Chess => "chess",
            Variant::Banqi => "banqi",
            Variant::Go => "go",
            Variant::Gomoku => "gomoku",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red,
    Black,
    White,
}

impl Side {
    /// Seat index: Red and White share seat 0, Black is seat 1.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Red | Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Opponent within the given variant.
    #[inline]
    pub const fn opponent_in(self, variant: Variant) -> Side {
        let [a, b] = variant.sides();
        if self.index() == a.index() {
            b
        } else {
            a
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Side::Red => "red",
            Side::Black => "black",
            Side::White => "white",
        };
        f.write_str(label)
    }
}

/// Every piece kind of every variant; only a variant's own subset is ever
/// placed on its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    Stone,
}

impl PieceKind {
    #[inline]
    pub const fn is_royal(self) -> bool {
        matches!(self, PieceKind::General | PieceKind::King)
    }

    /// Banqi rank (General 7 down to Soldier 1); zero for non-Banqi kinds.
    #[inline]
    pub const fn banqi_rank(self) -> u8 {
        match self {
            PieceKind::General => 7,
            PieceKind::Chariot => 6,
            PieceKind::Horse => 5,
            PieceKind::Elephant => 4,
            PieceKind::Advisor => 3,
            PieceKind::Cannon => 2,
            PieceKind::Soldier => 1,
            _ => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::General => "general",
            PieceKind::Advisor => "advisor",
            PieceKind::Elephant => "elephant",
            PieceKind::Horse => "horse",
            PieceKind::Chariot => "chariot",
            PieceKind::Cannon => "cannon",
            PieceKind::Soldier => "soldier",
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Rook => "rook",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Pawn => "pawn",
            PieceKind::Stone => "stone",
        }
    }
}

/// Zero-based grid coordinate, column then row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    #[inline]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Step by a signed delta; `None` when the result would be negative or
    /// overflow. Upper bounds are the board's concern.
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Position> {
        let x = i16::from(self.x) + i16::from(dx);
        let y = i16::from(self.y) + i16::from(dy);
        if !(0..=i16::from(u8::MAX)).contains(&x) || !(0..=i16::from(u8::MAX)).contains(&y) {
            return None;
        }
        Some(Position::new(x as u8, y as u8))
    }

    /// Signed `(dx, dy)` from `self` to `other`.
    #[inline]
    pub fn delta_to(self, other: Position) -> (i16, i16) {
        (
            i16::from(other.x) - i16::from(self.x),
            i16::from(other.y) - i16::from(self.y),
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A piece on the board. Identity is the `id`; captured pieces keep theirs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: u32,
    pub kind: PieceKind,
    pub side: Side,
    pub position: Position,
    /// Only ever `false` for face-down Banqi pieces.
    pub revealed: bool,
}

impl Piece {
    #[inline]
    pub const fn new(id: u32, kind: PieceKind, side: Side, position: Position) -> Self {
        Self {
            id,
            kind,
            side,
            position,
            revealed: true,
        }
    }

    #[inline]
    pub const fn hidden(mut self) -> Self {
        self.revealed = false;
        self
    }

    #[inline]
    pub const fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// One entry of a starting layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    pub kind: PieceKind,
    pub side: Side,
    pub x: u8,
    pub y: u8,
}

impl LayoutEntry {
    pub const fn new(kind: PieceKind, side: Side, x: u8, y: u8) -> Self {
        Self { kind, side, x, y }
    }
}

/// An action a side can take on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMove {
    Step { from: Position, to: Position },
    Flip { at: Position },
    Place { at: Position },
}

impl fmt::Display for GameMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMove::Step { from, to } => write!(f, "{from}->{to}"),
            GameMove::Flip { at } => write!(f, "flip{at}"),
            GameMove::Place { at } => write!(f, "place{at}"),
        }
    }
}

/// History entry for an applied action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub side: Side,
    pub game_move: GameMove,
    pub piece_kind: PieceKind,
    pub captured: Vec<Piece>,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.side, self.piece_kind.name(), self.game_move)?;
        if !self.captured.is_empty() {
            write!(f, " x{}", self.captured.len())?;
        }
        Ok(())
    }
}
