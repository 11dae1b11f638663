//! Canonical starting layouts.
//!
//! Xiangqi and Chess start from fixed tables. Banqi deals the 32 Xiangqi
//! pieces face down onto its 8×4 board in shuffled order. Go and Gomoku start
//! empty.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game_state::board::Board;
use crate::game_state::game_types::{LayoutEntry, PieceKind, Side, Variant};

use PieceKind::*;
use Side::{Black, Red, White};

/// Xiangqi starting position, Black on rows 0–3, Red on rows 6–9.
pub const XIANGQI_LAYOUT: [LayoutEntry; 32] = [
    LayoutEntry::new(General, Black, 4, 0),
    LayoutEntry::new(Advisor, Black, 3, 0),
    LayoutEntry::new(Advisor, Black, 5, 0),
    LayoutEntry::new(Elephant, Black, 2, 0),
    LayoutEntry::new(Elephant, Black, 6, 0),
    LayoutEntry::new(Horse, Black, 1, 0),
    LayoutEntry::new(Horse, Black, 7, 0),
    LayoutEntry::new(Chariot, Black, 0, 0),
    LayoutEntry::new(Chariot, Black, 8, 0),
    LayoutEntry::new(Cannon, Black, 1, 2),
    LayoutEntry::new(Cannon, Black, 7, 2),
    LayoutEntry::new(Soldier, Black, 0, 3),
    LayoutEntry::new(Soldier, Black, 2, 3),
    LayoutEntry::new(Soldier, Black, 4, 3),
    LayoutEntry::new(Soldier, Black, 6, 3),
    LayoutEntry::new(Soldier, Black, 8, 3),
    LayoutEntry::new(General, Red, 4, 9),
    LayoutEntry::new(Advisor, Red, 3, 9),
    LayoutEntry::new(Advisor, Red, 5, 9),
    LayoutEntry::new(Elephant, Red, 2, 9),
    LayoutEntry::new(Elephant, Red, 6, 9),
    LayoutEntry::new(Horse, Red, 1, 9),
    LayoutEntry::new(Horse, Red, 7, 9),
    LayoutEntry::new(Chariot, Red, 0, 9),
    LayoutEntry::new(Chariot, Red, 8, 9),
    LayoutEntry::new(Cannon, Red, 1, 7),
    LayoutEntry::new(Cannon, Red, 7, 7),
    LayoutEntry::new(Soldier, Red, 0, 6),
    LayoutEntry::new(Soldier, Red, 2, 6),
    LayoutEntry::new(Soldier, Red, 4, 6),
    LayoutEntry::new(Soldier, Red, 6, 6),
    LayoutEntry::new(Soldier, Red, 8, 6),
];

const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

/// Chess starting position, Black on rows 0–1, White on rows 6–7.
pub const CHESS_LAYOUT: [LayoutEntry; 32] = chess_layout();

const fn chess_layout() -> [LayoutEntry; 32] {
    let mut table = [LayoutEntry::new(Pawn, White, 0, 0); 32];
    let mut file = 0usize;

    while file < 8 {
        let x = file as u8;
        table[file] = LayoutEntry::new(BACK_RANK[file], Black, x, 0);
        table[8 + file] = LayoutEntry::new(Pawn, Black, x, 1);
        table[16 + file] = LayoutEntry::new(BACK_RANK[file], White, x, 7);
        table[24 + file] = LayoutEntry::new(Pawn, White, x, 6);
        file += 1;
    }

    table
}

/// Deal the Xiangqi set face down onto the Banqi board in random order.
pub fn banqi_board<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let (width, _) = Variant::Banqi.dimensions();
    let mut deck: Vec<(PieceKind, Side)> =
        XIANGQI_LAYOUT.iter().map(|e| (e.kind, e.side)).collect();
    deck.shuffle(rng);

    let layout: Vec<LayoutEntry> = deck
        .into_iter()
        .enumerate()
        .map(|(i, (kind, side))| {
            let x = (i % usize::from(width)) as u8;
            let y = (i / usize::from(width)) as u8;
            LayoutEntry::new(kind, side, x, y)
        })
        .collect();

    let board = Board::initialize(Variant::Banqi, &layout)
        .expect("a dealt banqi layout fills distinct cells");
    let positions: Vec<_> = board.pieces().map(|p| p.position).collect();
    positions.into_iter().fold(board, |b, pos| {
        b.with_piece(pos, |p| p.hidden())
            .expect("dealt cells are occupied")
    })
}

/// Starting board for `variant`. Only Banqi consumes randomness.
pub fn starting_board<R: Rng + ?Sized>(variant: Variant, rng: &mut R) -> Board {
    match variant {
        Variant::Xiangqi => {
            Board::initialize(variant, &XIANGQI_LAYOUT).expect("xiangqi layout is well formed")
        }
        Variant::Chess => {
            Board::initialize(variant, &CHESS_LAYOUT).expect("chess layout is well formed")
        }
        Variant::Banqi => banqi_board(rng),
        Variant::Go | Variant::Gomoku => Board::empty_for(variant),
    }
}
