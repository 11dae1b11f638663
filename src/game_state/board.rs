//! Copy-on-write grid shared by all five variants.
//!
//! A `Board` is a plain value: every transition (`place`, `remove_all`,
//! `with_piece`) returns a new board and leaves the receiver untouched, so
//! earlier snapshots stay valid for history and for searches that need a
//! stable view while building the next position.

use serde::{Deserialize, Serialize};

use crate::game_errors::GameErrors;
use crate::game_state::game_types::{LayoutEntry, Piece, Position, Side, Variant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    height: u8,
    // Row-major, `y * width + x`.
    cells: Vec<Option<Piece>>,
}

impl Board {
    pub fn empty(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; usize::from(width) * usize::from(height)],
        }
    }

    pub fn empty_for(variant: Variant) -> Self {
        let (width, height) = variant.dimensions();
        Self::empty(width, height)
    }

    /// Build a board from a starting layout.
    ///
    /// The grid is the larger of the layout's extent and the variant's fixed
    /// size. Pieces receive ids `0..layout.len()` in layout order. Two entries
    /// on the same cell make the layout malformed.
    pub fn initialize(variant: Variant, layout: &[LayoutEntry]) -> Result<Self, GameErrors> {
        let (fixed_w, fixed_h) = variant.dimensions();
        let max_x = layout.iter().map(|e| e.x).max().unwrap_or(0);
        let max_y = layout.iter().map(|e| e.y).max().unwrap_or(0);
        let width = fixed_w.max(max_x.saturating_add(1));
        let height = fixed_h.max(max_y.saturating_add(1));

        let mut board = Self::empty(width, height);
        for (idx, entry) in layout.iter().enumerate() {
            let pos = Position::new(entry.x, entry.y);
            let cell = board.index_of(pos).ok_or_else(|| {
                GameErrors::MalformedLayout(format!("entry {idx} at {pos} is off the grid"))
            })?;
            if board.cells[cell].is_some() {
                return Err(GameErrors::MalformedLayout(format!(
                    "entry {idx} at {pos} overlaps another piece"
                )));
            }
            let id = u32::try_from(idx)
                .map_err(|_| GameErrors::MalformedLayout("too many layout entries".to_owned()))?;
            board.cells[cell] = Some(Piece::new(id, entry.kind, entry.side, pos));
        }

        Ok(board)
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| usize::from(pos.y) * usize::from(self.width) + usize::from(pos.x))
    }

    /// Piece at `pos`, or `None` for an empty or off-board cell.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<&Piece> {
        self.index_of(pos).and_then(|i| self.cells[i].as_ref())
    }

    #[inline]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// In bounds and unoccupied.
    #[inline]
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.contains(pos) && !self.is_occupied(pos)
    }

    /// Every cell coordinate in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().filter_map(Option::as_ref)
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.side == side)
    }

    pub fn is_empty_board(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Returns a new board with `piece` standing on `pos`.
    ///
    /// The piece's previous cell is cleared when it still holds this piece
    /// (same id), so a move is one `place` call and a fresh stone is placed
    /// the same way. Whatever stood on `pos` is overwritten.
    pub fn place(&self, pos: Position, piece: Piece) -> Result<Board, GameErrors> {
        let target = self.index_of(pos).ok_or(GameErrors::OutOfBounds(pos))?;
        let mut next = self.clone();

        if let Some(previous) = self.index_of(piece.position) {
            if previous != target && matches!(self.cells[previous], Some(p) if p.id == piece.id) {
                next.cells[previous] = None;
            }
        }

        next.cells[target] = Some(piece.at(pos));
        Ok(next)
    }

    /// Returns a new board with every listed cell cleared.
    pub fn remove_all(&self, positions: &[Position]) -> Board {
        let mut next = self.clone();
        for &pos in positions {
            if let Some(cell) = self.index_of(pos) {
                next.cells[cell] = None;
            }
        }
        next
    }

    /// Returns a new board where the piece at `pos` is replaced by `update(piece)`.
    pub fn with_piece<F>(&self, pos: Position, update: F) -> Result<Board, GameErrors>
    where
        F: FnOnce(Piece) -> Piece,
    {
        let cell = self.index_of(pos).ok_or(GameErrors::OutOfBounds(pos))?;
        let piece = self.cells[cell].ok_or(GameErrors::EmptySquare(pos))?;
        let mut next = self.clone();
        next.cells[cell] = Some(update(piece).at(pos));
        Ok(next)
    }

    /// True iff a general or king of `side` is still on the board. Face-down
    /// Banqi generals count.
    pub fn is_king_present(&self, side: Side) -> bool {
        self.pieces_of(side).any(|p| p.kind.is_royal())
    }
}
