//! Active piece - the falling piece, its spawn placement and edge spans

use serde::Serialize;

use crate::catalog::{shape_of, Shape};
use crate::collision::fits;
use crate::grid::Grid;
use crate::types::{PieceKind, BOARD_HEIGHT, SPAWN_COL, SPAWN_ROW};

/// Grid coordinate of a shape matrix's top-left corner.
///
/// `row` may be negative while a piece hangs above the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Anchor {
    pub row: i8,
    pub col: i8,
}

impl Anchor {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn offset(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Extent of a piece's occupied cells in grid coordinates (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSpan {
    pub left: i8,
    pub right: i8,
    pub top: i8,
    pub bottom: i8,
}

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub anchor: Anchor,
}

impl ActivePiece {
    /// A piece in spawn orientation at the spawn anchor, without any fit check.
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: shape_of(kind),
            anchor: Anchor::new(SPAWN_ROW, SPAWN_COL),
        }
    }

    /// Spawn `kind` at the spawn anchor, pushed upward until it fits.
    ///
    /// Rows above the grid never collide, so the walk ends at the latest once
    /// the whole shape is above row 0.
    pub fn spawn(kind: PieceKind, grid: &Grid) -> Self {
        let mut piece = Self::new(kind);
        let floor = SPAWN_ROW - BOARD_HEIGHT as i8 - piece.shape.size() as i8;
        while !piece.fits(grid) && piece.anchor.row > floor {
            piece.anchor.row -= 1;
        }
        debug_assert!(piece.fits(grid), "spawned piece does not fit");
        piece
    }

    /// Occupied cells as absolute `(row, col)` grid coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let Anchor { row, col } = self.anchor;
        self.shape
            .filled_cells()
            .map(move |(dr, dc)| (row + dr, col + dc))
    }

    /// Whether the piece fits where it is.
    pub fn fits(&self, grid: &Grid) -> bool {
        fits(grid, &self.shape, self.anchor, 0)
    }

    /// Copy of this piece moved by `d_row` rows and `d_col` columns.
    pub fn shifted(&self, d_row: i8, d_col: i8) -> Self {
        Self {
            anchor: self.anchor.offset(d_row, d_col),
            ..*self
        }
    }

    /// Occupied extent of the piece on the grid.
    ///
    /// This is the one place edge spans are derived; movement guards and
    /// automated drivers both use it.
    pub fn span(&self) -> PieceSpan {
        let cols = self.shape.column_occupancy();
        let rows = self.shape.row_occupancy();
        let first = |occ: &[bool]| occ.iter().position(|&o| o).unwrap_or(0) as i8;
        let last = |occ: &[bool]| occ.iter().rposition(|&o| o).unwrap_or(0) as i8;
        PieceSpan {
            left: self.anchor.col + first(&cols[..]),
            right: self.anchor.col + last(&cols[..]),
            top: self.anchor.row + first(&rows[..]),
            bottom: self.anchor.row + last(&rows[..]),
        }
    }

    pub fn left_edge_col(&self) -> i8 {
        self.span().left
    }

    pub fn right_edge_col(&self) -> i8 {
        self.span().right
    }

    pub fn top_edge_row(&self) -> i8 {
        self.span().top
    }

    pub fn bottom_edge_row(&self) -> i8 {
        self.span().bottom
    }

    /// Width of the occupied columns.
    pub fn width(&self) -> u8 {
        let span = self.span();
        (span.right - span.left + 1) as u8
    }
}
