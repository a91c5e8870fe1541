//! Piece catalog - the seven shape matrices
//!
//! Every shape is stored in a square bounding box (2x2 for O, 3x3 for T, S,
//! Z, J and L, 4x4 for I). Keeping the boxes square is what makes
//! transpose-then-mirror an exact 90° rotation.

use serde::{Serialize, Serializer};

use crate::types::PieceKind;

/// Side of the largest shape matrix
pub const MAX_SHAPE_SIZE: usize = 4;

/// A square boolean matrix whose `true` cells are occupied.
///
/// Sizes 2..=4 are stored in a fixed 4x4 array; cells outside `size` are
/// always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from `N x N` rows of 0/1.
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N >= 1 && N <= MAX_SHAPE_SIZE, "shape size out of range");
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    pub(crate) fn from_cells(size: usize, cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Side length of the bounding box.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the cell at `(row, col)` inside the box is occupied.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.cells[row][col]
    }

    /// Occupied cells as `(row, col)` offsets from the top-left corner.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |r| {
            (0..n)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// For each column of the box, whether any of its cells is occupied.
    pub fn column_occupancy(&self) -> [bool; MAX_SHAPE_SIZE] {
        let mut out = [false; MAX_SHAPE_SIZE];
        for (_, c) in self.filled_cells() {
            out[c as usize] = true;
        }
        out
    }

    /// For each row of the box, whether any of its cells is occupied.
    pub fn row_occupancy(&self) -> [bool; MAX_SHAPE_SIZE] {
        let mut out = [false; MAX_SHAPE_SIZE];
        for (r, _) in self.filled_cells() {
            out[r as usize] = true;
        }
        out
    }

    /// Rows of 0/1, `size x size`.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        let n = self.size();
        (0..n)
            .map(|r| (0..n).map(|c| u8::from(self.cells[r][c])).collect())
            .collect()
    }

    /// The shape placed in the top-left of a 4x4 box of 0/1.
    pub fn padded_4x4(&self) -> [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE] {
        let mut out = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, c) in self.filled_cells() {
            out[r as usize][c as usize] = 1;
        }
        out
    }

    pub(crate) fn raw(&self) -> &[[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE] {
        &self.cells
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_rows())
    }
}

const I_SHAPE: Shape = Shape::from_rows([
    [0, 1, 0, 0],
    [0, 1, 0, 0],
    [0, 1, 0, 0],
    [0, 1, 0, 0],
]);

const O_SHAPE: Shape = Shape::from_rows([
    [1, 1],
    [1, 1],
]);

const T_SHAPE: Shape = Shape::from_rows([
    [0, 1, 0],
    [1, 1, 1],
    [0, 0, 0],
]);

const S_SHAPE: Shape = Shape::from_rows([
    [0, 1, 1],
    [1, 1, 0],
    [0, 0, 0],
]);

const Z_SHAPE: Shape = Shape::from_rows([
    [1, 1, 0],
    [0, 1, 1],
    [0, 0, 0],
]);

const J_SHAPE: Shape = Shape::from_rows([
    [0, 1, 0],
    [0, 1, 0],
    [1, 1, 0],
]);

const L_SHAPE: Shape = Shape::from_rows([
    [0, 1, 0],
    [0, 1, 0],
    [0, 1, 1],
]);

/// Spawn shape for a piece kind.
pub fn shape_of(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}
