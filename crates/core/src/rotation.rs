//! Rotation engine - clockwise rotation without wall kicks
//!
//! A 90° clockwise turn of a square matrix is its transpose followed by a
//! horizontal mirror of every row. A rotation that does not fit where the
//! piece currently is gets rejected; no alternative offsets are searched.

use crate::catalog::{Shape, MAX_SHAPE_SIZE};
use crate::collision::fits;
use crate::grid::Grid;
use crate::piece::ActivePiece;

/// Swap rows and columns inside the shape's box.
pub fn transpose(shape: &Shape) -> Shape {
    let n = shape.size();
    let src = shape.raw();
    let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    for (r, row) in cells.iter_mut().enumerate().take(n) {
        for (c, cell) in row.iter_mut().enumerate().take(n) {
            *cell = src[c][r];
        }
    }
    Shape::from_cells(n, cells)
}

/// Reverse each row inside the shape's box.
pub fn mirror_rows(shape: &Shape) -> Shape {
    let n = shape.size();
    let mut cells = *shape.raw();
    for row in cells.iter_mut() {
        row[..n].reverse();
    }
    Shape::from_cells(n, cells)
}

/// 90° clockwise rotation.
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    mirror_rows(&transpose(shape))
}

/// Rotated shape for `piece`, if it fits at the current anchor.
pub fn try_rotate(grid: &Grid, piece: &ActivePiece) -> Option<Shape> {
    let rotated = rotate_clockwise(&piece.shape);
    fits(grid, &rotated, piece.anchor, 0).then_some(rotated)
}
