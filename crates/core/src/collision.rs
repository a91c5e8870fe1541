//! Collision rules - the `fits` placement predicate
//!
//! A placement fits when every occupied shape cell lies inside columns 0..10,
//! at or above row 19, and (for rows on the grid) on an empty cell. Rows above
//! the grid are exempt from the occupancy check but not from the column check,
//! which lets pieces spawn and rotate partially above row 0.

use crate::catalog::Shape;
use crate::grid::Grid;
use crate::piece::{ActivePiece, Anchor};

/// Whether `shape` placed at `anchor`, shifted by `col_offset` columns, fits.
pub fn fits(grid: &Grid, shape: &Shape, anchor: Anchor, col_offset: i8) -> bool {
    shape
        .filled_cells()
        .all(|(dr, dc)| !grid.is_occupied(anchor.row + dr, anchor.col + dc + col_offset))
}

/// Whether `piece` would fit after moving `d_row` rows down and `d_col` columns right.
pub fn fits_shifted(grid: &Grid, piece: &ActivePiece, d_row: i8, d_col: i8) -> bool {
    fits(grid, &piece.shape, piece.anchor.offset(d_row, 0), d_col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::shape_of;
    use crate::types::PieceKind;

    #[test]
    fn empty_grid_accepts_spawn_anchor() {
        let grid = Grid::new();
        for kind in PieceKind::ALL {
            assert!(fits(&grid, &shape_of(kind), Anchor::new(0, 4), 0));
        }
    }

    #[test]
    fn column_offset_into_wall_is_rejected() {
        let grid = Grid::new();
        let o = shape_of(PieceKind::O);
        assert!(fits(&grid, &o, Anchor::new(0, 0), 0));
        assert!(!fits(&grid, &o, Anchor::new(0, 0), -1));
        assert!(fits(&grid, &o, Anchor::new(0, 8), 0));
        assert!(!fits(&grid, &o, Anchor::new(0, 8), 1));
    }

    #[test]
    fn rows_above_grid_skip_occupancy_but_not_walls() {
        let mut grid = Grid::new();
        for col in 0..10 {
            grid.set(0, col, Some(PieceKind::L));
        }
        let o = shape_of(PieceKind::O);
        assert!(fits(&grid, &o, Anchor::new(-2, 4), 0));
        assert!(!fits(&grid, &o, Anchor::new(-1, 4), 0));
        assert!(!fits(&grid, &o, Anchor::new(-2, 9), 0));
    }

    #[test]
    fn floor_blocks() {
        let grid = Grid::new();
        let o = shape_of(PieceKind::O);
        assert!(fits(&grid, &o, Anchor::new(18, 0), 0));
        assert!(!fits(&grid, &o, Anchor::new(19, 0), 0));
    }

    #[test]
    fn empty_box_cells_never_collide() {
        // T's bottom row is empty, so the box may overhang the floor.
        let grid = Grid::new();
        assert!(fits(&grid, &shape_of(PieceKind::T), Anchor::new(18, 0), 0));
    }
}
