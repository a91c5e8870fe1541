//! Grid tests through the public facade

use blockfall::core::{fits, shape_of, Anchor, Grid};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), BOARD_WIDTH);
    assert_eq!(grid.height(), BOARD_HEIGHT);

    for row in 0..BOARD_HEIGHT as i8 {
        for col in 0..BOARD_WIDTH as i8 {
            assert!(!grid.is_occupied(row, col), "({row}, {col}) should be free");
        }
    }
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_is_occupied_boundaries() {
    let grid = Grid::new();

    // Walls and floor block.
    assert!(grid.is_occupied(0, -1));
    assert!(grid.is_occupied(0, BOARD_WIDTH as i8));
    assert!(grid.is_occupied(BOARD_HEIGHT as i8, 0));

    // Above the board is open, but the walls still extend upward.
    assert!(!grid.is_occupied(-1, 0));
    assert!(!grid.is_occupied(-5, 9));
    assert!(grid.is_occupied(-1, -1));
    assert!(grid.is_occupied(-3, 10));
}

#[test]
fn test_set_and_cell() {
    let mut grid = Grid::new();
    grid.set(10, 5, Some(PieceKind::T));
    assert_eq!(grid.cell(10, 5), Some(PieceKind::T));
    assert!(grid.is_occupied(10, 5));

    grid.set(10, 5, None);
    assert_eq!(grid.cell(10, 5), None);
}

#[test]
#[should_panic]
fn test_cell_out_of_range_panics() {
    let grid = Grid::new();
    let _ = grid.cell(BOARD_HEIGHT as usize, 0);
}

#[test]
fn test_lock_skips_rows_above_board() {
    let mut grid = Grid::new();
    let written = grid.lock([(-2, 4), (-1, 4), (0, 4), (1, 4)], PieceKind::I);
    assert_eq!(written, 2);
    assert_eq!(grid.cell(0, 4), Some(PieceKind::I));
    assert_eq!(grid.cell(1, 4), Some(PieceKind::I));
    assert_eq!(grid.occupied_count(), 2);
}

#[test]
fn test_clear_single_row_shifts_down() {
    let mut grid = Grid::from_ascii(&[
        "....T.....",
        "IIIIIIIIII",
    ]);
    assert_eq!(grid.clear_full_rows(), 1);
    assert_eq!(grid.cell(19, 4), Some(PieceKind::T));
    assert!(grid.is_row_empty(18));
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut grid = Grid::from_ascii(&[
        "IIIIIIIIII",
        "Z.........",
        "IIIIIIIIII",
        ".S........",
    ]);
    assert_eq!(grid.clear_full_rows(), 2);
    assert_eq!(grid.cell(18, 0), Some(PieceKind::Z));
    assert_eq!(grid.cell(19, 1), Some(PieceKind::S));
    assert_eq!(grid.occupied_count(), 2);
    for row in 0..BOARD_HEIGHT as usize {
        assert!(!grid.is_row_full(row));
    }
}

#[test]
fn test_clear_four_rows() {
    let mut grid = Grid::from_ascii(&["IIIIIIIIII"; 4]);
    assert_eq!(grid.clear_full_rows(), 4);
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_top_row_occupied() {
    let mut grid = Grid::new();
    assert!(!grid.top_row_occupied());
    grid.set(0, 9, Some(PieceKind::L));
    assert!(grid.top_row_occupied());
}

#[test]
fn test_fits_against_walls_and_blocks() {
    let mut grid = Grid::new();
    let o = shape_of(PieceKind::O);

    assert!(fits(&grid, &o, Anchor::new(0, 0), 0));
    assert!(fits(&grid, &o, Anchor::new(0, 8), 0));
    assert!(!fits(&grid, &o, Anchor::new(0, 8), 1));
    assert!(!fits(&grid, &o, Anchor::new(0, 0), -1));
    assert!(!fits(&grid, &o, Anchor::new(19, 0), 0));

    // Partially above the board is fine.
    assert!(fits(&grid, &o, Anchor::new(-1, 3), 0));

    grid.set(5, 5, Some(PieceKind::Z));
    assert!(!fits(&grid, &o, Anchor::new(4, 4), 0));
    assert!(fits(&grid, &o, Anchor::new(4, 4), -1));
}
