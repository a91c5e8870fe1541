//! Grid module - the static playfield
//!
//! The grid is 20 rows x 10 columns; each cell is empty or tagged with the kind
//! of the piece that was locked there. Uses a flat array for cache locality.
//! Coordinates are `(row, col)` with row 0 at the top.
//!
//! Rows above the grid (`row < 0`) are a virtual open area: pieces may extend
//! into it while spawning or rotating, but nothing is ever stored there.

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = WIDTH * HEIGHT;

/// The playfield - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    #[inline(always)]
    fn index(row: usize, col: usize) -> usize {
        assert!(
            row < HEIGHT && col < WIDTH,
            "grid cell ({row}, {col}) out of range {HEIGHT}x{WIDTH}"
        );
        row * WIDTH + col
    }

    /// Read a cell.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range coordinate. Placement code uses
    /// [`Grid::is_occupied`], which is total.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[Self::index(row, col)]
    }

    /// Write a cell.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range coordinate.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[Self::index(row, col)] = cell;
    }

    /// Occupancy test used by placement validation.
    ///
    /// - columns outside `0..10` are walls: always occupied
    /// - rows below the floor (`row > 19`) are occupied
    /// - rows above the top (`row < 0`) are open
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        if col < 0 || col >= BOARD_WIDTH as i8 {
            return true;
        }
        if row < 0 {
            return false;
        }
        if row >= BOARD_HEIGHT as i8 {
            return true;
        }
        self.cells[row as usize * WIDTH + col as usize].is_some()
    }

    /// Mark cells as occupied by `kind`.
    ///
    /// Cells above the visible grid are skipped. The caller guarantees the
    /// placement is collision-free; it is not re-validated here. Returns the
    /// number of cells written.
    pub fn lock(&mut self, cells: impl IntoIterator<Item = (i8, i8)>, kind: PieceKind) -> usize {
        let mut written = 0;
        for (row, col) in cells {
            if row < 0 {
                continue;
            }
            let idx = Self::index(row as usize, col as usize);
            debug_assert!(
                self.cells[idx].is_none(),
                "locking onto occupied cell ({row}, {col})"
            );
            self.cells[idx] = Some(kind);
            written += 1;
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no occupied cell
    pub fn is_row_empty(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| cell.is_none())
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = Self::index(row, 0);
        &self.cells[start..start + WIDTH]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Remove a row, shift every row above it down by one and insert an empty
    /// row at the top.
    pub fn clear_row(&mut self, row: usize) {
        let end = Self::index(row, 0);
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..end, WIDTH);
        self.cells[..WIDTH].fill(None);
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Scans bottom to top. After a removal the row that slid into the current
    /// index is checked again, so the result equals repeated single-row
    /// removal regardless of how many full rows are stacked.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = HEIGHT;
        while row > 0 {
            if self.is_row_full(row - 1) {
                self.clear_row(row - 1);
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }

    /// Row 0 holds at least one block: the game-over condition.
    pub fn top_row_occupied(&self) -> bool {
        !self.is_row_empty(0)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Height of each column, measured from the floor to its highest block.
    pub fn column_heights(&self) -> [u8; WIDTH] {
        let mut heights = [0u8; WIDTH];
        for (col, height) in heights.iter_mut().enumerate() {
            if let Some(top) = (0..HEIGHT).find(|&row| self.cell(row, col).is_some()) {
                *height = (HEIGHT - top) as u8;
            }
        }
        heights
    }

    /// Write the grid as `0` (empty) or `kind.index() + 1`.
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, cell) in dst.iter_mut().zip(src) {
                *d = cell.map_or(0, |kind| kind.index() as u8 + 1);
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a grid from text rows, bottom-aligned.
    ///
    /// `'.'` or `' '` is empty, a piece letter is that kind, anything else is
    /// tagged `I`. Handy for scripted setups.
    pub fn from_ascii(rows: &[&str]) -> Self {
        assert!(rows.len() <= HEIGHT, "too many rows: {}", rows.len());
        let mut grid = Self::new();
        let top = HEIGHT - rows.len();
        for (i, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().take(WIDTH).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(
                        PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I),
                    ),
                };
                grid.set(top + i, col, cell);
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
