//! Feature encodings for learned policies
//!
//! Two layouts, both built from a [`GameSnapshot`]:
//!
//! - [`encode_board_2d`]: a 20x20 image. The board occupies columns 5..15,
//!   every cell below a column's first block is filled (a piece dropped
//!   straight down can never reach it), and the active piece's 4x4 matrix is
//!   stamped into a margin slot chosen by its kind index.
//! - [`encode_flat`]: the binary board, the padded piece, a one-hot kind and
//!   three "close to the high score" flags in one vector.
//!
//! Both return `None` when there is no active piece to encode.

use blockfall_core::catalog::MAX_SHAPE_SIZE;
use blockfall_core::types::{BOARD_HEIGHT, BOARD_WIDTH, PIECE_KIND_COUNT};
use blockfall_core::GameSnapshot;

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

/// Side of the square board image.
pub const IMAGE_SIZE: usize = 20;

/// First image column holding the board.
pub const IMAGE_BOARD_OFFSET: usize = (IMAGE_SIZE - W) / 2;

/// Length of the [`encode_flat`] vector.
pub const FLAT_FEATURE_LEN: usize =
    W * H + MAX_SHAPE_SIZE * MAX_SHAPE_SIZE + PIECE_KIND_COUNT + HIGH_SCORE_FLAGS;

const HIGH_SCORE_FLAGS: usize = 3;

pub type BoardImage = [[u8; IMAGE_SIZE]; IMAGE_SIZE];

/// Occupancy as 0/1, discarding piece kinds.
pub fn binary_board(snapshot: &GameSnapshot) -> [[u8; W]; H] {
    let mut out = [[0u8; W]; H];
    for (dst, src) in out.iter_mut().zip(snapshot.board.iter()) {
        for (d, &cell) in dst.iter_mut().zip(src.iter()) {
            *d = u8::from(cell != 0);
        }
    }
    out
}

/// Fill every cell below the topmost block of each column.
pub fn fill_holes<const CW: usize, const CH: usize>(board: &mut [[u8; CW]; CH]) {
    for col in 0..CW {
        let Some(top) = (0..CH).find(|&row| board[row][col] != 0) else {
            continue;
        };
        for row in board.iter_mut().skip(top) {
            row[col] = 1;
        }
    }
}

/// Top-left `(row, col)` of the margin slot for a piece kind index.
///
/// Indices 0..4 stack down the left margin, 4..7 down the right one.
pub fn piece_slot(kind_index: usize) -> (usize, usize) {
    let row = MAX_SHAPE_SIZE * (kind_index % 4);
    let col = (IMAGE_SIZE - MAX_SHAPE_SIZE) * (kind_index / 4);
    (row, col)
}

pub fn encode_board_2d(snapshot: &GameSnapshot) -> Option<BoardImage> {
    let active = snapshot.active?;
    let board = binary_board(snapshot);

    let mut image = [[0u8; IMAGE_SIZE]; IMAGE_SIZE];
    for (dst, src) in image.iter_mut().zip(board.iter()) {
        dst[IMAGE_BOARD_OFFSET..IMAGE_BOARD_OFFSET + W].copy_from_slice(src);
    }
    fill_holes(&mut image);

    let (slot_row, slot_col) = piece_slot(active.kind.index());
    let padded = active.shape.padded_4x4();
    for (r, row) in padded.iter().enumerate() {
        image[slot_row + r][slot_col..slot_col + MAX_SHAPE_SIZE].copy_from_slice(row);
    }

    Some(image)
}

pub fn encode_flat(snapshot: &GameSnapshot, high_score: u32) -> Option<[f32; FLAT_FEATURE_LEN]> {
    let active = snapshot.active?;
    let mut out = [0f32; FLAT_FEATURE_LEN];
    let mut i = 0;

    for row in binary_board(snapshot) {
        for cell in row {
            out[i] = f32::from(cell);
            i += 1;
        }
    }

    for row in active.shape.padded_4x4() {
        for cell in row {
            out[i] = f32::from(cell);
            i += 1;
        }
    }

    out[i + active.kind.index()] = 1.0;
    i += PIECE_KIND_COUNT;

    // Integer forms of score >= best, >= 0.75 best, >= 0.5 best.
    let score = u64::from(snapshot.score);
    let best = u64::from(high_score);
    let flags = [score >= best, score * 4 >= best * 3, score * 2 >= best];
    for flag in flags {
        out[i] = if flag { 1.0 } else { 0.0 };
        i += 1;
    }
    debug_assert_eq!(i, FLAT_FEATURE_LEN);

    Some(out)
}
