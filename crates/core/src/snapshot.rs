use serde::Serialize;

use crate::catalog::Shape;
use crate::piece::ActivePiece;
use crate::types::{PieceKind, SessionState, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            row: value.anchor.row,
            col: value.anchor.col,
        }
    }
}

/// Read-only view of a session for renderers and automated policies.
///
/// `board` holds `0` for empty cells and `kind.index() + 1` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    #[serde(rename = "piece")]
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i8>,
    pub score: u32,
    pub state: SessionState,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.state.accepts_moves()
    }

    /// Kind stored at a board cell, if occupied.
    pub fn cell_kind(&self, row: usize, col: usize) -> Option<PieceKind> {
        match self.board[row][col] {
            0 => None,
            v => Some(PieceKind::from_index(v as usize - 1)),
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_row: None,
            score: 0,
            state: SessionState::Idle,
            episode_id: 0,
            piece_id: 0,
        }
    }
}
