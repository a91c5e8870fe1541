use arrayvec::ArrayVec;
use serde::Serialize;

use blockfall_core::types::BOARD_WIDTH;
use blockfall_core::GameSession;

use crate::action::{decode_action_id, Placement, ACTION_DIM, ROTATION_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    RotationOutOfRange,
    ColumnOutOfRange,
    NotPlayable,
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::RotationOutOfRange
            | PlaceError::ColumnOutOfRange
            | PlaceError::NoActive => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::RotationOutOfRange => "rotation must be in 0..4",
            PlaceError::ColumnOutOfRange => "column must be in 0..10",
            PlaceError::NotPlayable => "game is not running",
            PlaceError::NoActive => "no active piece",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaceError {}

/// How many of each command the translation actually applied.
///
/// Rejected commands are skipped silently by the session, so a placement can
/// fall short of its target (blocked rotation, a wall of blocks in the way).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaceReport {
    pub rotations: u8,
    pub moved_left: u8,
    pub moved_right: u8,
    pub dropped: bool,
}

impl PlaceReport {
    /// Whether every requested rotation and right move was applied.
    pub fn reached(&self, placement: Placement) -> bool {
        self.rotations == placement.rotation && self.moved_right == placement.column
    }
}

/// Translate a placement into session commands.
///
/// Rotates `placement.rotation` times, moves left until a move is rejected,
/// then moves right `placement.column` times, and hard drops when `drop` is
/// set. Like a player pressing keys, it never searches for a path around
/// overhangs.
pub fn apply_placement(
    session: &mut GameSession,
    placement: Placement,
    drop: bool,
) -> Result<PlaceReport, PlaceError> {
    if placement.rotation as usize >= ROTATION_COUNT {
        return Err(PlaceError::RotationOutOfRange);
    }
    if placement.column >= BOARD_WIDTH {
        return Err(PlaceError::ColumnOutOfRange);
    }
    if !session.is_running() {
        return Err(PlaceError::NotPlayable);
    }
    if session.active().is_none() {
        return Err(PlaceError::NoActive);
    }

    let mut report = PlaceReport::default();

    for _ in 0..placement.rotation {
        if session.rotate() {
            report.rotations += 1;
        }
    }

    // At most BOARD_WIDTH - 1 moves can ever succeed.
    for _ in 0..BOARD_WIDTH - 1 {
        if !session.move_left() {
            break;
        }
        report.moved_left += 1;
    }

    for _ in 0..placement.column {
        if session.move_right() {
            report.moved_right += 1;
        }
    }

    if drop {
        report.dropped = session.hard_drop();
    }

    Ok(report)
}

/// Action ids whose placement would be fully reached from the current state.
///
/// Each candidate is tried on a scratch copy of the session; the session
/// itself is not modified.
pub fn valid_action_ids(session: &GameSession) -> ArrayVec<usize, ACTION_DIM> {
    let mut ids = ArrayVec::new();
    if !session.is_running() || session.active().is_none() {
        return ids;
    }

    for aid in 0..ACTION_DIM {
        let Some(placement) = decode_action_id(aid) else {
            continue;
        };
        let mut scratch = session.clone();
        if let Ok(report) = apply_placement(&mut scratch, placement, false) {
            if report.reached(placement) {
                ids.push(aid);
            }
        }
    }
    ids
}
