//! Action space shared by every automated policy
//!
//! An action id in `0..40` names a placement: `rotation = aid / 10` clockwise
//! turns, then the piece's left edge at `column = aid % 10`.

use serde::Serialize;

use blockfall_core::types::BOARD_WIDTH;

/// Distinct clockwise rotation counts a placement can ask for.
pub const ROTATION_COUNT: usize = 4;

/// Number of action ids (`ROTATION_COUNT * BOARD_WIDTH`).
pub const ACTION_DIM: usize = ROTATION_COUNT * BOARD_WIDTH as usize;

/// A decoded action: how often to rotate and where the left edge should end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Placement {
    pub rotation: u8,
    pub column: u8,
}

impl Placement {
    /// Returns `None` when either component is outside the action space.
    pub fn new(rotation: u8, column: u8) -> Option<Self> {
        if (rotation as usize) < ROTATION_COUNT && column < BOARD_WIDTH {
            Some(Self { rotation, column })
        } else {
            None
        }
    }

    pub fn action_id(self) -> usize {
        encode_action_id(self)
    }
}

/// Split an action id into rotation and column.
///
/// ```
/// use blockfall_engine::{decode_action_id, Placement};
///
/// assert_eq!(decode_action_id(23), Some(Placement { rotation: 2, column: 3 }));
/// assert_eq!(decode_action_id(40), None);
/// ```
pub fn decode_action_id(aid: usize) -> Option<Placement> {
    if aid >= ACTION_DIM {
        return None;
    }
    let width = BOARD_WIDTH as usize;
    Placement::new((aid / width) as u8, (aid % width) as u8)
}

pub fn encode_action_id(placement: Placement) -> usize {
    placement.rotation as usize * BOARD_WIDTH as usize + placement.column as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_decodes_and_encodes_back() {
        for aid in 0..ACTION_DIM {
            let p = decode_action_id(aid).unwrap();
            assert_eq!(p.action_id(), aid);
        }
    }

    #[test]
    fn layout_is_rotation_major() {
        assert_eq!(decode_action_id(0), Some(Placement { rotation: 0, column: 0 }));
        assert_eq!(decode_action_id(9), Some(Placement { rotation: 0, column: 9 }));
        assert_eq!(decode_action_id(10), Some(Placement { rotation: 1, column: 0 }));
        assert_eq!(decode_action_id(39), Some(Placement { rotation: 3, column: 9 }));
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(decode_action_id(ACTION_DIM), None);
        assert_eq!(Placement::new(4, 0), None);
        assert_eq!(Placement::new(0, 10), None);
    }
}
