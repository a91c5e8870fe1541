//! Automated drivers - everything a bot needs to play a [`GameSession`]
//!
//! Bots never touch the grid directly. They pick an action id, and
//! [`place::apply_placement`] turns it into the same commands a human would
//! press (rotate, move left until stopped, move right, drop).
//!
//! # Module Structure
//!
//! - [`action`]: the 40-entry action space (`rotation * 10 + column`)
//! - [`place`]: action to command translation
//! - [`features`]: board encodings consumed by learned policies
//! - [`policy`]: the `Policy` trait plus random and heuristic policies
//! - [`autopilot`]: the driver loop step, its timing and statistics
//!
//! [`GameSession`]: blockfall_core::GameSession

pub mod action;
pub mod autopilot;
pub mod features;
pub mod place;
pub mod policy;

pub use action::{decode_action_id, encode_action_id, Placement, ACTION_DIM, ROTATION_COUNT};
pub use autopilot::{
    Autopilot, AutopilotConfig, AutopilotStats, FinishedGame, PolicyKind, StepOutcome,
};
pub use place::{apply_placement, valid_action_ids, PlaceError, PlaceReport};
pub use policy::{HeuristicPolicy, HeuristicWeights, Policy, RandomPolicy};
