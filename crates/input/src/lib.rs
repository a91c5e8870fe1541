//! Input adapters - raw device input to game commands
//!
//! Adapters only translate. Every command they produce goes through the
//! session's command surface, which owns all movement and collision rules.
//!
//! - [`map`]: `crossterm` key events for the terminal game
//! - [`touch`]: swipe and tap gestures (caller supplies timestamps)

pub mod map;
pub mod touch;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_autopilot_toggle, should_quit};
pub use touch::{TouchCommands, TouchTranslator, DOUBLE_TAP_WINDOW};
