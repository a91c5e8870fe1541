//! Core game logic - the board/piece simulation engine
//!
//! This crate owns the grid, the active piece, the collision and rotation
//! rules, gravity, line clearing, pause/resume and scoring. It has **no**
//! dependencies on rendering, terminals, timers or storage:
//!
//! - **Driver-agnostic**: keyboard, touch and automated drivers all go through
//!   the same [`GameSession`] command surface
//! - **Deterministic**: the same seed replays the same piece sequence
//! - **Silent rejection**: illegal moves return `false` and leave state untouched
//! - **Zero-allocation**: grid, shapes and snapshots are fixed-size arrays
//!
//! # Module Structure
//!
//! - [`grid`]: 20x10 occupancy matrix, locking and full-row clearing
//! - [`catalog`]: the seven square shape matrices
//! - [`piece`]: the falling piece, spawn placement and edge spans
//! - [`collision`]: the `fits` placement predicate
//! - [`rotation`]: clockwise rotation of square shape matrices
//! - [`rng`]: uniform piece randomizer
//! - [`session`]: the game state machine and command surface
//! - [`snapshot`]: read-only state for renderers and policies
//! - [`score`]: lock events and the running high score
//! - [`config`]: session configuration from the environment
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameSession, SessionConfig};
//! use blockfall_types::SessionState;
//!
//! let mut session = GameSession::new(&SessionConfig::with_seed(7));
//! assert_eq!(session.state(), SessionState::Idle);
//!
//! session.reset();
//! assert_eq!(session.state(), SessionState::Running);
//!
//! session.move_left();
//! session.rotate();
//! assert!(session.hard_drop());
//! assert!(session.take_last_event().is_some());
//! ```

pub mod catalog;
pub mod collision;
pub mod config;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod rotation;
pub mod score;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use catalog::{shape_of, Shape};
pub use collision::{fits, fits_shifted};
pub use config::{ConfigError, SessionConfig};
pub use grid::Grid;
pub use piece::{ActivePiece, Anchor, PieceSpan};
pub use rng::PieceRandomizer;
pub use rotation::{rotate_clockwise, try_rotate};
pub use score::{HighScore, LockEvent};
pub use session::GameSession;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
