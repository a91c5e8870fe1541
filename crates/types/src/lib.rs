//! Shared types - board constants, piece kinds, session states and commands
//!
//! Everything here is plain data used by the core engine, the input adapters,
//! the automated drivers and the renderer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: row 0, column 4 (top-left corner of the shape matrix)
//!
//! # Timing
//!
//! The core never owns a timer. Drivers read the configured gravity period and
//! call `tick()` themselves:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 1000 | Human play: one gravity step per second |
//! | `AUTOPILOT_TICK_MS` | 50 | Automated play runs twenty steps per second |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.index(), 2);
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row of the shape matrix origin for a freshly spawned piece
pub const SPAWN_ROW: i8 = 0;

/// Column of the shape matrix origin for a freshly spawned piece
pub const SPAWN_COL: i8 = 4;

/// Number of distinct piece kinds
pub const PIECE_KIND_COUNT: usize = 7;

/// Default gravity period in milliseconds (one row per second)
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Gravity period used while an automated driver is playing
pub const AUTOPILOT_TICK_MS: u64 = 50;

/// Smallest accepted gravity period
pub const MIN_TICK_MS: u64 = 1;

/// The seven piece kinds, in catalog order.
///
/// The declaration order doubles as the stable policy index (I = 0 ... L = 6)
/// used to encode the active piece as a model feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Stable index in `0..7`.
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Inverse of [`PieceKind::index`].
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`; indices only come from [`PieceKind::index`] or
    /// from a bounded random draw.
    pub fn from_index(index: usize) -> Self {
        assert!(
            index < PIECE_KIND_COUNT,
            "piece index {index} out of range 0..{PIECE_KIND_COUNT}"
        );
        Self::ALL[index]
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Some(PieceKind::I),
            "O" => Some(PieceKind::O),
            "T" => Some(PieceKind::T),
            "S" => Some(PieceKind::S),
            "Z" => Some(PieceKind::Z),
            "J" => Some(PieceKind::J),
            "L" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Single uppercase letter, as used in serialized game state.
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

impl Serialize for PieceKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied; the kind only matters for rendering color
pub type Cell = Option<PieceKind>;

/// Lifecycle of a game session.
///
/// `Idle -> Running <-> Paused`, `Running -> GameOver`, and `reset()` from any
/// state back to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::GameOver => "game_over",
        }
    }

    /// Only a running session accepts movement, rotation, drops and ticks.
    pub fn accepts_moves(self) -> bool {
        self == SessionState::Running
    }
}

/// The single command surface every driver translates into.
///
/// Keyboard, touch and automated drivers all emit these; none of them
/// re-implement movement or collision rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Move piece one row down, locking it if it cannot fall
    SoftDrop,
    /// Soft drop repeatedly until the piece locks
    HardDrop,
    /// One gravity step, issued by the external scheduler
    Tick,
    /// Running -> Paused
    Pause,
    /// Paused -> Running
    Resume,
    /// Pause when running, resume when paused
    TogglePause,
    /// Start a fresh game from any state
    Reset,
}

impl Command {
    /// Parse a camelCase command name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "tick" => Some(Command::Tick),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "togglepause" => Some(Command::TogglePause),
            "reset" => Some(Command::Reset),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Tick => "tick",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::TogglePause => "togglePause",
            Command::Reset => "reset",
        }
    }

    /// Commands that move, rotate or drop the active piece.
    pub fn is_piece_move(self) -> bool {
        matches!(
            self,
            Command::MoveLeft
                | Command::MoveRight
                | Command::Rotate
                | Command::SoftDrop
                | Command::HardDrop
                | Command::Tick
        )
    }
}
