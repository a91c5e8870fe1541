//! Touch gestures to game commands.
//!
//! - A horizontal swipe moves the piece one column per cell of displacement.
//!   The displacement is measured from where the touch started, so moves
//!   already sent during the same swipe are subtracted.
//! - A tap (touch without swipe) rotates, but only once the double-tap window
//!   has passed without a second tap.
//! - A second tap inside the window hard drops instead.
//!
//! The translator owns no timers: callers pass the event time in and call
//! [`TouchTranslator::poll`] periodically to flush a pending tap.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::types::{Command, BOARD_WIDTH};

/// Second tap within this window turns a rotate into a hard drop.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(200);

/// More moves than the board is wide can never all apply.
const MAX_COMMANDS: usize = BOARD_WIDTH as usize;

pub type TouchCommands = ArrayVec<Command, MAX_COMMANDS>;

#[derive(Debug, Clone)]
pub struct TouchTranslator {
    cell_size: f32,
    start_x: f32,
    moved_left: i32,
    moved_right: i32,
    swiped: bool,
    pending_tap: Option<Instant>,
}

impl TouchTranslator {
    /// `cell_size` is the on-screen width of one board cell.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1.0),
            start_x: 0.0,
            moved_left: 0,
            moved_right: 0,
            swiped: false,
            pending_tap: None,
        }
    }

    pub fn has_pending_tap(&self) -> bool {
        self.pending_tap.is_some()
    }

    pub fn touch_start(&mut self, x: f32, _y: f32) {
        self.start_x = x;
        self.moved_left = 0;
        self.moved_right = 0;
        self.swiped = false;
    }

    pub fn touch_move(&mut self, x: f32, _y: f32) -> TouchCommands {
        self.swiped = true;

        let cells = ((x - self.start_x) / self.cell_size).round() as i32;
        let delta = cells - self.moved_right + self.moved_left;

        let mut out = TouchCommands::new();
        let steps = (delta.unsigned_abs() as usize).min(MAX_COMMANDS);
        let (command, counter) = if delta < 0 {
            (Command::MoveLeft, &mut self.moved_left)
        } else {
            (Command::MoveRight, &mut self.moved_right)
        };
        for _ in 0..steps {
            out.push(command);
            *counter += 1;
        }
        out
    }

    pub fn touch_end(&mut self, now: Instant) -> TouchCommands {
        let mut out = self.poll(now);
        if self.swiped {
            self.swiped = false;
            return out;
        }

        match self.pending_tap.take() {
            Some(_) => out.push(Command::HardDrop),
            None => self.pending_tap = Some(now),
        }
        out
    }

    /// Emit the rotate for a tap whose double-tap window has expired.
    pub fn poll(&mut self, now: Instant) -> TouchCommands {
        let mut out = TouchCommands::new();
        if let Some(at) = self.pending_tap {
            if now.saturating_duration_since(at) >= DOUBLE_TAP_WINDOW {
                self.pending_tap = None;
                out.push(Command::Rotate);
            }
        }
        out
    }
}

impl Default for TouchTranslator {
    fn default() -> Self {
        Self::new(32.0)
    }
}
