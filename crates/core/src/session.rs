//! Game session - the state machine behind the command surface
//!
//! [`GameSession`] owns the grid, the active piece, the score and the
//! lifecycle state. Every mutation goes through its command methods, each of
//! which runs to completion and reports whether it changed anything:
//!
//! - rejected commands return `false` and leave the session untouched
//! - moves, rotations, drops and ticks only apply while `Running`
//! - after `GameOver` only [`GameSession::reset`] / [`GameSession::new_game`] act
//!
//! The session never reads a clock. The gravity period is stored here so that
//! the external scheduler (and the autopilot, which speeds it up) can share
//! it, but calling [`GameSession::tick`] is always the driver's job.

use std::time::Duration;

use crate::collision::fits_shifted;
use crate::config::SessionConfig;
use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::rng::PieceRandomizer;
use crate::rotation::try_rotate;
use crate::score::{line_clear_points, LockEvent};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, PieceKind, SessionState, BOARD_WIDTH, MIN_TICK_MS};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    active: Option<ActivePiece>,
    state: SessionState,
    score: u32,
    randomizer: PieceRandomizer,
    tick_interval: Duration,
    /// Monotonic game id (increments on every reset).
    episode_id: u32,
    /// Monotonic id for spawned pieces within the current game.
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameSession {
    /// Create an idle session. Call [`GameSession::reset`] to start playing.
    pub fn new(config: &SessionConfig) -> Self {
        let randomizer = match config.seed {
            Some(seed) => PieceRandomizer::new(seed),
            None => PieceRandomizer::from_entropy(),
        };

        Self {
            grid: Grid::new(),
            active: None,
            state: SessionState::Idle,
            score: 0,
            randomizer,
            tick_interval: config.tick_interval.max(Duration::from_millis(MIN_TICK_MS)),
            episode_id: 0,
            piece_id: 0,
            last_event: None,
        }
    }

    /// Idle session with a fixed seed and default timing.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&SessionConfig::with_seed(seed))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for scripted setups (puzzles, tests).
    ///
    /// Only built with the `scripted` feature: it bypasses the command
    /// surface, and the caller must keep the active piece collision-free.
    #[cfg(any(test, feature = "scripted"))]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.randomizer.seed()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Gravity period the external scheduler should wait between ticks.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Change the gravity period; returns the previous one.
    pub fn set_tick_interval(&mut self, interval: Duration) -> Duration {
        let interval = interval.max(Duration::from_millis(MIN_TICK_MS));
        std::mem::replace(&mut self.tick_interval, interval)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    // ----- lifecycle -----

    /// Clear the grid and score, spawn the first piece and start running.
    ///
    /// Valid from every state.
    pub fn reset(&mut self) -> bool {
        self.grid.clear();
        self.score = 0;
        self.active = None;
        self.piece_id = 0;
        self.last_event = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.state = SessionState::Running;
        self.spawn_next();
        true
    }

    /// Reset only if the game is over; used by drivers that want
    /// uninterrupted play.
    pub fn new_game(&mut self) -> bool {
        if self.state != SessionState::GameOver {
            return false;
        }
        self.reset()
    }

    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.state = SessionState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.state = SessionState::Running;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            SessionState::Idle | SessionState::GameOver => false,
        }
    }

    // ----- piece commands -----

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, d_col: i8) -> bool {
        let Some(piece) = self.playable_piece() else {
            return false;
        };

        // Guard on the occupied span as well as on raw collision.
        let span = piece.span();
        let inside = if d_col < 0 {
            span.left > 0
        } else {
            span.right < BOARD_WIDTH as i8 - 1
        };
        if !inside || !fits_shifted(&self.grid, &piece, 0, d_col) {
            return false;
        }

        self.active = Some(piece.shifted(0, d_col));
        true
    }

    /// Rotate clockwise in place; rejected if the rotated shape does not fit.
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.playable_piece() else {
            return false;
        };

        match try_rotate(&self.grid, &piece) {
            Some(shape) => {
                self.active = Some(ActivePiece { shape, ..piece });
                true
            }
            None => false,
        }
    }

    /// Move one row down, or lock the piece if it cannot fall.
    ///
    /// Both outcomes count as applied.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.playable_piece() else {
            return false;
        };

        if fits_shifted(&self.grid, &piece, 1, 0) {
            self.active = Some(piece.shifted(1, 0));
        } else {
            self.lock_active();
        }
        true
    }

    /// Soft drop until the piece locks.
    pub fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.playable_piece() else {
            return false;
        };

        let start = self.piece_id;
        let mut fallen = piece;
        while fits_shifted(&self.grid, &fallen, 1, 0) {
            fallen = fallen.shifted(1, 0);
        }
        self.active = Some(fallen);
        self.lock_active();
        debug_assert!(self.piece_id != start || self.is_game_over());
        true
    }

    /// One gravity step from the external scheduler; same as a soft drop.
    pub fn tick(&mut self) -> bool {
        self.soft_drop()
    }

    /// Apply any command from the unified surface.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::Tick => self.tick(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
        }
    }

    /// Replace the active piece with a fresh spawn of `kind`.
    ///
    /// For scripted drivers that need a specific piece; `Running` only.
    pub fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        if !self.state.accepts_moves() {
            return false;
        }
        self.place_spawn(kind);
        true
    }

    // ----- queries -----

    /// Row the active piece's anchor would lock at if hard dropped.
    pub fn ghost_row(&self) -> Option<i8> {
        let mut piece = self.active?;
        while fits_shifted(&self.grid, &piece, 1, 0) {
            piece = piece.shifted(1, 0);
        }
        Some(piece.anchor.row)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_row = self.ghost_row();
        out.score = self.score;
        out.state = self.state;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    // ----- internals -----

    fn playable_piece(&self) -> Option<ActivePiece> {
        if !self.state.accepts_moves() {
            return None;
        }
        self.active
    }

    /// Lock, clear, score, check for game over, spawn.
    ///
    /// Runs as one step; nothing can observe the session in between.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.grid.lock(piece.cells(), piece.kind);

        let rows_cleared = self.grid.clear_full_rows() as u32;
        self.score += line_clear_points(rows_cleared);

        let game_over = self.grid.top_row_occupied();
        self.last_event = Some(LockEvent {
            episode_id: self.episode_id,
            piece_id: self.piece_id,
            rows_cleared,
            score: self.score,
            game_over,
        });

        if game_over {
            self.state = SessionState::GameOver;
        } else {
            self.spawn_next();
        }
    }

    fn spawn_next(&mut self) {
        let kind = self.randomizer.next_kind();
        self.place_spawn(kind);
    }

    fn place_spawn(&mut self, kind: PieceKind) {
        self.active = Some(ActivePiece::spawn(kind, &self.grid));
        self.piece_id = self.piece_id.wrapping_add(1);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Anchor;

    fn running(seed: u64) -> GameSession {
        let mut session = GameSession::with_seed(seed);
        session.reset();
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let mut session = GameSession::with_seed(1);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.active().is_none());
        assert!(!session.move_left());
        assert!(!session.tick());
        assert!(!session.pause());
        assert_eq!(session.episode_id(), 0);
    }

    #[test]
    fn test_reset_starts_running_with_a_piece() {
        let session = running(1);
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.piece_id(), 1);
        assert_eq!(session.episode_id(), 1);
        let piece = session.active().unwrap();
        assert_eq!(piece.anchor, Anchor::new(0, 4));
    }

    #[test]
    fn test_soft_drop_moves_down() {
        let mut session = running(5);
        let before = session.active().unwrap().anchor;
        assert!(session.soft_drop());
        assert_eq!(session.active().unwrap().anchor, before.offset(1, 0));
    }

    #[test]
    fn test_tick_locks_on_floor() {
        let mut session = running(5);
        session.spawn_kind(PieceKind::O);
        for _ in 0..18 {
            assert!(session.tick());
        }
        assert_eq!(session.piece_id(), 2);
        assert_eq!(session.active().unwrap().anchor.row, 18);

        assert!(session.tick());
        assert_eq!(session.piece_id(), 3);
        assert_eq!(session.grid().occupied_count(), 4);
        let ev = session.take_last_event().unwrap();
        assert_eq!(ev.rows_cleared, 0);
        assert!(!ev.game_over);
        assert_eq!(ev.piece_id, 2);
        assert_eq!(ev.episode_id, 1);
    }

    #[test]
    fn test_hard_drop_locks_at_ghost_row() {
        let mut session = running(2);
        session.spawn_kind(PieceKind::T);
        assert_eq!(session.ghost_row(), Some(18));
        assert!(session.hard_drop());
        assert_eq!(session.grid().cell(18, 5), Some(PieceKind::T));
        assert_eq!(session.grid().cell(19, 4), Some(PieceKind::T));
        assert_eq!(session.grid().cell(19, 6), Some(PieceKind::T));
    }

    #[test]
    fn test_pause_blocks_everything_but_resume() {
        let mut session = running(3);
        let snap = session.snapshot();

        assert!(session.pause());
        assert!(!session.pause());
        assert!(!session.tick());
        assert!(!session.move_left());
        assert!(!session.rotate());
        assert!(!session.hard_drop());
        assert_eq!(session.snapshot().board, snap.board);
        assert_eq!(session.snapshot().active, snap.active);

        assert!(session.resume());
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.snapshot().active, snap.active);
    }

    #[test]
    fn test_toggle_pause() {
        let mut session = running(3);
        assert!(session.toggle_pause());
        assert!(session.is_paused());
        assert!(session.toggle_pause());
        assert!(session.is_running());
    }

    #[test]
    fn test_game_over_makes_commands_noops() {
        let mut session = running(4);
        for col in 1..10 {
            session.grid_mut().set(0, col, Some(PieceKind::Z));
        }
        session.spawn_kind(PieceKind::O);
        assert!(session.hard_drop());
        assert!(session.is_game_over());
        assert!(session.take_last_event().unwrap().game_over);

        assert!(!session.move_left());
        assert!(!session.move_right());
        assert!(!session.rotate());
        assert!(!session.soft_drop());
        assert!(!session.hard_drop());
        assert!(!session.tick());
        assert!(!session.pause());
        assert!(!session.resume());

        assert!(session.new_game());
        assert!(session.is_running());
        assert_eq!(session.score(), 0);
        assert_eq!(session.grid().occupied_count(), 0);
    }

    #[test]
    fn test_new_game_only_after_game_over() {
        let mut session = running(4);
        let episode = session.episode_id();
        assert!(!session.new_game());
        assert_eq!(session.episode_id(), episode);
    }

    #[test]
    fn test_line_clear_scores_one_per_row() {
        let mut session = running(8);
        let grid = session.grid_mut();
        for row in [18, 19] {
            for col in 0..8 {
                grid.set(row, col, Some(PieceKind::L));
            }
        }
        session.spawn_kind(PieceKind::O);
        for _ in 0..4 {
            assert!(session.move_right());
        }
        assert!(session.hard_drop());
        assert_eq!(session.score(), 2);
        let ev = session.take_last_event().unwrap();
        assert_eq!(ev.rows_cleared, 2);
        assert_eq!(ev.score, 2);
        assert_eq!(session.grid().occupied_count(), 0);
    }

    #[test]
    fn test_tick_interval_is_configurable() {
        let config = SessionConfig::with_seed(1).tick_ms(250);
        let mut session = GameSession::new(&config);
        assert_eq!(session.tick_interval(), Duration::from_millis(250));
        let prev = session.set_tick_interval(Duration::from_millis(50));
        assert_eq!(prev, Duration::from_millis(250));
        assert_eq!(session.tick_interval(), Duration::from_millis(50));
        session.set_tick_interval(Duration::ZERO);
        assert_eq!(session.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut session = GameSession::with_seed(6);
        assert!(session.apply(Command::Reset));
        session.spawn_kind(PieceKind::O);
        assert!(session.apply(Command::MoveLeft));
        assert_eq!(session.active().unwrap().anchor.col, 3);
        assert!(session.apply(Command::Tick));
        assert_eq!(session.active().unwrap().anchor.row, 1);
        assert!(session.apply(Command::TogglePause));
        assert!(!session.apply(Command::SoftDrop));
        assert!(session.apply(Command::Resume));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = running(10);
        session.spawn_kind(PieceKind::L);
        session.grid_mut().set(19, 0, Some(PieceKind::S));
        let snap = session.snapshot();
        assert_eq!(snap.state, SessionState::Running);
        assert_eq!(snap.board[19][0], PieceKind::S.index() as u8 + 1);
        assert_eq!(snap.cell_kind(19, 0), Some(PieceKind::S));
        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::L);
        assert_eq!((active.row, active.col), (0, 4));
        assert!(snap.playable());
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = running(77);
        let mut b = running(77);
        for _ in 0..30 {
            a.hard_drop();
            b.hard_drop();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
