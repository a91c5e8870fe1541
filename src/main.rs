//! Terminal game (default binary).
//!
//! crossterm for input, the framebuffer renderer for output. Gravity is driven
//! from this loop: whenever the session's tick interval has elapsed, either
//! the autopilot plays a placement or the session gets a `tick()`.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameSession, HighScore, LockEvent, SessionConfig};
use blockfall::engine::{Autopilot, AutopilotConfig};
use blockfall::event_log::{EventLog, LogRecord};
use blockfall::input::{handle_key_event, is_autopilot_toggle, should_quit};
use blockfall::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use blockfall::types::Command;

fn main() -> Result<()> {
    let config = SessionConfig::from_env().context("session config")?;
    let autopilot_config = AutopilotConfig::from_env().context("autopilot config")?;
    let log = EventLog::from_env()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, autopilot_config, log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

struct App {
    session: GameSession,
    autopilot: Autopilot,
    high_score: HighScore,
    log: EventLog,
}

impl App {
    fn apply(&mut self, command: Command) {
        if self.session.apply(command) && command == Command::Reset {
            self.log.record(&LogRecord::reset(&self.session));
        }
        self.after_command();
    }

    /// Bookkeeping after anything that may have locked a piece.
    fn after_command(&mut self) {
        if let Some(event) = self.session.take_last_event() {
            self.on_lock(event);
        }
    }

    fn on_lock(&mut self, event: LockEvent) {
        self.high_score.observe(event.score);
        self.log.record(&LogRecord::lock(event));
        if event.game_over {
            self.log.record(&LogRecord::GameOver {
                episode_id: event.episode_id,
                score: event.score,
                high_score: self.high_score.best(),
            });
        }
    }

    fn gravity(&mut self) {
        if !self.autopilot.is_active() {
            self.apply(Command::Tick);
            return;
        }

        let finished = self
            .autopilot
            .step(&mut self.session)
            .and_then(|outcome| outcome.finished);
        if let Some(finished) = finished {
            // A game ended by gravity was already handled by after_command.
            if let Some(event) = finished.final_lock {
                self.on_lock(event);
            }
            self.log.record(&LogRecord::reset(&self.session));
        }
        self.after_command();

        if !self.autopilot.config().drop {
            self.apply(Command::Tick);
        }
    }

    fn toggle_autopilot(&mut self) {
        if self.autopilot.toggle(&mut self.session) && !self.autopilot.is_active() {
            let stats = self.autopilot.stats();
            self.log.record(&LogRecord::AutopilotStats {
                policy: self.autopilot.policy_name(),
                stats,
            });
        }
    }

    fn hud(&self) -> Hud {
        Hud {
            high_score: self.high_score.best(),
            autopilot: self
                .autopilot
                .is_active()
                .then(|| self.autopilot.policy_name()),
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    config: &SessionConfig,
    autopilot_config: AutopilotConfig,
    log: EventLog,
) -> Result<()> {
    let session = GameSession::new(config);
    let autopilot = Autopilot::from_config(autopilot_config, session.seed());
    let mut app = App {
        session,
        autopilot,
        high_score: HighScore::new(),
        log,
    };

    let view = GameView::default();
    let mut frame = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&app.session.snapshot(), &app.hud(), Viewport::new(w, h), &mut frame);
        term.present(&mut frame)?;

        // Input with timeout until next tick.
        let tick = app.session.tick_interval();
        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        break;
                    }
                    if is_autopilot_toggle(key) {
                        app.toggle_autopilot();
                    } else if let Some(command) = handle_key_event(key) {
                        // Piece moves belong to the autopilot while it plays.
                        if !(app.autopilot.is_active() && command.is_piece_move()) {
                            app.apply(command);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= app.session.tick_interval() {
            last_tick = Instant::now();
            app.gravity();
        }
    }

    if app.autopilot.is_active() {
        app.toggle_autopilot();
    }
    app.log.flush();
    Ok(())
}
