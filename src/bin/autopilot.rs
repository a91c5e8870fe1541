//! Headless autopilot runner.
//!
//! Plays `BLOCKFALL_AUTOPILOT_GAMES` games (default 10) with the configured
//! policy as fast as possible and prints the statistics summary. No timers:
//! every loop iteration is one placement.

use std::env;

use anyhow::{bail, Context, Result};

use blockfall::core::config::{parse_u64, ConfigError};
use blockfall::core::{GameSession, HighScore, SessionConfig};
use blockfall::engine::{Autopilot, AutopilotConfig, FinishedGame};
use blockfall::event_log::{EventLog, LogRecord};

const GAMES_VAR: &str = "BLOCKFALL_AUTOPILOT_GAMES";
const DEFAULT_GAMES: u64 = 10;

/// Placements after which a single game is abandoned.
const MAX_MOVES_PER_GAME: u32 = 100_000;

fn games_from_env() -> Result<u64, ConfigError> {
    let games = parse_u64(&|var: &str| env::var(var).ok(), GAMES_VAR)?.unwrap_or(DEFAULT_GAMES);
    if games == 0 {
        return Err(ConfigError::TooSmall {
            var: GAMES_VAR,
            min: 1,
            value: 0,
        });
    }
    Ok(games)
}

fn report_game(
    autopilot: &Autopilot,
    high_score: &mut HighScore,
    log: &mut EventLog,
    session: &GameSession,
    finished: FinishedGame,
    moves: u32,
) {
    if let Some(event) = finished.final_lock {
        log.record(&LogRecord::lock(event));
    }
    let score = finished.score;
    let best = high_score.observe(score);
    println!(
        "[Autopilot] game {} over: score={} moves={}{}",
        autopilot.stats().games(),
        score,
        moves,
        if best { " (new best)" } else { "" }
    );
    log.record(&LogRecord::GameOver {
        episode_id: session.episode_id().wrapping_sub(1),
        score,
        high_score: high_score.best(),
    });
    log.record(&LogRecord::reset(session));
}

fn main() -> Result<()> {
    let config = SessionConfig::from_env().context("session config")?;
    let autopilot_config = AutopilotConfig::from_env().context("autopilot config")?;
    let games = games_from_env().context("autopilot config")?;
    let mut log = EventLog::from_env()?;

    let mut session = GameSession::new(&config);
    let mut autopilot = Autopilot::from_config(autopilot_config, session.seed());
    let mut high_score = HighScore::new();

    println!(
        "[Autopilot] policy={} seed={} games={} drop={}",
        autopilot.policy_name(),
        session.seed(),
        games,
        autopilot.config().drop
    );
    if log.is_enabled() {
        println!("[Autopilot] event log enabled");
    }

    session.reset();
    log.record(&LogRecord::reset(&session));
    autopilot.start(&mut session);

    let mut moves_this_game = 0u32;
    while (autopilot.stats().games() as u64) < games {
        let Some(outcome) = autopilot.step(&mut session) else {
            bail!("autopilot stalled in state {}", session.state().as_str());
        };
        moves_this_game += 1;

        if let Some(finished) = outcome.finished {
            report_game(&autopilot, &mut high_score, &mut log, &session, finished, moves_this_game);
            moves_this_game = 0;
        }

        if let Some(event) = session.take_last_event() {
            log.record(&LogRecord::lock(event));
        }
        if !autopilot.config().drop {
            session.tick();
            if let Some(event) = session.take_last_event() {
                log.record(&LogRecord::lock(event));
            }
        }

        if moves_this_game >= MAX_MOVES_PER_GAME {
            println!("[Autopilot] cutting game short after {moves_this_game} moves");
            let finished = autopilot.finish_game(&mut session);
            report_game(&autopilot, &mut high_score, &mut log, &session, finished, moves_this_game);
            moves_this_game = 0;
        }
    }

    autopilot.stop(&mut session);
    log.record(&LogRecord::AutopilotStats {
        policy: autopilot.policy_name(),
        stats: autopilot.stats(),
    });
    log.flush();

    println!("[Autopilot] finished");
    println!("{}", autopilot.stats());
    Ok(())
}
