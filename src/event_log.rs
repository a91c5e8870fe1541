//! JSONL event log
//!
//! One JSON record per line, appended to the file named by
//! `BLOCKFALL_LOG_PATH`. Logging is best effort: a failed write disables the
//! log instead of interrupting the game.

use std::env;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{GameSession, LockEvent};
use crate::engine::AutopilotStats;

pub const LOG_PATH_VAR: &str = "BLOCKFALL_LOG_PATH";

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord<'a> {
    Reset {
        episode_id: u32,
        seed: u64,
    },
    Lock {
        episode_id: u32,
        piece_id: u32,
        rows_cleared: u32,
        score: u32,
        game_over: bool,
    },
    GameOver {
        episode_id: u32,
        score: u32,
        high_score: u32,
    },
    AutopilotStats {
        policy: &'a str,
        stats: &'a AutopilotStats,
    },
}

impl LogRecord<'_> {
    pub fn reset(session: &GameSession) -> Self {
        LogRecord::Reset {
            episode_id: session.episode_id(),
            seed: session.seed(),
        }
    }

    pub fn lock(event: LockEvent) -> Self {
        LogRecord::Lock {
            episode_id: event.episode_id,
            piece_id: event.piece_id,
            rows_cleared: event.rows_cleared,
            score: event.score,
            game_over: event.game_over,
        }
    }
}

pub struct EventLog {
    out: Option<BufWriter<File>>,
    line: Vec<u8>,
}

impl EventLog {
    /// Append to `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self {
            out: Some(BufWriter::new(file)),
            line: Vec::with_capacity(512),
        })
    }

    /// A log that drops every record.
    pub fn disabled() -> Self {
        Self {
            out: None,
            line: Vec::new(),
        }
    }

    /// Open the log named by `BLOCKFALL_LOG_PATH`, or a disabled one if unset.
    pub fn from_env() -> Result<Self> {
        match env::var(LOG_PATH_VAR).ok().map(|s| s.trim().to_string()) {
            Some(path) if !path.is_empty() => Self::open(path),
            _ => Ok(Self::disabled()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, record: &LogRecord<'_>) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.line.clear();
        if serde_json::to_writer(&mut self.line, record).is_err() {
            return;
        }
        self.line.push(b'\n');
        if out.write_all(&self.line).is_err() {
            self.out = None;
        }
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.flush();
    }
}
