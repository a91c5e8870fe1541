//! Autopilot - a policy playing the session through the command surface
//!
//! While active the autopilot speeds the session's gravity period up to
//! [`AUTOPILOT_TICK_MS`] and restores the previous value when stopped. The
//! driver loop calls [`Autopilot::step`] once per tick interval; each step
//! chooses an action, translates it into commands and starts a new game
//! once the current one is over.
//!
//! Configuration is read from environment variables:
//!
//! - `BLOCKFALL_AUTOPILOT_TICK_MS`: tick interval while active (default 50)
//! - `BLOCKFALL_AUTOPILOT_POLICY`: `heuristic` (default) or `random`
//! - `BLOCKFALL_AUTOPILOT_DROP`: hard drop after placing (default true)

use std::env;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use blockfall_core::config::{parse_bool, parse_u64, ConfigError};
use blockfall_core::types::{AUTOPILOT_TICK_MS, BOARD_WIDTH, MIN_TICK_MS};
use blockfall_core::{GameSession, LockEvent};

use crate::action::{decode_action_id, Placement, ACTION_DIM, ROTATION_COUNT};
use crate::place::{apply_placement, PlaceReport};
use crate::policy::{HeuristicPolicy, HeuristicWeights, Policy, RandomPolicy};

pub const TICK_MS_VAR: &str = "BLOCKFALL_AUTOPILOT_TICK_MS";
pub const POLICY_VAR: &str = "BLOCKFALL_AUTOPILOT_POLICY";
pub const DROP_VAR: &str = "BLOCKFALL_AUTOPILOT_DROP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    Heuristic,
    Random,
}

impl PolicyKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Some(PolicyKind::Heuristic),
            "random" => Some(PolicyKind::Random),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Heuristic => "heuristic",
            PolicyKind::Random => "random",
        }
    }

    /// Build the policy; `seed` only matters for the random one.
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyKind::Heuristic => Box::new(HeuristicPolicy::new(HeuristicWeights::default())),
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

/// Autopilot configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutopilotConfig {
    /// Gravity period while the autopilot is active
    pub tick_interval: Duration,
    pub policy: PolicyKind,
    /// Hard drop after each placement instead of letting gravity finish it
    pub drop: bool,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(AUTOPILOT_TICK_MS),
            policy: PolicyKind::default(),
            drop: true,
        }
    }
}

impl AutopilotConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ms) = parse_u64(&lookup, TICK_MS_VAR)? {
            if ms < MIN_TICK_MS {
                return Err(ConfigError::TooSmall {
                    var: TICK_MS_VAR,
                    min: MIN_TICK_MS,
                    value: ms,
                });
            }
            config.tick_interval = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup(POLICY_VAR).filter(|v| !v.trim().is_empty()) {
            config.policy = PolicyKind::from_str(&raw).ok_or(ConfigError::Invalid {
                var: POLICY_VAR,
                value: raw,
                expected: "heuristic/random",
            })?;
        }

        if let Some(drop) = parse_bool(&lookup, DROP_VAR)? {
            config.drop = drop;
        }

        Ok(config)
    }
}

/// Move and game statistics collected while the autopilot plays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutopilotStats {
    pub positions: [u32; BOARD_WIDTH as usize],
    pub rotations: [u32; ROTATION_COUNT],
    #[serde(serialize_with = "serialize_actions")]
    pub actions: [u32; ACTION_DIM],
    pub action_sum: u64,
    pub total_moves: u32,
    /// Final score of every finished game
    pub scores: Vec<u32>,
}

fn serialize_actions<S: serde::Serializer>(
    actions: &[u32; ACTION_DIM],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(actions.iter())
}

impl Default for AutopilotStats {
    fn default() -> Self {
        Self {
            positions: [0; BOARD_WIDTH as usize],
            rotations: [0; ROTATION_COUNT],
            actions: [0; ACTION_DIM],
            action_sum: 0,
            total_moves: 0,
            scores: Vec::new(),
        }
    }
}

impl AutopilotStats {
    pub fn record_move(&mut self, aid: usize, placement: Placement) {
        self.positions[placement.column as usize] += 1;
        self.rotations[placement.rotation as usize] += 1;
        self.actions[aid] += 1;
        self.action_sum += aid as u64;
        self.total_moves += 1;
    }

    pub fn record_score(&mut self, score: u32) {
        self.scores.push(score);
    }

    pub fn games(&self) -> usize {
        self.scores.len()
    }

    pub fn average_score(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        let total: u64 = self.scores.iter().map(|&s| u64::from(s)).sum();
        Some(total as f64 / self.scores.len() as f64)
    }

    pub fn max_score(&self) -> Option<u32> {
        self.scores.iter().copied().max()
    }

    pub fn average_action(&self) -> Option<f64> {
        (self.total_moves > 0).then(|| self.action_sum as f64 / f64::from(self.total_moves))
    }

    /// Share of moves per bucket, in percent.
    pub fn percentages(&self, counts: &[u32]) -> Vec<f64> {
        counts
            .iter()
            .map(|&c| {
                if self.total_moves == 0 {
                    0.0
                } else {
                    f64::from(c) * 100.0 / f64::from(self.total_moves)
                }
            })
            .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn write_percentages(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    write!(f, "[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v:.2}")?;
    }
    write!(f, "]")
}

impl fmt::Display for AutopilotStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.average_score() {
            Some(avg) => writeln!(f, "average score: {avg:.2}")?,
            None => writeln!(f, "average score: -")?,
        }
        match self.max_score() {
            Some(max) => writeln!(f, "max score: {max}")?,
            None => writeln!(f, "max score: -")?,
        }
        writeln!(f, "all scores: {:?}", self.scores)?;
        writeln!(f, "total games: {}", self.games())?;
        writeln!(f, "total moves: {}", self.total_moves)?;
        write!(f, "position percentages: ")?;
        write_percentages(f, &self.percentages(&self.positions))?;
        writeln!(f)?;
        write!(f, "rotation percentages: ")?;
        write_percentages(f, &self.percentages(&self.rotations))?;
        writeln!(f)?;
        write!(f, "action percentages: ")?;
        write_percentages(f, &self.percentages(&self.actions))?;
        writeln!(f)?;
        match self.average_action() {
            Some(avg) => write!(f, "average action: {avg:.2}"),
            None => write!(f, "average action: -"),
        }
    }
}

/// What one [`Autopilot::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub action: usize,
    pub placement: Placement,
    pub report: PlaceReport,
    /// Set when this step ended a game; a new one has been started.
    pub finished: Option<FinishedGame>,
}

/// A game the autopilot scored before starting the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinishedGame {
    pub score: u32,
    /// Lock event still pending when the game was restarted. The reset
    /// would otherwise discard it.
    pub final_lock: Option<LockEvent>,
}

pub struct Autopilot {
    policy: Box<dyn Policy>,
    config: AutopilotConfig,
    /// Tick interval to restore on stop; `Some` while active.
    saved_tick: Option<Duration>,
    stats: AutopilotStats,
}

impl Autopilot {
    pub fn new(policy: Box<dyn Policy>, config: AutopilotConfig) -> Self {
        Self {
            policy,
            config,
            saved_tick: None,
            stats: AutopilotStats::default(),
        }
    }

    /// Build the configured policy.
    pub fn from_config(config: AutopilotConfig, seed: u64) -> Self {
        let policy = config.policy.build(seed);
        Self::new(policy, config)
    }

    pub fn is_active(&self) -> bool {
        self.saved_tick.is_some()
    }

    pub fn config(&self) -> &AutopilotConfig {
        &self.config
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn stats(&self) -> &AutopilotStats {
        &self.stats
    }

    /// Take over the session and speed up its gravity.
    pub fn start(&mut self, session: &mut GameSession) -> bool {
        if self.is_active() {
            return false;
        }
        self.saved_tick = Some(session.set_tick_interval(self.config.tick_interval));
        true
    }

    /// Hand the session back with its previous gravity period.
    pub fn stop(&mut self, session: &mut GameSession) -> bool {
        let Some(saved) = self.saved_tick.take() else {
            return false;
        };
        session.set_tick_interval(saved);
        true
    }

    pub fn toggle(&mut self, session: &mut GameSession) -> bool {
        if self.is_active() {
            self.stop(session)
        } else {
            self.start(session)
        }
    }

    /// Play one placement.
    ///
    /// A session that is already over (gravity locked the last piece) is
    /// scored and restarted first. Returns `None` when inactive, when the
    /// session is not running, or when the policy finds nothing to do.
    pub fn step(&mut self, session: &mut GameSession) -> Option<StepOutcome> {
        if !self.is_active() {
            return None;
        }
        let carried = self.restart_if_over(session);
        if !session.is_running() {
            return None;
        }

        let action = self.policy.choose_action(session)?;
        let placement = decode_action_id(action)?;
        self.stats.record_move(action, placement);

        let report = apply_placement(session, placement, self.config.drop).ok()?;
        let finished = carried.or_else(|| self.restart_if_over(session));

        Some(StepOutcome {
            action,
            placement,
            report,
            finished,
        })
    }

    /// Record the final score and start a new game if the session is over.
    pub fn restart_if_over(&mut self, session: &mut GameSession) -> Option<FinishedGame> {
        session.is_game_over().then(|| self.finish_game(session))
    }

    /// Record the current score as a finished game and start a fresh one,
    /// whether or not the game is over (used to cut endless games short).
    pub fn finish_game(&mut self, session: &mut GameSession) -> FinishedGame {
        let score = session.score();
        let final_lock = session.take_last_event();
        self.stats.record_score(score);
        session.reset();
        FinishedGame { score, final_lock }
    }
}

impl fmt::Debug for Autopilot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autopilot")
            .field("policy", &self.policy.name())
            .field("config", &self.config)
            .field("active", &self.is_active())
            .field("moves", &self.stats.total_moves)
            .finish()
    }
}
