//! Session configuration
//!
//! Read from environment variables:
//!
//! - `BLOCKFALL_TICK_MS`: gravity period in milliseconds (default 1000)
//! - `BLOCKFALL_SEED`: piece sequence seed (default: drawn from OS entropy)

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::types::{DEFAULT_TICK_MS, MIN_TICK_MS};

pub const TICK_MS_VAR: &str = "BLOCKFALL_TICK_MS";
pub const SEED_VAR: &str = "BLOCKFALL_SEED";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected an unsigned integer, got {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var}: must be at least {min}, got {value}")]
    TooSmall {
        var: &'static str,
        min: u64,
        value: u64,
    },
    #[error("{var}: expected one of {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Gravity period the external scheduler should use between ticks
    pub tick_interval: Duration,
    /// Piece sequence seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn tick_ms(mut self, ms: u64) -> Self {
        self.tick_interval = Duration::from_millis(ms.max(MIN_TICK_MS));
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Create from an arbitrary variable lookup (tests, embedded drivers).
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

        config.seed = parse_u64(&lookup, SEED_VAR)?;
        Ok(config)
    }
}

/// Parse an optional unsigned variable; blank counts as unset.
pub fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::NotANumber {
            var,
            value: raw.clone(),
        })
}

/// Parse an optional boolean variable (`1/true/yes/on`, `0/false/no/off`).
pub fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<bool>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw,
            expected: "true/false",
        }),
    }
}
