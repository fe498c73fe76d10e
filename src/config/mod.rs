//! Configuration module - environment variable parsing

use std::env;

use crate::game::r#match::ROUND_TIME_SECS;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Round length in seconds
    pub round_time_secs: f32,
    /// Seed for the match RNG; entropy-seeded when unset
    pub rng_seed: Option<u64>,
    /// Exhibition runner: log fight progress every N ticks
    pub snapshot_log_every: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let round_time_secs = match env::var("ROUND_TIME_SECS") {
            Ok(value) => value
                .parse::<f32>()
                .ok()
                .filter(|secs| *secs > 0.0)
                .ok_or(ConfigError::Invalid("ROUND_TIME_SECS"))?,
            Err(_) => ROUND_TIME_SECS,
        };

        let rng_seed = match env::var("RNG_SEED") {
            Ok(value) => Some(
                value
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid("RNG_SEED"))?,
            ),
            Err(_) => None,
        };

        let snapshot_log_every = match env::var("SNAPSHOT_LOG_EVERY") {
            Ok(value) => value
                .parse::<u64>()
                .ok()
                .filter(|every| *every > 0)
                .ok_or(ConfigError::Invalid("SNAPSHOT_LOG_EVERY"))?,
            Err(_) => 60,
        };

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            round_time_secs,
            rng_seed,
            snapshot_log_every,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
