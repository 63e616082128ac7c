//! Engine tables and environment-driven settings.

pub mod bands;
pub mod curves;
pub mod engine;
pub mod tables;

pub use bands::{Band, Directionality};
pub use curves::ScoreCurve;
pub use engine::{ConfigError, EngineConfig, RawEngineConfig};

use std::path::PathBuf;

pub const DEFAULT_MIN_PULSE_COMPONENTS: usize = 6;
pub const DEFAULT_MIN_BACKFILL_INDICATORS: usize = 5;
pub const DEFAULT_BACKFILL_CONCURRENCY: usize = 4;
pub const DEFAULT_STALE_SERIES_THRESHOLD: usize = 5;

pub fn get_environment() -> String {
    dotenvy::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn env_usize(key: &str, default: usize) -> usize {
    dotenvy::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Runtime knobs read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Minimum scored components before a pulse index is published.
    pub min_pulse_components: usize,
    /// Minimum indicators on a date before backfill scores it.
    pub min_backfill_indicators: usize,
    pub backfill_concurrency: usize,
    /// Consecutive identical weekday values tolerated on a daily series.
    pub stale_series_threshold: usize,
    /// Optional JSON file replacing the built-in tables.
    pub config_path: Option<PathBuf>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_pulse_components: DEFAULT_MIN_PULSE_COMPONENTS,
            min_backfill_indicators: DEFAULT_MIN_BACKFILL_INDICATORS,
            backfill_concurrency: DEFAULT_BACKFILL_CONCURRENCY,
            stale_series_threshold: DEFAULT_STALE_SERIES_THRESHOLD,
            config_path: None,
        }
    }
}

impl EngineSettings {
    pub fn from_env() -> Self {
        Self {
            min_pulse_components: env_usize("PULSE_MIN_COMPONENTS", DEFAULT_MIN_PULSE_COMPONENTS),
            min_backfill_indicators: env_usize(
                "BACKFILL_MIN_INDICATORS",
                DEFAULT_MIN_BACKFILL_INDICATORS,
            ),
            backfill_concurrency: env_usize("BACKFILL_CONCURRENCY", DEFAULT_BACKFILL_CONCURRENCY)
                .max(1),
            stale_series_threshold: env_usize(
                "STALE_SERIES_THRESHOLD",
                DEFAULT_STALE_SERIES_THRESHOLD,
            ),
            config_path: dotenvy::var("PULSE_CONFIG_PATH").ok().map(PathBuf::from),
        }
    }

    /// Load the engine tables named by these settings, falling back to the
    /// built-in tables.
    pub fn load_engine_config(&self) -> Result<EngineConfig, ConfigError> {
        match &self.config_path {
            Some(path) => EngineConfig::from_path(path),
            None => EngineConfig::standard(),
        }
    }
}
