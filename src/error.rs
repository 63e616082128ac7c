use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("insufficient data: {available} components available, {required} required")]
    InsufficientData { available: usize, required: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("backfill worker failed: {0}")]
    Worker(String),
}
