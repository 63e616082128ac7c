use thiserror::Error;

/// Problems with a single indicator value. Callers absorb these into a
/// neutral signal; they never abort scoring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("invalid numeric format: {0:?}")]
    InvalidNumericFormat(String),

    #[error("non-finite value: {0}")]
    NonFinite(String),
}
