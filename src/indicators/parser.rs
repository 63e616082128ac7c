use crate::indicators::error::IndicatorError;
use crate::models::indicators::RawValue;

pub fn parse_f64(value: &str) -> Result<f64, IndicatorError> {
    let trimmed = value.trim();
    let numeric = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if numeric.is_empty() {
        return Err(IndicatorError::InvalidNumericFormat(value.to_string()));
    }
    let parsed = numeric
        .parse::<f64>()
        .map_err(|_| IndicatorError::InvalidNumericFormat(value.to_string()))?;
    ensure_finite(parsed)
}

pub fn ensure_finite(value: f64) -> Result<f64, IndicatorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IndicatorError::NonFinite(value.to_string()))
    }
}

/// Parse a feed value into a finite float.
pub fn parse_value(value: &RawValue) -> Result<f64, IndicatorError> {
    match value {
        RawValue::Number(n) => ensure_finite(*n),
        RawValue::Text(s) => parse_f64(s),
    }
}
