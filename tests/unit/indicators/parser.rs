//! Unit tests for indicator value parsing

use sectorpulse::indicators::error::IndicatorError;
use sectorpulse::indicators::parser::{parse_f64, parse_value};
use sectorpulse::models::indicators::RawValue;

#[test]
fn test_parse_plain_and_percent() {
    assert_eq!(parse_f64("3.25").unwrap(), 3.25);
    assert_eq!(parse_f64(" 4.2% ").unwrap(), 4.2);
    assert_eq!(parse_f64("-0.5").unwrap(), -0.5);
}

#[test]
fn test_parse_scientific_notation() {
    assert_eq!(parse_f64("1e-2").unwrap(), 0.01);
    assert_eq!(parse_f64("2.5E1").unwrap(), 25.0);
}

#[test]
fn test_parse_rejects_empty_and_garbage() {
    assert!(matches!(
        parse_f64(""),
        Err(IndicatorError::InvalidNumericFormat(_))
    ));
    assert!(matches!(
        parse_f64("   %"),
        Err(IndicatorError::InvalidNumericFormat(_))
    ));
    assert!(matches!(
        parse_f64("n/a"),
        Err(IndicatorError::InvalidNumericFormat(_))
    ));
}

#[test]
fn test_parse_rejects_non_finite() {
    assert!(matches!(parse_f64("NaN"), Err(IndicatorError::NonFinite(_))));
    assert!(matches!(parse_f64("inf"), Err(IndicatorError::NonFinite(_))));
    assert!(matches!(
        parse_value(&RawValue::Number(f64::NAN)),
        Err(IndicatorError::NonFinite(_))
    ));
}

#[test]
fn test_parse_value_variants() {
    assert_eq!(parse_value(&RawValue::Number(17.0)).unwrap(), 17.0);
    assert_eq!(parse_value(&RawValue::from("17.5%")).unwrap(), 17.5);
}
