//! Unit tests for the in-memory indicator history feed

use chrono::NaiveDate;
use sectorpulse::models::indicators::{Indicator, RawValue};
use sectorpulse::services::indicator_feed::{IndicatorFeed, IndicatorHistory};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

#[test]
fn test_value_at_is_point_in_time() {
    let history = IndicatorHistory::new()
        .with_observation(Indicator::Vix, date(2), 14.0)
        .with_observation(Indicator::Vix, date(10), 21.0);

    assert_eq!(history.value_at(Indicator::Vix, date(1)), None);
    assert_eq!(
        history.value_at(Indicator::Vix, date(2)),
        Some(RawValue::Number(14.0))
    );
    assert_eq!(
        history.value_at(Indicator::Vix, date(9)),
        Some(RawValue::Number(14.0))
    );
    assert_eq!(
        history.value_at(Indicator::Vix, date(15)),
        Some(RawValue::Number(21.0))
    );
    assert_eq!(history.value_at(Indicator::CpiYoy, date(15)), None);
}

#[test]
fn test_snapshot_at_contains_known_series_only() {
    let history = IndicatorHistory::new()
        .with_observation(Indicator::Vix, date(2), 14.0)
        .with_observation(Indicator::CpiYoy, date(5), 3.1);

    let early = history.snapshot_at(date(3));
    assert_eq!(early.as_of, date(3));
    assert_eq!(early.len(), 1);

    let later = history.snapshot_at(date(5));
    assert_eq!(later.len(), 2);
    assert_eq!(later.get(Indicator::CpiYoy), Some(&RawValue::Number(3.1)));
}

#[test]
fn test_observation_dates_are_merged() {
    let history = IndicatorHistory::new()
        .with_observation(Indicator::Vix, date(2), 14.0)
        .with_observation(Indicator::Vix, date(3), 14.5)
        .with_observation(Indicator::CpiYoy, date(3), 3.1)
        .with_observation(Indicator::CpiYoy, date(1), 3.0);

    let dates: Vec<NaiveDate> = history.observation_dates().into_iter().collect();
    assert_eq!(dates, vec![date(1), date(2), date(3)]);
}

#[test]
fn test_history_from_json() {
    let json = r#"{
        "VIX": { "2024-01-02": 14.2, "2024-01-03": "15.1" },
        "NASDAQ_20d_gap_%": { "2024-01-02": -0.8 }
    }"#;
    let history = IndicatorHistory::from_json(json).unwrap();

    assert_eq!(
        history.value_at(Indicator::Vix, date(3)),
        Some(RawValue::Text("15.1".to_string()))
    );
    assert_eq!(
        history.value_at(Indicator::NasdaqGap, date(4)),
        Some(RawValue::Number(-0.8))
    );
    assert_eq!(history.series(Indicator::Vix).map(|s| s.len()), Some(2));
}

#[test]
fn test_history_rejects_unknown_indicator() {
    let json = r#"{ "Bitcoin": { "2024-01-02": 1.0 } }"#;
    assert!(IndicatorHistory::from_json(json).is_err());
}
