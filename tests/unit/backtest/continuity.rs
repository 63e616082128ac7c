//! Unit tests for the stale daily series check

use chrono::NaiveDate;
use sectorpulse::backtest::continuity::detect_stale_series;
use sectorpulse::models::indicators::{Indicator, IndicatorSnapshot};

// 2024-01-01 is a Monday
fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn snapshots(days: std::ops::RangeInclusive<u32>, gap: impl Fn(u32) -> f64) -> Vec<IndicatorSnapshot> {
    days.map(|d| {
        IndicatorSnapshot::new(date(d))
            .with_value(Indicator::NasdaqGap, gap(d))
            .with_value(Indicator::Vix, 12.0 + d as f64)
            .with_value(Indicator::CpiYoy, 3.1)
    })
    .collect()
}

#[test]
fn test_constant_daily_series_flagged() {
    let warnings = detect_stale_series(&snapshots(1..=10, |_| 1.25), 5);

    assert_eq!(warnings.len(), 1);
    let warning = &warnings[0];
    assert_eq!(warning.indicator, Indicator::NasdaqGap);
    // Jan 1-5 and Jan 8-10
    assert_eq!(warning.run_length, 8);
    assert_eq!(warning.first_date, date(1));
    assert_eq!(warning.last_date, date(10));
}

#[test]
fn test_monthly_series_never_flagged() {
    // CPI is constant throughout but is not a daily series
    let warnings = detect_stale_series(&snapshots(1..=31, |d| d as f64), 5);
    assert!(warnings.is_empty());
}

#[test]
fn test_weekend_repeats_ignored() {
    // Mon-Fri identical, weekend repeats Friday, Monday moves
    let warnings = detect_stale_series(&snapshots(1..=8, |d| if d < 8 { 0.5 } else { 0.6 }), 5);
    assert!(warnings.is_empty());
}

#[test]
fn test_change_breaks_run() {
    let gap = |d: u32| if d == 4 { 2.0 } else { 1.0 };
    let warnings = detect_stale_series(&snapshots(1..=12, gap), 5);
    // runs: Jan 1-3 (3), Jan 5-12 weekdays (6)
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].run_length, 6);
    assert_eq!(warnings[0].first_date, date(5));
}

#[test]
fn test_threshold_is_exclusive() {
    // exactly five weekdays
    let warnings = detect_stale_series(&snapshots(1..=5, |_| 1.0), 5);
    assert!(warnings.is_empty());
    let warnings = detect_stale_series(&snapshots(1..=5, |_| 1.0), 4);
    assert_eq!(warnings.len(), 1);
}
