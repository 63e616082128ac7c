//! Unit tests for the backtest runner

use chrono::NaiveDate;
use sectorpulse::backtest::history::SectorHistory;
use sectorpulse::backtest::runner::{BacktestRunner, DateOutcome};
use sectorpulse::config::{EngineConfig, EngineSettings};
use sectorpulse::metrics::Metrics;
use sectorpulse::models::indicators::Indicator;
use sectorpulse::models::sector::Sector;
use sectorpulse::services::indicator_feed::{IndicatorFeed, IndicatorHistory};
use sectorpulse::signals::aggregation::SectorScorer;
use std::sync::Arc;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
}

fn runner() -> BacktestRunner {
    let scorer = SectorScorer::new(Arc::new(EngineConfig::standard().unwrap()));
    BacktestRunner::new(scorer, &EngineSettings::default())
}

/// Four monthly series from Feb 1, a fifth (VIX) from Feb 5.
fn history() -> IndicatorHistory {
    let mut history = IndicatorHistory::new()
        .with_observation(Indicator::CpiYoy, date(1), 3.1)
        .with_observation(Indicator::PcepiYoy, date(1), 2.6)
        .with_observation(Indicator::Unemployment, date(1), 3.8)
        .with_observation(Indicator::FedFundsRate, date(1), 5.33);
    for (d, vix) in [(5, 13.2), (6, 13.8), (7, 15.1), (8, 19.4), (9, 21.0)] {
        history.insert(Indicator::Vix, date(d), vix);
    }
    history
}

#[test]
fn test_date_with_too_few_indicators_skipped() {
    match runner().score_date(&history(), date(2)) {
        DateOutcome::Skipped(skipped) => {
            assert_eq!(skipped.date, date(2));
            assert_eq!(skipped.available, 4);
            assert_eq!(skipped.required, 5);
        }
        other => panic!("expected skip, got {:?}", other),
    }
}

#[test]
fn test_unparseable_values_do_not_count() {
    let history = history().with_observation(Indicator::NasdaqGap, date(2), "#N/A");
    assert!(matches!(
        runner().score_date(&history, date(2)),
        DateOutcome::Skipped(_)
    ));
}

#[test]
fn test_date_with_enough_indicators_scored() {
    match runner().score_date(&history(), date(5)) {
        DateOutcome::Scored { row, snapshot } => {
            assert_eq!(row.date, date(5));
            assert_eq!(row.scores.len(), Sector::COUNT);
            assert_eq!(snapshot.len(), 5);
            assert!(row.scores.iter().all(|s| s.as_of == date(5)));
        }
        other => panic!("expected scored date, got {:?}", other),
    }
}

#[test]
fn test_backfill_sorts_and_dedups_dates() {
    let dates = [date(9), date(2), date(5), date(9), date(7), date(3)];
    let report = runner().backfill(&history(), &dates);

    assert_eq!(report.history.dates(), vec![date(5), date(7), date(9)]);
    let skipped: Vec<NaiveDate> = report.skipped.iter().map(|s| s.date).collect();
    assert_eq!(skipped, vec![date(2), date(3)]);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_backfill_is_idempotent() {
    let dates: Vec<NaiveDate> = (1..=9).map(date).collect();
    let runner = runner();
    assert_eq!(
        runner.backfill(&history(), &dates),
        runner.backfill(&history(), &dates)
    );
}

#[test]
fn test_backfill_matches_live_scoring() {
    let config = Arc::new(EngineConfig::standard().unwrap());
    let scorer = SectorScorer::new(config);
    let runner = BacktestRunner::new(scorer.clone(), &EngineSettings::default());
    let feed = history();

    let report = runner.backfill(&feed, &[date(8)]);
    let live = scorer.score(&feed.snapshot_at(date(8)));
    assert_eq!(report.history.rows()[0].scores, live);
}

#[test]
fn test_sector_series() {
    let dates: Vec<NaiveDate> = (5..=9).map(date).collect();
    let report = runner().backfill(&history(), &dates);
    let series = report.history.series(Sector::Fintech);

    assert_eq!(series.len(), 5);
    assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    for point in &series {
        assert!((point.display_score - (point.raw_score + 1.0) * 50.0).abs() < 1e-9);
    }
    // VIX crosses from favorable (13.2) to unfavorable (21.0)
    assert!(series[0].raw_score > series[4].raw_score);
}

#[test]
fn test_backfill_updates_metrics() {
    let metrics = Arc::new(Metrics::new().unwrap());
    let runner = runner().with_metrics(metrics.clone());
    let dates: Vec<NaiveDate> = (1..=9).map(date).collect();
    runner.backfill(&history(), &dates);

    assert_eq!(metrics.backfill_dates_scored.get(), 5);
    assert_eq!(metrics.backfill_dates_skipped.get(), 4);
}

#[test]
fn test_history_rows_deduplicated() {
    let report = runner().backfill(&history(), &[date(5), date(6)]);
    let mut rows = report.history.rows().to_vec();
    rows.push(rows[0].clone());
    let history = SectorHistory::from_rows(rows);
    assert_eq!(history.len(), 2);
    assert!(history.get(date(6)).is_some());
    assert!(history.get(date(7)).is_none());
}
