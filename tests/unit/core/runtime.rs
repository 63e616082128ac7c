//! Unit tests for the backfill runtime

use chrono::NaiveDate;
use sectorpulse::backtest::runner::BacktestRunner;
use sectorpulse::config::{EngineConfig, EngineSettings};
use sectorpulse::core::runtime::{BackfillRuntime, RuntimeConfig};
use sectorpulse::models::indicators::Indicator;
use sectorpulse::services::indicator_feed::IndicatorHistory;
use sectorpulse::signals::aggregation::SectorScorer;
use std::sync::Arc;

fn runner() -> BacktestRunner {
    let scorer = SectorScorer::new(Arc::new(EngineConfig::standard().unwrap()));
    BacktestRunner::new(scorer, &EngineSettings::default())
}

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.concurrency, 4);

    let settings = EngineSettings {
        backfill_concurrency: 8,
        ..EngineSettings::default()
    };
    assert_eq!(RuntimeConfig::from(&settings).concurrency, 8);
}

#[test]
fn test_concurrency_at_least_one() {
    let runtime = BackfillRuntime::new(runner(), RuntimeConfig { concurrency: 0 });
    assert_eq!(runtime.concurrency(), 1);
    assert_eq!(runtime.with_concurrency(0).concurrency(), 1);
}

#[tokio::test]
async fn test_empty_date_list() {
    let runtime = BackfillRuntime::new(runner(), RuntimeConfig::default());
    let report = runtime
        .backfill(Arc::new(IndicatorHistory::new()), &[])
        .await
        .unwrap();
    assert!(report.history.is_empty());
    assert!(report.skipped.is_empty());
}

#[tokio::test]
async fn test_more_workers_than_dates() {
    let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let mut history = IndicatorHistory::new();
    for indicator in Indicator::ALL {
        history.insert(indicator, date, 1.0);
    }
    let runtime = BackfillRuntime::new(runner(), RuntimeConfig::default()).with_concurrency(16);
    let report = runtime.backfill(Arc::new(history), &[date]).await.unwrap();
    assert_eq!(report.history.len(), 1);
}
