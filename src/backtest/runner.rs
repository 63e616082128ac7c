//! Historical backtest runner.
//!
//! Each date gets a point-in-time snapshot from the feed and goes through
//! the same `SectorScorer` used for live scoring; nothing is cached
//! between dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

use crate::backtest::continuity::{detect_stale_series, StaleSeriesWarning};
use crate::backtest::history::{HistoryRow, SectorHistory};
use crate::config::EngineSettings;
use crate::indicators::parser::parse_value;
use crate::metrics::Metrics;
use crate::models::indicators::IndicatorSnapshot;
use crate::services::indicator_feed::IndicatorFeed;
use crate::signals::aggregation::SectorScorer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDate {
    pub date: NaiveDate,
    pub available: usize,
    pub required: usize,
}

/// Result of scoring a single date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateOutcome {
    Scored {
        row: HistoryRow,
        snapshot: IndicatorSnapshot,
    },
    Skipped(SkippedDate),
}

impl DateOutcome {
    pub fn date(&self) -> NaiveDate {
        match self {
            DateOutcome::Scored { row, .. } => row.date,
            DateOutcome::Skipped(skipped) => skipped.date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackfillReport {
    pub history: SectorHistory,
    pub skipped: Vec<SkippedDate>,
    pub warnings: Vec<StaleSeriesWarning>,
}

#[derive(Clone)]
pub struct BacktestRunner {
    scorer: SectorScorer,
    min_indicators: usize,
    stale_threshold: usize,
    metrics: Option<Arc<Metrics>>,
}

impl BacktestRunner {
    pub fn new(scorer: SectorScorer, settings: &EngineSettings) -> Self {
        Self {
            scorer,
            min_indicators: settings.min_backfill_indicators,
            stale_threshold: settings.stale_series_threshold,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn min_indicators(&self) -> usize {
        self.min_indicators
    }

    /// Score one date from a point-in-time snapshot.
    pub fn score_date<F>(&self, feed: &F, date: NaiveDate) -> DateOutcome
    where
        F: IndicatorFeed + ?Sized,
    {
        let snapshot = feed.snapshot_at(date);
        let available = snapshot
            .values
            .values()
            .filter(|value| parse_value(value).is_ok())
            .count();

        if available < self.min_indicators {
            return DateOutcome::Skipped(SkippedDate {
                date,
                available,
                required: self.min_indicators,
            });
        }

        let row = HistoryRow {
            date,
            scores: self.scorer.score(&snapshot),
        };
        DateOutcome::Scored { row, snapshot }
    }

    /// Score every date in `dates` (duplicates ignored) and collate.
    pub fn backfill<F>(&self, feed: &F, dates: &[NaiveDate]) -> BackfillReport
    where
        F: IndicatorFeed + ?Sized,
    {
        let unique: BTreeSet<NaiveDate> = dates.iter().copied().collect();
        let outcomes = unique
            .into_iter()
            .map(|date| self.score_date(feed, date))
            .collect();
        self.collate(outcomes)
    }

    /// Sort outcomes by date and build the report. Order of `outcomes`
    /// does not matter.
    pub fn collate(&self, mut outcomes: Vec<DateOutcome>) -> BackfillReport {
        outcomes.sort_by_key(DateOutcome::date);
        outcomes.dedup_by_key(|outcome| outcome.date());

        let mut rows = Vec::new();
        let mut snapshots = Vec::new();
        let mut skipped = Vec::new();

        for outcome in outcomes {
            match outcome {
                DateOutcome::Scored { row, snapshot } => {
                    rows.push(row);
                    snapshots.push(snapshot);
                }
                DateOutcome::Skipped(date) => {
                    info!(
                        date = %date.date,
                        available = date.available,
                        required = date.required,
                        "skipping backfill date with insufficient indicators"
                    );
                    skipped.push(date);
                }
            }
        }

        let warnings = detect_stale_series(&snapshots, self.stale_threshold);

        if let Some(metrics) = &self.metrics {
            metrics.backfill_dates_scored.inc_by(rows.len() as u64);
            metrics.backfill_dates_skipped.inc_by(skipped.len() as u64);
            metrics.stale_series_warnings.inc_by(warnings.len() as u64);
        }

        info!(
            scored = rows.len(),
            skipped = skipped.len(),
            warnings = warnings.len(),
            "backfill complete"
        );

        BackfillReport {
            history: SectorHistory::from_rows(rows),
            skipped,
            warnings,
        }
    }
}
