//! Worker pool for backfill.
//!
//! Dates are split into chunks and scored on tokio's blocking pool; the
//! collated report is identical to a sequential `BacktestRunner::backfill`.

use chrono::NaiveDate;
use futures_util::future::join_all;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::backtest::runner::{BackfillReport, BacktestRunner, DateOutcome};
use crate::config::{EngineSettings, DEFAULT_BACKFILL_CONCURRENCY};
use crate::error::EngineError;
use crate::services::indicator_feed::IndicatorFeed;

/// Configuration for the backfill runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub concurrency: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_BACKFILL_CONCURRENCY,
        }
    }
}

impl From<&EngineSettings> for RuntimeConfig {
    fn from(settings: &EngineSettings) -> Self {
        Self {
            concurrency: settings.backfill_concurrency,
        }
    }
}

pub struct BackfillRuntime {
    runner: Arc<BacktestRunner>,
    concurrency: usize,
}

impl BackfillRuntime {
    pub fn new(runner: BacktestRunner, config: RuntimeConfig) -> Self {
        Self {
            runner: Arc::new(runner),
            concurrency: config.concurrency.max(1),
        }
    }

    /// Set custom concurrency (default comes from `RuntimeConfig`)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub async fn backfill<F>(
        &self,
        feed: Arc<F>,
        dates: &[NaiveDate],
    ) -> Result<BackfillReport, EngineError>
    where
        F: IndicatorFeed + Send + Sync + ?Sized + 'static,
    {
        let unique: Vec<NaiveDate> = dates
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if unique.is_empty() {
            return Ok(self.runner.collate(Vec::new()));
        }

        let chunk_size = unique.len().div_ceil(self.concurrency);
        info!(
            dates = unique.len(),
            workers = self.concurrency,
            chunk_size,
            "BackfillRuntime: scoring dates"
        );

        let handles: Vec<_> = unique
            .chunks(chunk_size)
            .map(|chunk| {
                let chunk = chunk.to_vec();
                let runner = self.runner.clone();
                let feed = feed.clone();
                tokio::task::spawn_blocking(move || {
                    debug!(first = %chunk[0], len = chunk.len(), "BackfillRuntime: worker started");
                    chunk
                        .iter()
                        .map(|date| runner.score_date(feed.as_ref(), *date))
                        .collect::<Vec<DateOutcome>>()
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(unique.len());
        for result in join_all(handles).await {
            let chunk = result.map_err(|e| EngineError::Worker(e.to_string()))?;
            outcomes.extend(chunk);
        }

        Ok(self.runner.collate(outcomes))
    }
}
