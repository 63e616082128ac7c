//! Historical replay of sector scoring over archived indicator data.

pub mod continuity;
pub mod history;
pub mod runner;

pub use continuity::{detect_stale_series, StaleSeriesWarning};
pub use history::{HistoryRow, SectorHistory, TrendPoint};
pub use runner::{BackfillReport, BacktestRunner, DateOutcome, SkippedDate};
