use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::sector::{Sector, SectorScore};

/// All sector scores for one historical date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub date: NaiveDate,
    pub scores: Vec<SectorScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub raw_score: f64,
    pub display_score: f64,
}

/// Per-date sector score table, sorted by date with one row per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorHistory {
    rows: Vec<HistoryRow>,
}

impl SectorHistory {
    pub fn from_rows(mut rows: Vec<HistoryRow>) -> Self {
        rows.sort_by_key(|row| row.date);
        rows.dedup_by_key(|row| row.date);
        Self { rows }
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.date).collect()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&HistoryRow> {
        self.rows
            .binary_search_by_key(&date, |row| row.date)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Trend series for one sector, oldest first.
    pub fn series(&self, sector: Sector) -> Vec<TrendPoint> {
        self.rows
            .iter()
            .filter_map(|row| {
                row.scores
                    .iter()
                    .find(|score| score.sector == sector)
                    .map(|score| TrendPoint {
                        date: row.date,
                        raw_score: score.raw_score,
                        display_score: score.display_score(),
                    })
            })
            .collect()
    }
}
