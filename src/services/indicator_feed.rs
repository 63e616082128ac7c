//! Indicator feed interface. Retrieval, retries and persistence live behind
//! this trait; the engine only sees point-in-time values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::indicators::{Indicator, IndicatorSnapshot, RawValue};

pub trait IndicatorFeed {
    /// Latest value of `indicator` known as of `date` (at or before it),
    /// or `None` if the series has nothing yet.
    fn value_at(&self, indicator: Indicator, date: NaiveDate) -> Option<RawValue>;

    /// Point-in-time snapshot of every indicator the feed can supply.
    fn snapshot_at(&self, date: NaiveDate) -> IndicatorSnapshot {
        let mut snapshot = IndicatorSnapshot::new(date);
        for indicator in Indicator::ALL {
            if let Some(value) = self.value_at(indicator, date) {
                snapshot.insert(indicator, value);
            }
        }
        snapshot
    }
}

/// Archived observations held in memory, keyed by observation date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorHistory {
    series: BTreeMap<Indicator, BTreeMap<NaiveDate, RawValue>>,
}

impl IndicatorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, indicator: Indicator, date: NaiveDate, value: impl Into<RawValue>) {
        self.series
            .entry(indicator)
            .or_default()
            .insert(date, value.into());
    }

    pub fn with_observation(
        mut self,
        indicator: Indicator,
        date: NaiveDate,
        value: impl Into<RawValue>,
    ) -> Self {
        self.insert(indicator, date, value);
        self
    }

    pub fn series(&self, indicator: Indicator) -> Option<&BTreeMap<NaiveDate, RawValue>> {
        self.series.get(&indicator)
    }

    /// Every date on which at least one indicator was observed.
    pub fn observation_dates(&self) -> BTreeSet<NaiveDate> {
        self.series
            .values()
            .flat_map(|observations| observations.keys().copied())
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl IndicatorFeed for IndicatorHistory {
    fn value_at(&self, indicator: Indicator, date: NaiveDate) -> Option<RawValue> {
        self.series
            .get(&indicator)?
            .range(..=date)
            .next_back()
            .map(|(_, value)| value.clone())
    }
}
