//! Feed continuity check for daily series.
//!
//! A daily market series that holds a bit-identical value across many
//! trading days usually means an upstream derivation was not recomputed
//! per date. Weekends are ignored since they legitimately repeat Friday.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::indicators::{Indicator, IndicatorSnapshot, RawValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaleSeriesWarning {
    pub indicator: Indicator,
    pub value: RawValue,
    /// Number of consecutive weekdays carrying the value.
    pub run_length: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

fn bit_identical(a: &RawValue, b: &RawValue) -> bool {
    match (a, b) {
        (RawValue::Number(x), RawValue::Number(y)) => x.to_bits() == y.to_bits(),
        (RawValue::Text(x), RawValue::Text(y)) => x == y,
        _ => false,
    }
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Flag runs longer than `threshold` weekdays. `snapshots` must be sorted
/// by date.
pub fn detect_stale_series(
    snapshots: &[IndicatorSnapshot],
    threshold: usize,
) -> Vec<StaleSeriesWarning> {
    let weekdays: Vec<&IndicatorSnapshot> = snapshots
        .iter()
        .filter(|snapshot| is_weekday(snapshot.as_of))
        .collect();

    let mut warnings = Vec::new();
    for indicator in Indicator::ALL.into_iter().filter(Indicator::is_daily) {
        let mut run: Option<(RawValue, NaiveDate, NaiveDate, usize)> = None;

        for snapshot in &weekdays {
            let current = snapshot.get(indicator);
            run = match (run.take(), current) {
                (Some((value, first, _, len)), Some(v)) if bit_identical(&value, v) => {
                    Some((value, first, snapshot.as_of, len + 1))
                }
                (previous, current) => {
                    if let Some(finished) = previous {
                        push_if_stale(&mut warnings, indicator, finished, threshold);
                    }
                    current.map(|v| (v.clone(), snapshot.as_of, snapshot.as_of, 1))
                }
            };
        }
        if let Some(finished) = run {
            push_if_stale(&mut warnings, indicator, finished, threshold);
        }
    }
    warnings
}

fn push_if_stale(
    warnings: &mut Vec<StaleSeriesWarning>,
    indicator: Indicator,
    (value, first_date, last_date, run_length): (RawValue, NaiveDate, NaiveDate, usize),
    threshold: usize,
) {
    if run_length <= threshold {
        return;
    }
    warn!(
        indicator = %indicator,
        run_length,
        first = %first_date,
        last = %last_date,
        "daily series repeated an identical value across consecutive weekdays"
    );
    warnings.push(StaleSeriesWarning {
        indicator,
        value,
        run_length,
        first_date,
        last_date,
    });
}
