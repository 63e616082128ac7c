//! Percentage weight sets and the rebalancer that keeps them summing to 100.
//!
//! Manual edits (`rebalance`), component injection (`with_component`) and
//! default normalization (`normalized`) all go through `redistribute`, so
//! every call site scales, rounds and corrects drift identically.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::signals::scoring::round_tenth;

pub const DOCUMENT_SENTIMENT_KEY: &str = "document_sentiment";
/// Upper bound on the weight of an injected extra component.
pub const MAX_INJECTED_WEIGHT: f64 = 50.0;
/// Allowed distance of a weight set's total from 100.
pub const WEIGHT_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub name: String,
    pub weight: f64,
}

impl WeightEntry {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebalanceOutcome {
    Applied,
    /// Nothing left to scale; the input set was returned unchanged.
    Degenerate,
}

/// Ordered component weights in percent. Entry order is the tie-break
/// order when drift is folded into the largest weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeightEntry>", into = "Vec<WeightEntry>")]
pub struct WeightSet {
    entries: Vec<WeightEntry>,
}

impl TryFrom<Vec<WeightEntry>> for WeightSet {
    type Error = String;

    fn try_from(entries: Vec<WeightEntry>) -> Result<Self, Self::Error> {
        WeightSet::from_entries(entries)
    }
}

impl From<WeightSet> for Vec<WeightEntry> {
    fn from(set: WeightSet) -> Self {
        set.entries
    }
}

impl WeightSet {
    /// Weights must be finite, non-negative and uniquely named. The sum is
    /// not checked here; see [`WeightSet::is_balanced`].
    pub fn from_entries(entries: Vec<WeightEntry>) -> Result<Self, String> {
        for (i, entry) in entries.iter().enumerate() {
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(format!(
                    "weight for {} must be finite and non-negative, got {}",
                    entry.name, entry.weight
                ));
            }
            if entries[..i].iter().any(|e| e.name == entry.name) {
                return Err(format!("duplicate weight key {}", entry.name));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Result<Self, String> {
        Self::from_entries(
            pairs
                .iter()
                .map(|(name, weight)| WeightEntry::new(*name, *weight))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.weight)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn is_balanced(&self) -> bool {
        (self.total() - 100.0).abs() <= WEIGHT_TOLERANCE
    }

    /// Set one weight and rescale the rest. See [`rebalance`].
    pub fn rebalance(&self, changed_key: &str, new_value: f64) -> WeightSet {
        rebalance(self, changed_key, new_value).0
    }

    /// Inject (or update) an extra component, clamping its weight to
    /// `[0, MAX_INJECTED_WEIGHT]` before rebalancing.
    pub fn with_component(&self, key: &str, weight: f64) -> WeightSet {
        let clamped = if weight.is_finite() {
            weight.clamp(0.0, MAX_INJECTED_WEIGHT)
        } else {
            0.0
        };
        rebalance(self, key, clamped).0
    }

    /// Scale every weight so the set sums to 100.
    pub fn normalized(&self) -> WeightSet {
        if self.is_balanced() {
            return self.clone();
        }
        let mut entries = self.entries.clone();
        match redistribute(&mut entries, None, 100.0) {
            RebalanceOutcome::Applied => WeightSet { entries },
            RebalanceOutcome::Degenerate => {
                warn!("cannot normalize an all-zero weight set");
                self.clone()
            }
        }
    }
}

/// Set `changed_key` to `new_value` (clamped to [0, 100]; inserted at the
/// end if absent) and scale every other weight by
/// `(100 - new_value) / other_total`, rounding to one decimal. Residual
/// rounding drift is added to the largest other weight, first one wins on
/// ties.
///
/// When the other weights sum to zero there is nothing to scale and the
/// input is returned unchanged with `RebalanceOutcome::Degenerate`.
pub fn rebalance(
    weights: &WeightSet,
    changed_key: &str,
    new_value: f64,
) -> (WeightSet, RebalanceOutcome) {
    let new_value = if new_value.is_finite() {
        new_value.clamp(0.0, 100.0)
    } else {
        warn!(key = changed_key, "non-finite weight treated as 0");
        0.0
    };

    let mut entries = weights.entries.clone();
    let changed = match entries.iter().position(|e| e.name == changed_key) {
        Some(idx) => idx,
        None => {
            entries.push(WeightEntry::new(changed_key, 0.0));
            entries.len() - 1
        }
    };
    entries[changed].weight = new_value;

    match redistribute(&mut entries, Some(changed), 100.0 - new_value) {
        RebalanceOutcome::Applied => {
            debug!(key = changed_key, value = new_value, "weights rebalanced");
            (WeightSet { entries }, RebalanceOutcome::Applied)
        }
        RebalanceOutcome::Degenerate => {
            warn!(
                key = changed_key,
                "remaining weights are all zero, rebalance skipped"
            );
            (weights.clone(), RebalanceOutcome::Degenerate)
        }
    }
}

/// Scale every entry except `fixed` so together they hold `available`,
/// then fold the rounding drift into the largest of them.
fn redistribute(
    entries: &mut [WeightEntry],
    fixed: Option<usize>,
    available: f64,
) -> RebalanceOutcome {
    let other_total: f64 = entries
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != fixed)
        .map(|(_, e)| e.weight)
        .sum();
    if other_total <= 0.0 {
        return RebalanceOutcome::Degenerate;
    }

    let scale = available / other_total;
    for (i, entry) in entries.iter_mut().enumerate() {
        if Some(i) != fixed {
            entry.weight = round_tenth(entry.weight * scale);
        }
    }

    let drift = 100.0 - entries.iter().map(|e| e.weight).sum::<f64>();
    if drift != 0.0 {
        fold_drift(entries, fixed, drift);
    }
    RebalanceOutcome::Applied
}

/// Add `drift` to the largest non-fixed weight (first one wins on ties).
/// Negative drift the largest cannot absorb without going below zero
/// spills over to the next largest.
fn fold_drift(entries: &mut [WeightEntry], fixed: Option<usize>, mut drift: f64) {
    let mut order: Vec<usize> = (0..entries.len()).filter(|i| Some(*i) != fixed).collect();
    // stable: equal weights keep entry order
    order.sort_by(|a, b| entries[*b].weight.total_cmp(&entries[*a].weight));

    for idx in order {
        let adjusted = entries[idx].weight + drift;
        if adjusted >= 0.0 {
            entries[idx].weight = adjusted;
            return;
        }
        entries[idx].weight = 0.0;
        drift = adjusted;
    }
}
