//! Composite "Pulse" index: per-indicator 0-100 curves combined with a
//! caller-owned weight set.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::indicators::parser::parse_value;
use crate::models::indicators::{Indicator, IndicatorSnapshot};
use crate::models::pulse::{CompositeComponent, PulseIndex};
use crate::signals::categories::CategoryCutoffs;
use crate::signals::weights::WeightSet;

/// A component scored outside the engine (e.g. document sentiment), passed
/// through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraComponent {
    /// Weight-set key.
    pub key: String,
    pub label: String,
    /// Score in [0, 100]; clamped on use.
    pub score: f64,
}

impl ExtraComponent {
    pub fn new(key: impl Into<String>, label: impl Into<String>, score: f64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            score,
        }
    }
}

#[derive(Clone)]
pub struct CompositeScorer {
    config: Arc<EngineConfig>,
}

impl CompositeScorer {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// Curve score in [0, 100] for one indicator value.
    pub fn component_score(&self, indicator: Indicator, value: f64) -> f64 {
        self.config.curve(indicator).evaluate(value)
    }

    /// Score the index from indicator values alone.
    pub fn score_index(&self, values: &IndicatorSnapshot, weights: &WeightSet) -> Option<PulseIndex> {
        self.score_index_with_extras(values, weights, &[])
    }

    /// Weighted sum of component scores, rescaled by `100 / available_weight`
    /// when components are missing. Unbalanced weights are normalized first.
    /// Returns `None` only when no weighted component could be scored.
    pub fn score_index_with_extras(
        &self,
        values: &IndicatorSnapshot,
        weights: &WeightSet,
        extras: &[ExtraComponent],
    ) -> Option<PulseIndex> {
        let normalized;
        let weights = if weights.is_balanced() {
            weights
        } else {
            warn!(total = weights.total(), "weights do not sum to 100, scoring a normalized copy");
            normalized = weights.normalized();
            &normalized
        };

        let mut components = Vec::new();

        for entry in weights.entries() {
            let scored = match Indicator::from_component_key(&entry.name) {
                Some(indicator) => self.score_indicator(values, indicator),
                None => extras
                    .iter()
                    .find(|extra| extra.key == entry.name)
                    .map(|extra| {
                        let score = if extra.score.is_finite() {
                            extra.score.clamp(0.0, 100.0)
                        } else {
                            0.0
                        };
                        (extra.label.clone(), extra.score, score)
                    }),
            };

            let Some((label, value, score)) = scored else {
                debug!(component = %entry.name, "component unavailable");
                continue;
            };

            components.push(CompositeComponent {
                name: entry.name.clone(),
                label,
                value,
                score,
                weight: entry.weight,
                contribution: score * entry.weight / 100.0,
            });
        }

        let available_weight: f64 = components.iter().map(|c| c.weight).sum();
        if available_weight <= 0.0 {
            return None;
        }

        let mut score: f64 = components.iter().map(|c| c.contribution).sum();
        if available_weight < 100.0 {
            score *= 100.0 / available_weight;
        }
        let score = score.clamp(0.0, 100.0);

        Some(PulseIndex {
            score,
            category: CategoryCutoffs::categorize(score),
            components_used: components.len(),
            available_weight,
            components,
        })
    }

    fn score_indicator(
        &self,
        values: &IndicatorSnapshot,
        indicator: Indicator,
    ) -> Option<(String, f64, f64)> {
        let raw = values.get(indicator)?;
        match parse_value(raw) {
            Ok(value) => Some((
                indicator.label().to_string(),
                value,
                self.component_score(indicator, value),
            )),
            Err(e) => {
                warn!(indicator = %indicator, error = %e, "malformed value left out of pulse index");
                None
            }
        }
    }
}
