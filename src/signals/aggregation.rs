//! Sector scorer: impact-weighted aggregation of indicator signals.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::config::EngineConfig;
use crate::indicators::classifier::BandClassifier;
use crate::metrics::Metrics;
use crate::models::indicators::{Indicator, IndicatorSnapshot};
use crate::models::sector::{Sector, SectorScore};

/// Optional sector metadata consulted by the degradation rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorContext {
    /// Number of constituents currently reporting data, per sector.
    #[serde(default)]
    pub reporting_constituents: BTreeMap<Sector, usize>,
    /// Last known native score, per sector.
    #[serde(default)]
    pub previous_scores: BTreeMap<Sector, f64>,
}

impl SectorContext {
    /// Previous score to substitute for `sector`, if the rule applies.
    fn fallback_for(&self, sector: Sector) -> Option<f64> {
        match self.reporting_constituents.get(&sector) {
            Some(0) => self
                .previous_scores
                .get(&sector)
                .copied()
                .filter(|s| s.is_finite())
                .map(|s| s.clamp(-1.0, 1.0)),
            _ => None,
        }
    }
}

/// How one indicator moved one sector's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorContribution {
    pub indicator: Indicator,
    pub signal: f64,
    pub impact: u8,
    pub importance: f64,
    pub weight: f64,
    pub contribution: f64,
}

#[derive(Clone)]
pub struct SectorScorer {
    config: Arc<EngineConfig>,
    classifier: BandClassifier,
    metrics: Option<Arc<Metrics>>,
}

impl SectorScorer {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            classifier: BandClassifier::new(config.clone()),
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.classifier = self.classifier.with_metrics(metrics.clone());
        self.metrics = Some(metrics);
        self
    }

    pub fn classifier(&self) -> &BandClassifier {
        &self.classifier
    }

    /// Signals for the indicators present in `snapshot`, in indicator order.
    pub fn signals(&self, snapshot: &IndicatorSnapshot) -> Vec<(Indicator, f64)> {
        snapshot
            .values
            .iter()
            .map(|(indicator, value)| (*indicator, self.classifier.classify_raw(*indicator, value)))
            .collect()
    }

    /// Score all sectors. Missing indicators are skipped, not zeroed.
    pub fn score(&self, snapshot: &IndicatorSnapshot) -> Vec<SectorScore> {
        self.score_with_context(snapshot, &SectorContext::default())
    }

    /// Score all sectors, substituting the previous score for any sector
    /// that has zero reporting constituents and a known previous score.
    pub fn score_with_context(
        &self,
        snapshot: &IndicatorSnapshot,
        context: &SectorContext,
    ) -> Vec<SectorScore> {
        let signals = self.signals(snapshot);

        Sector::ALL
            .iter()
            .map(|&sector| {
                if let Some(previous) = context.fallback_for(sector) {
                    info!(
                        sector = %sector,
                        score = previous,
                        "no reporting constituents, carrying previous score forward"
                    );
                    if let Some(metrics) = &self.metrics {
                        metrics.sector_fallbacks.inc();
                    }
                    return SectorScore {
                        sector,
                        raw_score: previous,
                        as_of: snapshot.as_of,
                        carried_forward: true,
                    };
                }
                SectorScore::new(sector, self.aggregate(&signals, sector), snapshot.as_of)
            })
            .collect()
    }

    fn aggregate(&self, signals: &[(Indicator, f64)], sector: Sector) -> f64 {
        let mut signed_sum = 0.0;
        let mut abs_sum = 0.0;
        for &(indicator, signal) in signals {
            let weight = self.config.sector_weight(indicator, sector);
            signed_sum += signal * weight;
            abs_sum += weight.abs();
        }
        (signed_sum / abs_sum.max(1.0)).clamp(-1.0, 1.0)
    }

    /// Per-indicator breakdown of one sector's score.
    pub fn explain(&self, snapshot: &IndicatorSnapshot, sector: Sector) -> Vec<IndicatorContribution> {
        self.signals(snapshot)
            .into_iter()
            .map(|(indicator, signal)| {
                let weight = self.config.sector_weight(indicator, sector);
                IndicatorContribution {
                    indicator,
                    signal,
                    impact: self.config.impact(indicator, sector),
                    importance: self.config.importance(indicator),
                    weight,
                    contribution: signal * weight,
                }
            })
            .collect()
    }
}
