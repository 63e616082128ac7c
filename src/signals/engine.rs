//! Entry point tying the classifier, scorers and rebalancer to one
//! configuration.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::config::{ConfigError, EngineConfig, EngineSettings};
use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::pulse::PulseIndex;
use crate::models::sector::SectorScore;
use crate::signals::aggregation::{SectorContext, SectorScorer};
use crate::signals::composite::{CompositeScorer, ExtraComponent};
use crate::signals::weights::{WeightSet, DOCUMENT_SENTIMENT_KEY};

/// Already-computed document sentiment, fed in as an extra pulse component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentSentiment {
    /// 0-100.
    pub score: f64,
    /// Requested weight in percent; clamped to [0, 50].
    pub weight: f64,
}

/// A pulse index together with the weight set it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseReport {
    pub index: PulseIndex,
    pub weights: WeightSet,
}

#[derive(Clone)]
pub struct SentimentEngine {
    config: Arc<EngineConfig>,
    settings: EngineSettings,
    sectors: SectorScorer,
    composite: CompositeScorer,
}

impl SentimentEngine {
    pub fn new(config: EngineConfig, settings: EngineSettings) -> Self {
        let config = Arc::new(config);
        Self {
            sectors: SectorScorer::new(config.clone()),
            composite: CompositeScorer::new(config.clone()),
            config,
            settings,
        }
    }

    /// Load tables per `settings` (built-in unless `config_path` is set).
    pub fn from_settings(settings: EngineSettings) -> Result<Self, ConfigError> {
        let config = settings.load_engine_config()?;
        Ok(Self::new(config, settings))
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.sectors = self.sectors.with_metrics(metrics);
        self
    }

    pub fn config(&self) -> &Arc<EngineConfig> {
        &self.config
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn sector_scorer(&self) -> &SectorScorer {
        &self.sectors
    }

    pub fn composite_scorer(&self) -> &CompositeScorer {
        &self.composite
    }

    pub fn score_sectors(&self, snapshot: &IndicatorSnapshot) -> Vec<SectorScore> {
        self.sectors.score(snapshot)
    }

    pub fn score_sectors_with_context(
        &self,
        snapshot: &IndicatorSnapshot,
        context: &SectorContext,
    ) -> Vec<SectorScore> {
        self.sectors.score_with_context(snapshot, context)
    }

    /// Pulse index with the configured minimum component count enforced.
    pub fn pulse(
        &self,
        snapshot: &IndicatorSnapshot,
        weights: &WeightSet,
    ) -> Result<PulseIndex, EngineError> {
        self.checked_pulse(snapshot, weights, &[])
    }

    /// Pulse index using the configured default weights.
    pub fn pulse_default(&self, snapshot: &IndicatorSnapshot) -> Result<PulseIndex, EngineError> {
        self.pulse(snapshot, self.config.default_weights())
    }

    /// Inject document sentiment into a copy of `weights` through the
    /// rebalancer, then score. The rebalanced copy is returned alongside.
    pub fn pulse_with_document(
        &self,
        snapshot: &IndicatorSnapshot,
        weights: &WeightSet,
        document: DocumentSentiment,
    ) -> Result<PulseReport, EngineError> {
        let weights = weights.with_component(DOCUMENT_SENTIMENT_KEY, document.weight);
        let extra = ExtraComponent::new(DOCUMENT_SENTIMENT_KEY, "Document Sentiment", document.score);
        let index = self.checked_pulse(snapshot, &weights, &[extra])?;
        Ok(PulseReport { index, weights })
    }

    fn checked_pulse(
        &self,
        snapshot: &IndicatorSnapshot,
        weights: &WeightSet,
        extras: &[ExtraComponent],
    ) -> Result<PulseIndex, EngineError> {
        let required = self.settings.min_pulse_components;
        let index = self
            .composite
            .score_index_with_extras(snapshot, weights, extras)
            .ok_or(EngineError::InsufficientData {
                available: 0,
                required,
            })?;
        let available = index.indicator_count();
        if available < required {
            debug!(available, required, "not enough indicators for a pulse index");
            return Err(EngineError::InsufficientData { available, required });
        }
        Ok(index)
    }
}
