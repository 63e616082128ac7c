//! Validated, immutable engine configuration.
//!
//! Tables arrive name-keyed (`RawEngineConfig`, the shape of a JSON config
//! file) and are checked once into strongly-typed arrays. Any hole in the
//! tables is a `ConfigError` at load time, so scoring calls never see a
//! missing band or impact cell.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::config::bands::Band;
use crate::config::curves::ScoreCurve;
use crate::models::{Indicator, Sector};
use crate::signals::weights::{WeightEntry, WeightSet, DOCUMENT_SENTIMENT_KEY};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),

    #[error("unknown sector {sector} in impact row for {indicator}")]
    UnknownSector { indicator: String, sector: String },

    #[error("indicator {0} has no band definition")]
    MissingBand(String),

    #[error("invalid band for {indicator}: {reason}")]
    InvalidBand { indicator: String, reason: String },

    #[error("indicator {0} has no impact row")]
    MissingImpactRow(String),

    #[error("impact row for {indicator} is missing sector {sector}")]
    MissingImpact { indicator: String, sector: String },

    #[error("impact for {indicator}/{sector} must be 1-3, got {value}")]
    InvalidImpact {
        indicator: String,
        sector: String,
        value: u8,
    },

    #[error("importance for {indicator} must be finite and positive, got {value}")]
    InvalidImportance { indicator: String, value: f64 },

    #[error("component {0} has no scoring curve")]
    MissingCurve(String),

    #[error("invalid curve for {component}: {reason}")]
    InvalidCurve { component: String, reason: String },

    #[error("invalid default weights: {0}")]
    InvalidWeights(String),

    #[error("failed to read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Name-keyed tables as loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEngineConfig {
    pub bands: BTreeMap<String, Band>,
    pub impact: BTreeMap<String, BTreeMap<String, u8>>,
    /// Indicators absent here default to 1.0.
    #[serde(default)]
    pub importance: BTreeMap<String, f64>,
    #[serde(default)]
    pub curves: BTreeMap<String, ScoreCurve>,
    #[serde(default)]
    pub weights: Vec<WeightEntry>,
}

impl RawEngineConfig {
    pub fn validate(self) -> Result<EngineConfig, ConfigError> {
        for name in self
            .bands
            .keys()
            .chain(self.impact.keys())
            .chain(self.importance.keys())
        {
            name.parse::<Indicator>()
                .map_err(|_| ConfigError::UnknownIndicator(name.clone()))?;
        }
        for key in self.curves.keys() {
            if Indicator::from_component_key(key).is_none() {
                return Err(ConfigError::UnknownIndicator(key.clone()));
            }
        }

        let mut bands = Vec::with_capacity(Indicator::COUNT);
        let mut impact = Vec::with_capacity(Indicator::COUNT);
        let mut importance = Vec::with_capacity(Indicator::COUNT);
        let mut curves = Vec::with_capacity(Indicator::COUNT);

        for indicator in Indicator::ALL {
            let name = indicator.name();

            let band = self
                .bands
                .get(name)
                .ok_or_else(|| ConfigError::MissingBand(name.to_string()))?;
            band.validate().map_err(|reason| ConfigError::InvalidBand {
                indicator: name.to_string(),
                reason,
            })?;
            bands.push(*band);

            let row = self
                .impact
                .get(name)
                .ok_or_else(|| ConfigError::MissingImpactRow(name.to_string()))?;
            for sector_name in row.keys() {
                if sector_name.parse::<Sector>().is_err() {
                    return Err(ConfigError::UnknownSector {
                        indicator: name.to_string(),
                        sector: sector_name.clone(),
                    });
                }
            }
            let mut cells = [0u8; Sector::COUNT];
            for sector in Sector::ALL {
                let value = *row.get(sector.name()).ok_or_else(|| ConfigError::MissingImpact {
                    indicator: name.to_string(),
                    sector: sector.name().to_string(),
                })?;
                if !(1..=3).contains(&value) {
                    return Err(ConfigError::InvalidImpact {
                        indicator: name.to_string(),
                        sector: sector.name().to_string(),
                        value,
                    });
                }
                cells[sector.index()] = value;
            }
            impact.push(cells);

            let weight = self.importance.get(name).copied().unwrap_or(1.0);
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ConfigError::InvalidImportance {
                    indicator: name.to_string(),
                    value: weight,
                });
            }
            importance.push(weight);

            let key = indicator.component_key();
            let curve = self
                .curves
                .get(key)
                .ok_or_else(|| ConfigError::MissingCurve(key.to_string()))?;
            curve.validate().map_err(|reason| ConfigError::InvalidCurve {
                component: key.to_string(),
                reason,
            })?;
            curves.push(curve.clone());
        }

        let default_weights = WeightSet::from_entries(self.weights)
            .map_err(ConfigError::InvalidWeights)?;
        for entry in default_weights.entries() {
            if entry.name != DOCUMENT_SENTIMENT_KEY
                && Indicator::from_component_key(&entry.name).is_none()
            {
                return Err(ConfigError::InvalidWeights(format!(
                    "unknown component {}",
                    entry.name
                )));
            }
        }
        if !default_weights.is_balanced() {
            return Err(ConfigError::InvalidWeights(format!(
                "weights sum to {:.2}, expected 100",
                default_weights.total()
            )));
        }

        info!(
            indicators = Indicator::COUNT,
            sectors = Sector::COUNT,
            components = default_weights.len(),
            "engine configuration loaded"
        );

        Ok(EngineConfig {
            bands,
            impact,
            importance,
            curves,
            default_weights,
        })
    }
}

/// Immutable tables shared by the classifier and scorers.
///
/// Every per-indicator vector has exactly `Indicator::COUNT` entries,
/// indexed by `Indicator::index()`.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    bands: Vec<Band>,
    impact: Vec<[u8; Sector::COUNT]>,
    importance: Vec<f64>,
    curves: Vec<ScoreCurve>,
    default_weights: WeightSet,
}

impl EngineConfig {
    /// Built-in production tables.
    pub fn standard() -> Result<Self, ConfigError> {
        RawEngineConfig::standard().validate()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawEngineConfig = serde_json::from_str(json)?;
        raw.validate()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn band(&self, indicator: Indicator) -> &Band {
        &self.bands[indicator.index()]
    }

    pub fn impact(&self, indicator: Indicator, sector: Sector) -> u8 {
        self.impact[indicator.index()][sector.index()]
    }

    pub fn importance(&self, indicator: Indicator) -> f64 {
        self.importance[indicator.index()]
    }

    /// `Impact[indicator][sector] * Importance[indicator]`.
    pub fn sector_weight(&self, indicator: Indicator, sector: Sector) -> f64 {
        f64::from(self.impact(indicator, sector)) * self.importance(indicator)
    }

    pub fn curve(&self, indicator: Indicator) -> &ScoreCurve {
        &self.curves[indicator.index()]
    }

    pub fn default_weights(&self) -> &WeightSet {
        &self.default_weights
    }
}
