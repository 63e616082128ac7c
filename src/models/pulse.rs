use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::indicators::Indicator;

/// Composite index regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PulseCategory {
    Boom,
    Expansion,
    #[serde(rename = "Moderate Growth")]
    ModerateGrowth,
    Slowdown,
    Contraction,
}

impl PulseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PulseCategory::Boom => "Boom",
            PulseCategory::Expansion => "Expansion",
            PulseCategory::ModerateGrowth => "Moderate Growth",
            PulseCategory::Slowdown => "Slowdown",
            PulseCategory::Contraction => "Contraction",
        }
    }
}

impl fmt::Display for PulseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One scored input of the composite index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeComponent {
    /// Weight-set key, e.g. `"gdp"` or `"document_sentiment"`.
    pub name: String,
    pub label: String,
    pub value: f64,
    /// Curve score in [0, 100].
    pub score: f64,
    /// Weight in percent.
    pub weight: f64,
    /// `score * weight / 100`, before any missing-data rescale.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseIndex {
    pub score: f64,
    pub category: PulseCategory,
    pub components: Vec<CompositeComponent>,
    pub components_used: usize,
    /// Sum of the weights of the components that were scored.
    pub available_weight: f64,
}

impl PulseIndex {
    /// Indicator components that carried weight. Extras such as document
    /// sentiment and zero-weight entries are not counted.
    pub fn indicator_count(&self) -> usize {
        self.components
            .iter()
            .filter(|c| c.weight > 0.0 && Indicator::from_component_key(&c.name).is_some())
            .count()
    }
}
