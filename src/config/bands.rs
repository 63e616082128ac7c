//! Favorability bands.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directionality {
    HigherIsBetter,
    LowerIsBetter,
    /// Continuous signal; the favorable side is wherever
    /// `favorable_threshold` lies relative to `unfavorable_threshold`.
    Proportional,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub directionality: Directionality,
    pub favorable_threshold: f64,
    pub unfavorable_threshold: f64,
    /// Pre-scaled momentum series: signals with |s| < 0.1 are amplified x5,
    /// stronger ones are stretched continuously up to 1.
    #[serde(default)]
    pub amplify_near_zero: bool,
}

impl Band {
    pub fn lower(favorable_threshold: f64, unfavorable_threshold: f64) -> Self {
        Self {
            directionality: Directionality::LowerIsBetter,
            favorable_threshold,
            unfavorable_threshold,
            amplify_near_zero: false,
        }
    }

    pub fn higher(favorable_threshold: f64, unfavorable_threshold: f64) -> Self {
        Self {
            directionality: Directionality::HigherIsBetter,
            favorable_threshold,
            unfavorable_threshold,
            amplify_near_zero: false,
        }
    }

    pub fn proportional(favorable_threshold: f64, unfavorable_threshold: f64) -> Self {
        Self {
            directionality: Directionality::Proportional,
            favorable_threshold,
            unfavorable_threshold,
            amplify_near_zero: false,
        }
    }

    pub fn with_momentum_amplification(mut self) -> Self {
        self.amplify_near_zero = true;
        self
    }

    /// Reason the band cannot classify values, if any.
    pub fn validate(&self) -> Result<(), String> {
        if !self.favorable_threshold.is_finite() || !self.unfavorable_threshold.is_finite() {
            return Err("thresholds must be finite".to_string());
        }
        match self.directionality {
            Directionality::LowerIsBetter if self.favorable_threshold > self.unfavorable_threshold => {
                Err(format!(
                    "lower-is-better band needs favorable <= unfavorable, got {} > {}",
                    self.favorable_threshold, self.unfavorable_threshold
                ))
            }
            Directionality::HigherIsBetter if self.favorable_threshold < self.unfavorable_threshold => {
                Err(format!(
                    "higher-is-better band needs favorable >= unfavorable, got {} < {}",
                    self.favorable_threshold, self.unfavorable_threshold
                ))
            }
            Directionality::Proportional if self.favorable_threshold == self.unfavorable_threshold => {
                Err("proportional band needs distinct thresholds".to_string())
            }
            _ => Ok(()),
        }
    }
}
