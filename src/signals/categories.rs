//! Pulse index categories.

use crate::models::pulse::PulseCategory;

/// Lower score bounds for each pulse category.
pub struct CategoryCutoffs;

impl CategoryCutoffs {
    pub const BOOM: f64 = 80.0;
    pub const EXPANSION: f64 = 60.0;
    pub const MODERATE_GROWTH: f64 = 40.0;
    pub const SLOWDOWN: f64 = 20.0;

    pub fn categorize(score: f64) -> PulseCategory {
        if score >= Self::BOOM {
            PulseCategory::Boom
        } else if score >= Self::EXPANSION {
            PulseCategory::Expansion
        } else if score >= Self::MODERATE_GROWTH {
            PulseCategory::ModerateGrowth
        } else if score >= Self::SLOWDOWN {
            PulseCategory::Slowdown
        } else {
            PulseCategory::Contraction
        }
    }
}
