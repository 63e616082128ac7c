//! Band classifier: one indicator value to a signal in [-1, +1].

use std::sync::Arc;
use tracing::warn;

use crate::config::bands::{Band, Directionality};
use crate::config::EngineConfig;
use crate::indicators::parser::parse_value;
use crate::metrics::Metrics;
use crate::models::indicators::{Indicator, RawValue};

/// Proportional signal at either threshold.
const THRESHOLD_SIGNAL: f64 = 0.75;
const MOMENTUM_DEAD_ZONE: f64 = 0.1;
const MOMENTUM_GAIN: f64 = 5.0;

/// Classify `value` against `band`. Total: non-finite input is neutral.
pub fn classify_band(band: &Band, value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let signal = match band.directionality {
        Directionality::LowerIsBetter => {
            if value <= band.favorable_threshold {
                1.0
            } else if value >= band.unfavorable_threshold {
                -1.0
            } else {
                0.0
            }
        }
        Directionality::HigherIsBetter => {
            if value >= band.favorable_threshold {
                1.0
            } else if value <= band.unfavorable_threshold {
                -1.0
            } else {
                0.0
            }
        }
        Directionality::Proportional => proportional_signal(band, value),
    };

    if band.amplify_near_zero {
        amplify_momentum(signal)
    } else {
        signal
    }
}

/// Continuous, non-decreasing signal: linear from -0.75 at the
/// unfavorable threshold to +0.75 at the favorable one, then 0.75 -> 1.0
/// over one band width beyond either threshold.
fn proportional_signal(band: &Band, value: f64) -> f64 {
    // orient so that larger is better
    let orientation = if band.favorable_threshold >= band.unfavorable_threshold {
        1.0
    } else {
        -1.0
    };
    let x = value * orientation;
    let favorable = band.favorable_threshold * orientation;
    let unfavorable = band.unfavorable_threshold * orientation;
    let width = favorable - unfavorable;
    if width <= 0.0 {
        return 0.0;
    }

    if x > favorable {
        let excess = (x - favorable) / width;
        (THRESHOLD_SIGNAL + (1.0 - THRESHOLD_SIGNAL) * excess).min(1.0)
    } else if x < unfavorable {
        let excess = (unfavorable - x) / width;
        -(THRESHOLD_SIGNAL + (1.0 - THRESHOLD_SIGNAL) * excess).min(1.0)
    } else {
        let midpoint = (favorable + unfavorable) / 2.0;
        (THRESHOLD_SIGNAL * (x - midpoint) / (width / 2.0)).clamp(-1.0, 1.0)
    }
}

/// Boost weak momentum: x5 inside the dead zone, then linear from 0.5 up to
/// 1.0 so the mapping stays continuous and non-decreasing.
fn amplify_momentum(signal: f64) -> f64 {
    let magnitude = signal.abs();
    if magnitude >= 1.0 {
        return signal.signum();
    }
    let boosted = if magnitude < MOMENTUM_DEAD_ZONE {
        magnitude * MOMENTUM_GAIN
    } else {
        let knee = MOMENTUM_DEAD_ZONE * MOMENTUM_GAIN;
        knee + (magnitude - MOMENTUM_DEAD_ZONE) * (1.0 - knee) / (1.0 - MOMENTUM_DEAD_ZONE)
    };
    boosted.min(1.0).copysign(signal)
}

/// Classifier bound to an engine configuration.
#[derive(Clone)]
pub struct BandClassifier {
    config: Arc<EngineConfig>,
    metrics: Option<Arc<Metrics>>,
}

impl BandClassifier {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn classify(&self, indicator: Indicator, value: f64) -> f64 {
        if !value.is_finite() {
            self.report_malformed(indicator, &value.to_string());
            return 0.0;
        }
        classify_band(self.config.band(indicator), value)
    }

    /// Parse and classify a feed value. Unparseable values are neutral.
    pub fn classify_raw(&self, indicator: Indicator, value: &RawValue) -> f64 {
        match parse_value(value) {
            Ok(parsed) => classify_band(self.config.band(indicator), parsed),
            Err(_) => {
                self.report_malformed(indicator, &value.to_string());
                0.0
            }
        }
    }

    fn report_malformed(&self, indicator: Indicator, raw: &str) {
        warn!(indicator = %indicator, raw = %raw, "malformed indicator value, classified neutral");
        if let Some(metrics) = &self.metrics {
            metrics.malformed_values.inc();
        }
    }
}
