//! Unit tests for the band classifier

use sectorpulse::config::bands::Band;
use sectorpulse::config::EngineConfig;
use sectorpulse::indicators::classifier::{classify_band, BandClassifier};
use sectorpulse::metrics::Metrics;
use sectorpulse::models::indicators::{Indicator, RawValue};
use std::sync::Arc;

fn standard_classifier() -> BandClassifier {
    BandClassifier::new(Arc::new(EngineConfig::standard().unwrap()))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_vix_discrete_band() {
    let classifier = standard_classifier();
    assert_eq!(classifier.classify(Indicator::Vix, 15.0), 1.0);
    assert_eq!(classifier.classify(Indicator::Vix, 25.0), -1.0);
    assert_eq!(classifier.classify(Indicator::Vix, 18.5), 0.0);
}

#[test]
fn test_discrete_thresholds_are_inclusive() {
    let band = Band::lower(17.5, 20.0);
    assert_eq!(classify_band(&band, 17.5), 1.0);
    assert_eq!(classify_band(&band, 20.0), -1.0);

    let band = Band::higher(2.5, 1.0);
    assert_eq!(classify_band(&band, 2.5), 1.0);
    assert_eq!(classify_band(&band, 1.0), -1.0);
    assert_eq!(classify_band(&band, 2.0), 0.0);
}

/// Signal of the amplified momentum band for a plain proportional signal.
fn amplified(plain: f64) -> f64 {
    let magnitude = plain.abs();
    let boosted = if magnitude < 0.1 {
        magnitude * 5.0
    } else {
        0.5 + (magnitude - 0.1) * 0.5 / 0.9
    };
    boosted.min(1.0).copysign(plain)
}

#[test]
fn test_nasdaq_gap_saturates_near_one() {
    let classifier = standard_classifier();
    let signal = classifier.classify(Indicator::NasdaqGap, 5.0);
    assert!(approx(signal, amplified(0.9375)), "got {}", signal);
    assert!(signal > 0.95 && signal < 1.0);
    assert!(approx(classifier.classify(Indicator::NasdaqGap, -5.0), -signal));
    assert!(approx(classifier.classify(Indicator::NasdaqGap, 100.0), 1.0));
    assert!(approx(classifier.classify(Indicator::NasdaqGap, -100.0), -1.0));
}

#[test]
fn test_proportional_interpolates_between_thresholds() {
    let band = Band::proportional(2.0, -2.0);
    assert_eq!(classify_band(&band, 0.0), 0.0);
    assert!(approx(classify_band(&band, 1.0), 0.375));
    assert!(approx(classify_band(&band, -1.0), -0.375));
    assert!(approx(classify_band(&band, 2.0), 0.75));
    assert!(approx(classify_band(&band, -2.0), -0.75));
    assert!(approx(classify_band(&band, 5.0), 0.9375));
    assert_eq!(classify_band(&band, 10.0), 1.0);
}

#[test]
fn test_proportional_orientation_follows_thresholds() {
    // favorable below unfavorable: lower values are better
    let band = Band::proportional(-2.0, 2.0);
    assert!(approx(classify_band(&band, -1.0), 0.375));
    assert!(approx(classify_band(&band, 1.0), -0.375));
}

#[test]
fn test_proportional_continuous_at_thresholds() {
    let band = Band::proportional(2.0, -2.0);
    let at = classify_band(&band, 2.0);
    let beyond = classify_band(&band, 2.01);
    assert!(beyond >= at);
    assert!(beyond - at < 0.01);

    let at = classify_band(&band, -2.0);
    let beyond = classify_band(&band, -2.01);
    assert!(beyond <= at);
    assert!(at - beyond < 0.01);
}

#[test]
fn test_better_value_never_gets_lower_signal() {
    let classifier = standard_classifier();
    let plain = Band::proportional(2.0, -2.0);
    let mut previous_gap = f64::NEG_INFINITY;
    let mut previous_plain = f64::NEG_INFINITY;

    for step in -1000..=1000 {
        let value = step as f64 * 0.01;
        let gap = classifier.classify(Indicator::NasdaqGap, value);
        let linear = classify_band(&plain, value);
        assert!(gap >= previous_gap, "gap signal fell at {}", value);
        assert!(linear >= previous_plain, "signal fell at {}", value);
        previous_gap = gap;
        previous_plain = linear;
    }
}

#[test]
fn test_momentum_amplification_near_zero() {
    let plain = Band::proportional(2.0, -2.0);
    let amplified_band = plain.with_momentum_amplification();

    assert!(approx(classify_band(&plain, 0.1), 0.0375));
    assert!(approx(classify_band(&amplified_band, 0.1), 0.1875));
    assert!(approx(classify_band(&amplified_band, -0.1), -0.1875));
    // outside the dead zone the boost tapers off toward 1
    assert!(approx(classify_band(&amplified_band, 1.0), amplified(0.375)));
    assert_eq!(classify_band(&amplified_band, 0.0), 0.0);
}

#[test]
fn test_non_finite_values_are_neutral() {
    let classifier = standard_classifier();
    assert_eq!(classifier.classify(Indicator::Vix, f64::NAN), 0.0);
    assert_eq!(classifier.classify(Indicator::Vix, f64::INFINITY), 0.0);
    assert_eq!(classify_band(&Band::lower(1.0, 2.0), f64::NEG_INFINITY), 0.0);
}

#[test]
fn test_classify_raw_parses_text() {
    let classifier = standard_classifier();
    assert_eq!(classifier.classify_raw(Indicator::Vix, &RawValue::from("15")), 1.0);
    assert_eq!(
        classifier.classify_raw(Indicator::TreasuryYield10Y, &RawValue::from("4.5%")),
        -1.0
    );
}

#[test]
fn test_malformed_value_counted_and_neutral() {
    let metrics = Arc::new(Metrics::new().unwrap());
    let classifier = standard_classifier().with_metrics(metrics.clone());

    assert_eq!(classifier.classify_raw(Indicator::Vix, &RawValue::from("abc")), 0.0);
    assert_eq!(classifier.classify_raw(Indicator::Vix, &RawValue::from("")), 0.0);
    assert_eq!(metrics.malformed_values.get(), 2);
}
