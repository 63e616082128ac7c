//! End-to-end scoring of snapshot documents

use sectorpulse::config::{Band, EngineConfig, EngineSettings, RawEngineConfig};
use sectorpulse::models::indicators::{IndicatorSnapshot, RawValue};
use sectorpulse::models::sector::Sector;
use sectorpulse::models::Indicator;
use sectorpulse::signals::engine::SentimentEngine;

const SNAPSHOT: &str = r#"{
    "as_of": "2024-06-03",
    "values": {
        "10Y_Treasury_Yield_%": 4.41,
        "VIX": "12.9",
        "NASDAQ_20d_gap_%": 3.6,
        "Fed_Funds_Rate_%": 5.33,
        "CPI_YoY_%": "3.3%",
        "PCEPI_YoY_%": 2.6,
        "Real_GDP_Growth_%_SAAR": 1.4,
        "Real_PCE_YoY_%": 2.6,
        "Unemployment_%": 4.0,
        "Software_Dev_Job_Postings_YoY_%": -18.5,
        "PPI_Data_Processing_YoY_%": 2.9,
        "PPI_Software_Publishers_YoY_%": "",
        "Consumer_Sentiment": 65.6
    }
}"#;

#[test]
fn test_snapshot_document_scores_end_to_end() {
    let snapshot: IndicatorSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
    assert_eq!(snapshot.len(), 13);
    assert_eq!(snapshot.get(Indicator::Vix), Some(&RawValue::Text("12.9".to_string())));

    let engine = SentimentEngine::from_settings(EngineSettings::default()).unwrap();
    let scores = engine.score_sectors(&snapshot);
    assert_eq!(scores.len(), Sector::COUNT);
    assert!(scores.iter().all(|s| (-1.0..=1.0).contains(&s.raw_score)));

    // empty PPI text is left out of the composite
    let index = engine.pulse_default(&snapshot).unwrap();
    assert_eq!(index.components_used, 12);
    assert!((index.available_weight - 94.0).abs() < 1e-9);

    let json = serde_json::to_value(&index).unwrap();
    assert!(json["category"].is_string());
    assert_eq!(json["components"].as_array().unwrap().len(), 12);
}

#[test]
fn test_sector_scores_serialize_with_names() {
    let snapshot: IndicatorSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
    let engine = SentimentEngine::from_settings(EngineSettings::default()).unwrap();
    let scores = engine.score_sectors(&snapshot);

    let json = serde_json::to_value(&scores[8]).unwrap();
    assert_eq!(json["sector"], "Dev Tools / Analytics");
    assert_eq!(json["as_of"], "2024-06-03");
    assert_eq!(json["carried_forward"], false);
}

#[test]
fn test_alternate_configuration_changes_scores() {
    let snapshot: IndicatorSnapshot = serde_json::from_str(SNAPSHOT).unwrap();

    let standard = SentimentEngine::new(EngineConfig::standard().unwrap(), EngineSettings::default());

    // a stricter VIX band turns 12.9 from favorable to unfavorable
    let mut raw = RawEngineConfig::standard();
    raw.bands.insert("VIX".to_string(), Band::lower(10.0, 12.0));
    let json = serde_json::to_string(&raw).unwrap();
    let strict = SentimentEngine::new(EngineConfig::from_json(&json).unwrap(), EngineSettings::default());

    let before = standard.score_sectors(&snapshot);
    let after = strict.score_sectors(&snapshot);
    for (b, a) in before.iter().zip(&after) {
        assert!(a.raw_score < b.raw_score, "{}", b.sector);
    }
}
