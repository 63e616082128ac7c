//! Sectorpulse CLI
//!
//! Scores one indicator snapshot: per-sector sentiment plus the composite
//! Pulse index, printed as JSON on stdout.
//!
//! Usage: `sectorpulse [snapshot.json]`. Without a path, a built-in sample
//! snapshot is scored.

use chrono::NaiveDate;
use dotenvy::dotenv;
use sectorpulse::config::{get_environment, EngineSettings};
use sectorpulse::error::EngineError;
use sectorpulse::logging;
use sectorpulse::metrics::Metrics;
use sectorpulse::models::indicators::{Indicator, IndicatorSnapshot};
use sectorpulse::signals::engine::SentimentEngine;
use serde_json::json;
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

fn sample_snapshot() -> Result<IndicatorSnapshot, Box<dyn std::error::Error>> {
    let as_of = NaiveDate::from_ymd_opt(2025, 6, 2).ok_or("invalid sample date")?;
    Ok(IndicatorSnapshot::new(as_of)
        .with_value(Indicator::TreasuryYield10Y, 4.4)
        .with_value(Indicator::Vix, 18.4)
        .with_value(Indicator::NasdaqGap, 1.2)
        .with_value(Indicator::FedFundsRate, 4.33)
        .with_value(Indicator::CpiYoy, 2.4)
        .with_value(Indicator::PcepiYoy, 2.1)
        .with_value(Indicator::RealGdpGrowth, -0.5)
        .with_value(Indicator::RealPceYoy, 2.1)
        .with_value(Indicator::Unemployment, 4.2)
        .with_value(Indicator::SoftwareJobPostings, -8.1)
        .with_value(Indicator::PpiDataProcessing, 3.2)
        .with_value(Indicator::PpiSoftwarePublishers, 1.4)
        .with_value(Indicator::ConsumerSentiment, 52.2))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let settings = EngineSettings::from_env();
    info!(environment = %get_environment(), "Starting sectorpulse");

    let metrics = Arc::new(Metrics::new()?);
    let engine = SentimentEngine::from_settings(settings)?.with_metrics(metrics.clone());

    let snapshot = match env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "Reading snapshot");
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read {}: {}", path, e))?;
            serde_json::from_str::<IndicatorSnapshot>(&json)
                .map_err(|e| format!("invalid snapshot {}: {}", path, e))?
        }
        None => sample_snapshot()?,
    };

    let sectors: Vec<_> = engine
        .score_sectors(&snapshot)
        .into_iter()
        .map(|score| {
            json!({
                "sector": score.sector,
                "raw_score": score.raw_score,
                "display_score": score.display_score(),
            })
        })
        .collect();

    let pulse = match engine.pulse_default(&snapshot) {
        Ok(index) => Some(index),
        Err(EngineError::InsufficientData {
            available,
            required,
        }) => {
            warn!(available, required, "Pulse index not published");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let output = json!({
        "as_of": snapshot.as_of,
        "sectors": sectors,
        "pulse": pulse,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    info!(
        malformed = metrics.malformed_values.get(),
        "Scoring complete"
    );
    Ok(())
}
