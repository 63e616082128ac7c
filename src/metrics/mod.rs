//! Prometheus counters for data-quality events.

use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub malformed_values: IntCounter,
    pub sector_fallbacks: IntCounter,
    pub backfill_dates_scored: IntCounter,
    pub backfill_dates_skipped: IntCounter,
    pub stale_series_warnings: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let malformed_values = IntCounter::new(
            "sectorpulse_malformed_values_total",
            "Indicator values that failed to parse and were classified neutral",
        )?;
        let sector_fallbacks = IntCounter::new(
            "sectorpulse_sector_fallbacks_total",
            "Sectors scored from their previous value because no constituents reported",
        )?;
        let backfill_dates_scored = IntCounter::new(
            "sectorpulse_backfill_dates_scored_total",
            "Historical dates scored by backfill",
        )?;
        let backfill_dates_skipped = IntCounter::new(
            "sectorpulse_backfill_dates_skipped_total",
            "Historical dates skipped for insufficient indicators",
        )?;
        let stale_series_warnings = IntCounter::new(
            "sectorpulse_stale_series_warnings_total",
            "Daily indicator series that repeated a bit-identical value too long",
        )?;

        registry.register(Box::new(malformed_values.clone()))?;
        registry.register(Box::new(sector_fallbacks.clone()))?;
        registry.register(Box::new(backfill_dates_scored.clone()))?;
        registry.register(Box::new(backfill_dates_skipped.clone()))?;
        registry.register(Box::new(stale_series_warnings.clone()))?;

        Ok(Self {
            registry,
            malformed_values,
            sector_fallbacks,
            backfill_dates_scored,
            backfill_dates_skipped,
            stale_series_warnings,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Prometheus text exposition of all counters.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::error!(error = %e, "failed to encode metrics");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
