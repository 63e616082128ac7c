//! Sectorpulse backfill
//!
//! Replays sector scoring over an archived indicator history.
//!
//! Usage: `backfill <history.json> [from] [to]` with dates as YYYY-MM-DD.
//! Every observation date in range is scored; the report goes to stdout and
//! the Prometheus counters to stderr.

use chrono::NaiveDate;
use dotenvy::dotenv;
use sectorpulse::backtest::runner::BacktestRunner;
use sectorpulse::config::EngineSettings;
use sectorpulse::core::runtime::{BackfillRuntime, RuntimeConfig};
use sectorpulse::logging;
use sectorpulse::metrics::Metrics;
use sectorpulse::services::indicator_feed::IndicatorHistory;
use sectorpulse::signals::aggregation::SectorScorer;
use std::env;
use std::sync::Arc;
use tracing::info;

fn parse_date(arg: Option<String>) -> Result<Option<NaiveDate>, chrono::ParseError> {
    arg.map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
        .transpose()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: backfill <history.json> [from] [to]")?;
    let from = parse_date(args.next())?;
    let to = parse_date(args.next())?;

    let settings = EngineSettings::from_env();
    let config = Arc::new(settings.load_engine_config()?);
    let metrics = Arc::new(Metrics::new()?);

    let json = std::fs::read_to_string(&path)
        .map_err(|e| format!("failed to read {}: {}", path, e))?;
    let history = IndicatorHistory::from_json(&json)
        .map_err(|e| format!("invalid history {}: {}", path, e))?;
    let dates: Vec<NaiveDate> = history
        .observation_dates()
        .into_iter()
        .filter(|date| from.map_or(true, |f| *date >= f))
        .filter(|date| to.map_or(true, |t| *date <= t))
        .collect();

    info!(
        path = %path,
        dates = dates.len(),
        concurrency = settings.backfill_concurrency,
        "Starting backfill"
    );

    let scorer = SectorScorer::new(config).with_metrics(metrics.clone());
    let runner = BacktestRunner::new(scorer, &settings).with_metrics(metrics.clone());
    let runtime = BackfillRuntime::new(runner, RuntimeConfig::from(&settings));

    let report = runtime.backfill(Arc::new(history), &dates).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    eprint!("{}", metrics.render());
    Ok(())
}
