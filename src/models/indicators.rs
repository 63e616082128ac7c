use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Macroeconomic and market series consumed by the engine.
///
/// Declaration order is the canonical order used for config tables,
/// snapshots and breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Indicator {
    #[serde(rename = "10Y_Treasury_Yield_%")]
    TreasuryYield10Y,
    #[serde(rename = "VIX")]
    Vix,
    #[serde(rename = "NASDAQ_20d_gap_%")]
    NasdaqGap,
    #[serde(rename = "Fed_Funds_Rate_%")]
    FedFundsRate,
    #[serde(rename = "CPI_YoY_%")]
    CpiYoy,
    #[serde(rename = "PCEPI_YoY_%")]
    PcepiYoy,
    #[serde(rename = "Real_GDP_Growth_%_SAAR")]
    RealGdpGrowth,
    #[serde(rename = "Real_PCE_YoY_%")]
    RealPceYoy,
    #[serde(rename = "Unemployment_%")]
    Unemployment,
    #[serde(rename = "Software_Dev_Job_Postings_YoY_%")]
    SoftwareJobPostings,
    #[serde(rename = "PPI_Data_Processing_YoY_%")]
    PpiDataProcessing,
    #[serde(rename = "PPI_Software_Publishers_YoY_%")]
    PpiSoftwarePublishers,
    #[serde(rename = "Consumer_Sentiment")]
    ConsumerSentiment,
}

impl Indicator {
    pub const COUNT: usize = 13;

    pub const ALL: [Indicator; Indicator::COUNT] = [
        Indicator::TreasuryYield10Y,
        Indicator::Vix,
        Indicator::NasdaqGap,
        Indicator::FedFundsRate,
        Indicator::CpiYoy,
        Indicator::PcepiYoy,
        Indicator::RealGdpGrowth,
        Indicator::RealPceYoy,
        Indicator::Unemployment,
        Indicator::SoftwareJobPostings,
        Indicator::PpiDataProcessing,
        Indicator::PpiSoftwarePublishers,
        Indicator::ConsumerSentiment,
    ];

    /// Feed-facing series name.
    pub fn name(&self) -> &'static str {
        match self {
            Indicator::TreasuryYield10Y => "10Y_Treasury_Yield_%",
            Indicator::Vix => "VIX",
            Indicator::NasdaqGap => "NASDAQ_20d_gap_%",
            Indicator::FedFundsRate => "Fed_Funds_Rate_%",
            Indicator::CpiYoy => "CPI_YoY_%",
            Indicator::PcepiYoy => "PCEPI_YoY_%",
            Indicator::RealGdpGrowth => "Real_GDP_Growth_%_SAAR",
            Indicator::RealPceYoy => "Real_PCE_YoY_%",
            Indicator::Unemployment => "Unemployment_%",
            Indicator::SoftwareJobPostings => "Software_Dev_Job_Postings_YoY_%",
            Indicator::PpiDataProcessing => "PPI_Data_Processing_YoY_%",
            Indicator::PpiSoftwarePublishers => "PPI_Software_Publishers_YoY_%",
            Indicator::ConsumerSentiment => "Consumer_Sentiment",
        }
    }

    /// Key of this indicator in a composite `WeightSet`.
    pub fn component_key(&self) -> &'static str {
        match self {
            Indicator::TreasuryYield10Y => "treasury_yield",
            Indicator::Vix => "vix",
            Indicator::NasdaqGap => "nasdaq",
            Indicator::FedFundsRate => "interest_rate",
            Indicator::CpiYoy => "cpi",
            Indicator::PcepiYoy => "pcepi",
            Indicator::RealGdpGrowth => "gdp",
            Indicator::RealPceYoy => "pce",
            Indicator::Unemployment => "unemployment",
            Indicator::SoftwareJobPostings => "job_postings",
            Indicator::PpiDataProcessing => "data_ppi",
            Indicator::PpiSoftwarePublishers => "software_ppi",
            Indicator::ConsumerSentiment => "consumer_sentiment",
        }
    }

    pub fn from_component_key(key: &str) -> Option<Indicator> {
        Indicator::ALL.into_iter().find(|i| i.component_key() == key)
    }

    /// Human label used in pulse breakdowns.
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::TreasuryYield10Y => "10-Year Treasury Yield",
            Indicator::Vix => "VIX Volatility Index",
            Indicator::NasdaqGap => "NASDAQ Trend",
            Indicator::FedFundsRate => "Federal Funds Rate",
            Indicator::CpiYoy => "CPI",
            Indicator::PcepiYoy => "PCEPI",
            Indicator::RealGdpGrowth => "Real GDP % Change",
            Indicator::RealPceYoy => "PCE",
            Indicator::Unemployment => "Unemployment Rate",
            Indicator::SoftwareJobPostings => "Software Job Postings",
            Indicator::PpiDataProcessing => "Data Processing PPI",
            Indicator::PpiSoftwarePublishers => "Software Publishers PPI",
            Indicator::ConsumerSentiment => "Consumer Sentiment",
        }
    }

    /// Daily market series that should move from one trading day to the next.
    pub fn is_daily(&self) -> bool {
        matches!(
            self,
            Indicator::Vix | Indicator::TreasuryYield10Y | Indicator::NasdaqGap
        )
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Indicator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Indicator::ALL
            .into_iter()
            .find(|i| i.name() == s)
            .ok_or_else(|| format!("unknown indicator: {}", s))
    }
}

/// An indicator value as handed over by the feed, before parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

/// Point-in-time indicator values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub as_of: NaiveDate,
    #[serde(default)]
    pub values: BTreeMap<Indicator, RawValue>,
}

impl IndicatorSnapshot {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            values: BTreeMap::new(),
        }
    }

    /// Build from feed-named values. Unknown series names are dropped.
    pub fn from_named(as_of: NaiveDate, named: &HashMap<String, RawValue>) -> Self {
        let mut snapshot = Self::new(as_of);
        for (name, value) in named {
            match name.parse::<Indicator>() {
                Ok(indicator) => {
                    snapshot.values.insert(indicator, value.clone());
                }
                Err(_) => warn!(indicator = %name, "ignoring unknown indicator in snapshot"),
            }
        }
        snapshot
    }

    pub fn with_value(mut self, indicator: Indicator, value: impl Into<RawValue>) -> Self {
        self.values.insert(indicator, value.into());
        self
    }

    pub fn insert(&mut self, indicator: Indicator, value: impl Into<RawValue>) {
        self.values.insert(indicator, value.into());
    }

    pub fn get(&self, indicator: Indicator) -> Option<&RawValue> {
        self.values.get(&indicator)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
