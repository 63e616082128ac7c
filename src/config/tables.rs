//! Built-in indicator, sector and composite tables.

use std::collections::BTreeMap;

use crate::config::bands::Band;
use crate::config::curves::standard_curve;
use crate::config::engine::RawEngineConfig;
use crate::models::{Indicator, Sector};
use crate::signals::weights::WeightEntry;

/// Composite weights, in percent. Order matters: it breaks ties when
/// rounding drift is folded into the largest weight.
pub const DEFAULT_COMPONENT_WEIGHTS: [(&str, f64); 13] = [
    ("gdp", 12.0),
    ("pce", 8.0),
    ("unemployment", 10.0),
    ("cpi", 8.0),
    ("pcepi", 7.0),
    ("nasdaq", 10.0),
    ("data_ppi", 6.0),
    ("software_ppi", 6.0),
    ("interest_rate", 8.0),
    ("treasury_yield", 8.0),
    ("vix", 8.0),
    ("consumer_sentiment", 9.0),
    // tracked but unweighted until callers opt in
    ("job_postings", 0.0),
];

pub fn standard_band(indicator: Indicator) -> Band {
    match indicator {
        Indicator::TreasuryYield10Y => Band::lower(3.25, 4.00),
        Indicator::Vix => Band::lower(17.5, 20.0),
        Indicator::NasdaqGap => Band::proportional(2.0, -2.0).with_momentum_amplification(),
        Indicator::FedFundsRate => Band::lower(4.5, 5.25),
        Indicator::CpiYoy => Band::lower(3.0, 4.0),
        Indicator::PcepiYoy => Band::lower(3.0, 4.0),
        Indicator::RealGdpGrowth => Band::higher(2.5, 1.0),
        Indicator::RealPceYoy => Band::higher(2.5, 1.0),
        Indicator::Unemployment => Band::lower(4.5, 5.5),
        Indicator::SoftwareJobPostings => Band::higher(5.0, 0.0),
        Indicator::PpiDataProcessing => Band::higher(5.0, 0.0),
        Indicator::PpiSoftwarePublishers => Band::higher(5.0, 0.0),
        Indicator::ConsumerSentiment => Band::higher(100.0, 90.0),
    }
}

pub fn standard_importance(indicator: Indicator) -> f64 {
    match indicator {
        Indicator::NasdaqGap
        | Indicator::TreasuryYield10Y
        | Indicator::Vix
        | Indicator::ConsumerSentiment => 3.0,
        _ => 1.0,
    }
}

/// Impact of `indicator` on `sector`, 1 (weak) to 3 (strong).
pub fn standard_impact(indicator: Indicator, sector: Sector) -> u8 {
    use Sector::*;

    let rate_sensitive = matches!(
        sector,
        SmbSaas | EnterpriseSaas | CloudInfrastructure | DevTools | AiInfrastructure | VerticalSaas
    );
    let consumer_facing = matches!(
        sector,
        AdTech | ConsumerInternet | ECommerce | Semiconductors | Hardware
    );

    match indicator {
        Indicator::TreasuryYield10Y => match sector {
            ItServices => 1,
            _ if rate_sensitive => 3,
            _ => 2,
        },
        Indicator::Vix | Indicator::Unemployment => 2,
        Indicator::NasdaqGap => match sector {
            ItServices | Hardware => 2,
            _ => 3,
        },
        Indicator::FedFundsRate => match sector {
            ItServices => 1,
            Fintech => 3,
            _ if rate_sensitive => 3,
            _ => 2,
        },
        Indicator::CpiYoy
        | Indicator::PcepiYoy
        | Indicator::RealGdpGrowth
        | Indicator::RealPceYoy => {
            if consumer_facing {
                3
            } else {
                2
            }
        }
        Indicator::SoftwareJobPostings => match sector {
            SmbSaas | CloudInfrastructure | Cybersecurity | DevTools | AiInfrastructure
            | VerticalSaas => 3,
            EnterpriseSaas => 2,
            _ => 1,
        },
        Indicator::PpiDataProcessing | Indicator::PpiSoftwarePublishers => match sector {
            CloudInfrastructure | AiInfrastructure => 3,
            _ => 1,
        },
        Indicator::ConsumerSentiment => match sector {
            ConsumerInternet | ECommerce | AdTech => 3,
            Fintech | Hardware | Semiconductors | SmbSaas => 2,
            _ => 1,
        },
    }
}

impl RawEngineConfig {
    /// The production tables, in the same name-keyed shape an external
    /// config file uses.
    pub fn standard() -> Self {
        let mut bands = BTreeMap::new();
        let mut impact = BTreeMap::new();
        let mut importance = BTreeMap::new();
        let mut curves = BTreeMap::new();

        for indicator in Indicator::ALL {
            bands.insert(indicator.name().to_string(), standard_band(indicator));

            let row: BTreeMap<String, u8> = Sector::ALL
                .iter()
                .map(|sector| (sector.name().to_string(), standard_impact(indicator, *sector)))
                .collect();
            impact.insert(indicator.name().to_string(), row);

            importance.insert(indicator.name().to_string(), standard_importance(indicator));

            if let Some(curve) = standard_curve(indicator.component_key()) {
                curves.insert(indicator.component_key().to_string(), curve);
            }
        }

        let weights = DEFAULT_COMPONENT_WEIGHTS
            .iter()
            .map(|(name, weight)| WeightEntry::new(*name, *weight))
            .collect();

        Self {
            bands,
            impact,
            importance,
            curves,
            weights,
        }
    }
}
