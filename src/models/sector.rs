use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::signals::scoring::to_display;

/// Technology segments scored for sentiment, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "SMB SaaS")]
    SmbSaas,
    #[serde(rename = "Enterprise SaaS")]
    EnterpriseSaas,
    #[serde(rename = "Cloud Infrastructure")]
    CloudInfrastructure,
    #[serde(rename = "AdTech")]
    AdTech,
    #[serde(rename = "Fintech")]
    Fintech,
    #[serde(rename = "Consumer Internet")]
    ConsumerInternet,
    #[serde(rename = "eCommerce")]
    ECommerce,
    #[serde(rename = "Cybersecurity")]
    Cybersecurity,
    #[serde(rename = "Dev Tools / Analytics")]
    DevTools,
    #[serde(rename = "Semiconductors")]
    Semiconductors,
    #[serde(rename = "AI Infrastructure")]
    AiInfrastructure,
    #[serde(rename = "Vertical SaaS")]
    VerticalSaas,
    #[serde(rename = "IT Services / Legacy Tech")]
    ItServices,
    #[serde(rename = "Hardware / Devices")]
    Hardware,
}

impl Sector {
    pub const COUNT: usize = 14;

    pub const ALL: [Sector; Sector::COUNT] = [
        Sector::SmbSaas,
        Sector::EnterpriseSaas,
        Sector::CloudInfrastructure,
        Sector::AdTech,
        Sector::Fintech,
        Sector::ConsumerInternet,
        Sector::ECommerce,
        Sector::Cybersecurity,
        Sector::DevTools,
        Sector::Semiconductors,
        Sector::AiInfrastructure,
        Sector::VerticalSaas,
        Sector::ItServices,
        Sector::Hardware,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Sector::SmbSaas => "SMB SaaS",
            Sector::EnterpriseSaas => "Enterprise SaaS",
            Sector::CloudInfrastructure => "Cloud Infrastructure",
            Sector::AdTech => "AdTech",
            Sector::Fintech => "Fintech",
            Sector::ConsumerInternet => "Consumer Internet",
            Sector::ECommerce => "eCommerce",
            Sector::Cybersecurity => "Cybersecurity",
            Sector::DevTools => "Dev Tools / Analytics",
            Sector::Semiconductors => "Semiconductors",
            Sector::AiInfrastructure => "AI Infrastructure",
            Sector::VerticalSaas => "Vertical SaaS",
            Sector::ItServices => "IT Services / Legacy Tech",
            Sector::Hardware => "Hardware / Devices",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sector::ALL
            .into_iter()
            .find(|sector| sector.name() == s)
            .ok_or_else(|| format!("unknown sector: {}", s))
    }
}

/// Directional sentiment for one sector on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorScore {
    pub sector: Sector,
    /// Native score in [-1, +1].
    pub raw_score: f64,
    pub as_of: NaiveDate,
    /// Set when the previous known score was substituted for a sector
    /// with no reporting constituents.
    #[serde(default)]
    pub carried_forward: bool,
}

impl SectorScore {
    pub fn new(sector: Sector, raw_score: f64, as_of: NaiveDate) -> Self {
        Self {
            sector,
            raw_score,
            as_of,
            carried_forward: false,
        }
    }

    /// 0-100 presentation value.
    pub fn display_score(&self) -> f64 {
        to_display(self.raw_score)
    }
}
