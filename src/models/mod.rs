//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod pulse;
pub mod sector;

pub use indicators::{Indicator, IndicatorSnapshot, RawValue};
pub use pulse::{CompositeComponent, PulseCategory, PulseIndex};
pub use sector::{Sector, SectorScore};
