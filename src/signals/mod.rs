//! Sector and composite scoring.

pub mod aggregation;
pub mod categories;
pub mod composite;
pub mod engine;
pub mod scoring;
pub mod weights;

pub use aggregation::*;
pub use categories::*;
pub use composite::*;
pub use engine::*;
pub use scoring::*;
pub use weights::*;
