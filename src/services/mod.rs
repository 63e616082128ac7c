//! Collaborator seams.

pub mod indicator_feed;

pub use indicator_feed::{IndicatorFeed, IndicatorHistory};
