//! Sector sentiment scoring and the composite Pulse index.

pub mod backtest;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use error::EngineError;
