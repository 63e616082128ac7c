//! Core application primitives (worker pool)

pub mod runtime;

pub use runtime::*;
