pub mod classifier;
pub mod error;
pub mod parser;

pub use classifier::*;
pub use error::IndicatorError;
pub use parser::*;
