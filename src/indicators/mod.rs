pub mod error;

pub mod aggregation;
pub mod momentum;
pub mod trend;
pub mod volume;

pub use error::IndicatorError;
