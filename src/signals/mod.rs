//! Signal and pattern evaluation over computed indicator series.

pub mod engine;
pub mod filters;
pub mod patterns;

pub use engine::{SignalEngine, SymbolOutcome};
pub use filters::{DataRequirement, Filter, FilterInput, FilterThresholds};
pub use patterns::*;
