//! Bar resampling

pub mod weekly;

pub use weekly::*;
