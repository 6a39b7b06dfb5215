//! MACD momentum screener over a pool of equities.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use crate::core::screener::ScreenerOrchestrator;
pub use error::{MarketDataError, ScreenerError};
pub use models::{ScreenerParams, ScreenerRequest, ScreenerResponse, ScreenerRow};
