//! Taiwan Stock Exchange daily data.

pub mod client;
pub mod provider;

pub use client::{TwseClient, DEFAULT_BASE_URL};
pub use provider::{lookback_months, TwseMarketDataSource};
