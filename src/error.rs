//! Crate-level error types

use thiserror::Error;

/// Request-level failures. Symbol-level problems never surface here.
#[derive(Debug, Error)]
pub enum ScreenerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Failures while retrieving bars from a market data source.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP request failed for {symbol}: {source}")]
    Http {
        symbol: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {symbol}")]
    Status { symbol: String, status: u16 },

    #[error("Invalid market data for {symbol}: {reason}")]
    Parse { symbol: String, reason: String },

    #[error("No data returned for {symbol}")]
    NoData { symbol: String },

    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}
