//! Market data source interface consumed by the screener.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use crate::error::MarketDataError;
use crate::models::bar::Bar;

#[async_trait::async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Daily bars for `symbol` covering the last `months_back` calendar months,
    /// ascending by date with malformed records already removed.
    async fn fetch_daily_bars(
        &self,
        symbol: &str,
        months_back: u32,
    ) -> Result<Vec<Bar>, MarketDataError>;
}

/// In-memory source serving fixed series. Unknown symbols yield no bars.
#[derive(Default)]
pub struct StaticMarketDataSource {
    series: HashMap<String, Vec<Bar>>,
    failing: HashSet<String>,
    requests: RwLock<Vec<(String, u32)>>,
}

impl StaticMarketDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        self.series.insert(symbol.into(), bars);
        self
    }

    /// Make every fetch for `symbol` fail.
    pub fn with_failure(mut self, symbol: impl Into<String>) -> Self {
        self.failing.insert(symbol.into());
        self
    }

    /// `(symbol, months_back)` pairs requested so far.
    pub async fn requests(&self) -> Vec<(String, u32)> {
        self.requests.read().await.clone()
    }
}

#[async_trait::async_trait]
impl MarketDataSource for StaticMarketDataSource {
    async fn fetch_daily_bars(
        &self,
        symbol: &str,
        months_back: u32,
    ) -> Result<Vec<Bar>, MarketDataError> {
        self.requests
            .write()
            .await
            .push((symbol.to_string(), months_back));

        if self.failing.contains(symbol) {
            return Err(MarketDataError::NoData {
                symbol: symbol.to_string(),
            });
        }

        Ok(self.series.get(symbol).cloned().unwrap_or_default())
    }
}
