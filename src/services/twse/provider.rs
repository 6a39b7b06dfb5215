//! TWSE-backed market data source

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use futures_util::future::join_all;
use tracing::{debug, warn};

use super::client::TwseClient;
use crate::error::MarketDataError;
use crate::models::bar::Bar;
use crate::services::market_data::MarketDataSource;

pub struct TwseMarketDataSource {
    client: Arc<TwseClient>,
    /// Fixed reference date; `None` uses the local calendar date.
    today: Option<NaiveDate>,
}

impl TwseMarketDataSource {
    pub fn new(client: TwseClient) -> Self {
        Self {
            client: Arc::new(client),
            today: None,
        }
    }

    /// Pin the month window to `today` instead of the wall clock.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn client(&self) -> &Arc<TwseClient> {
        &self.client
    }

    fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// `(year, month)` for `today`'s month and the `months_back - 1` before it,
/// newest first.
pub fn lookback_months(today: NaiveDate, months_back: u32) -> Vec<(i32, u32)> {
    let start = today.year() * 12 + today.month0() as i32;
    (0..months_back as i32)
        .map(|i| {
            let index = start - i;
            (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

#[async_trait::async_trait]
impl MarketDataSource for TwseMarketDataSource {
    async fn fetch_daily_bars(
        &self,
        symbol: &str,
        months_back: u32,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let months = lookback_months(self.reference_date(), months_back);
        let results = join_all(
            months
                .iter()
                .map(|&(year, month)| self.client.fetch_month(symbol, year, month)),
        )
        .await;

        let mut bars = Vec::new();
        let mut last_error = None;
        let mut succeeded = 0usize;

        for ((year, month), result) in months.iter().zip(results) {
            match result {
                Ok(month_bars) => {
                    succeeded += 1;
                    bars.extend(month_bars);
                }
                Err(e) => {
                    warn!(symbol = %symbol, year = year, month = month, error = %e, "Failed to fetch TWSE month");
                    last_error = Some(e);
                }
            }
        }

        if succeeded == 0 {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);

        debug!(symbol = %symbol, count = bars.len(), months = months_back, "Merged daily bars");
        Ok(bars)
    }
}
