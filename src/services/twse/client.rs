//! REST client for the TWSE `STOCK_DAY` monthly endpoint

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::MarketDataError;
use crate::models::bar::Bar;

pub const DEFAULT_BASE_URL: &str = "https://www.twse.com.tw";
const STOCK_DAY_PATH: &str = "exchangeReport/STOCK_DAY";

/// ROC (Minguo) calendar offset.
const ROC_YEAR_OFFSET: i32 = 1911;

// STOCK_DAY column layout
const COL_DATE: usize = 0;
const COL_VOLUME: usize = 1;
const COL_OPEN: usize = 3;
const COL_HIGH: usize = 4;
const COL_LOW: usize = 5;
const COL_CLOSE: usize = 6;

#[derive(Debug, Deserialize)]
struct StockDayResponse {
    stat: String,
    #[serde(default)]
    data: Option<Vec<Vec<Value>>>,
}

pub struct TwseClient {
    base_url: Url,
    http: reqwest::Client,
}

impl TwseClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MarketDataError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| MarketDataError::Http {
                symbol: String::new(),
                source,
            })?;
        Self::with_client(base_url, http)
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, MarketDataError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// All daily bars of one calendar month. A non-OK `stat` is an empty month.
    pub async fn fetch_month(
        &self,
        symbol: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let url = self.base_url.join(STOCK_DAY_PATH)?;
        let date = format!("{:04}{:02}01", year, month);

        let response = self
            .http
            .get(url)
            .query(&[("response", "json"), ("date", date.as_str()), ("stockNo", symbol)])
            .send()
            .await
            .map_err(|source| MarketDataError::Http {
                symbol: symbol.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body: StockDayResponse =
            response.json().await.map_err(|e| MarketDataError::Parse {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })?;

        if body.stat != "OK" {
            debug!(symbol = %symbol, stat = %body.stat, "TWSE returned no data for {}-{:02}", year, month);
            return Ok(Vec::new());
        }

        let bars: Vec<Bar> = body
            .data
            .unwrap_or_default()
            .iter()
            .filter_map(|row| parse_row(row))
            .collect();

        debug!(symbol = %symbol, count = bars.len(), "Fetched {} bars for {}-{:02}", bars.len(), year, month);
        Ok(bars)
    }
}

/// Parse one STOCK_DAY row; `None` for rows without a usable date or close.
pub fn parse_row(row: &[Value]) -> Option<Bar> {
    if row.len() <= COL_CLOSE {
        return None;
    }

    let date = parse_roc_date(&cell_text(&row[COL_DATE]))?;
    let close = parse_number(&cell_text(&row[COL_CLOSE]));
    if !close.is_finite() || close <= 0.0 {
        return None;
    }

    Some(Bar::new(
        date,
        parse_number(&cell_text(&row[COL_OPEN])),
        parse_number(&cell_text(&row[COL_HIGH])),
        parse_number(&cell_text(&row[COL_LOW])),
        close,
        parse_number(&cell_text(&row[COL_VOLUME])),
    ))
}

/// `"114/03/05"` → 2025-03-05.
pub fn parse_roc_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let year: i32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year + ROC_YEAR_OFFSET, month, day)
}

/// Strip thousands separators; anything unparsable is 0.
pub fn parse_number(text: &str) -> f64 {
    text.replace(',', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
