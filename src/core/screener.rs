//! Screening orchestrator: concurrent per-symbol evaluation, merge and ranking.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::NaiveDate;
use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::error::ScreenerError;
use crate::metrics::Metrics;
use crate::models::screener::{ScreenerParams, ScreenerRequest, ScreenerResponse, ScreenerRow};
use crate::services::market_data::MarketDataSource;
use crate::signals::engine::{SignalEngine, SymbolOutcome};

/// Result of one symbol task, merged after every task has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolResult {
    pub code: String,
    pub row: Option<ScreenerRow>,
    pub data_date: Option<NaiveDate>,
    /// Reported as a placeholder row (short history, fetch or compute failure).
    pub degraded: bool,
}

impl SymbolResult {
    fn degraded(code: &str) -> Self {
        Self {
            code: code.to_string(),
            row: Some(ScreenerRow::insufficient(code)),
            data_date: None,
            degraded: true,
        }
    }
}

pub struct ScreenerOrchestrator {
    source: Arc<dyn MarketDataSource>,
    pool: Vec<String>,
    metrics: Option<Arc<Metrics>>,
}

impl ScreenerOrchestrator {
    pub fn new(source: Arc<dyn MarketDataSource>, pool: Vec<String>) -> Self {
        Self {
            source,
            pool,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    /// Build params from a raw request, then run.
    pub async fn screen(&self, request: ScreenerRequest) -> Result<ScreenerResponse, ScreenerError> {
        let params = ScreenerParams::from_request(request)?;
        self.run(&params).await
    }

    /// Evaluate every pooled symbol concurrently and return the ranked rows.
    ///
    /// Only invalid params fail the call; per-symbol problems degrade to a
    /// placeholder row.
    pub async fn run(&self, params: &ScreenerParams) -> Result<ScreenerResponse, ScreenerError> {
        params.validate()?;

        info!(
            pool = self.pool.len(),
            timeframe = %params.timeframe,
            filter = %params.filter,
            months_back = params.months_back,
            "Starting screening run"
        );

        let handles: Vec<_> = self
            .pool
            .iter()
            .map(|code| {
                let source = self.source.clone();
                let code = code.clone();
                let params = params.clone();
                tokio::spawn(async move { evaluate_symbol(source.as_ref(), &code, &params).await })
            })
            .collect();

        let joined = join_all(handles).await;

        let results: Vec<SymbolResult> = self
            .pool
            .iter()
            .zip(joined)
            .map(|(code, joined)| match joined {
                Ok(result) => result,
                Err(e) => {
                    warn!(symbol = %code, error = %e, "Symbol task failed");
                    SymbolResult::degraded(code)
                }
            })
            .collect();

        let degraded = results.iter().filter(|r| r.degraded).count();
        let response = merge_results(results, params);

        if let Some(metrics) = &self.metrics {
            metrics.screener_runs_total.inc();
            metrics
                .screener_symbols_degraded_total
                .inc_by(degraded as u64);
            metrics
                .screener_rows_emitted_total
                .inc_by(response.rows.len() as u64);
        }

        info!(
            rows = response.rows.len(),
            degraded = degraded,
            data_date = ?response.data_date,
            "Screening run complete"
        );

        Ok(response)
    }
}

/// Fetch and evaluate one symbol. Never fails: problems become a placeholder.
pub async fn evaluate_symbol(
    source: &dyn MarketDataSource,
    code: &str,
    params: &ScreenerParams,
) -> SymbolResult {
    let daily = match source.fetch_daily_bars(code, params.months_back).await {
        Ok(bars) => bars,
        Err(e) => {
            warn!(symbol = %code, error = %e, "Market data fetch failed");
            Vec::new()
        }
    };

    match SignalEngine::evaluate(code, &daily, params) {
        Ok(outcome) => {
            let degraded = outcome == SymbolOutcome::InsufficientHistory;
            if degraded {
                debug!(
                    symbol = %code,
                    count = daily.len(),
                    min = params.min_history(),
                    "Insufficient history ({} < {})",
                    daily.len(),
                    params.min_history()
                );
            }
            let data_date = outcome.data_date();
            let row = outcome.into_row(code);
            debug!(symbol = %code, matched = row.is_some(), "Symbol evaluated");
            SymbolResult {
                code: code.to_string(),
                row,
                data_date,
                degraded,
            }
        }
        Err(e) => {
            warn!(symbol = %code, error = %e, "Indicator computation failed");
            SymbolResult::degraded(code)
        }
    }
}

/// Collect rows, pick the latest data date and rank.
pub fn merge_results(results: Vec<SymbolResult>, params: &ScreenerParams) -> ScreenerResponse {
    let data_date = results.iter().filter_map(|r| r.data_date).max();
    let mut rows: Vec<ScreenerRow> = results.into_iter().filter_map(|r| r.row).collect();
    rank_rows(&mut rows);

    ScreenerResponse {
        data_date,
        timeframe: params.timeframe,
        rows,
    }
}

/// Golden crosses first, dead crosses last; higher histogram first within a group.
pub fn rank_rows(rows: &mut [ScreenerRow]) {
    rows.sort_by(compare_rows);
}

fn compare_rows(a: &ScreenerRow, b: &ScreenerRow) -> Ordering {
    a.signal
        .priority()
        .cmp(&b.signal.priority())
        .then_with(|| b.osc.total_cmp(&a.osc))
}
