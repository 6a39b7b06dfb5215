//! Unit tests for the screening orchestrator

use std::sync::Arc;

use crate::fixtures::*;
use macd_screener::core::screener::{merge_results, rank_rows, ScreenerOrchestrator, SymbolResult};
use macd_screener::error::ScreenerError;
use macd_screener::metrics::Metrics;
use macd_screener::models::{
    CrossSignal, ScreenerParams, ScreenerRequest, ScreenerRow, Timeframe, VolumeCheck,
};
use macd_screener::services::StaticMarketDataSource;
use macd_screener::signals::filters::Filter;

fn row(code: &str, osc: f64, signal: CrossSignal) -> ScreenerRow {
    ScreenerRow::new(code, 0.0, 0.0, osc, signal, VolumeCheck::Na)
}

fn codes(rows: &[ScreenerRow]) -> Vec<&str> {
    rows.iter().map(|r| r.code.as_str()).collect()
}

fn pool(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

/// golden, dead, plain uptrend, short history and a failing symbol.
fn mixed_source() -> StaticMarketDataSource {
    StaticMarketDataSource::new()
        .with_series("G", daily_bars(&golden_cross_closes()))
        .with_series("D", daily_bars(&dead_cross_closes()))
        .with_series("L", daily_bars(&linear_closes(80)))
        .with_series("S", daily_bars(&linear_closes(12)))
        .with_failure("F")
}

#[test]
fn test_rank_rows_orders_by_signal_then_osc() {
    let mut rows = vec![
        row("A", 1.0, CrossSignal::Golden),
        row("B", 9.0, CrossSignal::None),
        row("C", 5.0, CrossSignal::Dead),
        row("D", 3.0, CrossSignal::Golden),
    ];
    rank_rows(&mut rows);
    assert_eq!(codes(&rows), vec!["D", "A", "B", "C"]);
}

#[test]
fn test_rank_rows_negative_osc_within_group() {
    let mut rows = vec![
        row("A", -2.0, CrossSignal::Dead),
        row("B", -0.5, CrossSignal::Dead),
        row("C", 0.0, CrossSignal::None),
    ];
    rank_rows(&mut rows);
    assert_eq!(codes(&rows), vec!["C", "B", "A"]);
}

#[test]
fn test_merge_results_takes_latest_date() {
    let results = vec![
        SymbolResult {
            code: "A".to_string(),
            row: Some(row("A", 1.0, CrossSignal::None)),
            data_date: Some(date(2025, 3, 6)),
            degraded: false,
        },
        SymbolResult {
            code: "B".to_string(),
            row: None,
            data_date: Some(date(2025, 3, 7)),
            degraded: false,
        },
        SymbolResult {
            code: "C".to_string(),
            row: Some(ScreenerRow::insufficient("C")),
            data_date: None,
            degraded: true,
        },
    ];

    let response = merge_results(results, &ScreenerParams::default());
    assert_eq!(response.data_date, Some(date(2025, 3, 7)));
    assert_eq!(response.timeframe, Timeframe::Daily);
    assert_eq!(codes(&response.rows), vec!["A", "C"]);
}

#[tokio::test]
async fn test_run_ranks_all_symbols() {
    let screener = ScreenerOrchestrator::new(
        Arc::new(mixed_source()),
        pool(&["D", "S", "L", "F", "G"]),
    );

    let response = screener.run(&ScreenerParams::default()).await.unwrap();
    assert_eq!(response.rows.len(), 5);
    assert_eq!(response.rows[0].code, "G");
    assert_eq!(response.rows[0].signal, CrossSignal::Golden);
    assert_eq!(response.rows[1].code, "L");
    assert_eq!(response.rows[4].code, "D");
    assert_eq!(response.rows[4].signal, CrossSignal::Dead);

    let placeholders: Vec<&str> = codes(&response.rows[2..4]);
    assert!(placeholders.contains(&"S"));
    assert!(placeholders.contains(&"F"));
    for placeholder in &response.rows[2..4] {
        assert_eq!(placeholder, &ScreenerRow::insufficient(placeholder.code.clone()));
    }

    assert_eq!(response.data_date, Some(date(2024, 4, 19)));
}

#[tokio::test]
async fn test_placeholders_survive_any_filter() {
    let screener = ScreenerOrchestrator::new(
        Arc::new(mixed_source()),
        pool(&["G", "D", "L", "S", "F"]),
    );
    let params = ScreenerParams {
        filter: Filter::HistCrossUp,
        ..ScreenerParams::default()
    };

    let response = screener.run(&params).await.unwrap();
    assert_eq!(response.rows[0].code, "G");
    let mut rest: Vec<&str> = codes(&response.rows[1..]);
    rest.sort();
    assert_eq!(rest, vec!["F", "S"]);
    // filtered symbols still count toward the data date
    assert_eq!(response.data_date, Some(date(2024, 4, 19)));
}

#[tokio::test]
async fn test_empty_pool() {
    let screener = ScreenerOrchestrator::new(Arc::new(StaticMarketDataSource::new()), Vec::new());
    let response = screener.run(&ScreenerParams::default()).await.unwrap();
    assert!(response.rows.is_empty());
    assert_eq!(response.data_date, None);
}

#[tokio::test]
async fn test_all_degraded_has_no_data_date() {
    let source = StaticMarketDataSource::new().with_failure("F");
    let screener = ScreenerOrchestrator::new(Arc::new(source), pool(&["F", "U"]));
    let response = screener.run(&ScreenerParams::default()).await.unwrap();
    assert_eq!(response.rows.len(), 2);
    assert_eq!(response.data_date, None);
}

#[tokio::test]
async fn test_weekly_timeframe_response() {
    let source = StaticMarketDataSource::new().with_series("E", daily_bars(&exponential_closes(120)));
    let screener = ScreenerOrchestrator::new(Arc::new(source), pool(&["E"]));
    let params = ScreenerParams {
        timeframe: Timeframe::Weekly,
        ..ScreenerParams::default()
    };

    let response = screener.run(&params).await.unwrap();
    assert_eq!(response.timeframe, Timeframe::Weekly);
    assert_eq!(response.data_date, Some(date(2024, 6, 14)));
    assert_eq!(response.rows[0].osc, 10.9814);
}

#[tokio::test]
async fn test_requested_months_are_clamped() {
    let source = Arc::new(StaticMarketDataSource::new());
    let screener = ScreenerOrchestrator::new(source.clone(), pool(&["2330"]));

    let low = ScreenerRequest {
        months_back: Some(1.0),
        ..ScreenerRequest::default()
    };
    screener.screen(low).await.unwrap();

    let high = ScreenerRequest {
        months_back: Some(36.0),
        ..ScreenerRequest::default()
    };
    screener.screen(high).await.unwrap();

    assert_eq!(
        source.requests().await,
        vec![("2330".to_string(), 3), ("2330".to_string(), 12)]
    );
}

#[tokio::test]
async fn test_invalid_params_fail_the_run() {
    let source = Arc::new(StaticMarketDataSource::new());
    let screener = ScreenerOrchestrator::new(source.clone(), pool(&["2330"]));
    let params = ScreenerParams {
        slow: 0,
        ..ScreenerParams::default()
    };

    let result = screener.run(&params).await;
    assert!(matches!(result, Err(ScreenerError::InvalidRequest(_))));
    assert!(source.requests().await.is_empty());
}

#[tokio::test]
async fn test_oversized_streak_length_is_rejected() {
    let source = Arc::new(
        StaticMarketDataSource::new().with_series("A", daily_bars(&linear_closes(80))),
    );
    let screener = ScreenerOrchestrator::new(source.clone(), pool(&["A"]));
    let request = ScreenerRequest {
        filter: Some(Filter::HistStreakUp),
        streak_len: Some(usize::MAX),
        ..ScreenerRequest::default()
    };

    let result = screener.screen(request).await;
    assert!(matches!(result, Err(ScreenerError::InvalidRequest(_))));
    assert!(source.requests().await.is_empty());
}

#[tokio::test]
async fn test_run_updates_metrics() {
    let metrics = Arc::new(Metrics::new().unwrap());
    let screener = ScreenerOrchestrator::new(Arc::new(mixed_source()), pool(&["G", "S", "F"]))
        .with_metrics(metrics.clone());

    screener.run(&ScreenerParams::default()).await.unwrap();

    assert_eq!(metrics.screener_runs_total.get(), 1);
    assert_eq!(metrics.screener_symbols_degraded_total.get(), 2);
    assert_eq!(metrics.screener_rows_emitted_total.get(), 3);
}
