//! Unit tests for per-symbol evaluation

use crate::fixtures::*;
use macd_screener::models::{CrossSignal, ScreenerParams, ScreenerRow, Timeframe, VolumeCheck};
use macd_screener::signals::engine::{SignalEngine, SymbolOutcome};
use macd_screener::signals::filters::Filter;

fn params(filter: Filter) -> ScreenerParams {
    ScreenerParams {
        filter,
        ..ScreenerParams::default()
    }
}

#[test]
fn test_short_history_is_insufficient() {
    let bars = daily_bars(&linear_closes(39));
    let outcome = SignalEngine::evaluate("2330", &bars, &ScreenerParams::default()).unwrap();
    assert_eq!(outcome, SymbolOutcome::InsufficientHistory);
    assert_eq!(outcome.data_date(), None);
    assert_eq!(
        outcome.into_row("2330"),
        Some(ScreenerRow::insufficient("2330"))
    );
}

#[test]
fn test_insufficient_regardless_of_filter() {
    let bars = daily_bars(&linear_closes(10));
    for filter in Filter::VARIANTS {
        let outcome = SignalEngine::evaluate("1101", &bars, &params(filter)).unwrap();
        assert_eq!(outcome, SymbolOutcome::InsufficientHistory, "{}", filter);
    }
}

#[test]
fn test_exact_minimum_history_is_evaluated() {
    let bars = daily_bars(&linear_closes(40));
    let outcome = SignalEngine::evaluate("1101", &bars, &ScreenerParams::default()).unwrap();
    assert!(matches!(outcome, SymbolOutcome::Matched { .. }));
}

#[test]
fn test_golden_cross_row() {
    let bars = daily_bars(&golden_cross_closes());
    let outcome = SignalEngine::evaluate("2330", &bars, &ScreenerParams::default()).unwrap();

    assert_eq!(outcome.data_date(), Some(date(2024, 3, 25)));
    let row = outcome.into_row("2330").unwrap();
    assert_eq!(row.code, "2330");
    assert_eq!(row.signal, CrossSignal::Golden);
    assert_eq!(row.dif, -3.2789);
    assert_eq!(row.dea, -3.3778);
    assert_eq!(row.osc, 0.0989);
    // flat volume never beats its own mean
    assert_eq!(row.vol_check, VolumeCheck::Low);
}

#[test]
fn test_golden_cross_passes_cross_up_filters() {
    let bars = daily_bars(&golden_cross_closes());
    for filter in [Filter::HistCrossUp, Filter::DifSlopeUp] {
        let outcome = SignalEngine::evaluate("2330", &bars, &params(filter)).unwrap();
        assert!(matches!(outcome, SymbolOutcome::Matched { .. }), "{}", filter);
    }
    let outcome = SignalEngine::evaluate("2330", &bars, &params(Filter::HistCrossDown)).unwrap();
    assert_eq!(
        outcome,
        SymbolOutcome::Filtered {
            data_date: date(2024, 3, 25)
        }
    );
}

#[test]
fn test_dead_cross_row() {
    let bars = daily_bars(&dead_cross_closes());
    let outcome = SignalEngine::evaluate("2317", &bars, &params(Filter::HistCrossDown)).unwrap();
    let row = outcome.into_row("2317").unwrap();
    assert_eq!(row.signal, CrossSignal::Dead);
    assert_eq!(row.osc, -0.0989);

    let outcome = SignalEngine::evaluate("2317", &bars, &params(Filter::DifSlopeDown)).unwrap();
    assert!(matches!(outcome, SymbolOutcome::Matched { .. }));
}

#[test]
fn test_filtered_symbol_has_no_row_but_keeps_date() {
    let bars = daily_bars(&linear_closes(80));
    let outcome = SignalEngine::evaluate("2454", &bars, &params(Filter::HistCrossUp)).unwrap();
    assert_eq!(outcome.data_date(), Some(date(2024, 4, 19)));
    assert_eq!(outcome.into_row("2454"), None);
}

#[test]
fn test_histogram_streak_on_linear_trend() {
    let bars = daily_bars(&linear_closes(80));
    let down = SignalEngine::evaluate("2454", &bars, &params(Filter::HistStreakDown)).unwrap();
    assert!(matches!(down, SymbolOutcome::Matched { .. }));
    let up = SignalEngine::evaluate("2454", &bars, &params(Filter::HistStreakUp)).unwrap();
    assert!(matches!(up, SymbolOutcome::Filtered { .. }));
}

#[test]
fn test_dual_timeframe_confirm_on_daily_display() {
    let bars = daily_bars(&exponential_closes(120));
    let outcome =
        SignalEngine::evaluate("2382", &bars, &params(Filter::DualTimeframeConfirm)).unwrap();
    assert!(matches!(outcome, SymbolOutcome::Matched { .. }));
    assert_eq!(outcome.data_date(), Some(date(2024, 6, 14)));
}

#[test]
fn test_dual_timeframe_confirm_on_weekly_display() {
    let bars = daily_bars(&exponential_closes(120));
    let params = ScreenerParams {
        timeframe: Timeframe::Weekly,
        filter: Filter::DualTimeframeConfirm,
        ..ScreenerParams::default()
    };
    let outcome = SignalEngine::evaluate("2382", &bars, &params).unwrap();
    assert!(matches!(outcome, SymbolOutcome::Matched { .. }));
}

#[test]
fn test_dual_timeframe_rejects_when_daily_streak_breaks() {
    let bars = daily_bars(&exponential_closes(60));
    let outcome =
        SignalEngine::evaluate("2382", &bars, &params(Filter::DualTimeframeConfirm)).unwrap();
    assert!(matches!(outcome, SymbolOutcome::Filtered { .. }));
}

#[test]
fn test_weekly_display_reports_weekly_values() {
    let bars = daily_bars(&exponential_closes(120));
    let params = ScreenerParams {
        timeframe: Timeframe::Weekly,
        ..ScreenerParams::default()
    };
    let outcome = SignalEngine::evaluate("2382", &bars, &params).unwrap();
    assert_eq!(outcome.data_date(), Some(date(2024, 6, 14)));

    let row = outcome.into_row("2382").unwrap();
    assert_eq!(row.dif, 48.3168);
    assert_eq!(row.osc, 10.9814);
    assert_eq!(row.signal, CrossSignal::None);
}
