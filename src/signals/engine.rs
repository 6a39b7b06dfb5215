//! Per-symbol evaluation: bars in, row (or rejection) out.

use chrono::NaiveDate;

use crate::indicators::aggregation::aggregate_weekly;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::macd;
use crate::indicators::volume::check_volume;
use crate::models::bar::{closes, volumes, Bar, Timeframe};
use crate::models::indicators::IndicatorSet;
use crate::models::screener::{ScreenerParams, ScreenerRow};
use crate::signals::filters::{FilterInput, FilterThresholds};
use crate::signals::patterns::last_signal;

/// What happened to one symbol in a run.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolOutcome {
    /// Fewer daily bars than `slow + signal + 5`; reported as a placeholder row.
    InsufficientHistory,
    /// Evaluated but the active filter rejected it.
    Filtered { data_date: NaiveDate },
    /// Evaluated and accepted.
    Matched { row: ScreenerRow, data_date: NaiveDate },
}

impl SymbolOutcome {
    /// Row to report, if any. Short history always yields a placeholder.
    pub fn into_row(self, code: &str) -> Option<ScreenerRow> {
        match self {
            SymbolOutcome::InsufficientHistory => Some(ScreenerRow::insufficient(code)),
            SymbolOutcome::Filtered { .. } => None,
            SymbolOutcome::Matched { row, .. } => Some(row),
        }
    }

    /// Last bar date of the display series, for usable series only.
    pub fn data_date(&self) -> Option<NaiveDate> {
        match self {
            SymbolOutcome::InsufficientHistory => None,
            SymbolOutcome::Filtered { data_date } | SymbolOutcome::Matched { data_date, .. } => {
                Some(*data_date)
            }
        }
    }
}

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate one symbol's ascending daily bars under `params`.
    pub fn evaluate(
        code: &str,
        daily: &[Bar],
        params: &ScreenerParams,
    ) -> Result<SymbolOutcome, IndicatorError> {
        if daily.len() < params.min_history() {
            return Ok(SymbolOutcome::InsufficientHistory);
        }

        let weekly = if params.needs_weekly() {
            aggregate_weekly(daily)
        } else {
            Vec::new()
        };

        let display: &[Bar] = match params.timeframe {
            Timeframe::Daily => daily,
            Timeframe::Weekly => &weekly,
        };
        let Some(last_bar) = display.last() else {
            return Ok(SymbolOutcome::InsufficientHistory);
        };
        let data_date = last_bar.date;

        let display_set = Self::compute(display, params)?;

        // The composite filter needs the other timeframe computed independently.
        let (daily_set, weekly_set) = match (params.filter.requires_dual_timeframe(), params.timeframe) {
            (false, _) => (None, None),
            (true, Timeframe::Daily) => (None, Some(Self::compute(&weekly, params)?)),
            (true, Timeframe::Weekly) => (Some(Self::compute(daily, params)?), None),
        };

        let input = FilterInput {
            display: &display_set,
            daily: match params.timeframe {
                Timeframe::Daily => Some(&display_set),
                Timeframe::Weekly => daily_set.as_ref(),
            },
            weekly: match params.timeframe {
                Timeframe::Weekly => Some(&display_set),
                Timeframe::Daily => weekly_set.as_ref(),
            },
        };
        let thresholds = FilterThresholds {
            streak_len: params.streak_len,
            dual_streak_len: params.dual_streak_len,
            weekly_osc_threshold: params.weekly_osc_threshold,
        };

        if !params.filter.evaluate(&input, &thresholds) {
            return Ok(SymbolOutcome::Filtered { data_date });
        }

        let Some((dif, dea, osc)) = display_set.last() else {
            return Ok(SymbolOutcome::Filtered { data_date });
        };
        let signal = last_signal(&display_set.dif, &display_set.dea);
        let vol_check = check_volume(&volumes(display), params.volume_multiplier);

        Ok(SymbolOutcome::Matched {
            row: ScreenerRow::new(code, dif, dea, osc, signal, vol_check),
            data_date,
        })
    }

    fn compute(bars: &[Bar], params: &ScreenerParams) -> Result<IndicatorSet, IndicatorError> {
        macd(
            &closes(bars),
            params.fast as usize,
            params.slow as usize,
            params.signal as usize,
        )
    }
}
