//! Screening filter selector and per-variant evaluation

use serde::{Deserialize, Serialize};

use crate::models::indicators::IndicatorSet;
use crate::signals::patterns::{
    crossed_zero_last, dual_timeframe_confirm, is_monotonic_streak, slope_turn, Direction,
};

/// Exactly one filter is active per screening run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Filter {
    #[default]
    All,
    #[serde(alias = "MACD_NEG_TO_POS")]
    HistCrossUp,
    #[serde(alias = "MACD_POS_TO_NEG")]
    HistCrossDown,
    #[serde(alias = "MACD_UP_STREAK")]
    HistStreakUp,
    #[serde(alias = "MACD_DOWN_STREAK")]
    HistStreakDown,
    #[serde(alias = "DIF_TURN_UP")]
    DifSlopeUp,
    #[serde(alias = "DIF_TURN_DOWN")]
    DifSlopeDown,
    DualTimeframeConfirm,
}

/// Which indicator sets a filter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRequirement {
    /// Only the display timeframe's series.
    DisplayOnly,
    /// Independent daily and weekly series, whatever the display timeframe.
    DailyAndWeekly,
}

/// Thresholds a filter may need beyond the series themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterThresholds {
    pub streak_len: usize,
    pub dual_streak_len: usize,
    pub weekly_osc_threshold: f64,
}

/// Series handed to [`Filter::evaluate`].
#[derive(Debug, Clone, Copy)]
pub struct FilterInput<'a> {
    pub display: &'a IndicatorSet,
    pub daily: Option<&'a IndicatorSet>,
    pub weekly: Option<&'a IndicatorSet>,
}

impl Filter {
    pub const VARIANTS: [Filter; 8] = [
        Filter::All,
        Filter::HistCrossUp,
        Filter::HistCrossDown,
        Filter::HistStreakUp,
        Filter::HistStreakDown,
        Filter::DifSlopeUp,
        Filter::DifSlopeDown,
        Filter::DualTimeframeConfirm,
    ];

    pub fn requirement(&self) -> DataRequirement {
        match self {
            Filter::DualTimeframeConfirm => DataRequirement::DailyAndWeekly,
            _ => DataRequirement::DisplayOnly,
        }
    }

    pub fn requires_dual_timeframe(&self) -> bool {
        self.requirement() == DataRequirement::DailyAndWeekly
    }

    /// Pass/fail for one symbol. Short series fail rather than error.
    pub fn evaluate(&self, input: &FilterInput<'_>, thresholds: &FilterThresholds) -> bool {
        let osc = &input.display.osc;
        let dif = &input.display.dif;

        match self {
            Filter::All => true,
            Filter::HistCrossUp => crossed_zero_last(osc, Direction::Up),
            Filter::HistCrossDown => crossed_zero_last(osc, Direction::Down),
            Filter::HistStreakUp => is_monotonic_streak(osc, thresholds.streak_len, Direction::Up),
            Filter::HistStreakDown => {
                is_monotonic_streak(osc, thresholds.streak_len, Direction::Down)
            }
            Filter::DifSlopeUp => slope_turn(dif, Direction::Up),
            Filter::DifSlopeDown => slope_turn(dif, Direction::Down),
            Filter::DualTimeframeConfirm => match (input.weekly, input.daily) {
                (Some(weekly), Some(daily)) => dual_timeframe_confirm(
                    &weekly.osc,
                    &daily.osc,
                    thresholds.dual_streak_len,
                    thresholds.weekly_osc_threshold,
                ),
                _ => false,
            },
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Filter::All => "ALL",
            Filter::HistCrossUp => "HIST_CROSS_UP",
            Filter::HistCrossDown => "HIST_CROSS_DOWN",
            Filter::HistStreakUp => "HIST_STREAK_UP",
            Filter::HistStreakDown => "HIST_STREAK_DOWN",
            Filter::DifSlopeUp => "DIF_SLOPE_UP",
            Filter::DifSlopeDown => "DIF_SLOPE_DOWN",
            Filter::DualTimeframeConfirm => "DUAL_TIMEFRAME_CONFIRM",
        };
        f.write_str(name)
    }
}
