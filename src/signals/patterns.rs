//! Stateless pattern predicates over computed MACD series
//!
//! Every predicate returns `false` (or `CrossSignal::None`) when the series is
//! too short for it; none of them panic on short input.

use serde::{Deserialize, Serialize};

use crate::models::screener::CrossSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
}

/// Classify the DIF/DEA crossover on the last two points.
///
/// A spread of exactly zero on the prior point counts for both directions;
/// the sign of the latest spread decides which one fires.
pub fn last_signal(dif: &[f64], dea: &[f64]) -> CrossSignal {
    let (Some(dif_pair), Some(dea_pair)) = (last_two(dif), last_two(dea)) else {
        return CrossSignal::None;
    };

    let a = dif_pair.0 - dea_pair.0;
    let b = dif_pair.1 - dea_pair.1;

    if a <= 0.0 && b > 0.0 {
        CrossSignal::Golden
    } else if a >= 0.0 && b < 0.0 {
        CrossSignal::Dead
    } else {
        CrossSignal::None
    }
}

/// `Up`: `prev <= 0 && curr > 0`. `Down`: `prev >= 0 && curr < 0`.
pub fn crossed_zero(prev: f64, curr: f64, direction: Direction) -> bool {
    match direction {
        Direction::Up => prev <= 0.0 && curr > 0.0,
        Direction::Down => prev >= 0.0 && curr < 0.0,
    }
}

/// Zero-cross test on the last two values of a series.
pub fn crossed_zero_last(series: &[f64], direction: Direction) -> bool {
    last_two(series)
        .map(|(prev, curr)| crossed_zero(prev, curr, direction))
        .unwrap_or(false)
}

/// True when each of the last `len` steps strictly rises (`Up`) or strictly
/// falls (`Down`). Needs `len + 1` points.
pub fn is_monotonic_streak(series: &[f64], len: usize, direction: Direction) -> bool {
    if series.len() <= len {
        return false;
    }

    series[series.len() - len - 1..]
        .windows(2)
        .all(|w| match direction {
            Direction::Up => w[1] > w[0],
            Direction::Down => w[1] < w[0],
        })
}

/// DIF slope reversal over the last three points.
///
/// `Up`: slope falls then rises. `Down`: slope rises then falls.
pub fn slope_turn(dif: &[f64], direction: Direction) -> bool {
    if dif.len() < 3 {
        return false;
    }

    let n = dif.len();
    let prev_slope = dif[n - 2] - dif[n - 3];
    let curr_slope = dif[n - 1] - dif[n - 2];

    match direction {
        Direction::Up => prev_slope < 0.0 && curr_slope > 0.0,
        Direction::Down => prev_slope > 0.0 && curr_slope < 0.0,
    }
}

/// Weekly confirms, daily triggers.
///
/// Both histograms need `streak_len + 1` points, the last weekly value must be
/// strictly above `weekly_threshold` and both must be rising for `streak_len`
/// steps.
pub fn dual_timeframe_confirm(
    weekly_osc: &[f64],
    daily_osc: &[f64],
    streak_len: usize,
    weekly_threshold: f64,
) -> bool {
    if weekly_osc.len() <= streak_len || daily_osc.len() <= streak_len {
        return false;
    }

    let Some(&last_weekly) = weekly_osc.last() else {
        return false;
    };

    last_weekly > weekly_threshold
        && is_monotonic_streak(weekly_osc, streak_len, Direction::Up)
        && is_monotonic_streak(daily_osc, streak_len, Direction::Up)
}

fn last_two(series: &[f64]) -> Option<(f64, f64)> {
    match series {
        [.., prev, curr] => Some((*prev, *curr)),
        _ => None,
    }
}
