//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::error::IndicatorError;
use crate::indicators::trend::ema;
use crate::models::indicators::IndicatorSet;

pub const DEFAULT_FAST_PERIOD: usize = 12;
pub const DEFAULT_SLOW_PERIOD: usize = 26;
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;

/// Calculate the MACD series over closing prices
///
/// DIF = EMA(fast) - EMA(slow)
/// DEA = EMA(signal) of DIF
/// OSC = DIF - DEA
pub fn macd(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<IndicatorSet, IndicatorError> {
    if closes.is_empty() {
        return Ok(IndicatorSet::default());
    }

    let ema_fast = ema(closes, fast_period)?;
    let ema_slow = ema(closes, slow_period)?;

    let dif: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let dea = ema(&dif, signal_period)?;
    let osc = dif.iter().zip(&dea).map(|(d, s)| d - s).collect();

    Ok(IndicatorSet { dif, dea, osc })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn macd_default(closes: &[f64]) -> Result<IndicatorSet, IndicatorError> {
    macd(
        closes,
        DEFAULT_FAST_PERIOD,
        DEFAULT_SLOW_PERIOD,
        DEFAULT_SIGNAL_PERIOD,
    )
}
