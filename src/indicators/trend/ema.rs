//! EMA (Exponential Moving Average) indicator

use crate::indicators::error::IndicatorError;

/// Calculate the full EMA series for `values`.
///
/// The series is seeded with the first raw value rather than an SMA of the
/// first `period` values, so `ema(v, p)[0] == v[0]` for any period. Output has
/// the same length as the input.
pub fn ema(values: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameter {
            name: "period",
            value: period,
        });
    }

    let k = smoothing_factor(period);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &value in values {
        let next = match prev {
            None => value,
            Some(p) => value * k + p * (1.0 - k),
        };
        out.push(next);
        prev = Some(next);
    }

    Ok(out)
}

/// `2 / (period + 1)`
pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}
