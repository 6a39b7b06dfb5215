//! Trailing volume confirmation

use crate::models::screener::VolumeCheck;

/// Bars averaged for the volume baseline.
pub const VOLUME_MA_PERIOD: usize = 5;

/// Compare the latest volume against the trailing 5-bar mean.
///
/// The mean includes the latest bar. `Ok` only when the latest volume is
/// strictly above `ma5 * multiplier`.
pub fn check_volume(volumes: &[f64], multiplier: f64) -> VolumeCheck {
    let Some(ma5) = trailing_mean(volumes, VOLUME_MA_PERIOD) else {
        return VolumeCheck::Na;
    };
    let Some(&last) = volumes.last() else {
        return VolumeCheck::Na;
    };

    if last > ma5 * multiplier {
        VolumeCheck::Ok
    } else {
        VolumeCheck::Low
    }
}

/// Mean of the last `period` values, `None` when fewer are available.
pub fn trailing_mean(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}
