//! Screening run configuration and result models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScreenerError;
use crate::models::bar::Timeframe;
use crate::signals::filters::Filter;

pub const DEFAULT_FAST: u32 = 12;
pub const DEFAULT_SLOW: u32 = 26;
pub const DEFAULT_SIGNAL: u32 = 9;
pub const DEFAULT_MONTHS_BACK: u32 = 4;
pub const MIN_MONTHS_BACK: u32 = 3;
pub const MAX_MONTHS_BACK: u32 = 12;
pub const DEFAULT_VOLUME_MULTIPLIER: f64 = 1.2;
pub const DEFAULT_STREAK_LEN: usize = 3;
/// Upper bound for `streakLen` and `dualStreakLen`; a year of daily bars.
pub const MAX_STREAK_LEN: usize = 250;
pub const DEFAULT_WEEKLY_OSC_THRESHOLD: f64 = 0.0;

/// Extra daily bars required on top of `slow + signal` before indicators are trusted.
pub const WARMUP_MARGIN: usize = 5;

/// Crossover of DIF over DEA on the last two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CrossSignal {
    Golden,
    Dead,
    None,
}

impl CrossSignal {
    /// Ranking priority: golden crosses first, dead crosses last.
    pub fn priority(&self) -> u8 {
        match self {
            CrossSignal::Golden => 0,
            CrossSignal::None => 1,
            CrossSignal::Dead => 2,
        }
    }
}

/// Outcome of the trailing volume check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeCheck {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "NA")]
    Na,
}

/// Raw screening request as received from a client. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerRequest {
    pub fast: Option<u32>,
    pub slow: Option<u32>,
    pub signal: Option<u32>,
    /// Any JSON number; truncated then clamped into the allowed window.
    #[serde(alias = "months")]
    pub months_back: Option<f64>,
    #[serde(alias = "tf")]
    pub timeframe: Option<Timeframe>,
    pub volume_multiplier: Option<f64>,
    pub filter: Option<Filter>,
    pub streak_len: Option<usize>,
    pub dual_streak_len: Option<usize>,
    pub weekly_osc_threshold: Option<f64>,
}

/// Immutable configuration of one screening run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerParams {
    pub fast: u32,
    pub slow: u32,
    pub signal: u32,
    pub months_back: u32,
    pub timeframe: Timeframe,
    pub volume_multiplier: f64,
    pub filter: Filter,
    pub streak_len: usize,
    /// Streak length both timeframes must show for the dual-timeframe filter.
    pub dual_streak_len: usize,
    /// Last weekly histogram value must be strictly above this.
    pub weekly_osc_threshold: f64,
}

impl Default for ScreenerParams {
    fn default() -> Self {
        Self {
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
            months_back: DEFAULT_MONTHS_BACK,
            timeframe: Timeframe::Daily,
            volume_multiplier: DEFAULT_VOLUME_MULTIPLIER,
            filter: Filter::All,
            streak_len: DEFAULT_STREAK_LEN,
            dual_streak_len: DEFAULT_STREAK_LEN,
            weekly_osc_threshold: DEFAULT_WEEKLY_OSC_THRESHOLD,
        }
    }
}

impl ScreenerParams {
    /// Apply defaults, clamp the lookback window and validate the request.
    pub fn from_request(request: ScreenerRequest) -> Result<Self, ScreenerError> {
        let defaults = Self::default();

        let months_back =
            clamp_months(request.months_back.unwrap_or(DEFAULT_MONTHS_BACK as f64))?;

        let params = Self {
            fast: request.fast.unwrap_or(defaults.fast),
            slow: request.slow.unwrap_or(defaults.slow),
            signal: request.signal.unwrap_or(defaults.signal),
            months_back,
            timeframe: request.timeframe.unwrap_or(defaults.timeframe),
            volume_multiplier: request
                .volume_multiplier
                .unwrap_or(defaults.volume_multiplier),
            filter: request.filter.unwrap_or(defaults.filter),
            streak_len: request.streak_len.unwrap_or(defaults.streak_len),
            dual_streak_len: request.dual_streak_len.unwrap_or(defaults.dual_streak_len),
            weekly_osc_threshold: request
                .weekly_osc_threshold
                .unwrap_or(defaults.weekly_osc_threshold),
        };

        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ScreenerError> {
        for (name, value) in [("fast", self.fast), ("slow", self.slow), ("signal", self.signal)] {
            if value == 0 {
                return Err(ScreenerError::InvalidRequest(format!(
                    "{} period must be at least 1",
                    name
                )));
            }
        }
        for (name, value) in [
            ("streakLen", self.streak_len),
            ("dualStreakLen", self.dual_streak_len),
        ] {
            if !(1..=MAX_STREAK_LEN).contains(&value) {
                return Err(ScreenerError::InvalidRequest(format!(
                    "{} must be between 1 and {}, got {}",
                    name, MAX_STREAK_LEN, value
                )));
            }
        }
        if !self.volume_multiplier.is_finite() || self.volume_multiplier < 0.0 {
            return Err(ScreenerError::InvalidRequest(format!(
                "volumeMultiplier must be a non-negative number, got {}",
                self.volume_multiplier
            )));
        }
        if !self.weekly_osc_threshold.is_finite() {
            return Err(ScreenerError::InvalidRequest(
                "weeklyOscThreshold must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Daily bars needed before a symbol is evaluated at all.
    pub fn min_history(&self) -> usize {
        self.slow as usize + self.signal as usize + WARMUP_MARGIN
    }

    /// Whether weekly bars must be derived for this run.
    pub fn needs_weekly(&self) -> bool {
        self.timeframe == Timeframe::Weekly || self.filter.requires_dual_timeframe()
    }
}

/// One symbol's screening result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerRow {
    pub code: String,
    pub dif: f64,
    pub dea: f64,
    pub osc: f64,
    pub signal: CrossSignal,
    pub vol_check: VolumeCheck,
}

impl ScreenerRow {
    pub fn new(
        code: impl Into<String>,
        dif: f64,
        dea: f64,
        osc: f64,
        signal: CrossSignal,
        vol_check: VolumeCheck,
    ) -> Self {
        Self {
            code: code.into(),
            dif: round4(dif),
            dea: round4(dea),
            osc: round4(osc),
            signal,
            vol_check,
        }
    }

    /// Row reported for a symbol whose history is too short or unavailable.
    pub fn insufficient(code: impl Into<String>) -> Self {
        Self::new(code, 0.0, 0.0, 0.0, CrossSignal::None, VolumeCheck::Na)
    }
}

/// Result of one screening run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerResponse {
    /// Latest bar date seen across the pool for the display timeframe.
    pub data_date: Option<NaiveDate>,
    pub timeframe: Timeframe,
    pub rows: Vec<ScreenerRow>,
}

fn clamp_months(months: f64) -> Result<u32, ScreenerError> {
    if !months.is_finite() {
        return Err(ScreenerError::InvalidRequest(format!(
            "monthsBack must be a finite number, got {}",
            months
        )));
    }
    Ok(months
        .trunc()
        .clamp(MIN_MONTHS_BACK as f64, MAX_MONTHS_BACK as f64) as u32)
}

/// Four decimals; `-0.0` is normalised to `0.0`.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0 + 0.0
}
