//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod screener;

pub use bar::{Bar, Timeframe};
pub use indicators::IndicatorSet;
pub use screener::{
    CrossSignal, ScreenerParams, ScreenerRequest, ScreenerResponse, ScreenerRow, VolumeCheck,
};
