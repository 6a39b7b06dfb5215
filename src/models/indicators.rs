use serde::{Deserialize, Serialize};

/// MACD output aligned index-for-index with the source series.
///
/// `dif`, `dea` and `osc` always have the same length as the closes they were
/// computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub dif: Vec<f64>,
    pub dea: Vec<f64>,
    pub osc: Vec<f64>,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.osc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.osc.is_empty()
    }

    /// Last `(dif, dea, osc)` triple, if any.
    pub fn last(&self) -> Option<(f64, f64, f64)> {
        Some((*self.dif.last()?, *self.dea.last()?, *self.osc.last()?))
    }
}
