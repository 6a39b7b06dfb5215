use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("Invalid parameter {name}: {value} (must be > 0)")]
    InvalidParameter { name: &'static str, value: usize },
}
