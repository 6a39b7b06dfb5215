//! Core application primitives (orchestrator, HTTP surface)

pub mod http;
pub mod screener;

pub use http::*;
pub use screener::*;
