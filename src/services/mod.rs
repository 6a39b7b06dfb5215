//! External collaborators: market data retrieval.

pub mod market_data;
pub mod twse;

pub use market_data::{MarketDataSource, StaticMarketDataSource};
pub use twse::{TwseClient, TwseMarketDataSource};
