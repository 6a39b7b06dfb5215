//! Environment-driven configuration

use std::env;
use std::time::Duration;

use crate::services::twse::DEFAULT_BASE_URL;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Large-cap TWSE symbols screened when no pool is configured.
pub const DEFAULT_TWSE_POOL: &[&str] = &[
    "1101", "1216", "1301", "1303", "1402", "2002", "2105", "2207", "2301", "2303", "2308",
    "2317", "2327", "2330", "2356", "2357", "2379", "2382", "2408", "2412", "2454", "2474",
    "2603", "2609", "2615", "2618", "2610", "2801", "2880", "2881", "2882", "2883", "2884",
    "2885", "2886", "2891", "2892", "3008", "3034", "3037", "3045", "3231", "3481", "3711",
    "4904", "4938", "6505", "6669", "8046", "8069",
];

/// Deployment environment name (`ENVIRONMENT`, default `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn default_pool() -> Vec<String> {
    DEFAULT_TWSE_POOL.iter().map(|s| s.to_string()).collect()
}

/// Split a comma-separated symbol list, dropping blanks.
pub fn parse_pool(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub twse_base_url: String,
    pub request_timeout: Duration,
    pub pool: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            twse_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            pool: default_pool(),
        }
    }
}

impl ServerConfig {
    /// Read `PORT`, `TWSE_BASE_URL`, `TWSE_TIMEOUT_SECONDS` and `SCREENER_POOL`.
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let twse_base_url = env::var("TWSE_BASE_URL").unwrap_or(defaults.twse_base_url);

        let request_timeout = env::var("TWSE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let pool = env::var("SCREENER_POOL")
            .ok()
            .map(|raw| parse_pool(&raw))
            .filter(|pool| !pool.is_empty())
            .unwrap_or(defaults.pool);

        Self {
            port,
            twse_base_url,
            request_timeout,
            pool,
        }
    }
}
