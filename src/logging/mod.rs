//! Logging initialization with environment-based formatters
//!
//! - Production: structured JSON logs
//! - Sandbox: human-readable ANSI logs

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn for_environment(env: &str) -> Self {
        if matches!(env, "production" | "prod") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Where log lines go. The CLI keeps stdout for its result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

/// Install the global subscriber writing to stdout.
pub fn init_logging() {
    init_logging_to(LogTarget::Stdout);
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_logging_to(target: LogTarget) {
    let format = LogFormat::for_environment(&get_environment());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match (format, target) {
        (LogFormat::Json, LogTarget::Stdout) => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json().with_writer(std::io::stdout))
            .init(),
        (LogFormat::Json, LogTarget::Stderr) => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json().with_writer(std::io::stderr))
            .init(),
        (LogFormat::Pretty, LogTarget::Stdout) => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.with_ansi(true).with_writer(std::io::stdout))
            .init(),
        (LogFormat::Pretty, LogTarget::Stderr) => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.with_ansi(true).with_writer(std::io::stderr))
            .init(),
    }
}
