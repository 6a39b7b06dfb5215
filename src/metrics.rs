//! Prometheus metrics

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub screener_runs_total: IntCounter,
    pub screener_symbols_degraded_total: IntCounter,
    pub screener_rows_emitted_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests handled")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let screener_runs_total =
            IntCounter::new("screener_runs_total", "Completed screening runs")?;
        let screener_symbols_degraded_total = IntCounter::new(
            "screener_symbols_degraded_total",
            "Symbols reported as placeholder rows (short history or fetch failure)",
        )?;
        let screener_rows_emitted_total =
            IntCounter::new("screener_rows_emitted_total", "Rows returned across all runs")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(screener_runs_total.clone()))?;
        registry.register(Box::new(screener_symbols_degraded_total.clone()))?;
        registry.register(Box::new(screener_rows_emitted_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            screener_runs_total,
            screener_symbols_degraded_total,
            screener_rows_emitted_total,
        })
    }

    /// Prometheus text exposition of every registered metric.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
