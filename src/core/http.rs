//! HTTP endpoint server using Axum

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, warn, Level};

use crate::config::ServerConfig;
use crate::core::screener::ScreenerOrchestrator;
use crate::error::ScreenerError;
use crate::metrics::Metrics;
use crate::models::screener::{ScreenerRequest, ScreenerResponse};
use crate::services::twse::{TwseClient, TwseMarketDataSource};

pub const SERVICE_NAME: &str = "macd-screener";
/// Reported by `/health` whenever the router is serving.
pub const HEALTHY: &str = "healthy";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub screener: Arc<ScreenerOrchestrator>,
}

impl IntoResponse for ScreenerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ScreenerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": HEALTHY,
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "service": SERVICE_NAME,
        "pool_size": state.screener.pool().len()
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Run one screening pass over the configured pool.
///
/// Body parse failures (wrong types, unknown filter names) are client errors.
pub async fn run_screener(
    State(state): State<AppState>,
    payload: Result<Json<ScreenerRequest>, JsonRejection>,
) -> Result<Json<ScreenerResponse>, ScreenerError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected screener request body");
        ScreenerError::InvalidRequest(rejection.body_text())
    })?;

    let response = state.screener.screen(request).await?;
    Ok(Json(response))
}

/// Count, time and log every request passing through the router.
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let metrics = &state.metrics;
    metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    metrics.http_requests_in_flight.dec();

    let status = response.status();
    let elapsed = started.elapsed();
    metrics.http_requests_total.inc();
    metrics
        .http_request_duration_seconds
        .observe(elapsed.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(%method, %path, %status, elapsed_ms = elapsed.as_millis(), "Request failed");
    } else if status.is_client_error() {
        debug!(%method, %path, %status, elapsed_ms = elapsed.as_millis(), "Request rejected");
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/screener", post(run_screener))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new()?);

    let client = TwseClient::new(&config.twse_base_url, config.request_timeout)?;
    let source = Arc::new(TwseMarketDataSource::new(client));
    let screener = ScreenerOrchestrator::new(source, config.pool.clone())
        .with_metrics(metrics.clone());

    let state = AppState {
        metrics,
        start_time: Arc::new(Instant::now()),
        screener: Arc::new(screener),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, pool = config.pool.len(), "HTTP server listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
