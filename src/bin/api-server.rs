//! MACD Screener API Server
//!
//! Stateless HTTP service: each POST /api/screener runs one screening pass
//! over the configured symbol pool.

use dotenvy::dotenv;
use macd_screener::config::{get_environment, ServerConfig};
use macd_screener::core::http::start_server;
use macd_screener::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ServerConfig::from_env();
    let env = get_environment();
    info!("Starting MACD Screener API Server");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(base_url = %config.twse_base_url, pool = config.pool.len(), "Market data source");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
