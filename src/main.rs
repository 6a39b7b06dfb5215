use std::sync::Arc;

use dotenvy::dotenv;
use macd_screener::config::ServerConfig;
use macd_screener::logging::{self, LogTarget};
use macd_screener::models::{ScreenerParams, ScreenerResponse};
use macd_screener::services::{TwseClient, TwseMarketDataSource};
use macd_screener::ScreenerOrchestrator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging_to(LogTarget::Stderr);

    let config = ServerConfig::from_env();
    let client = TwseClient::new(&config.twse_base_url, config.request_timeout)?;
    let source = Arc::new(TwseMarketDataSource::new(client));
    let screener = ScreenerOrchestrator::new(source, config.pool);

    let params = ScreenerParams::default();
    let response = screener.run(&params).await?;
    print_response(&response);

    Ok(())
}

fn print_response(response: &ScreenerResponse) {
    match response.data_date {
        Some(date) => println!("Data date: {} ({})", date, response.timeframe),
        None => println!("Data date: n/a ({})", response.timeframe),
    }
    println!(
        "{:<8} {:>12} {:>12} {:>12} {:<8} {:<4}",
        "code", "dif", "dea", "osc", "signal", "vol"
    );
    for row in &response.rows {
        println!(
            "{:<8} {:>12.4} {:>12.4} {:>12.4} {:<8} {:<4}",
            row.code,
            row.dif,
            row.dea,
            row.osc,
            format!("{:?}", row.signal).to_uppercase(),
            format!("{:?}", row.vol_check).to_uppercase(),
        );
    }
}
