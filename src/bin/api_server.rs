//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Entry point for the HTTP server: parses configuration, builds an Exchange with one engine per
// configured market, and serves the Request Surface binding until the process is killed.
//--------------------------------------------------------------------------------------------------

use std::net::SocketAddr;

use tracing::info;

use spot_matching_core::api::Api;
use spot_matching_core::config::Config;
use spot_matching_core::exchange::Exchange;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load();
    info!(markets = ?config.markets, "starting exchange server");

    let addr: SocketAddr = config.listen.parse()?;
    let exchange = Exchange::new(config.markets.clone());

    Api::new(addr, exchange).serve().await
}
