//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Process configuration. Per the spec, no environment variable is load-bearing for the core
// itself — what's here is purely transport-level: where to listen, and which markets to
// instantiate engines for at startup.
//
// | Name   | Description                  | Key Methods |
// |--------|-------------------------------|-------------|
// | Config | Parsed CLI configuration      | parse       |
//--------------------------------------------------------------------------------------------------

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "exchange-server", about = "Spot matching engine HTTP server")]
pub struct Config {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:3000")]
    pub listen: String,

    /// Comma-separated market names to instantiate at startup.
    #[arg(long, env = "MARKETS", default_value = "ETH", value_delimiter = ',')]
    pub markets: Vec<String>,
}

impl Config {
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Config::parse()
    }
}
