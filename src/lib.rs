pub mod api;
pub mod config;
pub mod exchange;
pub mod matching_engine;
pub mod order_index;
pub mod price_level;
pub mod side_book;
pub mod trade_log;
pub mod types;

pub use api::Api;
pub use exchange::{Exchange, ExchangeError};
pub use matching_engine::{EngineError, MatchingEngine};
pub use types::{Match, Order, Side, Trade};
