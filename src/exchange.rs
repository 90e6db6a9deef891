//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// The request-placement surface (C6): a registry of matching engines, one per market, behind a
// single global order id generator. This is the boundary the HTTP layer calls into; it knows
// nothing about wire formats, only about markets and requests.
//
// | Name           | Description                                         | Key Methods          |
// |----------------|-------------------------------------------------------|----------------------|
// | Exchange       | Market registry plus the shared order id generator    | place_limit, place_market, cancel |
// | ExchangeError  | UnknownMarket, or a wrapped EngineError                | —                    |
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;

use thiserror::Error;

use crate::matching_engine::{BestQuote, BookSnapshot, EngineError, MatchingEngine, UserOrders};
use crate::types::{Match, Order, OrderIdGenerator, Side, Trade};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExchangeError {
    #[error("unknown market {0}")]
    UnknownMarket(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Holds one `MatchingEngine` per market. Order ids are assigned here rather than per-engine so
/// that an order id is unambiguous across the whole exchange, not just within one market.
pub struct Exchange {
    markets: HashMap<String, MatchingEngine>,
    order_ids: OrderIdGenerator,
}

impl Exchange {
    /// Builds an exchange with one fresh matching engine per name in `markets`.
    pub fn new(markets: impl IntoIterator<Item = String>) -> Self {
        Self {
            markets: markets
                .into_iter()
                .map(|name| (name, MatchingEngine::new()))
                .collect(),
            order_ids: OrderIdGenerator::new(),
        }
    }

    pub fn markets(&self) -> impl Iterator<Item = &str> {
        self.markets.keys().map(String::as_str)
    }

    fn engine(&self, market: &str) -> ExchangeResult<&MatchingEngine> {
        self.markets
            .get(market)
            .ok_or_else(|| ExchangeError::UnknownMarket(market.to_string()))
    }

    /// Assigns a fresh id and rests a limit order on `market`. Returns the assigned id.
    pub fn place_limit(
        &self,
        market: &str,
        user_id: u64,
        side: Side,
        size: f64,
        price: f64,
    ) -> ExchangeResult<u64> {
        let engine = self.engine(market)?;
        let id = self.order_ids.next_id();
        let order = Order {
            id,
            user_id,
            side,
            size,
            timestamp: crate::types::now_nanos(),
        };
        engine.place_limit(price, order)?;
        Ok(id)
    }

    /// Assigns a fresh id and attempts to immediately fill a market order on `market`.
    pub fn place_market(
        &self,
        market: &str,
        user_id: u64,
        side: Side,
        size: f64,
    ) -> ExchangeResult<(u64, Vec<Match>)> {
        let engine = self.engine(market)?;
        let id = self.order_ids.next_id();
        let order = Order {
            id,
            user_id,
            side,
            size,
            timestamp: crate::types::now_nanos(),
        };
        let matches = engine.place_market(order)?;
        Ok((id, matches))
    }

    /// Cancels an order by id alone, matching the Request Surface's `CancelOrder(order_id)`
    /// contract, which carries no market. Order ids are unique exchange-wide (see
    /// `OrderIdGenerator`), so every registered market is tried until one recognizes the id.
    pub fn cancel(&self, order_id: u64) -> ExchangeResult<()> {
        for engine in self.markets.values() {
            match engine.cancel(order_id) {
                Ok(()) => return Ok(()),
                Err(EngineError::UnknownOrder(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        }
        Err(EngineError::UnknownOrder(order_id).into())
    }

    pub fn best_bid(&self, market: &str) -> ExchangeResult<Option<BestQuote>> {
        Ok(self.engine(market)?.best_bid())
    }

    pub fn best_ask(&self, market: &str) -> ExchangeResult<Option<BestQuote>> {
        Ok(self.engine(market)?.best_ask())
    }

    pub fn book_snapshot(&self, market: &str) -> ExchangeResult<BookSnapshot> {
        Ok(self.engine(market)?.book_snapshot())
    }

    pub fn get_trades(&self, market: &str) -> ExchangeResult<Vec<Trade>> {
        Ok(self.engine(market)?.get_trades())
    }

    /// A user's live orders across every market the exchange hosts.
    pub fn get_orders(&self, user_id: u64) -> HashMap<String, UserOrders> {
        self.markets
            .iter()
            .map(|(name, engine)| (name.clone(), engine.get_orders(user_id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_market_is_an_error() {
        let exchange = Exchange::new(["BTC-USD".to_string()]);
        assert_eq!(
            exchange.place_limit("ETH-USD", 1, Side::Bid, 1.0, 100.0),
            Err(ExchangeError::UnknownMarket("ETH-USD".to_string()))
        );
    }

    #[test]
    fn order_ids_are_unique_across_markets() {
        let exchange = Exchange::new(["BTC-USD".to_string(), "ETH-USD".to_string()]);
        let a = exchange
            .place_limit("BTC-USD", 1, Side::Bid, 1.0, 100.0)
            .unwrap();
        let b = exchange
            .place_limit("ETH-USD", 2, Side::Bid, 1.0, 100.0)
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn place_and_fill_round_trip() {
        let exchange = Exchange::new(["BTC-USD".to_string()]);
        exchange
            .place_limit("BTC-USD", 1, Side::Ask, 5.0, 10_000.0)
            .unwrap();

        let (_, matches) = exchange
            .place_market("BTC-USD", 2, Side::Bid, 5.0)
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(exchange.get_trades("BTC-USD").unwrap().len(), 1);
    }

    #[test]
    fn cancel_finds_the_right_market_without_being_told() {
        let exchange = Exchange::new(["BTC-USD".to_string(), "ETH-USD".to_string()]);
        let id = exchange
            .place_limit("ETH-USD", 1, Side::Bid, 1.0, 100.0)
            .unwrap();

        exchange.cancel(id).unwrap();
        assert!(exchange
            .get_orders(1)
            .get("ETH-USD")
            .unwrap()
            .bids
            .is_empty());
    }

    #[test]
    fn cancel_unknown_id_across_all_markets_errors() {
        let exchange = Exchange::new(["BTC-USD".to_string()]);
        assert_eq!(
            exchange.cancel(999),
            Err(ExchangeError::Engine(EngineError::UnknownOrder(999)))
        );
    }

    #[test]
    fn get_orders_spans_every_market() {
        let exchange = Exchange::new(["BTC-USD".to_string(), "ETH-USD".to_string()]);
        exchange
            .place_limit("BTC-USD", 9, Side::Bid, 1.0, 100.0)
            .unwrap();
        exchange
            .place_limit("ETH-USD", 9, Side::Ask, 2.0, 50.0)
            .unwrap();

        let orders = exchange.get_orders(9);
        assert_eq!(orders.get("BTC-USD").unwrap().bids.len(), 1);
        assert_eq!(orders.get("ETH-USD").unwrap().asks.len(), 1);
    }
}
