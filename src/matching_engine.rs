//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// The core of the exchange: one matching engine per market, owning both side books, the order
// index, the per-user order lists and the trade log, all behind a single reader-writer lock.
// Mutating operations (place_limit, place_market, cancel) take the write lock for their full
// duration; reads (best bid/ask, book snapshot, get_orders, get_trades) take the read lock and
// copy out scalars/snapshots before releasing it.
//
// | Name           | Description                                         | Key Methods            |
// |----------------|-------------------------------------------------------|------------------------|
// | MatchingEngine | Price-time-priority matching engine for one market    | place_limit, place_market, cancel |
// | EngineError    | Typed errors surfaced by the engine                   | —                      |
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{info, warn};

use crate::order_index::OrderIndex;
use crate::price_level::PriceLevel;
use crate::side_book::SideBook;
use crate::trade_log::TradeLog;
use crate::types::{now_nanos, Match, Order, Side, Trade};

/// Errors the matching engine can surface. Every variant leaves engine state unchanged: each is
/// checked before any mutation is applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("order {0} not found")]
    UnknownOrder(u64),
    #[error("insufficient liquidity to fill market order")]
    InsufficientLiquidity,
    #[error("bad request: {0}")]
    BadRequest(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// The best order at one side: its level price and the user id of the first resting order at
/// that level — preserved exactly as the original source returns it, first-order-user-id and
/// all (see spec's open design note on best-price queries).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestQuote {
    pub price: f64,
    pub user_id: u64,
}

/// A resting order as exposed to queries: its price (read from the level that holds it, not
/// stored on the order itself) alongside the fields callers need to render a book or order list.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub user_id: u64,
    pub id: u64,
    pub price: f64,
    pub size: f64,
    pub side: Side,
    pub timestamp: i64,
}

/// Every resting order on both sides, plus aggregate volume.
#[derive(Debug, Clone, Default)]
pub struct BookSnapshot {
    pub total_bid_volume: f64,
    pub total_ask_volume: f64,
    pub bids: Vec<OrderView>,
    pub asks: Vec<OrderView>,
}

/// A user's live resting orders, partitioned by side.
#[derive(Debug, Clone, Default)]
pub struct UserOrders {
    pub bids: Vec<OrderView>,
    pub asks: Vec<OrderView>,
}

struct EngineState {
    bids: SideBook,
    asks: SideBook,
    order_index: OrderIndex,
    /// Ids only, per user; resolved against `order_index` at read time rather than rebuilt on
    /// every fill — a cancelled or fully-filled id simply stops resolving (see spec's design
    /// note on per-user order lists).
    user_orders: HashMap<u64, Vec<u64>>,
    trades: TradeLog,
}

impl EngineState {
    fn side_book(&self, side: Side) -> &SideBook {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn side_book_mut(&mut self, side: Side) -> &mut SideBook {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }
}

/// One matching engine per market.
pub struct MatchingEngine {
    state: RwLock<EngineState>,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(EngineState {
                bids: SideBook::new(Side::Bid),
                asks: SideBook::new(Side::Ask),
                order_index: OrderIndex::new(),
                user_orders: HashMap::new(),
                trades: TradeLog::new(),
            }),
        }
    }

    /// Rests `order` on the book at `price`. Limit orders never attempt to cross the opposite
    /// side in this design, even when the price would match — preserved deliberately, see
    /// spec.md section 9.
    pub fn place_limit(&self, price: f64, order: Order) -> EngineResult<()> {
        if order.size <= 0.0 {
            return Err(EngineError::BadRequest("order size must be positive".into()));
        }

        let mut state = self.state.write();
        state
            .user_orders
            .entry(order.user_id)
            .or_default()
            .push(order.id);

        state.order_index.insert(order.id, (order.side, price));
        state.side_book_mut(order.side).insert(price, order);

        info!(price, "limit order rested");
        Ok(())
    }

    /// Consumes the opposite side against `order` until it is fully filled. Partial market
    /// fills are not permitted: if the opposite side's total volume cannot cover the full
    /// requested size, the order is refused and no state changes.
    pub fn place_market(&self, mut order: Order) -> EngineResult<Vec<Match>> {
        if order.size <= 0.0 {
            return Err(EngineError::BadRequest("order size must be positive".into()));
        }

        let mut state = self.state.write();
        let opposite = order.side.opposite();

        if state.side_book(opposite).total_volume() < order.size {
            return Err(EngineError::InsufficientLiquidity);
        }

        let mut matches = Vec::new();
        let mut drained = Vec::new();
        {
            let book = state.side_book_mut(opposite);
            for level in book.levels_best_first() {
                if order.size == 0.0 {
                    break;
                }
                let outcome = level.fill(&mut order);
                matches.extend(outcome.matches);
                drained.extend(outcome.drained_order_ids);
            }
            book.prune_empty();
        }

        for id in &drained {
            state.order_index.remove(*id);
        }

        let timestamp = now_nanos();
        for m in &matches {
            state.trades.push(Trade::from_match(m, timestamp));
        }

        info!(
            matches = matches.len(),
            size = order.size,
            "market order processed"
        );
        Ok(matches)
    }

    /// Removes a resting order from the book entirely. The order stays in its owner's per-user
    /// list (id-only), but `get_orders` will no longer surface it once it is gone from the
    /// order index.
    pub fn cancel(&self, order_id: u64) -> EngineResult<()> {
        let mut state = self.state.write();
        let Some((side, price)) = state.order_index.remove(order_id) else {
            return Err(EngineError::UnknownOrder(order_id));
        };

        if state.side_book_mut(side).remove(price, order_id).is_err() {
            warn!(order_id, "order index pointed at a stale location");
            return Err(EngineError::UnknownOrder(order_id));
        }

        info!(order_id, "order cancelled");
        Ok(())
    }

    pub fn best_bid(&self) -> Option<BestQuote> {
        let state = self.state.read();
        best_quote(state.bids.best_level())
    }

    pub fn best_ask(&self) -> Option<BestQuote> {
        let state = self.state.read();
        best_quote(state.asks.best_level())
    }

    pub fn book_snapshot(&self) -> BookSnapshot {
        let state = self.state.read();
        BookSnapshot {
            total_bid_volume: state.bids.total_volume(),
            total_ask_volume: state.asks.total_volume(),
            bids: collect_views(&state, Side::Bid),
            asks: collect_views(&state, Side::Ask),
        }
    }

    /// Live resting orders for one user, partitioned by side. An id from the per-user list that
    /// no longer resolves in the order index (cancelled, or fully filled) is silently skipped.
    pub fn get_orders(&self, user_id: u64) -> UserOrders {
        let state = self.state.read();
        let mut result = UserOrders::default();

        let Some(ids) = state.user_orders.get(&user_id) else {
            return result;
        };

        for &id in ids {
            let Some((side, price)) = state.order_index.get(id) else {
                continue;
            };
            let Some(order) = state.side_book(side).find(price, id) else {
                continue;
            };
            let view = OrderView {
                user_id: order.user_id,
                id: order.id,
                price,
                size: order.size,
                side,
                timestamp: order.timestamp,
            };
            match side {
                Side::Bid => result.bids.push(view),
                Side::Ask => result.asks.push(view),
            }
        }

        result
    }

    pub fn get_trades(&self) -> Vec<Trade> {
        self.state.read().trades.snapshot()
    }

    #[cfg(test)]
    fn order_index_contains(&self, order_id: u64) -> bool {
        self.state.read().order_index.contains(order_id)
    }
}

fn best_quote(level: Option<&PriceLevel>) -> Option<BestQuote> {
    let level = level?;
    let first = level.peek_front()?;
    Some(BestQuote {
        price: level.price,
        user_id: first.user_id,
    })
}

fn collect_views(state: &EngineState, side: Side) -> Vec<OrderView> {
    state
        .side_book(side)
        .all_levels()
        .flat_map(|level| {
            level.iter().map(move |order| OrderView {
                user_id: order.user_id,
                id: order.id,
                price: level.price,
                size: order.size,
                side,
                timestamp: order.timestamp,
            })
        })
        .collect()
}
