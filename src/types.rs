//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Core data types shared by every component of the matching engine: the order itself, the two
// sides of the book, a single crossing event (Match) and its externalized record (Trade).
//
// | Name   | Description                                                            |
// |--------|-------------------------------------------------------------------------|
// | Side   | Bid (buy) or Ask (sell).                                               |
// | Order  | Unit of trading intent. Mutated in place as it fills.                 |
// | Match  | One crossing event between an incoming order and a resting order.     |
// | Trade  | Persisted, externalized view of a Match.                               |
//--------------------------------------------------------------------------------------------------

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Side of an order: the buy side (Bid) or the sell side (Ask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// The side an incoming order of this side must cross against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

/// A monotonic nanosecond clock used for order timestamps.
///
/// `SystemTime::now()` alone is not guaranteed monotonic across calls on every platform; the
/// spec's time-priority tiebreak depends on timestamps being strictly increasing in practice, so
/// ties are broken by bumping a counter when wall-clock time does not advance.
static LAST_NANOS: AtomicI64 = AtomicI64::new(0);

pub fn now_nanos() -> i64 {
    let wall = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0);

    loop {
        let last = LAST_NANOS.load(Ordering::Relaxed);
        let next = if wall > last { wall } else { last + 1 };
        if LAST_NANOS
            .compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            return next;
        }
    }
}

/// A unit of trading intent.
///
/// `Order` deliberately carries no price: a resting order's price is a property of the
/// `PriceLevel` holding it, not of the order (see `OrderIndex`, which is what the spec's
/// `limit_ref` back-reference becomes in an ownership-strict language).
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: u64,
    pub user_id: u64,
    pub side: Side,
    /// Remaining size. Decreases monotonically as the order fills; never goes negative.
    pub size: f64,
    /// Nanosecond wall-clock timestamp at construction; the time-priority tiebreaker.
    pub timestamp: i64,
}

impl Order {
    pub fn is_filled(&self) -> bool {
        self.size == 0.0
    }
}

/// Assigns globally unique, monotonically increasing order ids.
///
/// Owned by the `Exchange` (the market registry) rather than by any single engine, since order
/// ids must be unique across markets for cancel-by-id to be unambiguous.
#[derive(Debug, Default)]
pub struct OrderIdGenerator {
    next: AtomicU64,
}

impl OrderIdGenerator {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// The outcome of a single crossing event between an incoming (taker) order and a resting
/// (maker) order. Carries resolved ids/user ids rather than order references: by the time a
/// `Match` is produced both orders have already been mutated, and the maker may have been fully
/// consumed and dropped from every index.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub ask_order_id: u64,
    pub ask_user_id: u64,
    pub bid_order_id: u64,
    pub bid_user_id: u64,
    pub size_filled: f64,
    /// Price of the resting order's level — the maker's price, since the taker is the
    /// incoming order.
    pub price: f64,
}

/// An externalized, append-only record of a `Match`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub price: f64,
    pub size: f64,
    pub bid_user_id: u64,
    pub ask_user_id: u64,
    pub timestamp: i64,
}

impl Trade {
    pub fn from_match(m: &Match, timestamp: i64) -> Self {
        Self {
            price: m.price,
            size: m.size_filled,
            bid_user_id: m.bid_user_id,
            ask_user_id: m.ask_user_id,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_side_flips() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn order_is_filled_only_at_exact_zero() {
        let mut order = Order {
            id: 1,
            user_id: 1,
            side: Side::Bid,
            size: 1.0,
            timestamp: now_nanos(),
        };
        assert!(!order.is_filled());
        order.size -= 1.0;
        assert!(order.is_filled());
    }

    #[test]
    fn order_ids_are_unique_and_increasing() {
        let gen = OrderIdGenerator::new();
        let a = gen.next_id();
        let b = gen.next_id();
        assert!(b > a);
    }

    #[test]
    fn nanos_strictly_increase_across_calls() {
        let a = now_nanos();
        let b = now_nanos();
        assert!(b > a);
    }
}
