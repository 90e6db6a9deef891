//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// A single price level: a FIFO queue of resting orders that all share one price, plus the
// denormalized total volume invariant (Sigma of order sizes in the queue).
//
// | Name       | Description                                       | Key Methods     |
// |------------|----------------------------------------------------|-----------------|
// | PriceLevel | FIFO queue of orders at one price                  | add, delete, fill |
//--------------------------------------------------------------------------------------------------

use std::collections::VecDeque;

use crate::types::{Match, Order, Side};

/// The requested order is not resting in this price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("order not present in this price level")]
pub struct NotPresent;

/// FIFO queue of resting orders at one price.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    pub price: f64,
    orders: VecDeque<Order>,
    total_volume: f64,
}

/// Outcome of filling a price level against an incoming order.
#[derive(Debug, Default)]
pub struct FillOutcome {
    pub matches: Vec<Match>,
    /// Ids of resting orders fully consumed and removed from the queue, in removal order.
    pub drained_order_ids: Vec<u64>,
}

impl PriceLevel {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_volume: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    pub fn peek_front(&self) -> Option<&Order> {
        self.orders.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Finds a resting order by id without removing it. Used by queries (`get_orders`) that
    /// need an order's current size/timestamp, not just its location.
    pub fn find(&self, order_id: u64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Appends an order to the back of the FIFO queue.
    pub fn add(&mut self, order: Order) {
        self.total_volume += order.size;
        self.orders.push_back(order);
    }

    /// Removes a specific resting order by id, wherever it sits in the queue.
    ///
    /// Removal is by identity (the order id), not by value equality, per spec. `NotPresent` is
    /// returned rather than silently doing nothing, since callers (the side book, cancel) rely
    /// on the error to detect a stale `(side, price)` entry in the order index.
    pub fn delete(&mut self, order_id: u64) -> Result<Order, NotPresent> {
        let pos = self
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or(NotPresent)?;
        // `VecDeque::remove` never panics for a position returned by `position` on this deque.
        let order = self.orders.remove(pos).expect("position was just located");
        self.total_volume -= order.size;
        Ok(order)
    }

    /// Consumes resting orders from the head of the queue against `incoming` until either
    /// `incoming` is fully filled or this level is drained.
    pub fn fill(&mut self, incoming: &mut Order) -> FillOutcome {
        let mut outcome = FillOutcome::default();

        while incoming.size > 0.0 {
            let Some(resting) = self.orders.front_mut() else {
                break;
            };

            let fill = resting.size.min(incoming.size);

            let (ask_order_id, ask_user_id, bid_order_id, bid_user_id) = match incoming.side {
                Side::Bid => (resting.id, resting.user_id, incoming.id, incoming.user_id),
                Side::Ask => (incoming.id, incoming.user_id, resting.id, resting.user_id),
            };

            outcome.matches.push(Match {
                ask_order_id,
                ask_user_id,
                bid_order_id,
                bid_user_id,
                size_filled: fill,
                price: self.price,
            });

            resting.size -= fill;
            incoming.size -= fill;
            self.total_volume -= fill;

            if resting.size == 0.0 {
                let drained = self.orders.pop_front().expect("front checked present above");
                outcome.drained_order_ids.push(drained.id);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u64, side: Side, size: f64) -> Order {
        Order {
            id,
            user_id: id,
            side,
            size,
            timestamp: id as i64,
        }
    }

    #[test]
    fn add_updates_total_volume() {
        let mut level = PriceLevel::new(100.0);
        level.add(order(1, Side::Bid, 5.0));
        level.add(order(2, Side::Bid, 3.0));
        assert_eq!(level.total_volume(), 8.0);
        assert_eq!(level.order_count(), 2);
    }

    #[test]
    fn delete_removes_by_identity_and_updates_volume() {
        let mut level = PriceLevel::new(100.0);
        level.add(order(1, Side::Bid, 5.0));
        level.add(order(2, Side::Bid, 3.0));

        let removed = level.delete(1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(level.total_volume(), 3.0);
        assert_eq!(level.order_count(), 1);
    }

    #[test]
    fn delete_not_present_leaves_level_untouched() {
        let mut level = PriceLevel::new(100.0);
        level.add(order(1, Side::Ask, 5.0));
        assert_eq!(level.delete(999), Err(NotPresent));
        assert_eq!(level.total_volume(), 5.0);
    }

    #[test]
    fn fill_is_strict_fifo_and_drains_exhausted_orders() {
        // S5 from spec.md section 8: X{5}@100 at t=1, Y{5}@100 at t=2, incoming bid 5.
        let mut level = PriceLevel::new(100.0);
        level.add(order(1, Side::Ask, 5.0)); // X
        level.add(order(2, Side::Ask, 5.0)); // Y

        let mut incoming = order(3, Side::Bid, 5.0);
        let outcome = level.fill(&mut incoming);

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].ask_order_id, 1);
        assert_eq!(outcome.drained_order_ids, vec![1]);
        assert_eq!(incoming.size, 0.0);
        assert_eq!(level.order_count(), 1);
        assert_eq!(level.peek_front().unwrap().id, 2);
    }

    #[test]
    fn fill_stops_exactly_at_zero_with_no_rounding() {
        let mut level = PriceLevel::new(10_000.0);
        level.add(order(1, Side::Ask, 20.0));

        let mut incoming = order(2, Side::Bid, 10.0);
        let outcome = level.fill(&mut incoming);

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].size_filled, 10.0);
        assert_eq!(incoming.size, 0.0);
        assert_eq!(level.total_volume(), 10.0);
        assert!(outcome.drained_order_ids.is_empty());
    }

    #[test]
    fn fill_sweeps_multiple_resting_orders_in_one_call() {
        let mut level = PriceLevel::new(5_000.0);
        level.add(order(1, Side::Bid, 10.0));
        level.add(order(2, Side::Bid, 1.0));

        let mut incoming = order(3, Side::Ask, 7.0);
        let outcome = level.fill(&mut incoming);

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].size_filled, 7.0);
        assert_eq!(incoming.size, 0.0);
        assert_eq!(level.total_volume(), 4.0);
        assert_eq!(level.peek_front().unwrap().id, 1);
    }
}
