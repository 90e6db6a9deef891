//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// All price levels for one side of the book (bids or asks), organized for best-price-first
// iteration. Levels are created lazily on first arrival at a price and dropped once empty.
//
// | Name     | Description                                          | Key Methods          |
// |----------|-------------------------------------------------------|----------------------|
// | SideBook | Price-ordered collection of PriceLevel               | insert, remove, best_level |
//--------------------------------------------------------------------------------------------------

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::price_level::{NotPresent, PriceLevel};
use crate::types::{Order, Side};

/// All levels of one side of the book, ordered by price.
///
/// A `BTreeMap` keyed by `OrderedFloat<f64>` gives O(log n) insertion, removal and best-price
/// lookup; `Ask` iterates ascending (best = lowest price), `Bid` iterates descending (best =
/// highest price) by reversing the same map, so no separate sort-on-read pass is needed.
#[derive(Debug)]
pub struct SideBook {
    side: Side,
    levels: BTreeMap<OrderedFloat<f64>, PriceLevel>,
}

impl SideBook {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Inserts `order` into the level at `price`, creating the level if this is its first
    /// arrival.
    pub fn insert(&mut self, price: f64, order: Order) {
        self.levels
            .entry(OrderedFloat(price))
            .or_insert_with(|| PriceLevel::new(price))
            .add(order);
    }

    /// Removes the order resting at `price` by id. Drops the level if it becomes empty.
    pub fn remove(&mut self, price: f64, order_id: u64) -> Result<Order, NotPresent> {
        let key = OrderedFloat(price);
        let level = self.levels.get_mut(&key).ok_or(NotPresent)?;
        let order = level.delete(order_id)?;
        if level.is_empty() {
            self.levels.remove(&key);
        }
        Ok(order)
    }

    /// Levels in best-first order: ascending price for Ask, descending for Bid.
    pub fn levels_best_first(&mut self) -> Box<dyn Iterator<Item = &mut PriceLevel> + '_> {
        match self.side {
            Side::Ask => Box::new(self.levels.values_mut()),
            Side::Bid => Box::new(self.levels.values_mut().rev()),
        }
    }

    /// Drops any level that `fill` drained empty. Must be called after iterating
    /// `levels_best_first` and calling `PriceLevel::fill` on its elements.
    pub fn prune_empty(&mut self) {
        self.levels.retain(|_, level| !level.is_empty());
    }

    pub fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            Side::Ask => self.levels.values().next(),
            Side::Bid => self.levels.values().next_back(),
        }
    }

    /// Finds a resting order by id at a known price, without removing it.
    pub fn find(&self, price: f64, order_id: u64) -> Option<&Order> {
        self.levels.get(&OrderedFloat(price))?.find(order_id)
    }

    pub fn total_volume(&self) -> f64 {
        self.levels.values().map(PriceLevel::total_volume).sum()
    }

    pub fn all_levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.values()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
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
    fn bid_best_level_is_highest_price() {
        let mut book = SideBook::new(Side::Bid);
        book.insert(100.0, order(1, Side::Bid, 1.0));
        book.insert(99.0, order(2, Side::Bid, 1.0));
        book.insert(101.0, order(3, Side::Bid, 1.0));

        assert_eq!(book.best_level().unwrap().price, 101.0);
    }

    #[test]
    fn ask_best_level_is_lowest_price() {
        let mut book = SideBook::new(Side::Ask);
        book.insert(100.0, order(1, Side::Ask, 1.0));
        book.insert(99.0, order(2, Side::Ask, 1.0));
        book.insert(101.0, order(3, Side::Ask, 1.0));

        assert_eq!(book.best_level().unwrap().price, 99.0);
    }

    #[test]
    fn levels_best_first_iterates_in_price_priority_order() {
        let mut book = SideBook::new(Side::Bid);
        book.insert(5_000.0, order(1, Side::Bid, 10.0));
        book.insert(9_000.0, order(2, Side::Bid, 8.0));
        book.insert(10_000.0, order(3, Side::Bid, 5.0));

        let prices: Vec<f64> = book.levels_best_first().map(|l| l.price).collect();
        assert_eq!(prices, vec![10_000.0, 9_000.0, 5_000.0]);
    }

    #[test]
    fn remove_drops_level_once_last_order_leaves() {
        let mut book = SideBook::new(Side::Bid);
        book.insert(100.0, order(1, Side::Bid, 1.0));

        book.remove(100.0, 1).unwrap();
        assert!(book.is_empty());
        assert!(book.best_level().is_none());
    }

    #[test]
    fn remove_unknown_order_is_not_present() {
        let mut book = SideBook::new(Side::Bid);
        book.insert(100.0, order(1, Side::Bid, 1.0));
        assert!(book.remove(100.0, 2).is_err());
        assert!(book.remove(99.0, 1).is_err());
    }

    #[test]
    fn total_volume_sums_every_level() {
        let mut book = SideBook::new(Side::Ask);
        book.insert(10.0, order(1, Side::Ask, 2.0));
        book.insert(11.0, order(2, Side::Ask, 3.0));
        assert_eq!(book.total_volume(), 5.0);
    }
}
