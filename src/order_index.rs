//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Direct lookup from order id to its resting location, so cancel and query can find an order
// without scanning the book. This is the spec's `limit_ref` back-reference, reshaped for an
// ownership-strict language: rather than a pointer from the order into its price level, the
// engine keeps a side table from id to `(Side, price)` and the order's presence in that table
// *is* the back-reference.
//
// | Name       | Description                                         | Key Methods        |
// |------------|-------------------------------------------------------|---------------------|
// | OrderIndex | order_id -> (Side, price) for every resting order     | insert, remove, get |
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;

use crate::types::Side;

/// Where a resting order lives: which side book, and at which price level.
pub type OrderLocation = (Side, f64);

#[derive(Debug, Default)]
pub struct OrderIndex {
    locations: HashMap<u64, OrderLocation>,
}

impl OrderIndex {
    pub fn new() -> Self {
        Self {
            locations: HashMap::new(),
        }
    }

    pub fn insert(&mut self, order_id: u64, location: OrderLocation) {
        self.locations.insert(order_id, location);
    }

    pub fn remove(&mut self, order_id: u64) -> Option<OrderLocation> {
        self.locations.remove(&order_id)
    }

    pub fn get(&self, order_id: u64) -> Option<OrderLocation> {
        self.locations.get(&order_id).copied()
    }

    pub fn contains(&self, order_id: u64) -> bool {
        self.locations.contains_key(&order_id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
