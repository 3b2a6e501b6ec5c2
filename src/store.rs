use std::collections::HashMap;

use crate::domain::Order;

/// In-memory order store. Pure data holder with no lifecycle rules.
///
/// Kept behind this type so a bounded or evicting backing store can replace
/// the plain map without touching the order service.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: HashMap<String, Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
        }
    }

    /// Inserts or overwrites the record for `order.id`.
    pub fn put(&mut self, order: Order) {
        self.orders.insert(order.id.clone(), order);
    }

    /// Returns a copy of the current record. Does not interpret expiry.
    pub fn get(&self, id: &str) -> Option<Order> {
        self.orders.get(id).cloned()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.orders.len()
    }
}
