//! Laundry basket
//!
//! Ordered set of item identifiers that have been set aside as worn. Items in
//! the basket stay in the registry; they are only hidden from the available
//! pool until the basket is cleared.

use super::registry::ItemId;
use std::collections::HashSet;

/// Ordered set of set-aside items
#[derive(Debug, Clone, Default)]
pub struct Basket {
    order: Vec<ItemId>,
    members: HashSet<ItemId>,
}

impl Basket {
    /// Creates an empty basket
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, returning false if it was already present
    pub fn insert(&mut self, id: ItemId) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        self.order.push(id);
        true
    }

    /// Whether the item is set aside
    pub fn contains(&self, id: &ItemId) -> bool {
        self.members.contains(id)
    }

    /// Empties the basket and returns how many items were released
    pub fn clear(&mut self) -> usize {
        let released = self.order.len();
        self.order.clear();
        self.members.clear();
        released
    }

    /// Set-aside identifiers in the order they were added
    pub fn ids(&self) -> &[ItemId] {
        &self.order
    }

    /// Number of items set aside
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the basket is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut basket = Basket::new();
        let id = ItemId::new();
        assert!(basket.insert(id));
        assert!(!basket.insert(id));
        assert_eq!(basket.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut basket = Basket::new();
        let ids = [ItemId::new(), ItemId::new(), ItemId::new()];
        for id in ids.iter().rev() {
            basket.insert(*id);
        }
        let expected: Vec<ItemId> = ids.iter().rev().copied().collect();
        assert_eq!(basket.ids(), expected.as_slice());
    }

    #[test]
    fn test_clear_is_total() {
        let mut basket = Basket::new();
        let a = ItemId::new();
        basket.insert(a);
        basket.insert(ItemId::new());
        assert_eq!(basket.clear(), 2);
        assert!(basket.is_empty());
        assert!(!basket.contains(&a));
        assert_eq!(basket.clear(), 0);
    }
}
