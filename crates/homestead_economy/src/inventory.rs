//! # Inventory System
//!
//! Item balances keyed by item name, plus an overflow balance for units
//! that don't fit.
//!
//! ## Capacity
//!
//! `max_inventory` caps each item type independently, not the sum across
//! types: every item may hold up to `max_inventory` units before further
//! additions of that item spill into overflow. With no cap set, only units
//! past `u64::MAX` overflow.
//!
//! A key with no entry means a quantity of 0. Zero balances are pruned after
//! every mutation and never stored.

use std::collections::BTreeMap;

use crate::error::{EconomyError, EconomyResult};

/// Where the units of one addition ended up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Units credited to the main inventory.
    pub stored: u64,
    /// Units routed to overflow.
    pub overflowed: u64,
}

/// Item balances with a per-item capacity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<String, u64>,
    overflow: BTreeMap<String, u64>,
    max_per_item: Option<u64>,
}

impl Inventory {
    /// Creates an empty, unbounded inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty inventory capped at `max` units per item.
    #[must_use]
    pub fn with_capacity(max: u64) -> Self {
        Self {
            max_per_item: Some(max),
            ..Self::default()
        }
    }

    /// Per-item capacity, if bounded.
    #[inline]
    #[must_use]
    pub const fn max_per_item(&self) -> Option<u64> {
        self.max_per_item
    }

    /// Changes the per-item capacity.
    ///
    /// Existing balances above a new, lower cap are kept as they are; the
    /// cap only applies to later additions.
    pub fn set_max_per_item(&mut self, max: Option<u64>) {
        self.max_per_item = max;
    }

    /// Quantity held in the main inventory.
    #[inline]
    #[must_use]
    pub fn quantity(&self, item: &str) -> u64 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// Quantity held in overflow.
    #[inline]
    #[must_use]
    pub fn overflow_quantity(&self, item: &str) -> u64 {
        self.overflow.get(item).copied().unwrap_or(0)
    }

    /// Main inventory balances, sorted by name.
    #[must_use]
    pub const fn items(&self) -> &BTreeMap<String, u64> {
        &self.items
    }

    /// Overflow balances, sorted by name.
    #[must_use]
    pub const fn overflow(&self) -> &BTreeMap<String, u64> {
        &self.overflow
    }

    /// True if the main inventory holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds units, storing as many as fit under the cap and overflowing the rest.
    pub fn add(&mut self, item: &str, count: u64) -> AddOutcome {
        let held = self.quantity(item);
        let room = self.max_per_item.unwrap_or(u64::MAX).saturating_sub(held);
        let stored = count.min(room);
        let overflowed = count - stored;

        if stored > 0 {
            *self.items.entry(item.to_string()).or_insert(0) += stored;
        }
        if overflowed > 0 {
            let spilled = self.overflow.entry(item.to_string()).or_insert(0);
            *spilled = spilled.saturating_add(overflowed);
            tracing::debug!(item, overflowed, "inventory full, routed to overflow");
        }

        AddOutcome { stored, overflowed }
    }

    /// Removes units from the main inventory.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InsufficientQuantity` if fewer than `count` are
    /// held. Nothing is removed in that case.
    pub fn remove(&mut self, item: &str, count: u64) -> EconomyResult<()> {
        let available = self.quantity(item);
        if available < count {
            return Err(EconomyError::InsufficientQuantity {
                item: item.to_string(),
                requested: count,
                available,
            });
        }

        let remaining = available - count;
        if remaining == 0 {
            self.items.remove(item);
        } else {
            self.items.insert(item.to_string(), remaining);
        }

        Ok(())
    }

    /// Overwrites a balance. Setting 0 removes the entry.
    pub fn set_quantity(&mut self, item: &str, count: u64) {
        if count == 0 {
            self.items.remove(item);
        } else {
            self.items.insert(item.to_string(), count);
        }
    }

    /// Drains and returns every overflow balance.
    pub fn take_overflow(&mut self) -> BTreeMap<String, u64> {
        std::mem::take(&mut self.overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_items() {
        let mut inv = Inventory::with_capacity(100);
        let outcome = inv.add("Wood", 1);
        assert_eq!(outcome, AddOutcome { stored: 1, overflowed: 0 });
        assert_eq!(inv.quantity("Wood"), 1);
        assert_eq!(inv.overflow_quantity("Wood"), 0);
    }

    #[test]
    fn test_add_overflow() {
        let mut inv = Inventory::with_capacity(100);
        let outcome = inv.add("Wood", 300);
        assert_eq!(outcome, AddOutcome { stored: 100, overflowed: 200 });
        assert_eq!(inv.quantity("Wood"), 100);
        assert_eq!(inv.overflow_quantity("Wood"), 200);
    }

    #[test]
    fn test_capacity_is_per_item() {
        let mut inv = Inventory::with_capacity(10);
        inv.add("Wood", 10);
        inv.add("Iron", 10);
        assert_eq!(inv.quantity("Wood"), 10);
        assert_eq!(inv.quantity("Iron"), 10);
        assert!(inv.overflow().is_empty());
    }

    #[test]
    fn test_over_cap_balance_never_goes_negative() {
        let mut inv = Inventory::new();
        inv.add("Wood", 50);
        inv.set_max_per_item(Some(10));
        let outcome = inv.add("Wood", 5);
        assert_eq!(outcome, AddOutcome { stored: 0, overflowed: 5 });
        assert_eq!(inv.quantity("Wood"), 50);
    }

    #[test]
    fn test_unbounded_never_overflows() {
        let mut inv = Inventory::new();
        inv.add("Wood", 1_000_000);
        assert_eq!(inv.quantity("Wood"), 1_000_000);
        assert!(inv.overflow().is_empty());
    }

    #[test]
    fn test_remove_items() {
        let mut inv = Inventory::new();
        inv.add("Wood", 10);
        inv.remove("Wood", 1).unwrap();
        assert_eq!(inv.quantity("Wood"), 9);
    }

    #[test]
    fn test_remove_prunes_zero() {
        let mut inv = Inventory::new();
        inv.add("Wood", 2);
        inv.remove("Wood", 2).unwrap();
        assert!(inv.is_empty());
        assert!(!inv.items().contains_key("Wood"));
    }

    #[test]
    fn test_remove_insufficient() {
        let mut inv = Inventory::new();
        let result = inv.remove("Wood", 1);
        assert_eq!(
            result,
            Err(EconomyError::InsufficientQuantity {
                item: "Wood".to_string(),
                requested: 1,
                available: 0,
            })
        );
        assert!(inv.is_empty());
    }

    #[test]
    fn test_take_overflow() {
        let mut inv = Inventory::with_capacity(5);
        inv.add("Wood", 8);
        let drained = inv.take_overflow();
        assert_eq!(drained.get("Wood"), Some(&3));
        assert!(inv.overflow().is_empty());
        assert_eq!(inv.quantity("Wood"), 5);
    }

    #[test]
    fn test_unbounded_balance_saturates_into_overflow() {
        let mut inv = Inventory::new();
        inv.add("Wood", u64::MAX);
        let outcome = inv.add("Wood", 5);
        assert_eq!(outcome, AddOutcome { stored: 0, overflowed: 5 });
        assert_eq!(inv.quantity("Wood"), u64::MAX);
        assert_eq!(inv.overflow_quantity("Wood"), 5);
    }
}
