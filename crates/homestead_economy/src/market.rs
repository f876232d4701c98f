//! # Market
//!
//! Buying from and selling to the in-game shop at catalog prices.
//! Both operations validate before they mutate: a failed trade changes
//! nothing.

use crate::error::{EconomyError, EconomyResult};
use crate::inventory::AddOutcome;
use crate::player::Player;

impl<R> Player<R> {
    /// Buys `count` units at the item's buy price.
    ///
    /// Purchases respect inventory capacity; units that don't fit go to overflow.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item is not in the catalog
    /// - `NotForSale` if it has no buy price
    /// - `InsufficientFunds` if silver is short
    /// - `QuantityOverflow` if the total price does not fit in a `u64`
    pub fn buy_item(&mut self, name: &str, count: u64) -> EconomyResult<AddOutcome> {
        let item = self.catalog.lookup(name)?;
        let price = item
            .buy_price
            .ok_or_else(|| EconomyError::NotForSale(item.name.clone()))?;

        let cost = item.scale(price, count)?;
        if self.silver < cost {
            return Err(EconomyError::InsufficientFunds {
                required: cost,
                available: self.silver,
            });
        }

        self.silver -= cost;
        let outcome = self.inventory.add(name, count);
        tracing::debug!(item = name, count, cost, "bought");
        Ok(outcome)
    }

    /// Sells `count` units at the item's sell price. Returns the silver earned.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item is not in the catalog
    /// - `NotSellable` if it has no sell price
    /// - `InsufficientQuantity` if fewer than `count` are held
    /// - `QuantityOverflow` if the total price does not fit in a `u64`
    pub fn sell_item(&mut self, name: &str, count: u64) -> EconomyResult<u64> {
        let item = self.catalog.lookup(name)?;
        let price = item
            .sell_price
            .ok_or_else(|| EconomyError::NotSellable(item.name.clone()))?;

        let earned = item.scale(price, count)?;
        self.inventory.remove(name, count)?;
        self.silver = self.silver.saturating_add(earned);
        tracing::debug!(item = name, count, earned, "sold");
        Ok(earned)
    }
}
