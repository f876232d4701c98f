//! # Item Definitions
//!
//! Immutable item records as they appear in the catalog data asset.
//!
//! The raw asset uses camelCase for some fields (`sellPrice`, `growthTime`,
//! ...). Serde aliases normalize them to the canonical snake_case names, so
//! both spellings load into the same record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EconomyError, EconomyResult};

/// Rarity tier shown on the item page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    /// Common items.
    Common,
    /// Uncommon items.
    Uncommon,
    /// Rare items.
    Rare,
    /// Very rare items.
    #[serde(rename = "Very Rare")]
    VeryRare,
    /// Super rare items.
    #[serde(rename = "Super Rare")]
    SuperRare,
}

/// An item definition.
///
/// Items are identified by `name`, which is the catalog key and the key
/// used by inventories and recipes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique name.
    pub name: String,
    /// Game-side item ID.
    pub id: String,
    /// Image path.
    pub image: String,
    /// Ingredient name to quantity consumed per craft. Empty if not craftable.
    #[serde(default)]
    pub recipe: BTreeMap<String, u64>,
    /// Silver received per unit sold.
    #[serde(default, alias = "sellPrice")]
    pub sell_price: Option<u64>,
    /// Silver paid per unit bought.
    #[serde(default, alias = "buyPrice")]
    pub buy_price: Option<u64>,
    /// Silver paid per craft.
    #[serde(default, alias = "craftPrice")]
    pub craft_price: Option<u64>,
    /// Seconds from planting to harvest, for seeds.
    #[serde(default, alias = "growthTime")]
    pub growth_time: Option<u64>,
    /// Whether the item can be given to other players.
    #[serde(default)]
    pub givable: bool,
    /// Rarity tier, if shown.
    #[serde(default)]
    pub rarity: Option<Rarity>,
    /// Skill XP granted per craft (or per harvest, for crops).
    #[serde(default)]
    pub xp: u64,
    /// Flea market price in gold. 0 when not listed.
    #[serde(default, alias = "fleaMarket")]
    pub flea_market: u64,
    /// Whether the item has a mastery track.
    #[serde(default)]
    pub mastery: bool,
    /// Whether the item is tied to a limited-time event.
    #[serde(default)]
    pub event: bool,
}

impl Item {
    /// Creates an item with only identity fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            image: String::new(),
            recipe: BTreeMap::new(),
            sell_price: None,
            buy_price: None,
            craft_price: None,
            growth_time: None,
            givable: false,
            rarity: None,
            xp: 0,
            flea_market: 0,
            mastery: false,
            event: false,
        }
    }

    /// Adds an ingredient to the recipe.
    #[must_use]
    pub fn with_ingredient(mut self, name: impl Into<String>, quantity: u64) -> Self {
        self.recipe.insert(name.into(), quantity);
        self
    }

    /// Sets the silver cost per craft.
    #[must_use]
    pub const fn with_craft_price(mut self, price: u64) -> Self {
        self.craft_price = Some(price);
        self
    }

    /// Sets XP awarded per craft.
    #[must_use]
    pub const fn with_xp(mut self, xp: u64) -> Self {
        self.xp = xp;
        self
    }

    /// Sets buy and sell prices.
    #[must_use]
    pub const fn with_prices(mut self, buy: Option<u64>, sell: Option<u64>) -> Self {
        self.buy_price = buy;
        self.sell_price = sell;
        self
    }

    /// Sets the growth time in seconds.
    #[must_use]
    pub const fn with_growth_time(mut self, seconds: u64) -> Self {
        self.growth_time = Some(seconds);
        self
    }

    /// True if the item has a recipe.
    #[inline]
    #[must_use]
    pub fn is_craftable(&self) -> bool {
        !self.recipe.is_empty()
    }

    /// True if the item is listed on the flea market.
    #[inline]
    #[must_use]
    pub const fn is_on_flea_market(&self) -> bool {
        self.flea_market > 0
    }

    /// Silver cost of crafting `count` units. A missing craft price is free.
    ///
    /// # Errors
    ///
    /// `QuantityOverflow` if the total does not fit in a `u64`.
    #[inline]
    pub fn craft_cost(&self, count: u64) -> EconomyResult<u64> {
        self.scale(self.craft_price.unwrap_or(0), count)
    }

    /// Skill XP for crafting `count` units.
    ///
    /// # Errors
    ///
    /// `QuantityOverflow` if the total does not fit in a `u64`.
    #[inline]
    pub fn xp_for_count(&self, count: u64) -> EconomyResult<u64> {
        self.scale(self.xp, count)
    }

    /// `per_unit * count`, failing with `QuantityOverflow` naming this item.
    pub(crate) fn scale(&self, per_unit: u64, count: u64) -> EconomyResult<u64> {
        per_unit
            .checked_mul(count)
            .ok_or_else(|| EconomyError::QuantityOverflow(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields_normalize() {
        let raw = r#"{
            "name": "Beet Seeds",
            "id": "449",
            "image": "/img/items/2850.png",
            "xp": 90720,
            "buyPrice": 189000,
            "growthTime": 777600,
            "fleaMarket": 2
        }"#;
        let item: Item = serde_json::from_str(raw).unwrap();
        assert_eq!(item.buy_price, Some(189_000));
        assert_eq!(item.growth_time, Some(777_600));
        assert_eq!(item.flea_market, 2);
        assert!(item.is_on_flea_market());
        assert!(!item.is_craftable());
    }

    #[test]
    fn test_snake_case_fields_load() {
        let raw = r#"{
            "name": "Fancy Pipe",
            "id": "301",
            "image": "",
            "craft_price": 150,
            "recipe": {"Iron": 1, "Wood": 2},
            "rarity": "Very Rare"
        }"#;
        let item: Item = serde_json::from_str(raw).unwrap();
        assert_eq!(item.craft_price, Some(150));
        assert_eq!(item.rarity, Some(Rarity::VeryRare));
        assert!(item.is_craftable());
        assert_eq!(item.craft_cost(3).unwrap(), 450);
    }

    #[test]
    fn test_missing_craft_price_is_free() {
        let item = Item::new("Board", "1").with_ingredient("Wood Plank", 2);
        assert_eq!(item.craft_cost(10).unwrap(), 0);
    }

    #[test]
    fn test_huge_count_overflows() {
        let item = Item::new("Fancy Pipe", "301").with_craft_price(150).with_xp(5000);
        assert_eq!(
            item.craft_cost(u64::MAX / 2),
            Err(EconomyError::QuantityOverflow("Fancy Pipe".to_string()))
        );
        assert!(item.xp_for_count(u64::MAX).is_err());
        assert_eq!(item.xp_for_count(3).unwrap(), 15_000);
    }
}
