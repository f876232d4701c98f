//! # Item Catalog
//!
//! **Immutable Item Registry with Recipe Validation**
//!
//! The catalog is built once and never mutated afterward. Construction
//! guarantees:
//!
//! 1. **Unique names**: every item name maps to exactly one record
//! 2. **Closed recipes**: every ingredient names a catalog item
//! 3. **No cycles**: the recipe graph is a DAG, so recursive expansion
//!    (see [`ItemCatalog::plan`]) always terminates
//!
//! The bundled catalog ([`ItemCatalog::bundled`]) is parsed on first access
//! and shared by the whole process. Tests and alternate scenarios build their
//! own catalogs with [`ItemCatalog::from_items`] and inject them into a
//! [`Player`](crate::Player).

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::error::{EconomyError, EconomyResult};
use crate::item::Item;
use crate::player::Player;

/// Catalog asset shipped with the crate.
const BUNDLED_ITEMS: &str = include_str!("../data/items.json");

static BUNDLED: OnceLock<EconomyResult<Arc<ItemCatalog>>> = OnceLock::new();

/// Name-keyed registry of item definitions.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Item>,
}

impl ItemCatalog {
    /// Builds a catalog from item records.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if two items share a name or a recipe quantity is 0
    /// - `NotFound` if a recipe names an unknown ingredient
    /// - `CycleDetected` if recipes reference each other in a loop
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> EconomyResult<Self> {
        let mut map = HashMap::new();
        for item in items {
            if map.contains_key(&item.name) {
                return Err(EconomyError::InvalidConfig(format!(
                    "duplicate item name {}",
                    item.name
                )));
            }
            map.insert(item.name.clone(), item);
        }

        let catalog = Self { items: map };
        catalog.validate_recipes()?;
        tracing::info!(items = catalog.len(), "item catalog built");
        Ok(catalog)
    }

    /// Parses a JSON array of item records.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed JSON, plus everything [`Self::from_items`] rejects.
    pub fn from_json(json: &str) -> EconomyResult<Self> {
        let items: Vec<Item> = serde_json::from_str(json)
            .map_err(|e| EconomyError::InvalidConfig(format!("item catalog: {e}")))?;
        Self::from_items(items)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the file cannot be read, plus everything [`Self::from_json`] rejects.
    pub fn load(path: impl AsRef<Path>) -> EconomyResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| EconomyError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// The catalog bundled with the crate, built on first access.
    ///
    /// Later calls return the same instance.
    ///
    /// # Errors
    ///
    /// Returns the build error if the bundled asset is invalid.
    pub fn bundled() -> EconomyResult<Arc<Self>> {
        BUNDLED
            .get_or_init(|| Self::from_json(BUNDLED_ITEMS).map(Arc::new))
            .clone()
    }

    /// Looks up an item by name.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Looks up an item by name.
    ///
    /// # Errors
    ///
    /// `NotFound` if the name is unknown.
    pub fn lookup(&self, name: &str) -> EconomyResult<&Item> {
        self.get(name)
            .ok_or_else(|| EconomyError::NotFound(name.to_string()))
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the catalog has no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Growth time of a seed for this player, after perk discounts.
    ///
    /// Discounts from the player's growth perks add up before being applied
    /// once. A total discount of 100% or more yields 0. Returns `None` for
    /// items that don't grow.
    #[must_use]
    pub fn growth_time_for<R>(&self, item: &Item, player: &Player<R>) -> Option<f64> {
        let discount = player.perk_value(&player.config().effects.growth_discount);
        item.growth_time
            .map(|seconds| (seconds as f64 * (1.0 - discount)).max(0.0))
    }

    /// Validates that every ingredient exists and the recipe graph has no cycles.
    ///
    /// Uses Kahn's algorithm: an edge runs from each ingredient to the item it
    /// goes into. If every item can be sorted, the graph is a DAG.
    fn validate_recipes(&self) -> EconomyResult<()> {
        let mut in_degree: HashMap<&str, usize> =
            self.items.keys().map(|name| (name.as_str(), 0)).collect();
        let mut consumers: HashMap<&str, Vec<&str>> = HashMap::new();

        for item in self.items.values() {
            for (ingredient, &quantity) in &item.recipe {
                if !self.items.contains_key(ingredient) {
                    return Err(EconomyError::NotFound(ingredient.clone()));
                }
                if quantity == 0 {
                    return Err(EconomyError::InvalidConfig(format!(
                        "recipe for {} uses 0 of {ingredient}",
                        item.name
                    )));
                }
                consumers
                    .entry(ingredient.as_str())
                    .or_default()
                    .push(item.name.as_str());
                *in_degree.entry(item.name.as_str()).or_insert(0) += 1;
            }
        }

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, &deg)| deg == 0)
            .map(|(&name, _)| name)
            .collect();

        let mut sorted_count = 0;

        while let Some(name) = queue.pop_front() {
            sorted_count += 1;

            if let Some(next) = consumers.get(name) {
                for &consumer in next {
                    if let Some(deg) = in_degree.get_mut(consumer) {
                        *deg -= 1;
                        if *deg == 0 {
                            queue.push_back(consumer);
                        }
                    }
                }
            }
        }

        if sorted_count == self.items.len() {
            return Ok(());
        }

        // Anything left with a positive in-degree sits on or behind a cycle.
        let stuck = in_degree
            .iter()
            .filter(|(_, &deg)| deg > 0)
            .map(|(&name, _)| name)
            .min()
            .unwrap_or_default();
        Err(EconomyError::CycleDetected(stuck.to_string()))
    }

    /// Expands a craft of `count` units down to raw materials.
    ///
    /// Every craftable ingredient is itself crafted from scratch; nothing is
    /// assumed to be on hand. See [`CraftPlan`].
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item is unknown
    /// - `NotCraftable` if the item has no recipe
    /// - `QuantityOverflow` if any total does not fit in a `u64`
    pub fn plan(&self, name: &str, count: u64) -> EconomyResult<CraftPlan> {
        let item = self.lookup(name)?;
        if !item.is_craftable() {
            return Err(EconomyError::NotCraftable(name.to_string()));
        }

        let mut plan = CraftPlan::default();
        self.expand(item, count, &mut plan)?;
        Ok(plan)
    }

    fn expand(&self, item: &Item, count: u64, plan: &mut CraftPlan) -> EconomyResult<()> {
        if count == 0 {
            return Ok(());
        }
        if !item.is_craftable() {
            let raw = plan.raw_materials.entry(item.name.clone()).or_insert(0);
            return accumulate(raw, count, item);
        }

        accumulate(plan.crafts.entry(item.name.clone()).or_insert(0), count, item)?;
        accumulate(&mut plan.silver, item.craft_cost(count)?, item)?;
        accumulate(&mut plan.crafting_xp, item.xp_for_count(count)?, item)?;

        for (ingredient, &quantity) in &item.recipe {
            // Ingredients were checked at construction.
            if let Some(input) = self.items.get(ingredient) {
                self.expand(input, item.scale(quantity, count)?, plan)?;
            }
        }
        Ok(())
    }
}

fn accumulate(total: &mut u64, amount: u64, item: &Item) -> EconomyResult<()> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| EconomyError::QuantityOverflow(item.name.clone()))?;
    Ok(())
}

/// Everything needed to craft a target from raw materials.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CraftPlan {
    /// Non-craftable inputs and their total quantities.
    pub raw_materials: BTreeMap<String, u64>,
    /// Number of units crafted per item, the target included.
    pub crafts: BTreeMap<String, u64>,
    /// Total silver across every craft.
    pub silver: u64,
    /// Total crafting XP across every craft.
    pub crafting_xp: u64,
}
