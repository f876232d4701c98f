//! # Crafting Resolver
//!
//! **Validated, All-or-Nothing Crafting with Bonus Yield**
//!
//! Guarantees:
//!
//! 1. **Validate first**: count, materials, silver and every scaled total
//!    are checked before anything is debited. A failed craft changes nothing.
//! 2. **Conservation**: a successful craft of `count` units consumes exactly
//!    `recipe_qty * count` of every ingredient and `craft_price * count`
//!    silver, however many bonus units it yields.
//! 3. **Bonus yield**: while the player holds a resource-saver perk, draws
//!    below its chance each add one free unit; the first failed draw stops
//!    the loop. Bonus units earn no XP and only follow a committed craft.
//!
//! Outputs (base and bonus) go through the inventory's capacity rules, so
//! anything over the cap lands in overflow.

use std::collections::BTreeMap;
use std::sync::Arc;

use homestead_shared::Skill;

use crate::error::{EconomyError, EconomyResult};
use crate::inventory::Inventory;
use crate::item::Item;
use crate::player::Player;
use crate::rolls::RandomSource;

/// Ingredients still missing to craft `count` units of `item`.
///
/// Only ingredients with a positive shortfall appear. An empty map means the
/// inventory covers the whole recipe.
///
/// # Errors
///
/// `QuantityOverflow` if a scaled ingredient quantity does not fit in a `u64`.
pub fn items_needed_to_craft(
    inventory: &Inventory,
    item: &Item,
    count: u64,
) -> EconomyResult<BTreeMap<String, u64>> {
    let mut needed = BTreeMap::new();
    for (ingredient, &per_craft) in &item.recipe {
        let required = item.scale(per_craft, count)?;
        let held = inventory.quantity(ingredient);
        if required > held {
            needed.insert(ingredient.clone(), required - held);
        }
    }
    Ok(needed)
}

/// Result of a successful craft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CraftOutcome {
    /// The crafted item.
    pub item: String,
    /// Units requested and paid for.
    pub crafted: u64,
    /// Free units from resource-saver rolls.
    pub bonus: u64,
    /// Silver debited.
    pub silver_spent: u64,
    /// Crafting XP credited.
    pub xp_gained: u64,
    /// Units (base and bonus) that went to overflow.
    pub overflowed: u64,
}

impl CraftOutcome {
    /// Base plus bonus units produced.
    #[inline]
    #[must_use]
    pub const fn total_produced(&self) -> u64 {
        self.crafted.saturating_add(self.bonus)
    }
}

/// Silver and XP of a craft that passed validation.
struct CraftCharge {
    silver: u64,
    xp: u64,
}

impl<R> Player<R> {
    /// Ingredients still missing to craft `count` units of `name`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item is not in the catalog
    /// - `QuantityOverflow` if a scaled ingredient quantity does not fit in a `u64`
    pub fn items_needed_to_craft(
        &self,
        name: &str,
        count: u64,
    ) -> EconomyResult<BTreeMap<String, u64>> {
        let item = self.catalog.lookup(name)?;
        items_needed_to_craft(&self.inventory, item, count)
    }

    /// Checks if this player can craft `count` units of `name` right now.
    ///
    /// # Errors
    ///
    /// The error [`Player::craft`] would return, without changing anything.
    pub fn can_craft(&self, name: &str, count: u64) -> EconomyResult<()> {
        let item = self.catalog.lookup(name)?;
        self.validate_craft(item, count).map(|_| ())
    }

    fn validate_craft(&self, item: &Item, count: u64) -> EconomyResult<CraftCharge> {
        if !item.is_craftable() {
            return Err(EconomyError::NotCraftable(item.name.clone()));
        }
        if count == 0 {
            return Err(EconomyError::ZeroCount(item.name.clone()));
        }

        let shortfall = items_needed_to_craft(&self.inventory, item, count)?;
        if !shortfall.is_empty() {
            return Err(EconomyError::InsufficientMaterials {
                item: item.name.clone(),
                shortfall,
            });
        }

        let silver = item.craft_cost(count)?;
        if self.silver < silver {
            return Err(EconomyError::InsufficientFunds {
                required: silver,
                available: self.silver,
            });
        }

        Ok(CraftCharge {
            silver,
            xp: item.xp_for_count(count)?,
        })
    }
}

impl<R: RandomSource> Player<R> {
    /// Crafts `count` units of `name`.
    ///
    /// Debits ingredients and silver, credits the output and
    /// `item.xp * count` crafting XP, then runs the resource-saver bonus loop.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item is not in the catalog
    /// - `NotCraftable` if it has no recipe
    /// - `ZeroCount` if `count` is 0
    /// - `InsufficientMaterials` if any ingredient is short
    /// - `InsufficientFunds` if silver is short
    /// - `QuantityOverflow` if a scaled quantity, cost or XP total does not fit in a `u64`
    ///
    /// Nothing changes on error.
    pub fn craft(&mut self, name: &str, count: u64) -> EconomyResult<CraftOutcome> {
        let catalog = Arc::clone(&self.catalog);
        let item = catalog.lookup(name)?;

        let charge = self.validate_craft(item, count)?;

        // Validation proved every scaled quantity fits and is held in full.
        for (ingredient, &per_craft) in &item.recipe {
            self.inventory.remove(ingredient, item.scale(per_craft, count)?)?;
        }
        self.silver -= charge.silver;

        let mut overflowed = self.inventory.add(&item.name, count).overflowed;
        self.gain_xp(Skill::Crafting, charge.xp);

        let bonus = self.roll_bonus_units();
        if bonus > 0 {
            let spilled = self.inventory.add(&item.name, bonus).overflowed;
            overflowed = overflowed.saturating_add(spilled);
        }

        tracing::debug!(
            item = %item.name,
            count,
            bonus,
            silver = charge.silver,
            xp = charge.xp,
            "crafted"
        );

        Ok(CraftOutcome {
            item: item.name.clone(),
            crafted: count,
            bonus,
            silver_spent: charge.silver,
            xp_gained: charge.xp,
            overflowed,
        })
    }

    /// Number of free units from the resource-saver loop.
    fn roll_bonus_units(&mut self) -> u64 {
        let chance = self.perk_value(&self.config.effects.resource_saver);
        if chance <= 0.0 {
            return 0;
        }

        let mut bonus: u64 = 0;
        loop {
            let draw = self.rolls.next_unit();
            tracing::trace!(draw, chance, "resource saver roll");
            if draw >= chance {
                return bonus;
            }
            bonus = bonus.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCatalog;
    use crate::experience::ExperienceTable;
    use crate::rolls::ScriptedRolls;

    fn catalog() -> Arc<ItemCatalog> {
        Arc::new(
            ItemCatalog::from_items([
                Item::new("Iron", "22"),
                Item::new("Wood", "35"),
                Item::new("Iron Ring", "95"),
                Item::new("Fancy Pipe", "301")
                    .with_ingredient("Iron", 1)
                    .with_ingredient("Wood", 2)
                    .with_ingredient("Iron Ring", 3)
                    .with_craft_price(150)
                    .with_xp(5000),
            ])
            .unwrap(),
        )
    }

    fn player(draws: &[f64]) -> Player<ScriptedRolls> {
        Player::new(catalog(), ExperienceTable::bundled().unwrap())
            .with_rolls(ScriptedRolls::new(draws.iter().copied()))
    }

    fn needed(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_items_needed_empty_inventory() {
        let player = player(&[]);
        assert_eq!(
            player.items_needed_to_craft("Fancy Pipe", 1).unwrap(),
            needed(&[("Iron", 1), ("Wood", 2), ("Iron Ring", 3)])
        );
    }

    #[test]
    fn test_items_needed_partial() {
        let mut player = player(&[]);
        player.add_item("Wood", 2).unwrap();
        player.add_item("Iron Ring", 2).unwrap();
        assert_eq!(
            player.items_needed_to_craft("Fancy Pipe", 1).unwrap(),
            needed(&[("Iron", 1), ("Iron Ring", 1)])
        );
    }

    #[test]
    fn test_items_needed_over() {
        let mut player = player(&[]);
        player.add_item("Iron", 2).unwrap();
        player.add_item("Wood", 2).unwrap();
        player.add_item("Iron Ring", 5).unwrap();
        assert!(player.items_needed_to_craft("Fancy Pipe", 1).unwrap().is_empty());
    }

    #[test]
    fn test_items_needed_multi() {
        let player = player(&[]);
        assert_eq!(
            player.items_needed_to_craft("Fancy Pipe", 3).unwrap(),
            needed(&[("Iron", 3), ("Wood", 6), ("Iron Ring", 9)])
        );
    }

    #[test]
    fn test_items_needed_multi_partial() {
        let mut player = player(&[]);
        player.add_item("Wood", 4).unwrap();
        player.add_item("Iron Ring", 4).unwrap();
        assert_eq!(
            player.items_needed_to_craft("Fancy Pipe", 2).unwrap(),
            needed(&[("Iron", 2), ("Iron Ring", 2)])
        );
    }

    #[test]
    fn test_not_craftable() {
        let mut player = player(&[]).with_silver(1000);
        player.add_item("Wood", 10).unwrap();
        assert_eq!(
            player.craft("Wood", 1),
            Err(EconomyError::NotCraftable("Wood".to_string()))
        );
        assert_eq!(player.quantity("Wood"), 10);
    }

    #[test]
    fn test_insufficient_funds_changes_nothing() {
        let mut player = player(&[]).with_silver(149);
        player.add_item("Iron", 1).unwrap();
        player.add_item("Wood", 2).unwrap();
        player.add_item("Iron Ring", 3).unwrap();
        let before = player.inventory().clone();

        let result = player.craft("Fancy Pipe", 1);
        assert_eq!(
            result,
            Err(EconomyError::InsufficientFunds {
                required: 150,
                available: 149,
            })
        );
        assert_eq!(player.inventory(), &before);
        assert_eq!(player.silver(), 149);
        assert_eq!(player.xp(Skill::Crafting), 0);
    }

    #[test]
    fn test_insufficient_materials_reports_shortfall() {
        let mut player = player(&[]).with_silver(150);
        player.add_item("Iron", 1).unwrap();
        player.add_item("Wood", 2).unwrap();

        match player.craft("Fancy Pipe", 1) {
            Err(EconomyError::InsufficientMaterials { item, shortfall }) => {
                assert_eq!(item, "Fancy Pipe");
                assert_eq!(shortfall, needed(&[("Iron Ring", 3)]));
            }
            other => panic!("expected InsufficientMaterials, got {other:?}"),
        }
        assert_eq!(player.silver(), 150);
        assert_eq!(player.quantity("Iron"), 1);
    }

    #[test]
    fn test_craft_outcome() {
        let mut player = player(&[0.0, 0.0, 0.5]).with_perk("Resource Saver II");
        player.add_item("Iron", 2).unwrap();
        player.add_item("Wood", 4).unwrap();
        player.add_item("Iron Ring", 6).unwrap();
        player.set_silver(300);

        let outcome = player.craft("Fancy Pipe", 2).unwrap();
        assert_eq!(
            outcome,
            CraftOutcome {
                item: "Fancy Pipe".to_string(),
                crafted: 2,
                bonus: 2,
                silver_spent: 300,
                xp_gained: 10_000,
                overflowed: 0,
            }
        );
        assert_eq!(outcome.total_produced(), 4);
        assert_eq!(player.quantity("Fancy Pipe"), 4);
    }

    #[test]
    fn test_no_perk_never_draws() {
        let mut player = player(&[0.0, 0.0]);
        player.add_item("Iron", 1).unwrap();
        player.add_item("Wood", 2).unwrap();
        player.add_item("Iron Ring", 3).unwrap();
        player.set_silver(150);

        let outcome = player.craft("Fancy Pipe", 1).unwrap();
        assert_eq!(outcome.bonus, 0);
        assert_eq!(player.rolls.remaining(), 2);
    }

    #[test]
    fn test_zero_count_rejected_before_rolls() {
        let mut player = player(&[0.0, 0.0, 0.0, 1.0]).with_perk("Resource Saver I");

        assert_eq!(
            player.craft("Fancy Pipe", 0),
            Err(EconomyError::ZeroCount("Fancy Pipe".to_string()))
        );
        assert_eq!(player.quantity("Fancy Pipe"), 0);
        assert!(player.inventory().is_empty());
        assert_eq!(player.rolls.remaining(), 4);
    }

    #[test]
    fn test_huge_count_reports_overflow() {
        let mut player = player(&[]).with_silver(u64::MAX);
        let overflow = EconomyError::QuantityOverflow("Fancy Pipe".to_string());

        assert_eq!(
            player.items_needed_to_craft("Fancy Pipe", u64::MAX / 2),
            Err(overflow.clone())
        );
        assert_eq!(player.craft("Fancy Pipe", u64::MAX / 2), Err(overflow));
        assert!(player.inventory().is_empty());
        assert_eq!(player.silver(), u64::MAX);
    }

    #[test]
    fn test_capacity_constrained_craft_still_consumes() {
        let mut player = player(&[0.0, 1.0])
            .with_perk("Resource Saver I")
            .with_max_inventory(10);
        player.add_item("Iron", 1).unwrap();
        player.add_item("Wood", 2).unwrap();
        player.add_item("Iron Ring", 3).unwrap();
        player.add_item("Fancy Pipe", 9).unwrap();
        player.set_silver(150);

        let outcome = player.craft("Fancy Pipe", 1).unwrap();
        assert_eq!(outcome.overflowed, 1);
        assert_eq!(player.quantity("Fancy Pipe"), 10);
        assert_eq!(player.inventory().overflow_quantity("Fancy Pipe"), 1);
        assert_eq!(player.quantity("Iron"), 0);
        assert_eq!(player.quantity("Wood"), 0);
        assert_eq!(player.quantity("Iron Ring"), 0);
        assert_eq!(player.silver(), 0);
        assert_eq!(player.xp(Skill::Crafting), 5000);
    }
}
