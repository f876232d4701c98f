//! # Player State
//!
//! A single simulated player: inventory, silver, per-skill XP, perks and a
//! stamina clock. One actor, driven by discrete calls; run one `Player` per
//! thread if you need parallel simulations.
//!
//! Crafting lives in [`crate::crafting`] and buying/selling in
//! [`crate::market`]; both extend `Player` with their own `impl` blocks.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut player = Player::bundled()?.with_silver(150);
//! player.add_item("Iron", 1)?;
//! player.add_item("Wood", 2)?;
//! player.add_item("Iron Ring", 3)?;
//! player.craft("Fancy Pipe", 1)?;
//! assert_eq!(player.xp(Skill::Crafting), 5000);
//! ```

use std::sync::Arc;

use homestead_shared::Skill;

use crate::catalog::ItemCatalog;
use crate::config::EconomyConfig;
use crate::error::EconomyResult;
use crate::experience::ExperienceTable;
use crate::inventory::{AddOutcome, Inventory};
use crate::leveling;
use crate::perks::{sum_effects, EffectTable, PerkSet};
use crate::rolls::SeededRolls;

/// Elapsed game time and the stamina it has produced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Clock {
    /// Seconds advanced through [`Player::tick`].
    pub elapsed_secs: u64,
    /// Stamina accrued so far. Uncapped.
    pub stamina: f64,
}

/// A simulated player.
#[derive(Debug)]
pub struct Player<R = SeededRolls> {
    pub(crate) catalog: Arc<ItemCatalog>,
    pub(crate) experience: Arc<ExperienceTable>,
    pub(crate) config: Arc<EconomyConfig>,
    pub(crate) inventory: Inventory,
    pub(crate) silver: u64,
    pub(crate) xp: [u64; Skill::COUNT],
    pub(crate) perks: PerkSet,
    pub(crate) clock: Clock,
    pub(crate) rolls: R,
}

impl Player<SeededRolls> {
    /// Creates a player with nothing, using the default config.
    #[must_use]
    pub fn new(catalog: Arc<ItemCatalog>, experience: Arc<ExperienceTable>) -> Self {
        Self::with_config(catalog, experience, Arc::new(EconomyConfig::default()))
    }

    /// Creates a player with nothing, seeding its rolls from `config`.
    #[must_use]
    pub fn with_config(
        catalog: Arc<ItemCatalog>,
        experience: Arc<ExperienceTable>,
        config: Arc<EconomyConfig>,
    ) -> Self {
        let rolls = SeededRolls::new(config.rng.seed);
        Self {
            catalog,
            experience,
            config,
            inventory: Inventory::new(),
            silver: 0,
            xp: [0; Skill::COUNT],
            perks: PerkSet::new(),
            clock: Clock::default(),
            rolls,
        }
    }

    /// Creates a player against the bundled catalog and experience table.
    ///
    /// # Errors
    ///
    /// Returns the load error if a bundled asset is invalid.
    pub fn bundled() -> EconomyResult<Self> {
        Ok(Self::new(ItemCatalog::bundled()?, ExperienceTable::bundled()?))
    }
}

impl<R> Player<R> {
    /// Replaces the roll source used by crafting bonuses.
    #[must_use]
    pub fn with_rolls<S>(self, rolls: S) -> Player<S> {
        Player {
            catalog: self.catalog,
            experience: self.experience,
            config: self.config,
            inventory: self.inventory,
            silver: self.silver,
            xp: self.xp,
            perks: self.perks,
            clock: self.clock,
            rolls,
        }
    }

    /// Sets the starting silver balance.
    #[must_use]
    pub fn with_silver(mut self, silver: u64) -> Self {
        self.silver = silver;
        self
    }

    /// Caps every item type at `max` units.
    #[must_use]
    pub fn with_max_inventory(mut self, max: u64) -> Self {
        self.inventory.set_max_per_item(Some(max));
        self
    }

    /// Adds a starting perk.
    #[must_use]
    pub fn with_perk(mut self, name: impl Into<String>) -> Self {
        self.perks.add(name);
        self
    }

    /// The catalog this player resolves item names against.
    #[must_use]
    pub fn catalog(&self) -> &Arc<ItemCatalog> {
        &self.catalog
    }

    /// The experience table used for levels.
    #[must_use]
    pub fn experience(&self) -> &Arc<ExperienceTable> {
        &self.experience
    }

    /// The economy configuration.
    #[must_use]
    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// The inventory.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Quantity of an item in the main inventory.
    #[must_use]
    pub fn quantity(&self, item: &str) -> u64 {
        self.inventory.quantity(item)
    }

    /// Per-item capacity, if bounded.
    #[must_use]
    pub const fn max_inventory(&self) -> Option<u64> {
        self.inventory.max_per_item()
    }

    /// Changes the per-item capacity.
    pub fn set_max_inventory(&mut self, max: Option<u64>) {
        self.inventory.set_max_per_item(max);
    }

    /// Silver balance.
    #[must_use]
    pub const fn silver(&self) -> u64 {
        self.silver
    }

    /// Sets the silver balance.
    pub fn set_silver(&mut self, silver: u64) {
        self.silver = silver;
    }

    /// Adds units of a catalog item, overflowing what doesn't fit.
    ///
    /// # Errors
    ///
    /// `NotFound` if the item is not in the catalog.
    pub fn add_item(&mut self, name: &str, count: u64) -> EconomyResult<AddOutcome> {
        self.catalog.lookup(name)?;
        Ok(self.inventory.add(name, count))
    }

    /// Removes units of an item from the main inventory.
    ///
    /// # Errors
    ///
    /// `InsufficientQuantity` if fewer than `count` are held; nothing changes.
    pub fn remove_item(&mut self, name: &str, count: u64) -> EconomyResult<()> {
        self.inventory.remove(name, count)
    }

    /// Overwrites the held quantity of a catalog item, ignoring capacity.
    ///
    /// # Errors
    ///
    /// `NotFound` if the item is not in the catalog.
    pub fn set_quantity(&mut self, name: &str, count: u64) -> EconomyResult<()> {
        self.catalog.lookup(name)?;
        self.inventory.set_quantity(name, count);
        Ok(())
    }

    /// Drains the overflow balances.
    pub fn take_overflow(&mut self) -> std::collections::BTreeMap<String, u64> {
        self.inventory.take_overflow()
    }

    // -------------------------------------------------------------------------
    // Perks
    // -------------------------------------------------------------------------

    /// Held perks.
    #[must_use]
    pub const fn perks(&self) -> &PerkSet {
        &self.perks
    }

    /// Grants a perk. Returns false if already held.
    pub fn add_perk(&mut self, name: impl Into<String>) -> bool {
        self.perks.add(name)
    }

    /// Removes a perk. Returns false if not held.
    pub fn remove_perk(&mut self, name: &str) -> bool {
        self.perks.remove(name)
    }

    /// Sum of `table` values over the perks this player holds. 0.0 if none match.
    #[must_use]
    pub fn perk_value(&self, table: &EffectTable) -> f64 {
        sum_effects(&self.perks, table)
    }

    // -------------------------------------------------------------------------
    // Experience
    // -------------------------------------------------------------------------

    /// XP accumulated in a skill.
    #[must_use]
    pub const fn xp(&self, skill: Skill) -> u64 {
        self.xp[skill.index()]
    }

    /// Credits XP to a skill.
    pub fn gain_xp(&mut self, skill: Skill, amount: u64) {
        let counter = &mut self.xp[skill.index()];
        *counter = counter.saturating_add(amount);
    }

    /// Current level in a skill.
    ///
    /// # Errors
    ///
    /// `MissingSkillCurve` if the experience table lacks the skill.
    pub fn level(&self, skill: Skill) -> EconomyResult<u8> {
        leveling::level_for(&self.experience, skill, self.xp(skill))
    }

    /// Sets a skill to exactly the XP threshold of `level`.
    ///
    /// This is the only way XP goes down.
    ///
    /// # Errors
    ///
    /// - `InvalidLevel` outside the attainable range
    /// - `MissingSkillCurve` if the experience table lacks the skill
    pub fn set_level(&mut self, skill: Skill, level: u8) -> EconomyResult<()> {
        let xp = leveling::xp_for(&self.experience, skill, level)?;
        self.xp[skill.index()] = xp;
        tracing::debug!(%skill, level, xp, "level set");
        Ok(())
    }

    /// XP still needed to reach `level`. 0 if already there.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_level`].
    pub fn xp_until(&self, skill: Skill, level: u8) -> EconomyResult<u64> {
        let target = leveling::xp_for(&self.experience, skill, level)?;
        Ok(target.saturating_sub(self.xp(skill)))
    }

    // -------------------------------------------------------------------------
    // Time
    // -------------------------------------------------------------------------

    /// Stamina accrued so far.
    #[must_use]
    pub fn stamina(&self) -> f64 {
        self.clock.stamina
    }

    /// Seconds advanced so far.
    #[must_use]
    pub const fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs
    }

    /// The clock.
    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Advances time by `seconds`, accruing stamina.
    ///
    /// The base rate is one point per `stamina.seconds_per_point`, scaled by
    /// 1 plus the player's stamina-rate effects.
    pub fn tick(&mut self, seconds: u64) {
        let multiplier = 1.0 + self.perk_value(&self.config.effects.stamina_rate);
        let gained =
            seconds as f64 / self.config.stamina.seconds_per_point as f64 * multiplier;

        self.clock.elapsed_secs = self.clock.elapsed_secs.saturating_add(seconds);
        self.clock.stamina += gained;
    }
}
