//! # Economy Configuration
//!
//! Tunable numbers that are not part of the item catalog: stamina rate,
//! the RNG seed, and the perk effect tables. Loaded from TOML
//! (`data/economy.toml` ships the defaults); every field falls back to its
//! default when omitted.
//!
//! ```toml
//! [stamina]
//! seconds_per_point = 30
//!
//! [rng]
//! seed = 1592651789
//!
//! [effects.resource_saver]
//! "Resource Saver I" = 0.10
//! ```

use std::path::Path;

use homestead_shared::constants::{
    GROWTH_DISCOUNT_PERKS, RESOURCE_SAVER_PERKS, STAMINA_RATE_BUFFS, STAMINA_SECONDS_PER_POINT,
};
use serde::Deserialize;

use crate::error::{EconomyError, EconomyResult};
use crate::perks::{effect_table, EffectTable};

/// Seed used when no config overrides it.
pub const DEFAULT_SEED: u64 = 0x5EED_F00D;

/// Top-level economy configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Stamina accrual.
    pub stamina: StaminaConfig,
    /// Random number generation.
    pub rng: RngConfig,
    /// Perk effect tables.
    pub effects: EffectTables,
}

/// Stamina accrual settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    /// Seconds of game time per point at the base rate.
    pub seconds_per_point: u64,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            seconds_per_point: STAMINA_SECONDS_PER_POINT,
        }
    }
}

/// Random number generation settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RngConfig {
    /// Seed for the default bonus-yield roll source.
    pub seed: u64,
}

impl Default for RngConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

/// Effect tables consulted through [`sum_effects`](crate::perks::sum_effects).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectTables {
    /// Fraction taken off seed growth time.
    pub growth_discount: EffectTable,
    /// Chance per draw of one more free crafted unit.
    pub resource_saver: EffectTable,
    /// Added to the base stamina multiplier of 1.
    pub stamina_rate: EffectTable,
}

impl Default for EffectTables {
    fn default() -> Self {
        Self {
            growth_discount: effect_table(&GROWTH_DISCOUNT_PERKS),
            resource_saver: effect_table(&RESOURCE_SAVER_PERKS),
            stamina_rate: effect_table(&STAMINA_RATE_BUFFS),
        }
    }
}

impl EconomyConfig {
    /// Parses the TOML form.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML or invalid values.
    pub fn from_toml_str(text: &str) -> EconomyResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| EconomyError::InvalidConfig(format!("economy config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the file cannot be read, plus everything [`Self::from_toml_str`] rejects.
    pub fn load(path: impl AsRef<Path>) -> EconomyResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EconomyError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> EconomyResult<()> {
        if self.stamina.seconds_per_point == 0 {
            return Err(EconomyError::InvalidConfig(
                "stamina.seconds_per_point must be positive".to_string(),
            ));
        }

        let tables = [
            ("growth_discount", &self.effects.growth_discount),
            ("resource_saver", &self.effects.resource_saver),
            ("stamina_rate", &self.effects.stamina_rate),
        ];
        for (table_name, table) in tables {
            if let Some((perk, value)) = table.iter().find(|(_, v)| !v.is_finite() || **v < 0.0) {
                return Err(EconomyError::InvalidConfig(format!(
                    "effects.{table_name}.{perk} = {value} must be a non-negative number"
                )));
            }
        }

        // Any subset of perks must leave a chance below 1, or the bonus loop never ends.
        let total: f64 = self.effects.resource_saver.values().sum();
        if total >= 1.0 {
            return Err(EconomyError::InvalidConfig(format!(
                "effects.resource_saver sums to {total}, must be below 1"
            )));
        }

        Ok(())
    }
}
