//! # Balance Constants
//!
//! Bounds and default effect values used when no configuration file
//! overrides them.
//!
//! **NOTE:** the economy config (`economy.toml`) is the source of truth at
//! runtime. These values only seed `Default` impls.

// =============================================================================
// LEVELING
// =============================================================================

/// Lowest attainable level in any skill. Its XP threshold is always 0.
pub const MIN_LEVEL: u8 = 1;

/// Highest attainable level in any skill.
pub const MAX_LEVEL: u8 = 99;

/// Number of levels in an experience curve.
pub const LEVEL_COUNT: usize = (MAX_LEVEL - MIN_LEVEL + 1) as usize;

// =============================================================================
// STAMINA
// =============================================================================

/// Seconds of game time per stamina point at the base rate.
pub const STAMINA_SECONDS_PER_POINT: u64 = 30;

// =============================================================================
// PERKS
// =============================================================================

/// Growth-time discounts. Values stack additively.
pub const GROWTH_DISCOUNT_PERKS: [(&str, f64); 6] = [
    ("Quicker Farming I", 0.05),
    ("Quicker Farming II", 0.10),
    ("Quicker Farming III", 0.15),
    ("Quicker Farming IV", 0.20),
    ("Irrigation System I", 0.10),
    ("Irrigation System II", 0.20),
];

/// Chance that a craft yields one more free unit, re-rolled after each success.
pub const RESOURCE_SAVER_PERKS: [(&str, f64); 2] = [
    ("Resource Saver I", 0.10),
    ("Resource Saver II", 0.20),
];

/// Stamina accrual bonuses on top of the base multiplier of 1.
pub const STAMINA_RATE_BUFFS: [(&str, f64); 1] = [("Energy Drink", 1.0)];
