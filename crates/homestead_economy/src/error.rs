//! # Economy Error Types
//!
//! All errors that can occur in the economy system.

use std::collections::BTreeMap;

use homestead_shared::Skill;
use thiserror::Error;

/// Errors that can occur in the economy system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// No catalog item has this name.
    #[error("item not found: {0}")]
    NotFound(String),

    /// Attempted to remove more of an item than the inventory holds.
    #[error("insufficient quantity of {item}: requested {requested}, have {available}")]
    InsufficientQuantity {
        /// The item being removed.
        item: String,
        /// The amount requested.
        requested: u64,
        /// The amount held.
        available: u64,
    },

    /// Attempted to craft without every ingredient on hand.
    #[error("insufficient materials to craft {item}: missing {} ingredient(s)", .shortfall.len())]
    InsufficientMaterials {
        /// The item being crafted.
        item: String,
        /// Missing quantity per ingredient name.
        shortfall: BTreeMap<String, u64>,
    },

    /// Not enough silver for the transaction.
    #[error("insufficient funds: need {required} silver, have {available}")]
    InsufficientFunds {
        /// Silver required.
        required: u64,
        /// Silver held.
        available: u64,
    },

    /// The item has no recipe.
    #[error("item cannot be crafted: {0}")]
    NotCraftable(String),

    /// A craft was requested for zero units.
    #[error("craft count must be positive: {0}")]
    ZeroCount(String),

    /// A quantity, price or XP total does not fit in a `u64`.
    #[error("quantity overflow for {0}")]
    QuantityOverflow(String),

    /// The item has no buy price.
    #[error("item is not for sale: {0}")]
    NotForSale(String),

    /// The item has no sell price.
    #[error("item cannot be sold: {0}")]
    NotSellable(String),

    /// Level outside the attainable range.
    #[error("invalid level: {0}")]
    InvalidLevel(u8),

    /// The experience table has no curve for this skill.
    #[error("no experience curve for skill {0}")]
    MissingSkillCurve(Skill),

    /// Recipes reference each other in a loop.
    #[error("cycle detected in recipes at item {0}")]
    CycleDetected(String),

    /// Invalid data or configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
