//! # Homestead Economy
//!
//! Off-line simulator for a farming and crafting game's economy: what it
//! costs in silver, materials and time to reach a level or craft a batch of
//! items.
//!
//! ## Design Principles
//!
//! 1. **Data-driven** - Items, recipes and XP curves load from `data/`; perk
//!    effects load from config
//! 2. **Validated crafting** - A craft either commits in full or changes nothing
//! 3. **Injected randomness** - Bonus-yield rolls come from a [`RandomSource`]
//!    the caller chooses, so runs are reproducible
//! 4. **One actor** - A [`Player`] is driven by discrete calls on one thread;
//!    only the bundled catalog and XP table are shared
//!
//! ## Example
//!
//! ```rust,ignore
//! use homestead_economy::{Player, Skill};
//!
//! let mut player = Player::bundled()?
//!     .with_silver(300)
//!     .with_perk("Resource Saver I");
//!
//! let plan = player.catalog().plan("Fancy Pipe", 2)?;
//! for (item, qty) in &plan.raw_materials {
//!     player.add_item(item, *qty)?;
//! }
//!
//! player.craft("Iron Ring", 6)?;
//! let outcome = player.craft("Fancy Pipe", 2)?;
//! player.tick(60 * 10);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod config;
pub mod crafting;
pub mod error;
pub mod experience;
pub mod inventory;
pub mod item;
pub mod leveling;
pub mod market;
pub mod perks;
pub mod player;
pub mod rolls;

pub use catalog::{CraftPlan, ItemCatalog};
pub use config::EconomyConfig;
pub use crafting::CraftOutcome;
pub use error::{EconomyError, EconomyResult};
pub use experience::ExperienceTable;
pub use homestead_shared::Skill;
pub use inventory::{AddOutcome, Inventory};
pub use item::{Item, Rarity};
pub use perks::{sum_effects, PerkSet};
pub use player::{Clock, Player};
pub use rolls::{RandomSource, ScriptedRolls, SeededRolls};
