//! # Homestead Shared
//!
//! Common vocabulary used by the economy engine and its data files.
//!
//! ## RULE
//!
//! This crate must stay logic-free. If a function needs a player, an
//! inventory or a catalog, it belongs in `homestead_economy`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod skills;

pub use constants::{MAX_LEVEL, MIN_LEVEL, STAMINA_SECONDS_PER_POINT};
pub use skills::Skill;
