//! Skills that accumulate experience.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A skill with its own XP counter and experience curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Skill {
    /// Planting and harvesting crops.
    Farming = 0,
    /// Catching fish.
    Fishing = 1,
    /// Turning materials into items at the workshop.
    Crafting = 2,
    /// Exploring locations for drops.
    Exploring = 3,
    /// Cooking meals in the kitchen.
    Cooking = 4,
}

impl Skill {
    /// Number of skills.
    pub const COUNT: usize = 5;

    /// All skills in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Farming,
        Self::Fishing,
        Self::Crafting,
        Self::Exploring,
        Self::Cooking,
    ];

    /// Dense index, suitable for per-skill arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, as used in data files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Farming => "farming",
            Self::Fishing => "fishing",
            Self::Crafting => "crafting",
            Self::Exploring => "exploring",
            Self::Cooking => "cooking",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, skill) in Skill::ALL.iter().enumerate() {
            assert_eq!(skill.index(), i);
        }
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Skill::Crafting.to_string(), "crafting");
        assert_eq!(Skill::Exploring.as_str(), "exploring");
    }
}
