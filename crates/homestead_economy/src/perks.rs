//! # Perks and Effect Tables
//!
//! Perks are plain names held by a player. Every numeric effect they have
//! (growth discounts, bonus-yield chances, stamina multipliers) is resolved
//! through one primitive, [`sum_effects`], against a name → value table.
//! No call site hard-codes per-perk numbers.

use std::collections::{BTreeMap, BTreeSet};

/// Perk or buff name to effect value.
pub type EffectTable = BTreeMap<String, f64>;

/// Builds an effect table from static pairs.
#[must_use]
pub fn effect_table(entries: &[(&str, f64)]) -> EffectTable {
    entries
        .iter()
        .map(|&(name, value)| (name.to_string(), value))
        .collect()
}

/// Sums the table values of every active perk that appears in the table.
///
/// Returns 0.0 when nothing matches.
#[must_use]
pub fn sum_effects(active: &PerkSet, table: &EffectTable) -> f64 {
    active
        .iter()
        .filter_map(|perk| table.get(perk))
        .sum()
}

/// The set of perks and buffs a player currently holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerkSet {
    names: BTreeSet<String>,
}

impl PerkSet {
    /// Creates an empty perk set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a perk. Returns false if it was already held.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Removes a perk. Returns false if it was not held.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    /// True if the perk is held.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Held perk names, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.names.iter()
    }

    /// Number of held perks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no perks are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PerkSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestead_shared::constants::GROWTH_DISCOUNT_PERKS;

    #[test]
    fn test_no_match_is_zero() {
        let table = effect_table(&GROWTH_DISCOUNT_PERKS);
        let perks: PerkSet = ["Resource Saver I"].into_iter().collect();
        assert!(sum_effects(&perks, &table).abs() < f64::EPSILON);
        assert!(sum_effects(&PerkSet::new(), &table).abs() < f64::EPSILON);
    }

    #[test]
    fn test_matches_stack_additively() {
        let table = effect_table(&GROWTH_DISCOUNT_PERKS);
        let perks: PerkSet = ["Quicker Farming II", "Irrigation System II", "Unrelated"]
            .into_iter()
            .collect();
        assert!((sum_effects(&perks, &table) - 0.30).abs() < 1e-12);
    }

    #[test]
    fn test_add_remove() {
        let mut perks = PerkSet::new();
        assert!(perks.add("Quicker Farming I"));
        assert!(!perks.add("Quicker Farming I"));
        assert!(perks.contains("Quicker Farming I"));
        assert!(perks.remove("Quicker Farming I"));
        assert!(!perks.remove("Quicker Farming I"));
        assert!(perks.is_empty());
    }
}
