//! # Experience Table
//!
//! Per-skill cumulative XP thresholds, one per level, supplied as data
//! (`data/experience.toml`). The table is read-only once built; conversions
//! between XP and levels live in [`crate::leveling`].
//!
//! ## File format
//!
//! ```toml
//! [farming]
//! thresholds = [0, 5758, 12149, ...]   # 99 entries, level 1 first
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use homestead_shared::constants::LEVEL_COUNT;
use homestead_shared::Skill;
use serde::Deserialize;

use crate::error::{EconomyError, EconomyResult};

const BUNDLED_EXPERIENCE: &str = include_str!("../data/experience.toml");

static BUNDLED: OnceLock<EconomyResult<Arc<ExperienceTable>>> = OnceLock::new();

#[derive(Deserialize)]
struct RawCurve {
    thresholds: Vec<u64>,
}

/// Cumulative XP thresholds per skill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExperienceTable {
    curves: HashMap<Skill, Vec<u64>>,
}

impl ExperienceTable {
    /// Builds a table from per-skill threshold lists.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` unless every curve has exactly one threshold per level,
    /// starts at 0 and strictly increases.
    pub fn from_curves(curves: impl IntoIterator<Item = (Skill, Vec<u64>)>) -> EconomyResult<Self> {
        let curves: HashMap<Skill, Vec<u64>> = curves.into_iter().collect();
        for (skill, thresholds) in &curves {
            validate_curve(*skill, thresholds)?;
        }
        tracing::info!(skills = curves.len(), "experience table built");
        Ok(Self { curves })
    }

    /// Parses the TOML form.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML, plus everything [`Self::from_curves`] rejects.
    pub fn from_toml_str(text: &str) -> EconomyResult<Self> {
        let raw: HashMap<Skill, RawCurve> = toml::from_str(text)
            .map_err(|e| EconomyError::InvalidConfig(format!("experience table: {e}")))?;
        Self::from_curves(raw.into_iter().map(|(skill, curve)| (skill, curve.thresholds)))
    }

    /// Reads and parses a table file.
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

    /// The table bundled with the crate, built on first access.
    ///
    /// # Errors
    ///
    /// Returns the build error if the bundled asset is invalid.
    pub fn bundled() -> EconomyResult<Arc<Self>> {
        BUNDLED
            .get_or_init(|| Self::from_toml_str(BUNDLED_EXPERIENCE).map(Arc::new))
            .clone()
    }

    /// Thresholds for a skill, level 1 first.
    ///
    /// # Errors
    ///
    /// `MissingSkillCurve` if the table has no curve for the skill.
    pub fn curve(&self, skill: Skill) -> EconomyResult<&[u64]> {
        self.curves
            .get(&skill)
            .map(Vec::as_slice)
            .ok_or(EconomyError::MissingSkillCurve(skill))
    }

    /// True if the table has a curve for the skill.
    #[must_use]
    pub fn has_skill(&self, skill: Skill) -> bool {
        self.curves.contains_key(&skill)
    }
}

fn validate_curve(skill: Skill, thresholds: &[u64]) -> EconomyResult<()> {
    if thresholds.len() != LEVEL_COUNT {
        return Err(EconomyError::InvalidConfig(format!(
            "{skill} curve has {} levels, expected {LEVEL_COUNT}",
            thresholds.len()
        )));
    }
    if thresholds[0] != 0 {
        return Err(EconomyError::InvalidConfig(format!(
            "{skill} curve must start at 0"
        )));
    }
    if let Some(pos) = thresholds.windows(2).position(|w| w[0] >= w[1]) {
        return Err(EconomyError::InvalidConfig(format!(
            "{skill} curve does not increase at level {}",
            pos + 2
        )));
    }
    Ok(())
}
