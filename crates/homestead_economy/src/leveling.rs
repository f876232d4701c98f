//! Conversion between XP and levels against an [`ExperienceTable`].
//!
//! Levels are bounded to `MIN_LEVEL..=MAX_LEVEL`. XP beyond the last
//! threshold still reads as `MAX_LEVEL`.

use homestead_shared::{Skill, MAX_LEVEL, MIN_LEVEL};

use crate::error::{EconomyError, EconomyResult};
use crate::experience::ExperienceTable;

/// Highest level whose threshold is at or below `xp`.
///
/// # Errors
///
/// `MissingSkillCurve` if the table has no curve for the skill.
pub fn level_for(table: &ExperienceTable, skill: Skill, xp: u64) -> EconomyResult<u8> {
    let curve = table.curve(skill)?;
    // Level 1 sits at 0, so at least one threshold always qualifies.
    let reached = curve.partition_point(|&threshold| threshold <= xp);
    let level = u8::try_from(reached).unwrap_or(MAX_LEVEL);
    Ok(level.clamp(MIN_LEVEL, MAX_LEVEL))
}

/// Cumulative XP threshold of `level`.
///
/// # Errors
///
/// - `InvalidLevel` outside `MIN_LEVEL..=MAX_LEVEL`
/// - `MissingSkillCurve` if the table has no curve for the skill
pub fn xp_for(table: &ExperienceTable, skill: Skill, level: u8) -> EconomyResult<u64> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(EconomyError::InvalidLevel(level));
    }
    let curve = table.curve(skill)?;
    curve
        .get(usize::from(level - MIN_LEVEL))
        .copied()
        .ok_or(EconomyError::InvalidLevel(level))
}
