//! Post-battle progression: experience, level-ups and casualties.
//!
//! Runs after the [`TurnController`](crate::engine::TurnController) has been
//! dropped, so the roster is no longer borrowed by battle units. HP changes
//! are already on the characters (units wrote through to them); this layer
//! only grants experience and removes the dead.

use tracing::{info, warn};

use crate::config::CombatConfig;
use crate::engine::{BattleOutcome, BattleReport};
use crate::error::ProgressionError;
use crate::state::{Character, Fallen, Side};
use crate::stats::{Attribute, CombatStats};

/// Experience each survivor earns from a battle.
///
/// Victory pays `level × xp_per_enemy_level` for every defeated enemy.
/// Defeat pays nothing.
pub fn battle_experience(
    outcome: BattleOutcome,
    defeated_enemy_levels: &[i32],
    config: &CombatConfig,
) -> u32 {
    if outcome == BattleOutcome::Defeat {
        return 0;
    }
    defeated_enemy_levels
        .iter()
        .map(|&level| (level.max(0) as u32).saturating_mul(config.xp_per_enemy_level))
        .fold(0u32, u32::saturating_add)
}

/// Per-character outcome of [`ProgressionService::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterProgress {
    pub name: String,
    pub xp_gained: u32,
    pub levels_gained: u32,
    pub level: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionSummary {
    pub progress: Vec<CharacterProgress>,
    /// Names of characters removed from the roster.
    pub removed: Vec<String>,
}

impl ProgressionSummary {
    pub fn total_levels(&self) -> u32 {
        self.progress.iter().map(|p| p.levels_gained).sum()
    }
}

/// Applies battle results to the persistent roster.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressionService;

impl ProgressionService {
    /// Grants the battle's experience to survivors and removes the fallen.
    ///
    /// Report indices refer to the roster as it was when the battle was set
    /// up, so experience is granted before anything is removed, and removal
    /// runs from the highest index down.
    pub fn apply(roster: &mut Vec<Character>, report: &BattleReport) -> ProgressionSummary {
        let mut summary = ProgressionSummary::default();

        for survivor in &report.survivors {
            let Some(character) = roster.get_mut(survivor.roster_index) else {
                warn!(
                    index = survivor.roster_index,
                    name = %survivor.name,
                    "survivor missing from roster"
                );
                continue;
            };

            let levels_gained = character.grant_xp(report.xp_award);
            if levels_gained > 0 {
                info!(
                    name = %character.name,
                    level = character.stats.level(),
                    pending_points = character.pending_points,
                    "level up"
                );
            }
            summary.progress.push(CharacterProgress {
                name: character.name.clone(),
                xp_gained: report.xp_award,
                levels_gained,
                level: character.stats.level(),
            });
        }

        summary.removed = Self::remove_casualties(roster, &report.fallen);
        summary
    }

    /// Removes fallen player characters from the roster and returns their
    /// names.
    ///
    /// Used on its own when a battle is abandoned before it resolves, so the
    /// dead are still buried. Indices are removed from the highest down.
    pub fn remove_casualties(roster: &mut Vec<Character>, fallen: &[Fallen]) -> Vec<String> {
        let mut indices: Vec<usize> = fallen
            .iter()
            .filter(|fallen| fallen.side == Side::Player)
            .filter_map(|fallen| fallen.roster_index)
            .collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();

        let mut removed = Vec::with_capacity(indices.len());
        for index in indices {
            if index >= roster.len() {
                warn!(index, "fallen character missing from roster");
                continue;
            }
            let character = roster.remove(index);
            info!(name = %character.name, "character lost");
            removed.push(character.name);
        }
        removed
    }

    /// Spends pending points on one attribute.
    pub fn allocate(
        character: &mut Character,
        attribute: Attribute,
        points: u32,
    ) -> Result<(), ProgressionError> {
        if points == 0 {
            return Err(ProgressionError::ZeroPoints);
        }
        if points > character.pending_points {
            return Err(ProgressionError::InsufficientPoints {
                requested: points,
                available: character.pending_points,
            });
        }

        character.stats.raise(attribute, points);
        character.pending_points -= points;
        Ok(())
    }
}
