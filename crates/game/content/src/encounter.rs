//! Enemy spawn tables.

use game_core::{Battle, EnemyStats, Position, UnitId};

/// One enemy to place on the grid.
///
/// Attributes left out of a data file default to 1, like a fresh spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemySpawn {
    pub name: String,
    pub level: i32,
    pub defense: i32,
    pub psi: i32,
    pub str: i32,
    pub agi: i32,
    pub position: (i32, i32),
}

impl EnemySpawn {
    pub fn new(name: impl Into<String>, level: i32, position: (i32, i32)) -> Self {
        Self {
            name: name.into(),
            level,
            position,
            ..Self::default()
        }
    }

    pub fn stats(&self) -> EnemyStats {
        EnemyStats::new(self.level, self.defense, self.psi, self.str, self.agi)
    }

    pub fn position(&self) -> Position {
        Position::new(self.position.0, self.position.1)
    }
}

impl Default for EnemySpawn {
    fn default() -> Self {
        Self {
            name: "Enemy".to_string(),
            level: 1,
            defense: 1,
            psi: 1,
            str: 1,
            agi: 1,
            position: (0, 0),
        }
    }
}

/// The enemy side of one battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EncounterSpec {
    pub spawns: Vec<EnemySpawn>,
}

impl EncounterSpec {
    pub fn new(spawns: Vec<EnemySpawn>) -> Self {
        Self { spawns }
    }

    /// One level-1 enemy at (7, 7).
    pub fn skirmish() -> Self {
        Self::new(vec![EnemySpawn::new("Street Drone", 1, (7, 7))])
    }

    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty()
    }

    /// Spawns every enemy into `battle`, in table order.
    pub fn spawn_into(&self, battle: &mut Battle<'_>) -> Vec<UnitId> {
        self.spawns
            .iter()
            .map(|spawn| battle.spawn_enemy(spawn.name.clone(), spawn.stats(), spawn.position()))
            .collect()
    }
}
