//! Enemy stat block, generated per battle.

use super::{CombatStats, max_hp_for};

/// Stats for a spawned enemy. Lives only as long as its battle unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyStats {
    level: i32,
    pub defense: i32,
    pub psi: i32,
    pub str: i32,
    pub agi: i32,
    hp: u32,
    max_hp: u32,
}

impl EnemyStats {
    /// Spawns a fresh enemy at full health. Level is clamped to at least 1.
    pub fn new(level: i32, defense: i32, psi: i32, str: i32, agi: i32) -> Self {
        let mut stats = Self {
            level: level.max(1),
            defense,
            psi,
            str,
            agi,
            hp: 0,
            max_hp: 0,
        };
        stats.recalculate_hp();
        stats.hp = stats.max_hp;
        stats
    }

    /// Baseline enemy of the given level with every attribute at 1.
    pub fn of_level(level: i32) -> Self {
        Self::new(level, 1, 1, 1, 1)
    }
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self::of_level(1)
    }
}

impl CombatStats for EnemyStats {
    fn level(&self) -> i32 {
        self.level
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn strength(&self) -> i32 {
        self.str
    }

    fn agility(&self) -> i32 {
        self.agi
    }

    fn psi(&self) -> i32 {
        self.psi
    }

    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }

    fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    fn recalculate_hp(&mut self) {
        self.max_hp = max_hp_for(self.level, 0);
        self.hp = self.hp.min(self.max_hp);
    }
}
