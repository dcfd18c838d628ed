//! Player stat block: the persistent half of a character.

use super::{Attribute, CombatStats, max_hp_for};
use crate::config::CombatConfig;

/// Stats owned by a persistent [`Character`](crate::state::Character).
///
/// Level, constitution and HP are private so that `max_hp` can never drift
/// from its inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerStats {
    level: i32,
    pub defense: i32,
    pub psi: i32,
    pub str: i32,
    pub agi: i32,
    con: i32,
    pub cha: i32,
    hp: u32,
    max_hp: u32,
    xp: u32,
}

impl PlayerStats {
    /// Creates a fresh stat block at full health.
    ///
    /// Level is clamped to at least 1.
    pub fn new(level: i32, defense: i32, psi: i32, str: i32, agi: i32, con: i32, cha: i32) -> Self {
        let mut stats = Self {
            level: level.max(1),
            defense,
            psi,
            str,
            agi,
            con,
            cha,
            hp: 0,
            max_hp: 0,
            xp: 0,
        };
        stats.recalculate_hp();
        stats.hp = stats.max_hp;
        stats
    }

    /// Restores a stored HP value, clamped to max HP.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    /// Restores stored experience without triggering level-ups.
    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = xp;
        self
    }

    pub fn con(&self) -> i32 {
        self.con
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    /// Experience required to advance from `level`.
    pub fn xp_threshold(level: i32) -> u32 {
        let level = level.max(1) as u32;
        CombatConfig::XP_BASE.saturating_mul(level.saturating_mul(level))
    }

    /// Adds experience and applies every level-up it pays for.
    ///
    /// Each level-up consumes its threshold, recomputes max HP and heals
    /// [`CombatConfig::LEVEL_UP_HEAL`]. Returns the number of levels gained.
    pub fn gain_xp(&mut self, amount: u32) -> u32 {
        self.xp = self.xp.saturating_add(amount);

        let mut gained = 0;
        loop {
            let threshold = Self::xp_threshold(self.level);
            if self.xp < threshold {
                break;
            }
            self.xp -= threshold;
            self.level = self.level.saturating_add(1);
            self.recalculate_hp();
            self.hp = self
                .hp
                .saturating_add(CombatConfig::LEVEL_UP_HEAL)
                .min(self.max_hp);
            gained += 1;
        }
        gained
    }

    /// Raises one attribute by `points`.
    ///
    /// Constitution feeds max HP, so raising it recomputes the maximum without
    /// healing.
    pub fn raise(&mut self, attribute: Attribute, points: u32) {
        let points = points.min(i32::MAX as u32) as i32;
        match attribute {
            Attribute::Defense => self.defense = self.defense.saturating_add(points),
            Attribute::Psi => self.psi = self.psi.saturating_add(points),
            Attribute::Strength => self.str = self.str.saturating_add(points),
            Attribute::Agility => self.agi = self.agi.saturating_add(points),
            Attribute::Charisma => self.cha = self.cha.saturating_add(points),
            Attribute::Constitution => {
                self.con = self.con.saturating_add(points);
                self.recalculate_hp();
            }
        }
    }
}

impl Default for PlayerStats {
    /// Fresh recruit: level 1, STR 5, everything else 1.
    fn default() -> Self {
        Self::new(1, 1, 1, 5, 1, 1, 1)
    }
}

impl CombatStats for PlayerStats {
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
        self.max_hp = max_hp_for(self.level, self.con);
        self.hp = self.hp.min(self.max_hp);
    }
}
