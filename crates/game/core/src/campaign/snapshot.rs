//! Persisted campaign records.
//!
//! These mirror the save file layout one-to-one. Parsing lenient input into
//! them is the content crate's job; this module only converts between the
//! records and the live types.

use std::collections::BTreeMap;

use crate::state::Character;
use crate::stats::{CombatStats, PlayerStats};

use super::{CityAccount, CorpAccount};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignSnapshot {
    pub turn: u32,
    /// `None` when the save did not carry a pool; recomputed on load.
    pub budget_pool: Option<i64>,
    pub corp_budget: BTreeMap<CorpAccount, i64>,
    pub city_budget: BTreeMap<CityAccount, i64>,
    pub characters: Vec<CharacterRecord>,
}

impl Default for CampaignSnapshot {
    fn default() -> Self {
        Self {
            turn: 1,
            budget_pool: None,
            corp_budget: BTreeMap::new(),
            city_budget: BTreeMap::new(),
            characters: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRecord {
    pub name: String,
    pub role: String,
    pub stats: StatsRecord,
    pub pending_points: u32,
}

/// Flat stat record. `max_hp` is written for readers of the file but is
/// recomputed from level and constitution on load.
///
/// `hp` is `None` when a save left it out, which restores full health. An
/// explicit zero is kept: that character fell in battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsRecord {
    pub level: i32,
    pub defense: i32,
    pub psi: i32,
    pub str: i32,
    pub agi: i32,
    pub con: i32,
    pub cha: i32,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub hp: Option<u32>,
    pub max_hp: u32,
    pub xp: u32,
}

impl Default for StatsRecord {
    fn default() -> Self {
        StatsRecord::from(&PlayerStats::default())
    }
}

impl From<&PlayerStats> for StatsRecord {
    fn from(stats: &PlayerStats) -> Self {
        Self {
            level: stats.level(),
            defense: stats.defense,
            psi: stats.psi,
            str: stats.str,
            agi: stats.agi,
            con: stats.con(),
            cha: stats.cha,
            hp: Some(stats.hp()),
            max_hp: stats.max_hp(),
            xp: stats.xp(),
        }
    }
}

impl From<StatsRecord> for PlayerStats {
    fn from(record: StatsRecord) -> Self {
        let stats = PlayerStats::new(
            record.level,
            record.defense,
            record.psi,
            record.str,
            record.agi,
            record.con,
            record.cha,
        )
        .with_xp(record.xp);
        match record.hp {
            Some(hp) => stats.with_hp(hp),
            None => stats,
        }
    }
}

impl From<&Character> for CharacterRecord {
    fn from(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            role: character.role.clone(),
            stats: StatsRecord::from(&character.stats),
            pending_points: character.pending_points,
        }
    }
}

impl From<CharacterRecord> for Character {
    fn from(record: CharacterRecord) -> Self {
        Character::new(record.name)
            .with_role(record.role)
            .with_stats(PlayerStats::from(record.stats))
            .with_pending_points(record.pending_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_max_hp_is_recomputed() {
        let record = StatsRecord {
            level: 2,
            con: 3,
            hp: Some(99),
            max_hp: 99,
            ..StatsRecord::default()
        };

        let stats = PlayerStats::from(record);

        assert_eq!(stats.max_hp(), 23);
        assert_eq!(stats.hp(), 23);
    }

    #[test]
    fn post_battle_character_round_trips() {
        let mut agent = Character::new("Agent 1").with_role("hacker");
        agent.grant_xp(420);
        agent.stats.set_hp(4);

        let restored = Character::from(CharacterRecord::from(&agent));

        assert_eq!(restored, agent);
    }

    #[test]
    fn missing_hp_is_full_but_zero_is_kept() {
        let unset = StatsRecord {
            hp: None,
            ..StatsRecord::default()
        };
        assert_eq!(PlayerStats::from(unset).hp(), 11);

        let fallen = StatsRecord {
            hp: Some(0),
            ..StatsRecord::default()
        };
        assert_eq!(PlayerStats::from(fallen).hp(), 0);
    }
}
