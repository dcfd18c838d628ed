//! Campaign save files.
//!
//! Saves are JSON written by [`SnapshotWriter`]. Reading is deliberately
//! forgiving: a save from an older build, or one edited by hand, still loads.
//! Missing fields take their defaults, fields of the wrong type count as
//! missing, unknown budget accounts are dropped, and a file that is not a
//! JSON object at all loads as a fresh campaign.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use game_core::{CampaignSnapshot, CharacterRecord, CityAccount, CorpAccount, StatsRecord};

use crate::loaders::{LoadResult, read_file};

/// Name given to a saved character without one.
pub const DEFAULT_NAME: &str = "Unnamed";
/// Role given to a saved character without one.
pub const DEFAULT_ROLE: &str = "agent";

/// Reader for campaign save files.
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Reads a save file. Only I/O failures are errors.
    pub fn load(path: &Path) -> LoadResult<CampaignSnapshot> {
        let content = read_file(path)?;
        debug!(path = %path.display(), bytes = content.len(), "read save file");
        Ok(Self::parse(&content))
    }

    /// Parses save file text, never failing.
    pub fn parse(content: &str) -> CampaignSnapshot {
        let value: Value = match serde_json::from_str(content) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "save file is not valid JSON; starting a new campaign");
                return CampaignSnapshot::default();
            }
        };
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> CampaignSnapshot {
        let Some(root) = value.as_object() else {
            warn!("save file root is not an object; starting a new campaign");
            return CampaignSnapshot::default();
        };

        let turn = int_field(root, "turn")
            .and_then(|turn| u32::try_from(turn).ok())
            .filter(|&turn| turn >= 1)
            .unwrap_or(1);

        let characters = root
            .get("characters")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(character_record).collect())
            .unwrap_or_default();

        CampaignSnapshot {
            turn,
            budget_pool: int_field(root, "budget_pool"),
            corp_budget: accounts::<CorpAccount>(root.get("corp_budget")),
            city_budget: accounts::<CityAccount>(root.get("city_budget")),
            characters,
        }
    }
}

/// Writer for campaign save files.
pub struct SnapshotWriter;

impl SnapshotWriter {
    pub fn to_string(snapshot: &CampaignSnapshot) -> LoadResult<String> {
        serde_json::to_string_pretty(snapshot)
            .map_err(|e| anyhow::anyhow!("Failed to serialize campaign: {}", e))
    }

    /// Writes `snapshot` as pretty JSON, creating parent directories.
    pub fn save(path: &Path, snapshot: &CampaignSnapshot) -> LoadResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
            })?;
        }
        let content = Self::to_string(snapshot)?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))?;
        debug!(path = %path.display(), turn = snapshot.turn, "wrote save file");
        Ok(())
    }
}

fn int_field(object: &Map<String, Value>, key: &str) -> Option<i64> {
    object.get(key).and_then(Value::as_i64)
}

/// Attribute values outside this range are clamped on load.
pub const ATTRIBUTE_LIMIT: i32 = 100_000;

fn attribute(object: &Map<String, Value>, key: &str) -> Option<i32> {
    let value = int_field(object, key)?;
    let clamped = value.clamp(-i64::from(ATTRIBUTE_LIMIT), i64::from(ATTRIBUTE_LIMIT));
    if clamped != value {
        warn!(key, value, clamped, "attribute out of range");
    }
    i32::try_from(clamped).ok()
}

fn count(object: &Map<String, Value>, key: &str) -> Option<u32> {
    int_field(object, key).and_then(|value| u32::try_from(value).ok())
}

fn text(object: &Map<String, Value>, key: &str, default: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn accounts<K>(value: Option<&Value>) -> BTreeMap<K, i64>
where
    K: FromStr + Ord,
{
    let Some(object) = value.and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    object
        .iter()
        .filter_map(|(key, amount)| {
            let Ok(account) = K::from_str(key) else {
                debug!(account = %key, "ignoring unknown budget account");
                return None;
            };
            amount.as_i64().map(|amount| (account, amount))
        })
        .collect()
}

fn character_record(value: &Value) -> Option<CharacterRecord> {
    let Some(object) = value.as_object() else {
        warn!("skipping character entry that is not an object");
        return None;
    };

    let stats = object
        .get("stats")
        .and_then(Value::as_object)
        .map(stats_record)
        .unwrap_or_else(|| StatsRecord {
            hp: None,
            ..StatsRecord::default()
        });

    Some(CharacterRecord {
        name: text(object, "name", DEFAULT_NAME),
        role: text(object, "role", DEFAULT_ROLE),
        stats,
        pending_points: count(object, "pending_points").unwrap_or(0),
    })
}

/// A missing `hp` stays `None` and restores full health; an explicit 0 is
/// kept so a fallen character is not revived.
fn stats_record(object: &Map<String, Value>) -> StatsRecord {
    let defaults = StatsRecord::default();
    StatsRecord {
        level: attribute(object, "level").unwrap_or(defaults.level),
        defense: attribute(object, "defense").unwrap_or(defaults.defense),
        psi: attribute(object, "psi").unwrap_or(defaults.psi),
        str: attribute(object, "str").unwrap_or(defaults.str),
        agi: attribute(object, "agi").unwrap_or(defaults.agi),
        con: attribute(object, "con").unwrap_or(defaults.con),
        cha: attribute(object, "cha").unwrap_or(defaults.cha),
        hp: count(object, "hp"),
        max_hp: count(object, "max_hp").unwrap_or(0),
        xp: count(object, "xp").unwrap_or(0),
    }
}
