//! Observable results of controller commands and of the whole battle.

use crate::ai::EnemyAction;
use crate::combat::AttackResult;
use crate::state::{Fallen, Guard, Position, PsiEffect, StatusTick, UnitId};
use crate::stats::AttackKind;

use super::BattleOutcome;

/// Result of one accepted player command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionReport {
    Moved {
        unit: UnitId,
        to: Position,
    },
    Guarded {
        unit: UnitId,
        guard: Guard,
    },
    Attacked {
        attacker: UnitId,
        target: UnitId,
        kind: AttackKind,
        result: AttackResult,
        killed: bool,
    },
    Cast {
        caster: UnitId,
        target: UnitId,
        effect: PsiEffect,
        killed: bool,
    },
}

/// Status effects that fired for one unit at the start of its phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub unit: UnitId,
    pub tick: StatusTick,
}

/// Everything that happened during one enemy phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyPhaseReport {
    pub turn: u32,
    /// Enemy turn-start effects (quiet ticks omitted).
    pub ticks: Vec<TickReport>,
    pub actions: Vec<EnemyAction>,
    /// Units removed during this phase, both sides.
    pub fallen: Vec<Fallen>,
    /// Set when the phase ended the battle.
    pub outcome: Option<BattleOutcome>,
}

/// A character that survived the battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurvivorReport {
    pub roster_index: usize,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
}

/// Final battle result handed to progression.
///
/// Owns all of its data so it can outlive the borrow of the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub turns: u32,
    pub survivors: Vec<SurvivorReport>,
    /// Player units that fell, in order of death.
    pub fallen: Vec<Fallen>,
    pub defeated_enemy_levels: Vec<i32>,
    /// Experience granted to each survivor.
    pub xp_award: u32,
}

impl BattleReport {
    pub fn is_victory(&self) -> bool {
        self.outcome == BattleOutcome::Victory
    }

    /// Names of the characters lost in this battle.
    pub fn fallen_names(&self) -> impl Iterator<Item = &str> {
        self.fallen.iter().map(|fallen| fallen.name.as_str())
    }
}
