//! Turn phases and the target-selection sub-state.

use std::fmt;

use crate::state::{PsiAbility, UnitId};
use crate::stats::AttackKind;

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Action waiting for a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingAction {
    Attack(AttackKind),
    Ability(PsiAbility),
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingAction::Attack(kind) => write!(f, "{kind} attack"),
            PendingAction::Ability(ability) => write!(f, "psi {ability}"),
        }
    }
}

/// Direction for cycling the target cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Next,
    Previous,
}

/// Candidate list and cursor for a pending action.
///
/// Candidates are fixed when the action is declared. The cursor always points
/// at a valid candidate and wraps in both directions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetSelection {
    pub actor: UnitId,
    pub action: PendingAction,
    candidates: Vec<UnitId>,
    cursor: usize,
}

impl TargetSelection {
    /// Returns `None` when there is nothing to select.
    pub fn new(actor: UnitId, action: PendingAction, candidates: Vec<UnitId>) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }
        Some(Self {
            actor,
            action,
            candidates,
            cursor: 0,
        })
    }

    pub fn candidates(&self) -> &[UnitId] {
        &self.candidates
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> UnitId {
        self.candidates[self.cursor]
    }

    pub fn cycle(&mut self, direction: CycleDirection) -> UnitId {
        let len = self.candidates.len();
        self.cursor = match direction {
            CycleDirection::Next => (self.cursor + 1) % len,
            CycleDirection::Previous => (self.cursor + len - 1) % len,
        };
        self.selected()
    }
}

/// Current phase of the battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    PlayerTurn,
    TargetSelection(TargetSelection),
    EnemyTurn,
    Ended(BattleOutcome),
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::PlayerTurn => PhaseKind::PlayerTurn,
            Phase::TargetSelection(_) => PhaseKind::TargetSelection,
            Phase::EnemyTurn => PhaseKind::EnemyTurn,
            Phase::Ended(_) => PhaseKind::Ended,
        }
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self {
            Phase::Ended(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

/// Payload-free phase discriminant, used in errors and the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PhaseKind {
    PlayerTurn,
    TargetSelection,
    EnemyTurn,
    Ended,
}

impl PhaseKind {
    /// Legal phase transitions.
    pub fn allows(self, next: PhaseKind) -> bool {
        use PhaseKind::*;
        matches!(
            (self, next),
            (PlayerTurn, TargetSelection)
                | (PlayerTurn, EnemyTurn)
                | (TargetSelection, PlayerTurn)
                | (TargetSelection, EnemyTurn)
                | (EnemyTurn, PlayerTurn)
                | (EnemyTurn, Ended)
        )
    }
}
