//! Common error infrastructure for game-core.
//!
//! Every rejected command in the combat core is a no-op: validation always
//! runs before mutation, so an `Err` guarantees the battle is unchanged.
//! Errors carry enough context (unit, distance, phase) for the presentation
//! layer to explain the rejection.

use crate::engine::{PendingAction, PhaseKind};
use crate::state::UnitId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The same command may succeed later or with another target
/// - **Validation**: The command is malformed for the current state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: target out of range, no action points left, frozen.
    Recoverable,

    /// Examples: command issued in the wrong phase, malformed step.
    Validation,
}

/// Trait for errors that expose a severity classification.
pub trait GameError {
    fn severity(&self) -> ErrorSeverity;
}

/// Rejected unit or controller command.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("unit {unit} has no action points left")]
    NoActionPoints { unit: UnitId },

    #[error("unit {unit} is frozen for {turns} more turn(s)")]
    Frozen { unit: UnitId, turns: u32 },

    #[error("step ({dx}, {dy}) is not a single grid step")]
    InvalidStep { dx: i32, dy: i32 },

    #[error("target {target} at distance {distance:.2} is beyond range {range}")]
    OutOfRange {
        target: UnitId,
        distance: f64,
        range: u32,
    },

    #[error("target {target} is already down")]
    TargetDown { target: UnitId },

    #[error("no valid targets for {action}")]
    NoValidTargets { action: PendingAction },

    #[error("command requires {expected} phase, battle is in {actual}")]
    WrongPhase {
        expected: PhaseKind,
        actual: PhaseKind,
    },

    #[error("no unit is currently active")]
    NoActiveUnit,
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::NoActionPoints { .. }
            | ActionError::Frozen { .. }
            | ActionError::OutOfRange { .. }
            | ActionError::TargetDown { .. }
            | ActionError::NoValidTargets { .. } => ErrorSeverity::Recoverable,
            ActionError::InvalidStep { .. }
            | ActionError::WrongPhase { .. }
            | ActionError::NoActiveUnit => ErrorSeverity::Validation,
        }
    }
}

/// Rejected stat allocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("cannot allocate zero points")]
    ZeroPoints,

    #[error("requested {requested} point(s) but only {available} pending")]
    InsufficientPoints { requested: u32, available: u32 },
}

impl GameError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Rejected campaign budget operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CampaignError {
    #[error("budget pool holds {available}, cannot allocate {requested}")]
    InsufficientBudget { requested: u32, available: i64 },
}

impl GameError for CampaignError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::AttackKind;

    #[test]
    fn refusals_tied_to_the_board_are_recoverable() {
        let target = UnitId(2);
        assert_eq!(
            ActionError::OutOfRange {
                target,
                distance: 4.0,
                range: 1
            }
            .severity(),
            ErrorSeverity::Recoverable
        );
        assert_eq!(
            ActionError::NoValidTargets {
                action: PendingAction::Attack(AttackKind::Melee)
            }
            .severity(),
            ErrorSeverity::Recoverable
        );
        assert_eq!(
            ActionError::Frozen { unit: target, turns: 1 }.severity(),
            ErrorSeverity::Recoverable
        );
    }

    #[test]
    fn misuse_of_the_controller_is_a_validation_error() {
        assert_eq!(
            ActionError::WrongPhase {
                expected: PhaseKind::EnemyTurn,
                actual: PhaseKind::PlayerTurn
            }
            .severity(),
            ErrorSeverity::Validation
        );
        assert_eq!(ProgressionError::ZeroPoints.severity(), ErrorSeverity::Validation);
    }
}
