//! Automatic play for the player side of a skirmish.
//!
//! Each decision looks at the active unit and the nearest living enemy and
//! takes the first applicable option:
//!
//! ```text
//! psi ≥ threshold and target not frozen → psi ice
//! target adjacent                       → melee
//! target within ranged range            → ranged
//! otherwise                             → step toward the target
//! blocked                               → defend
//! ```
//!
//! Attacks go through the controller's declare → cycle → confirm flow, so the
//! autopilot exercises the same target cursor a human would. A plan the
//! controller refuses for a recoverable reason (frozen, no targets) turns
//! into a defend; validation errors are bugs and propagate.

use game_core::{
    ActionError, ActionReport, AttackKind, CycleDirection, ErrorSeverity, GameError, PhaseKind,
    PsiAbility, RngOracle, TurnController, Unit, UnitId,
};
use tracing::debug;

/// One decision for the active unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plan {
    Cast(PsiAbility, UnitId),
    Attack(AttackKind, UnitId),
    Step(i32, i32),
    Defend,
}

#[derive(Clone, Copy, Debug)]
pub struct Autopilot {
    /// Minimum psi power before the autopilot prefers psi ice.
    pub psi_threshold: i32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { psi_threshold: 3 }
    }
}

impl Autopilot {
    pub fn new(psi_threshold: i32) -> Self {
        Self { psi_threshold }
    }

    /// Picks the next action for the active unit, or `None` when there is no
    /// active unit or nothing left to fight.
    pub fn plan<R: RngOracle>(&self, controller: &TurnController<'_, R>) -> Option<Plan> {
        let actor = controller.active_unit()?;
        let target = nearest_enemy(actor, controller.battle().enemies())?;
        let config = controller.config();

        if actor.stats().psi() >= self.psi_threshold && !target.status.is_frozen() {
            return Some(Plan::Cast(PsiAbility::Ice, target.id()));
        }
        for kind in [AttackKind::Melee, AttackKind::Ranged] {
            if actor.check_attack(target, kind, config).is_ok() {
                return Some(Plan::Attack(kind, target.id()));
            }
        }
        match actor.position().step_toward(target.position()) {
            (0, 0) => Some(Plan::Defend),
            (dx, dy) => Some(Plan::Step(dx, dy)),
        }
    }

    /// Plays player actions until control passes to the enemy phase.
    pub fn play_phase<R: RngOracle>(
        &self,
        controller: &mut TurnController<'_, R>,
    ) -> Result<Vec<ActionReport>, ActionError> {
        let mut reports = Vec::new();
        while controller.phase().kind() == PhaseKind::PlayerTurn {
            let Some(plan) = self.plan(controller) else {
                controller.end_turn()?;
                break;
            };
            debug!(?plan, "autopilot");
            reports.push(self.execute(controller, plan)?);
        }
        Ok(reports)
    }

    fn execute<R: RngOracle>(
        &self,
        controller: &mut TurnController<'_, R>,
        plan: Plan,
    ) -> Result<ActionReport, ActionError> {
        match self.attempt(controller, plan) {
            Err(error) if error.severity() == ErrorSeverity::Recoverable => {
                debug!(%error, ?plan, "plan refused; defending instead");
                if controller.selection().is_some() {
                    controller.cancel_target()?;
                }
                controller.defend_active()
            }
            other => other,
        }
    }

    fn attempt<R: RngOracle>(
        &self,
        controller: &mut TurnController<'_, R>,
        plan: Plan,
    ) -> Result<ActionReport, ActionError> {
        match plan {
            Plan::Cast(ability, target) => {
                controller.declare_ability(ability)?;
                aim_and_confirm(controller, target)
            }
            Plan::Attack(kind, target) => {
                controller.declare_attack(kind)?;
                aim_and_confirm(controller, target)
            }
            Plan::Step(dx, dy) => controller.move_active(dx, dy),
            Plan::Defend => controller.defend_active(),
        }
    }
}

fn nearest_enemy<'u, 'a>(actor: &Unit<'_>, enemies: &'u [Unit<'a>]) -> Option<&'u Unit<'a>> {
    enemies
        .iter()
        .filter(|enemy| enemy.is_alive())
        .min_by_key(|enemy| actor.position().distance_squared(enemy.position()))
}

/// Walks the target cursor to `target`, then confirms.
///
/// If `target` is not a candidate, the initial selection is kept.
fn aim_and_confirm<R: RngOracle>(
    controller: &mut TurnController<'_, R>,
    target: UnitId,
) -> Result<ActionReport, ActionError> {
    let candidates = controller
        .selection()
        .map(|selection| selection.candidates().len())
        .unwrap_or(0);
    for _ in 0..candidates {
        if controller.selection().map(|s| s.selected()) == Some(target) {
            break;
        }
        controller.cycle_target(CycleDirection::Next)?;
    }
    if let Some(selection) = controller.selection()
        && selection.selected() != target
    {
        debug!(
            wanted = %target,
            selected = %selection.selected(),
            action = %selection.action,
            "autopilot target unavailable"
        );
    }
    controller.confirm_target()
}
