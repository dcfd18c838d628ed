use behavior_tree::{Behavior, Status};
use tracing::debug;

use crate::state::battle::bury;
use crate::stats::AttackKind;

use super::{EnemyAction, EnemyContext};

/// True when the target can be struck in melee right now.
pub fn target_in_reach(ctx: &EnemyContext<'_, '_>) -> bool {
    ctx.target_unit().is_some_and(|target| {
        ctx.actor
            .check_attack(target, AttackKind::Melee, ctx.config)
            .is_ok()
    })
}

/// Melee attack on the target; removes it from the roster if it falls.
pub struct StrikeTarget;

impl<'c, 'a> Behavior<EnemyContext<'c, 'a>> for StrikeTarget {
    fn tick(&self, ctx: &mut EnemyContext<'c, 'a>) -> Status {
        let Some(index) = ctx.target_index() else {
            return Status::Failure;
        };

        let EnemyContext {
            actor,
            players,
            config,
            rng,
            ..
        } = &mut *ctx;
        let target = &mut players[index];
        let result = match actor.attack(target, AttackKind::Melee, *config, &mut **rng) {
            Ok(result) => result,
            Err(error) => {
                debug!(enemy = %actor.id(), %error, "strike refused");
                return Status::Failure;
            }
        };

        let target_id = target.id();
        let killed = !target.is_alive();
        debug!(
            enemy = %actor.id(),
            target = %target_id,
            hit = result.is_hit(),
            damage = result.damage_dealt(),
            killed,
            "enemy strike"
        );

        if killed {
            let removed = bury(ctx.players, ctx.turn);
            ctx.fallen.extend(removed);
            ctx.target = None;
        }
        ctx.record(EnemyAction::Strike {
            actor: ctx.actor.id(),
            target: target_id,
            result,
            killed,
        });
        Status::Success
    }
}

/// One step along the per-axis sign of the offset to the target.
///
/// Fails when already on top of the target or when the step is refused
/// (frozen, out of action points).
pub fn step_toward_target(ctx: &mut EnemyContext<'_, '_>) -> Status {
    let Some(goal) = ctx.target_unit().map(|target| target.position()) else {
        return Status::Failure;
    };

    let (dx, dy) = ctx.actor.position().step_toward(goal);
    if dx == 0 && dy == 0 {
        return Status::Failure;
    }

    match ctx.actor.step(dx, dy) {
        Ok(to) => {
            debug!(enemy = %ctx.actor.id(), %to, "enemy step");
            let actor = ctx.actor.id();
            ctx.record(EnemyAction::Step { actor, to });
            Status::Success
        }
        Err(error) => {
            debug!(enemy = %ctx.actor.id(), %error, "step refused");
            Status::Failure
        }
    }
}
