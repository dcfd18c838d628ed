//! Enemy decision making.
//!
//! Each enemy runs a small behavior tree once per action point:
//!
//! ```text
//! selector
//! ├── sequence
//! │   ├── condition: target_in_reach   (living target within melee range)
//! │   └── StrikeTarget                 (melee attack, one roll)
//! └── action: step_toward_target       (one diagonal-capable step)
//! ```
//!
//! The target is picked once, at the start of the enemy's turn: the nearest
//! living player unit, ties broken by roster order. The loop ends when the
//! enemy runs out of action points, its target falls, or the tree fails
//! (blocked step with no strike available), so it can never spin.

mod nodes;

use behavior_tree::builder::{action, condition, selector, sequence};
use behavior_tree::{Behavior, Node};
use tracing::debug;

use crate::combat::AttackResult;
use crate::config::CombatConfig;
use crate::rng::RngOracle;
use crate::state::{Fallen, Position, Unit, UnitId};

pub use nodes::{StrikeTarget, step_toward_target, target_in_reach};

/// Something an enemy did during its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAction {
    Strike {
        actor: UnitId,
        target: UnitId,
        result: AttackResult,
        killed: bool,
    },
    Step {
        actor: UnitId,
        to: Position,
    },
}

/// Blackboard for one enemy's turn.
///
/// Borrows the acting enemy, the player roster and the shared random source
/// for the duration of the turn.
pub struct EnemyContext<'c, 'a> {
    pub actor: &'c mut Unit<'a>,
    pub players: &'c mut Vec<Unit<'a>>,
    pub fallen: &'c mut Vec<Fallen>,
    pub config: &'c CombatConfig,
    pub rng: &'c mut dyn RngOracle,
    pub turn: u32,
    pub target: Option<UnitId>,
    log: Vec<EnemyAction>,
}

impl<'c, 'a> EnemyContext<'c, 'a> {
    pub fn new(
        actor: &'c mut Unit<'a>,
        players: &'c mut Vec<Unit<'a>>,
        fallen: &'c mut Vec<Fallen>,
        config: &'c CombatConfig,
        rng: &'c mut dyn RngOracle,
        turn: u32,
    ) -> Self {
        Self {
            actor,
            players,
            fallen,
            config,
            rng,
            turn,
            target: None,
            log: Vec::new(),
        }
    }

    /// Current target, if it is still on the field and alive.
    pub fn target_unit(&self) -> Option<&Unit<'a>> {
        let id = self.target?;
        self.players
            .iter()
            .find(|unit| unit.id() == id && unit.is_alive())
    }

    pub(crate) fn target_index(&self) -> Option<usize> {
        let id = self.target?;
        self.players
            .iter()
            .position(|unit| unit.id() == id && unit.is_alive())
    }

    pub(crate) fn record(&mut self, action: EnemyAction) {
        self.log.push(action);
    }

    pub fn actions(&self) -> &[EnemyAction] {
        &self.log
    }

    pub fn into_actions(self) -> Vec<EnemyAction> {
        self.log
    }
}

/// Nearest living unit to `from`, ties resolved by roster order.
pub fn nearest_living(from: Position, roster: &[Unit<'_>]) -> Option<UnitId> {
    roster
        .iter()
        .filter(|unit| unit.is_alive())
        .min_by_key(|unit| from.distance_squared(unit.position()))
        .map(Unit::id)
}

fn enemy_tree<'c, 'a: 'c>() -> Node<'c, EnemyContext<'c, 'a>> {
    selector(vec![
        sequence(vec![condition(target_in_reach), Box::new(StrikeTarget)]),
        action(step_toward_target),
    ])
}

/// Plays out one enemy's whole turn.
pub fn take_turn(ctx: &mut EnemyContext<'_, '_>) {
    ctx.target = nearest_living(ctx.actor.position(), &*ctx.players);
    let tree = enemy_tree();

    while ctx.actor.can_act() && ctx.target_unit().is_some() {
        if tree.tick(ctx).is_failure() {
            debug!(
                enemy = %ctx.actor.id(),
                action_points = ctx.actor.action_points(),
                "enemy has no productive action left"
            );
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::stats::{CombatStats, EnemyStats, PlayerStats};
    use crate::state::Side;

    fn ready(mut unit: Unit<'_>) -> Unit<'_> {
        unit.reset_actions(CombatConfig::DEFAULT_ACTION_POINTS);
        unit
    }

    fn enemy(x: i32, y: i32, stats: EnemyStats) -> Unit<'static> {
        ready(Unit::spawned(UnitId(100), "Drone", stats, Position::new(x, y)))
    }

    #[test]
    fn nearest_target_prefers_roster_order_on_ties() {
        let mut a = PlayerStats::default();
        let mut b = PlayerStats::default();
        let roster = vec![
            Unit::for_character(UnitId(1), "A", &mut a, 0, Position::new(2, 0)),
            Unit::for_character(UnitId(2), "B", &mut b, 1, Position::new(0, 2)),
        ];

        assert_eq!(nearest_living(Position::ORIGIN, &roster), Some(UnitId(1)));
    }

    #[test]
    fn distant_enemy_spends_both_points_walking() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::always_hit();
        let mut stats = PlayerStats::default();
        let mut players = vec![ready(Unit::for_character(
            UnitId(1),
            "Agent",
            &mut stats,
            0,
            Position::new(2, 2),
        ))];
        let mut fallen = Vec::new();
        let mut actor = enemy(7, 7, EnemyStats::default());

        let mut ctx = EnemyContext::new(&mut actor, &mut players, &mut fallen, &config, &mut rng, 1);
        take_turn(&mut ctx);
        let actions = ctx.into_actions();

        assert_eq!(
            actions,
            vec![
                EnemyAction::Step { actor: UnitId(100), to: Position::new(6, 6) },
                EnemyAction::Step { actor: UnitId(100), to: Position::new(5, 5) },
            ]
        );
        assert_eq!(actor.action_points(), 0);
    }

    #[test]
    fn adjacent_enemy_strikes_twice() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::always_hit();
        let mut stats = PlayerStats::new(1, 1, 1, 1, 1, 5, 1);
        let mut players = vec![ready(Unit::for_character(
            UnitId(1),
            "Agent",
            &mut stats,
            0,
            Position::new(1, 0),
        ))];
        let mut fallen = Vec::new();
        let mut actor = enemy(0, 0, EnemyStats::new(1, 1, 1, 3, 1));

        let mut ctx = EnemyContext::new(&mut actor, &mut players, &mut fallen, &config, &mut rng, 1);
        take_turn(&mut ctx);
        let strikes = ctx
            .actions()
            .iter()
            .filter(|action| matches!(action, EnemyAction::Strike { .. }))
            .count();

        assert_eq!(strikes, 2);
        assert_eq!(players[0].stats().hp(), players[0].stats().max_hp() - 6);
    }

    #[test]
    fn kill_removes_target_and_ends_turn() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::always_hit();
        let mut stats = PlayerStats::default().with_hp(2);
        let mut players = vec![ready(Unit::for_character(
            UnitId(1),
            "Agent",
            &mut stats,
            0,
            Position::new(0, 1),
        ))];
        let mut fallen = Vec::new();
        let mut actor = enemy(0, 0, EnemyStats::new(1, 1, 1, 5, 1));

        let mut ctx = EnemyContext::new(&mut actor, &mut players, &mut fallen, &config, &mut rng, 4);
        take_turn(&mut ctx);
        let actions = ctx.into_actions();

        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], EnemyAction::Strike { killed: true, .. }));
        assert!(players.is_empty());
        assert_eq!(fallen.len(), 1);
        assert_eq!(fallen[0].side, Side::Player);
        assert_eq!(fallen[0].turn, 4);
        assert_eq!(actor.action_points(), 1);
    }

    #[test]
    fn frozen_enemy_out_of_reach_stops_without_spinning() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::always_hit();
        let mut stats = PlayerStats::default();
        let mut players = vec![ready(Unit::for_character(
            UnitId(1),
            "Agent",
            &mut stats,
            0,
            Position::new(5, 5),
        ))];
        let mut fallen = Vec::new();
        let mut actor = enemy(0, 0, EnemyStats::default());
        actor.status.freeze_turns = 2;

        let mut ctx = EnemyContext::new(&mut actor, &mut players, &mut fallen, &config, &mut rng, 1);
        take_turn(&mut ctx);

        assert!(ctx.actions().is_empty());
        assert_eq!(ctx.actor.action_points(), 2);
        assert_eq!(rng.draws(), 0);
    }
}
