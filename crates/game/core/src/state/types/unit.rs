//! Battle units: a stat block placed on the grid with an action budget.
//!
//! Every action costs exactly one action point and is validated in full
//! before anything is mutated, so a rejected action leaves the unit (and its
//! target) untouched.

use bitflags::bitflags;

use crate::combat::{AttackResult, resolve_attack};
use crate::config::CombatConfig;
use crate::error::ActionError;
use crate::rng::RngOracle;
use crate::stats::{AttackKind, CombatStats, EnemyStats, PlayerStats};

use super::common::{Position, Side, UnitId};
use super::status::{PsiAbility, PsiEffect, StatusCounters, StatusTick, ice_damage};

bitflags! {
    /// Declared defends. Each flag absorbs one point of damage from, and is
    /// consumed by, the next incoming attack of its class.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Guard: u8 {
        const PHYSICAL = 1 << 0;
        const PSI      = 1 << 1;
    }
}

impl Guard {
    /// The flag answering attacks of `kind`.
    pub fn for_attack(kind: AttackKind) -> Self {
        if kind.is_physical() {
            Guard::PHYSICAL
        } else {
            Guard::PSI
        }
    }
}

/// Where a unit's stats live.
///
/// Player units borrow the stat block of their persistent character for the
/// whole battle; enemies own a block generated at spawn.
#[derive(Debug)]
pub enum StatSource<'a> {
    Character {
        stats: &'a mut PlayerStats,
        roster_index: usize,
    },
    Spawned(EnemyStats),
}

impl StatSource<'_> {
    pub fn get(&self) -> &dyn CombatStats {
        match self {
            StatSource::Character { stats, .. } => &**stats,
            StatSource::Spawned(stats) => stats,
        }
    }

    pub fn get_mut(&mut self) -> &mut dyn CombatStats {
        match self {
            StatSource::Character { stats, .. } => &mut **stats,
            StatSource::Spawned(stats) => stats,
        }
    }
}

/// A combatant on the battle grid.
#[derive(Debug)]
pub struct Unit<'a> {
    id: UnitId,
    name: String,
    side: Side,
    position: Position,
    stats: StatSource<'a>,
    action_points: u32,
    guard: Guard,
    pub status: StatusCounters,
}

impl<'a> Unit<'a> {
    /// Wraps a persistent character's stats for the battle's duration.
    pub fn for_character(
        id: UnitId,
        name: impl Into<String>,
        stats: &'a mut PlayerStats,
        roster_index: usize,
        position: Position,
    ) -> Self {
        Self::new(
            id,
            name.into(),
            Side::Player,
            position,
            StatSource::Character {
                stats,
                roster_index,
            },
        )
    }

    /// Creates an enemy unit owning a freshly generated stat block.
    pub fn spawned(
        id: UnitId,
        name: impl Into<String>,
        stats: EnemyStats,
        position: Position,
    ) -> Self {
        Self::new(
            id,
            name.into(),
            Side::Enemy,
            position,
            StatSource::Spawned(stats),
        )
    }

    fn new(id: UnitId, name: String, side: Side, position: Position, stats: StatSource<'a>) -> Self {
        Self {
            id,
            name,
            side,
            position,
            stats,
            action_points: 0,
            guard: Guard::empty(),
            status: StatusCounters::default(),
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn stats(&self) -> &dyn CombatStats {
        self.stats.get()
    }

    pub fn stats_mut(&mut self) -> &mut dyn CombatStats {
        self.stats.get_mut()
    }

    /// Index of the backing character in the persistent roster (players only).
    pub fn roster_index(&self) -> Option<usize> {
        match self.stats {
            StatSource::Character { roster_index, .. } => Some(roster_index),
            StatSource::Spawned(_) => None,
        }
    }

    pub fn action_points(&self) -> u32 {
        self.action_points
    }

    pub fn guard(&self) -> Guard {
        self.guard
    }

    pub fn is_defending(&self) -> bool {
        self.guard.contains(Guard::PHYSICAL)
    }

    pub fn is_psi_defending(&self) -> bool {
        self.guard.contains(Guard::PSI)
    }

    pub fn is_alive(&self) -> bool {
        self.stats().is_alive()
    }

    /// Living and holding at least one action point.
    pub fn can_act(&self) -> bool {
        self.is_alive() && self.action_points > 0
    }

    pub fn distance_to(&self, other: &Unit<'_>) -> f64 {
        self.position.distance(other.position)
    }

    pub fn in_range(&self, other: &Unit<'_>, range: u32) -> bool {
        self.position.within(other.position, range)
    }

    /// Refills the action budget and drops any declared defends.
    pub fn reset_actions(&mut self, budget: u32) {
        self.action_points = budget;
        self.guard = Guard::empty();
    }

    /// Gives up whatever action points remain this turn. Guards stay up.
    pub fn forfeit_actions(&mut self) {
        self.action_points = 0;
    }

    /// Applies turn-start status effects.
    pub fn tick_status(&mut self) -> StatusTick {
        let Self {
            stats,
            status,
            action_points,
            ..
        } = self;
        status.tick(stats.get_mut(), action_points)
    }

    fn ensure_action_point(&self) -> Result<(), ActionError> {
        if self.action_points == 0 {
            return Err(ActionError::NoActionPoints { unit: self.id });
        }
        Ok(())
    }

    fn ensure_target_alive(target: &Unit<'_>) -> Result<(), ActionError> {
        if !target.is_alive() {
            return Err(ActionError::TargetDown { target: target.id });
        }
        Ok(())
    }

    /// Checks that `target` is a legal target for `kind` without spending anything.
    pub fn check_attack(
        &self,
        target: &Unit<'_>,
        kind: AttackKind,
        config: &CombatConfig,
    ) -> Result<(), ActionError> {
        self.ensure_action_point()?;
        Self::ensure_target_alive(target)?;

        let range = config.range_for(kind);
        if !self.in_range(target, range) {
            return Err(ActionError::OutOfRange {
                target: target.id,
                distance: self.distance_to(target),
                range,
            });
        }
        Ok(())
    }

    /// Moves one grid step. Diagonal steps are a single step.
    pub fn step(&mut self, dx: i32, dy: i32) -> Result<Position, ActionError> {
        self.ensure_action_point()?;
        if self.status.is_frozen() {
            return Err(ActionError::Frozen {
                unit: self.id,
                turns: self.status.freeze_turns,
            });
        }
        if dx.abs() > 1 || dy.abs() > 1 || (dx == 0 && dy == 0) {
            return Err(ActionError::InvalidStep { dx, dy });
        }

        self.position = self.position.offset(dx, dy);
        self.action_points -= 1;
        Ok(self.position)
    }

    /// Declares a physical defend for the next incoming melee/ranged attack.
    pub fn defend(&mut self) -> Result<(), ActionError> {
        self.raise_guard(Guard::PHYSICAL)
    }

    /// Declares a psi defend for the next incoming psi attack.
    pub fn psi_defend(&mut self) -> Result<(), ActionError> {
        self.raise_guard(Guard::PSI)
    }

    fn raise_guard(&mut self, flag: Guard) -> Result<(), ActionError> {
        self.ensure_action_point()?;
        self.guard.insert(flag);
        self.action_points -= 1;
        Ok(())
    }

    /// Attacks `target`, drawing exactly one roll from `rng`.
    ///
    /// Out-of-range attacks are rejected without cost. In range, the attack
    /// costs one action point whether it hits or misses, and the target's
    /// matching defend flag is consumed either way.
    pub fn attack(
        &mut self,
        target: &mut Unit<'_>,
        kind: AttackKind,
        config: &CombatConfig,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<AttackResult, ActionError> {
        self.check_attack(target, kind, config)?;

        let flag = Guard::for_attack(kind);
        let guarded = target.guard.contains(flag);
        let roll = rng.next_unit();
        let result = resolve_attack(self.stats(), target.stats_mut(), kind, guarded, roll);

        target.guard.remove(flag);
        self.action_points -= 1;
        Ok(result)
    }

    /// Casts a status-inflicting psi ability. Not range-gated, never misses.
    pub fn cast(
        &mut self,
        ability: PsiAbility,
        target: &mut Unit<'_>,
    ) -> Result<PsiEffect, ActionError> {
        self.ensure_action_point()?;
        Self::ensure_target_alive(target)?;

        let level = self.stats().level();
        let effect = match ability {
            PsiAbility::Paralyze => PsiEffect {
                ability,
                damage: 0,
                turns: target.status.apply_paralyze(level),
            },
            PsiAbility::Fire => PsiEffect {
                ability,
                damage: 0,
                turns: target.status.apply_fire(level),
            },
            PsiAbility::Ice => {
                let damage = target.stats_mut().take_damage(ice_damage(self.stats().psi()));
                PsiEffect {
                    ability,
                    damage,
                    turns: target.status.apply_freeze(level),
                }
            }
        };

        self.action_points -= 1;
        Ok(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn enemy_at(x: i32, y: i32) -> Unit<'static> {
        Unit::spawned(UnitId(10), "Drone", EnemyStats::of_level(1), Position::new(x, y))
    }

    fn ready(mut unit: Unit<'_>) -> Unit<'_> {
        unit.reset_actions(CombatConfig::DEFAULT_ACTION_POINTS);
        unit
    }

    #[test]
    fn action_costs_one_point_and_stops_at_zero() {
        let mut stats = PlayerStats::default();
        let mut unit = ready(Unit::for_character(UnitId(1), "Agent", &mut stats, 0, Position::ORIGIN));

        unit.step(1, 0).unwrap();
        unit.defend().unwrap();
        assert_eq!(unit.action_points(), 0);

        let err = unit.step(1, 0).unwrap_err();
        assert_eq!(err, ActionError::NoActionPoints { unit: UnitId(1) });
        assert_eq!(unit.position(), Position::new(1, 0));
    }

    #[test]
    fn frozen_unit_cannot_move_but_can_defend() {
        let mut unit = ready(enemy_at(0, 0));
        unit.status.freeze_turns = 2;

        assert!(matches!(unit.step(1, 1), Err(ActionError::Frozen { turns: 2, .. })));
        assert_eq!(unit.action_points(), 2);
        assert!(unit.defend().is_ok());
    }

    #[test]
    fn malformed_steps_are_rejected() {
        let mut unit = ready(enemy_at(0, 0));
        assert!(matches!(unit.step(2, 0), Err(ActionError::InvalidStep { .. })));
        assert!(matches!(unit.step(0, 0), Err(ActionError::InvalidStep { .. })));
        assert_eq!(unit.step(-1, 1), Ok(Position::new(-1, 1)));
    }

    #[test]
    fn out_of_range_attack_costs_nothing() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::always_hit();
        let mut stats = PlayerStats::default();
        let mut attacker = ready(Unit::for_character(UnitId(1), "Agent", &mut stats, 0, Position::ORIGIN));
        let mut target = ready(enemy_at(1, 1));

        let err = attacker
            .attack(&mut target, AttackKind::Melee, &config, &mut rng)
            .unwrap_err();

        assert!(matches!(err, ActionError::OutOfRange { range: 1, .. }));
        assert_eq!(attacker.action_points(), 2);
        assert_eq!(rng.draws(), 0);
        assert_eq!(target.stats().hp(), 10);
    }

    #[test]
    fn missed_attack_still_costs_a_point_and_clears_guard() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::always_miss();
        let mut stats = PlayerStats::default();
        let mut attacker = ready(Unit::for_character(UnitId(1), "Agent", &mut stats, 0, Position::ORIGIN));
        let mut target = ready(enemy_at(3, 4));
        target.defend().unwrap();
        target.psi_defend().unwrap();

        let result = attacker
            .attack(&mut target, AttackKind::Ranged, &config, &mut rng)
            .unwrap();

        assert!(!result.is_hit());
        assert_eq!(attacker.action_points(), 1);
        assert!(!target.is_defending());
        // Psi guard waits for a psi attack.
        assert!(target.is_psi_defending());
    }

    #[test]
    fn psi_attack_consumes_only_psi_guard() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::always_hit();
        let mut caster_stats = PlayerStats::new(1, 1, 6, 1, 1, 1, 1);
        let mut attacker =
            ready(Unit::for_character(UnitId(1), "Agent", &mut caster_stats, 0, Position::ORIGIN));
        let mut target = ready(enemy_at(2, 0));
        target.defend().unwrap();
        target.psi_defend().unwrap();

        let result = attacker
            .attack(&mut target, AttackKind::Psi, &config, &mut rng)
            .unwrap();

        assert_eq!(result.damage, Some(5));
        assert!(target.is_defending());
        assert!(!target.is_psi_defending());
    }

    #[test]
    fn ice_bypasses_hit_roll_and_freezes() {
        let mut caster_stats = PlayerStats::new(4, 1, 7, 1, 1, 1, 1);
        let mut caster =
            ready(Unit::for_character(UnitId(1), "Agent", &mut caster_stats, 0, Position::ORIGIN));
        let mut target = ready(enemy_at(40, 40));

        let effect = caster.cast(PsiAbility::Ice, &mut target).unwrap();

        assert_eq!(effect.damage, 3);
        assert_eq!(effect.turns, 3);
        assert_eq!(target.stats().hp(), 7);
        assert!(target.status.is_frozen());
        assert_eq!(caster.action_points(), 1);
    }

    #[test]
    fn cast_requires_living_target() {
        let mut caster_stats = PlayerStats::default();
        let mut caster =
            ready(Unit::for_character(UnitId(1), "Agent", &mut caster_stats, 0, Position::ORIGIN));
        let mut target = ready(enemy_at(1, 0));
        target.stats_mut().set_hp(0);

        let err = caster.cast(PsiAbility::Paralyze, &mut target).unwrap_err();

        assert_eq!(err, ActionError::TargetDown { target: UnitId(10) });
        assert_eq!(caster.action_points(), 2);
        assert_eq!(target.status, StatusCounters::default());
    }

    #[test]
    fn borrowed_stats_write_through_to_character() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::always_hit();
        let mut agent_stats = PlayerStats::default();
        {
            let mut agent =
                ready(Unit::for_character(UnitId(1), "Agent", &mut agent_stats, 0, Position::ORIGIN));
            let mut enemy = ready(Unit::spawned(
                UnitId(2),
                "Brute",
                EnemyStats::new(1, 1, 1, 4, 1),
                Position::new(1, 0),
            ));
            enemy
                .attack(&mut agent, AttackKind::Melee, &config, &mut rng)
                .unwrap();
        }
        assert_eq!(agent_stats.hp(), 7);
    }
}
