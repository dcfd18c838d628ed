//! Turn controller: the battle's phase state machine.
//!
//! [`TurnController`] owns the [`Battle`] exclusively and is the only way to
//! mutate it once setup is done. Player input arrives as commands
//! (`move_active`, `declare_attack`, `confirm_target`, ...). Each command
//! either returns an [`ActionReport`] or is rejected with an [`ActionError`]
//! and leaves the battle untouched. The enemy phase is observable: the
//! controller parks in [`Phase::EnemyTurn`] until the caller runs it with
//! [`TurnController::run_enemy_turn`].
//!
//! ```text
//! PlayerTurn ──declare──▶ TargetSelection ──confirm/cancel──▶ PlayerTurn
//!     │                          │
//!     └──no unit can act─────────┴──▶ EnemyTurn ──▶ PlayerTurn (next turn)
//!                                         └──one side wiped──▶ Ended
//! ```

mod phase;
mod report;

pub use phase::{
    BattleOutcome, CycleDirection, PendingAction, Phase, PhaseKind, TargetSelection,
};
pub use report::{ActionReport, BattleReport, EnemyPhaseReport, SurvivorReport, TickReport};

use tracing::{debug, info};

use crate::ai::{self, EnemyContext};
use crate::config::CombatConfig;
use crate::error::ActionError;
use crate::progression;
use crate::rng::RngOracle;
use crate::state::{Battle, Guard, PsiAbility, Side, Unit, UnitId};
use crate::stats::AttackKind;

/// Drives one battle from setup to [`Phase::Ended`].
pub struct TurnController<'a, R> {
    battle: Battle<'a>,
    rng: R,
    config: CombatConfig,
    /// Player turn-start effects from the most recent player phase.
    player_ticks: Vec<TickReport>,
}

impl<'a, R: RngOracle> TurnController<'a, R> {
    /// Takes ownership of a set-up battle and opens the first player phase.
    ///
    /// Player units get their action points and turn-start status tick here.
    /// Enemies are reset when their own phase begins.
    pub fn new(battle: Battle<'a>, rng: R, config: CombatConfig) -> Self {
        let mut controller = Self {
            battle,
            rng,
            config,
            player_ticks: Vec::new(),
        };
        info!(
            players = controller.battle.players.len(),
            enemies = controller.battle.enemies.len(),
            "battle started"
        );
        controller.begin_player_phase();
        controller
    }

    pub fn battle(&self) -> &Battle<'a> {
        &self.battle
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.battle.phase
    }

    pub fn turn_number(&self) -> u32 {
        self.battle.turn_number
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.battle.phase.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Player unit under the cursor.
    pub fn active_unit(&self) -> Option<&Unit<'a>> {
        let id = self.battle.active?;
        self.battle.players.iter().find(|unit| unit.id() == id)
    }

    pub fn selection(&self) -> Option<&TargetSelection> {
        self.battle.selection()
    }

    /// Non-quiet status ticks from the start of the current player phase.
    pub fn player_ticks(&self) -> &[TickReport] {
        &self.player_ticks
    }

    // ------------------------------------------------------------------
    // Player commands
    // ------------------------------------------------------------------

    /// One grid step for the active unit.
    pub fn move_active(&mut self, dx: i32, dy: i32) -> Result<ActionReport, ActionError> {
        let index = self.active_index()?;
        let unit = &mut self.battle.players[index];
        let to = unit.step(dx, dy)?;
        let report = ActionReport::Moved { unit: unit.id(), to };

        debug!(unit = %unit.id(), %to, "player step");
        self.advance_cursor();
        Ok(report)
    }

    /// Physical defend for the active unit.
    pub fn defend_active(&mut self) -> Result<ActionReport, ActionError> {
        self.guard_active(Guard::PHYSICAL)
    }

    /// Psi defend for the active unit.
    pub fn psi_defend_active(&mut self) -> Result<ActionReport, ActionError> {
        self.guard_active(Guard::PSI)
    }

    fn guard_active(&mut self, guard: Guard) -> Result<ActionReport, ActionError> {
        let index = self.active_index()?;
        let unit = &mut self.battle.players[index];
        if guard == Guard::PSI {
            unit.psi_defend()?;
        } else {
            unit.defend()?;
        }
        let report = ActionReport::Guarded {
            unit: unit.id(),
            guard,
        };

        debug!(unit = %unit.id(), ?guard, "player defend");
        self.advance_cursor();
        Ok(report)
    }

    /// Opens target selection for an attack. Costs nothing until confirmed.
    ///
    /// Candidates are the living enemies that pass the range check, in roster
    /// order. Returns the initially selected target.
    pub fn declare_attack(&mut self, kind: AttackKind) -> Result<UnitId, ActionError> {
        let index = self.active_index()?;
        let actor = &self.battle.players[index];
        let actor_id = actor.id();
        let candidates = self
            .battle
            .enemies
            .iter()
            .filter(|enemy| actor.check_attack(enemy, kind, &self.config).is_ok())
            .map(Unit::id)
            .collect();
        self.open_selection(actor_id, PendingAction::Attack(kind), candidates)
    }

    /// Opens target selection for a psi ability; every living enemy qualifies.
    pub fn declare_ability(&mut self, ability: PsiAbility) -> Result<UnitId, ActionError> {
        let index = self.active_index()?;
        let actor = &self.battle.players[index];
        let actor_id = actor.id();
        if actor.action_points() == 0 {
            return Err(ActionError::NoActionPoints { unit: actor_id });
        }
        let candidates = self
            .battle
            .enemies
            .iter()
            .filter(|enemy| enemy.is_alive())
            .map(Unit::id)
            .collect();
        self.open_selection(actor_id, PendingAction::Ability(ability), candidates)
    }

    fn open_selection(
        &mut self,
        actor: UnitId,
        action: PendingAction,
        candidates: Vec<UnitId>,
    ) -> Result<UnitId, ActionError> {
        let selection = TargetSelection::new(actor, action, candidates)
            .ok_or(ActionError::NoValidTargets { action })?;
        let selected = selection.selected();

        debug!(
            unit = %actor,
            %action,
            candidates = selection.candidates().len(),
            "target selection opened"
        );
        self.transition(Phase::TargetSelection(selection));
        Ok(selected)
    }

    /// Moves the target cursor, wrapping at either end.
    pub fn cycle_target(&mut self, direction: CycleDirection) -> Result<UnitId, ActionError> {
        match &mut self.battle.phase {
            Phase::TargetSelection(selection) => Ok(selection.cycle(direction)),
            other => Err(ActionError::WrongPhase {
                expected: PhaseKind::TargetSelection,
                actual: other.kind(),
            }),
        }
    }

    /// Drops the pending action; no action point is spent.
    pub fn cancel_target(&mut self) -> Result<(), ActionError> {
        self.require_phase(PhaseKind::TargetSelection)?;
        debug!("target selection cancelled");
        self.transition(Phase::PlayerTurn);
        Ok(())
    }

    /// Resolves the pending action against the selected target.
    pub fn confirm_target(&mut self) -> Result<ActionReport, ActionError> {
        let Phase::TargetSelection(selection) = &self.battle.phase else {
            return Err(self.wrong_phase(PhaseKind::TargetSelection));
        };
        let actor_id = selection.actor;
        let action = selection.action;
        let target_id = selection.selected();

        let attacker_index = self
            .battle
            .player_index(actor_id)
            .ok_or(ActionError::NoActiveUnit)?;
        let target_index = self
            .battle
            .enemy_index(target_id)
            .ok_or(ActionError::TargetDown { target: target_id })?;

        let Battle {
            players, enemies, ..
        } = &mut self.battle;
        let attacker = &mut players[attacker_index];
        let target = &mut enemies[target_index];

        let report = match action {
            PendingAction::Attack(kind) => {
                let result = attacker.attack(target, kind, &self.config, &mut self.rng)?;
                debug!(
                    attacker = %actor_id,
                    target = %target_id,
                    %kind,
                    hit = result.is_hit(),
                    damage = result.damage_dealt(),
                    target_hp = target.stats().hp(),
                    "player attack"
                );
                ActionReport::Attacked {
                    attacker: actor_id,
                    target: target_id,
                    kind,
                    result,
                    killed: !target.is_alive(),
                }
            }
            PendingAction::Ability(ability) => {
                let effect = attacker.cast(ability, target)?;
                debug!(
                    caster = %actor_id,
                    target = %target_id,
                    %ability,
                    damage = effect.damage,
                    turns = effect.turns,
                    "psi ability"
                );
                ActionReport::Cast {
                    caster: actor_id,
                    target: target_id,
                    effect,
                    killed: !target.is_alive(),
                }
            }
        };

        for fallen in self.battle.remove_fallen_from(Side::Enemy) {
            debug!(unit = %fallen.id, name = %fallen.name, "enemy down");
        }
        self.transition(Phase::PlayerTurn);
        self.advance_cursor();
        Ok(report)
    }

    /// Forfeits every remaining player action point and hands over to the
    /// enemy phase.
    pub fn end_turn(&mut self) -> Result<(), ActionError> {
        self.require_phase(PhaseKind::PlayerTurn)?;
        for unit in &mut self.battle.players {
            unit.forfeit_actions();
        }
        debug!(turn = self.battle.turn_number, "player turn ended early");
        self.advance_cursor();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Enemy phase
    // ------------------------------------------------------------------

    /// Plays the whole enemy phase and resolves the end-of-turn check.
    pub fn run_enemy_turn(&mut self) -> Result<EnemyPhaseReport, ActionError> {
        self.require_phase(PhaseKind::EnemyTurn)?;

        let turn = self.battle.turn_number;
        let budget = self.config.action_points;
        let fallen_before = self.battle.fallen.len();
        let mut report = EnemyPhaseReport {
            turn,
            ..Default::default()
        };

        for enemy in &mut self.battle.enemies {
            enemy.reset_actions(budget);
            let tick = enemy.tick_status();
            if !tick.is_quiet() {
                debug!(unit = %enemy.id(), ?tick, "enemy status tick");
                report.ticks.push(TickReport {
                    unit: enemy.id(),
                    tick,
                });
            }
        }
        self.battle.remove_fallen_from(Side::Enemy);

        for index in 0..self.battle.enemies.len() {
            let Battle {
                players,
                enemies,
                fallen,
                ..
            } = &mut self.battle;
            let actor = &mut enemies[index];
            if !actor.can_act() {
                debug!(unit = %actor.id(), "enemy skips its turn");
                continue;
            }

            let mut ctx = EnemyContext::new(actor, players, fallen, &self.config, &mut self.rng, turn);
            ai::take_turn(&mut ctx);
            report.actions.extend(ctx.into_actions());
        }
        self.battle.remove_fallen_from(Side::Enemy);
        report.fallen = self.battle.fallen[fallen_before..].to_vec();

        report.outcome = if !self.battle.has_living(Side::Player) {
            Some(BattleOutcome::Defeat)
        } else if !self.battle.has_living(Side::Enemy) {
            Some(BattleOutcome::Victory)
        } else {
            None
        };

        match report.outcome {
            Some(outcome) => {
                self.transition(Phase::Ended(outcome));
                info!(%outcome, turns = turn, "battle ended");
            }
            None => {
                self.battle.turn_number += 1;
                self.begin_player_phase();
            }
        }
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Final result, available once the battle has ended.
    pub fn report(&self) -> Option<BattleReport> {
        let outcome = self.outcome()?;
        let defeated_enemy_levels: Vec<i32> = self
            .battle
            .fallen
            .iter()
            .filter(|fallen| fallen.side == Side::Enemy)
            .map(|fallen| fallen.level)
            .collect();
        let xp_award =
            progression::battle_experience(outcome, &defeated_enemy_levels, &self.config);

        let survivors = self
            .battle
            .players
            .iter()
            .filter(|unit| unit.is_alive())
            .filter_map(|unit| {
                Some(SurvivorReport {
                    roster_index: unit.roster_index()?,
                    name: unit.name().to_string(),
                    hp: unit.stats().hp(),
                    max_hp: unit.stats().max_hp(),
                })
            })
            .collect();

        let fallen = self
            .battle
            .fallen
            .iter()
            .filter(|fallen| fallen.side == Side::Player)
            .cloned()
            .collect();

        Some(BattleReport {
            outcome,
            turns: self.battle.turn_number,
            survivors,
            fallen,
            defeated_enemy_levels,
            xp_award,
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn begin_player_phase(&mut self) {
        let budget = self.config.action_points;
        self.player_ticks.clear();

        for unit in &mut self.battle.players {
            unit.reset_actions(budget);
            let tick = unit.tick_status();
            if !tick.is_quiet() {
                debug!(unit = %unit.id(), ?tick, "player status tick");
                self.player_ticks.push(TickReport {
                    unit: unit.id(),
                    tick,
                });
            }
        }
        self.battle.remove_fallen_from(Side::Player);
        self.battle.active = None;

        if self.battle.phase.kind() != PhaseKind::PlayerTurn {
            self.transition(Phase::PlayerTurn);
        }
        debug!(turn = self.battle.turn_number, "player phase");
        self.advance_cursor();
    }

    /// Keeps the cursor on the active unit while it can act; otherwise moves
    /// it to the next actionable unit in roster order, wrapping. Hands over to
    /// the enemy phase when nobody can act or no enemy is left.
    fn advance_cursor(&mut self) {
        if !self.battle.has_living(Side::Enemy) {
            self.battle.active = None;
            self.transition(Phase::EnemyTurn);
            return;
        }

        let players = &self.battle.players;
        let current = self.battle.active;
        if let Some(id) = current
            && players.iter().any(|unit| unit.id() == id && unit.can_act())
        {
            return;
        }

        // Ids grow in roster order, so "after the current unit" is the first
        // larger id. This still works when the current unit has been removed.
        let start = current.map_or(0, |id| {
            players
                .iter()
                .position(|unit| unit.id() > id)
                .unwrap_or(players.len())
        });
        let len = players.len();
        let next = (0..len)
            .map(|offset| &players[(start + offset) % len])
            .find(|unit| unit.can_act())
            .map(Unit::id);

        self.battle.active = next;
        match next {
            Some(id) => debug!(unit = %id, "active unit"),
            None => self.transition(Phase::EnemyTurn),
        }
    }

    fn transition(&mut self, next: Phase) {
        let from = self.battle.phase.kind();
        let to = next.kind();
        debug_assert!(from.allows(to), "illegal phase transition {from} -> {to}");
        debug!(turn = self.battle.turn_number, %from, %to, "phase transition");
        self.battle.phase = next;
    }

    fn wrong_phase(&self, expected: PhaseKind) -> ActionError {
        ActionError::WrongPhase {
            expected,
            actual: self.battle.phase.kind(),
        }
    }

    fn require_phase(&self, expected: PhaseKind) -> Result<(), ActionError> {
        if self.battle.phase.kind() != expected {
            return Err(self.wrong_phase(expected));
        }
        Ok(())
    }

    /// Roster index of the active unit; requires the player phase.
    fn active_index(&self) -> Result<usize, ActionError> {
        self.require_phase(PhaseKind::PlayerTurn)?;
        self.battle
            .active
            .and_then(|id| self.battle.player_index(id))
            .ok_or(ActionError::NoActiveUnit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::ProgressionService;
    use crate::rng::ScriptedRng;
    use crate::state::{Character, Position};
    use crate::stats::{EnemyStats, PlayerStats};

    #[test]
    fn wrong_phase_commands_are_rejected() {
        let mut roster = vec![Character::new("Agent 1")];
        let mut battle = Battle::new();
        battle.deploy_roster(&mut roster, Position::new(2, 2));
        battle.spawn_enemy("Drone", EnemyStats::default(), Position::new(7, 7));
        let mut controller =
            TurnController::new(battle, ScriptedRng::always_hit(), CombatConfig::default());

        assert_eq!(
            controller.confirm_target(),
            Err(ActionError::WrongPhase {
                expected: PhaseKind::TargetSelection,
                actual: PhaseKind::PlayerTurn,
            })
        );
        assert!(matches!(
            controller.run_enemy_turn(),
            Err(ActionError::WrongPhase { expected: PhaseKind::EnemyTurn, .. })
        ));
    }

    #[test]
    fn melee_without_adjacent_enemy_has_no_targets() {
        let mut roster = vec![Character::new("Agent 1")];
        let mut battle = Battle::new();
        battle.deploy_roster(&mut roster, Position::new(2, 2));
        battle.spawn_enemy("Drone", EnemyStats::default(), Position::new(7, 7));
        let mut controller =
            TurnController::new(battle, ScriptedRng::always_hit(), CombatConfig::default());

        let err = controller.declare_attack(AttackKind::Melee).unwrap_err();

        assert_eq!(
            err,
            ActionError::NoValidTargets {
                action: PendingAction::Attack(AttackKind::Melee)
            }
        );
        assert_eq!(controller.phase().kind(), PhaseKind::PlayerTurn);
    }

    #[test]
    fn end_turn_hands_over_to_enemies() {
        let mut roster = vec![Character::new("Agent 1")];
        let mut battle = Battle::new();
        battle.deploy_roster(&mut roster, Position::ORIGIN);
        battle.spawn_enemy("Drone", EnemyStats::default(), Position::new(9, 9));
        let mut controller =
            TurnController::new(battle, ScriptedRng::always_hit(), CombatConfig::default());

        controller.end_turn().unwrap();

        assert_eq!(controller.phase().kind(), PhaseKind::EnemyTurn);
        assert!(controller.active_unit().is_none());
    }

    #[test]
    fn paralyzed_player_is_skipped_by_the_cursor() {
        let mut roster = vec![Character::new("Agent 1"), Character::new("Agent 2")];
        let mut battle = Battle::new();
        let ids = battle.deploy_roster(&mut roster, Position::ORIGIN);
        battle.spawn_enemy("Drone", EnemyStats::default(), Position::new(9, 9));
        battle.players[0].status.paralyzed_turns = 1;
        let mut controller =
            TurnController::new(battle, ScriptedRng::always_miss(), CombatConfig::default());

        assert_eq!(controller.active_unit().map(Unit::id), Some(ids[1]));
        assert_eq!(controller.battle().players()[0].action_points(), 0);
        assert_eq!(controller.player_ticks().len(), 1);
        assert_eq!(controller.player_ticks()[0].unit, ids[0]);
        assert!(controller.player_ticks()[0].tick.paralyzed);

        controller.end_turn().unwrap();
        controller.run_enemy_turn().unwrap();

        assert_eq!(controller.turn_number(), 2);
        assert!(controller.player_ticks().is_empty());
        assert_eq!(controller.active_unit().map(Unit::id), Some(ids[0]));
    }

    #[test]
    fn burn_at_phase_start_kills_and_reaches_the_report() {
        let mut roster = vec![
            Character::new("Agent 1").with_stats(PlayerStats::default().with_hp(1)),
            Character::new("Agent 2").with_stats(PlayerStats::new(1, 1, 1, 20, 1, 1, 1)),
        ];

        let report = {
            let mut battle = Battle::new();
            let ids = battle.deploy_roster(&mut roster, Position::ORIGIN);
            battle.spawn_enemy("Drone", EnemyStats::default(), Position::new(2, 0));
            battle.players[0].status.fire_turns = 2;
            battle.players[0].status.fire_damage = 1;
            let mut controller =
                TurnController::new(battle, ScriptedRng::always_hit(), CombatConfig::default());

            assert_eq!(controller.player_ticks()[0].tick.burn_damage, 1);
            assert_eq!(controller.battle().players().len(), 1);
            assert_eq!(controller.battle().fallen()[0].id, ids[0]);
            assert_eq!(controller.active_unit().map(Unit::id), Some(ids[1]));

            controller.declare_attack(AttackKind::Melee).unwrap();
            controller.confirm_target().unwrap();
            let phase = controller.run_enemy_turn().unwrap();
            assert_eq!(phase.outcome, Some(BattleOutcome::Victory));
            controller.report().unwrap()
        };

        assert_eq!(report.fallen_names().collect::<Vec<_>>(), ["Agent 1"]);
        assert_eq!(report.survivors.len(), 1);

        let summary = ProgressionService::apply(&mut roster, &report);

        assert_eq!(summary.removed, ["Agent 1"]);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "Agent 2");
    }
}
