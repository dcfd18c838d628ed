//! Combat result types and attack resolution.

use crate::stats::{AttackKind, CombatStats};

use super::damage::calculate_damage;
use super::hit::check_hit;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Attack missed the target.
    Miss,
    /// Attack hit the target.
    Hit,
}

/// Result of a combat resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    /// Whether the attack hit or missed.
    pub outcome: AttackOutcome,

    /// HP actually removed from the defender (None if miss).
    pub damage: Option<u32>,
}

impl AttackResult {
    pub const MISS: Self = Self {
        outcome: AttackOutcome::Miss,
        damage: None,
    };

    pub fn is_hit(&self) -> bool {
        self.outcome == AttackOutcome::Hit
    }

    /// Damage applied, zero on a miss.
    pub fn damage_dealt(&self) -> u32 {
        self.damage.unwrap_or(0)
    }
}

/// Resolve a complete attack (hit check + damage application).
///
/// # Arguments
///
/// * `attacker` - Attacker's stats; the attack kind selects the attribute
/// * `defender` - Defender's stats; HP is reduced in place on a hit
/// * `kind` - Attack class
/// * `guarded` - Whether the defender holds the matching defend flag
/// * `roll` - Random draw in `[0, 1)`
///
/// Clearing the defend flag is the caller's job; this only sees stats.
pub fn resolve_attack(
    attacker: &(impl CombatStats + ?Sized),
    defender: &mut (impl CombatStats + ?Sized),
    kind: AttackKind,
    guarded: bool,
    roll: f64,
) -> AttackResult {
    let attack = attacker.attack_value(kind);

    // 1. Check if attack hits
    if !check_hit(attack, defender.defense(), roll) {
        return AttackResult::MISS;
    }

    // 2. Calculate and apply damage
    let damage = calculate_damage(attack, guarded);
    let dealt = defender.take_damage(damage);

    AttackResult {
        outcome: AttackOutcome::Hit,
        damage: Some(dealt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{EnemyStats, PlayerStats};

    #[test]
    fn hit_reduces_defender_hp_by_attack_value() {
        let attacker = PlayerStats::default();
        let mut defender = EnemyStats::of_level(1);

        // STR 5 vs DEF 1: chance 5/6.
        let result = resolve_attack(&attacker, &mut defender, AttackKind::Melee, false, 0.0);

        assert!(result.is_hit());
        assert_eq!(result.damage, Some(5));
        assert_eq!(defender.hp(), 5);
    }

    #[test]
    fn miss_leaves_defender_untouched() {
        let attacker = PlayerStats::default();
        let mut defender = EnemyStats::of_level(1);

        let result = resolve_attack(&attacker, &mut defender, AttackKind::Melee, false, 0.99);

        assert_eq!(result, AttackResult::MISS);
        assert_eq!(defender.hp(), 10);
    }

    #[test]
    fn guarded_hit_deals_one_less() {
        let attacker = PlayerStats::default();
        let mut defender = EnemyStats::of_level(1);

        let result = resolve_attack(&attacker, &mut defender, AttackKind::Melee, true, 0.0);

        assert_eq!(result.damage, Some(4));
        assert_eq!(defender.hp(), 6);
    }

    #[test]
    fn damage_reports_only_hp_actually_lost() {
        let attacker = EnemyStats::new(1, 1, 1, 30, 1);
        let mut defender = PlayerStats::default();

        let result = resolve_attack(&attacker, &mut defender, AttackKind::Melee, false, 0.0);

        assert_eq!(result.damage, Some(11));
        assert_eq!(defender.hp(), 0);
    }

    #[test]
    fn zero_attack_is_automatic_miss() {
        let attacker = EnemyStats::new(1, 1, 0, 1, 1);
        let mut defender = PlayerStats::default();

        let result = resolve_attack(&attacker, &mut defender, AttackKind::Psi, false, 0.0);

        assert_eq!(result, AttackResult::MISS);
        assert_eq!(defender.hp(), 11);
    }
}
