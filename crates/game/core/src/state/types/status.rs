//! Status effect engine: burn, paralysis and freeze.
//!
//! Effects are plain turn counters on the unit. They tick exactly once, at the
//! start of the owning unit's phase, in a fixed order:
//!
//! 1. Burn: lose `fire_damage` HP, then decrement `fire_turns`.
//! 2. Paralysis: action points forced to 0 for this turn, then decrement.
//! 3. Freeze: decrement. Movement is refused while the counter is non-zero,
//!    checked separately at move time.
//!
//! The psi abilities that inflict these effects refresh them differently:
//! paralysis keeps the longer of the old and new durations, burn overwrites
//! both damage and duration.

use crate::stats::CombatStats;

/// Remaining effect durations carried by a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusCounters {
    pub paralyzed_turns: u32,
    pub freeze_turns: u32,
    pub fire_turns: u32,
    pub fire_damage: u32,
}

/// What one turn-start tick did to a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTick {
    /// HP lost to burning.
    pub burn_damage: u32,
    /// The unit's turn was skipped by paralysis.
    pub paralyzed: bool,
    /// Freeze was active when the tick began.
    pub frozen: bool,
}

impl StatusTick {
    pub fn is_quiet(&self) -> bool {
        *self == Self::default()
    }
}

/// Special psi abilities that inflict status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PsiAbility {
    /// Skips the target's next turns.
    Paralyze,
    /// Damage over time.
    Fire,
    /// Immediate psi damage plus a movement lock.
    Ice,
}

/// Result of a landed psi ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsiEffect {
    pub ability: PsiAbility,
    /// Immediate HP removed from the target (ice only).
    pub damage: u32,
    /// Effect duration now on the target.
    pub turns: u32,
}

impl StatusCounters {
    pub fn is_frozen(&self) -> bool {
        self.freeze_turns > 0
    }

    pub fn is_paralyzed(&self) -> bool {
        self.paralyzed_turns > 0
    }

    pub fn is_burning(&self) -> bool {
        self.fire_turns > 0
    }

    /// Runs the turn-start tick against the unit's stats and action points.
    pub fn tick(
        &mut self,
        stats: &mut (impl CombatStats + ?Sized),
        action_points: &mut u32,
    ) -> StatusTick {
        let mut report = StatusTick::default();

        if self.fire_turns > 0 {
            report.burn_damage = stats.take_damage(self.fire_damage);
            self.fire_turns -= 1;
        }

        if self.paralyzed_turns > 0 {
            *action_points = 0;
            report.paralyzed = true;
            self.paralyzed_turns -= 1;
        }

        if self.freeze_turns > 0 {
            report.frozen = true;
            self.freeze_turns -= 1;
        }

        report
    }

    /// Paralysis from a caster of `caster_level`; keeps the longer duration.
    pub fn apply_paralyze(&mut self, caster_level: i32) -> u32 {
        self.paralyzed_turns = self.paralyzed_turns.max(paralyze_duration(caster_level));
        self.paralyzed_turns
    }

    /// Burn from a caster of `caster_level`; replaces any existing burn.
    pub fn apply_fire(&mut self, caster_level: i32) -> u32 {
        self.fire_damage = fire_damage(caster_level);
        self.fire_turns = lingering_duration(caster_level);
        self.fire_turns
    }

    /// Freeze from a caster of `caster_level`.
    pub fn apply_freeze(&mut self, caster_level: i32) -> u32 {
        self.freeze_turns = lingering_duration(caster_level);
        self.freeze_turns
    }
}

/// `floor(level / 5) + 1`
pub fn paralyze_duration(caster_level: i32) -> u32 {
    caster_level.max(0) as u32 / 5 + 1
}

/// `1 + floor(level / 5)`
pub fn fire_damage(caster_level: i32) -> u32 {
    1 + caster_level.max(0) as u32 / 5
}

/// `max(2, floor(level / 2) + 1)`, shared by burn and freeze.
pub fn lingering_duration(caster_level: i32) -> u32 {
    (caster_level.max(0) as u32 / 2 + 1).max(2)
}

/// `floor(psi / 2)`, applied straight to HP.
pub fn ice_damage(caster_psi: i32) -> u32 {
    caster_psi.max(0) as u32 / 2
}
