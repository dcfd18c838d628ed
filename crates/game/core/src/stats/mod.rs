//! Stat blocks for player characters and spawned enemies.
//!
//! Both variants share the [`CombatStats`] capability trait, which is the only
//! view the combat resolver and units need. Max HP is never set directly: it is
//! recomputed from level (and constitution for players) whenever either input
//! changes, and current HP is clamped to it.
//!
//! ```text
//! max_hp = 10 × level + con   (player)
//! max_hp = 10 × level         (enemy)
//! ```

pub mod enemy;
pub mod player;

pub use enemy::EnemyStats;
pub use player::PlayerStats;

/// Attack classes, each keyed to one offensive attribute.
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
pub enum AttackKind {
    /// Strength-based, adjacent targets only.
    Melee,
    /// Agility-based.
    Ranged,
    /// Psi-power based. Blocked by psi-defend instead of physical defend.
    Psi,
}

impl AttackKind {
    /// Returns true for attacks answered by the physical defend flag.
    #[inline]
    pub fn is_physical(self) -> bool {
        !matches!(self, AttackKind::Psi)
    }
}

/// Attributes a player can raise with allocation points.
///
/// String names match the snapshot keys.
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
pub enum Attribute {
    Defense,
    Psi,
    #[strum(to_string = "str")]
    Strength,
    #[strum(to_string = "agi")]
    Agility,
    #[strum(to_string = "con")]
    Constitution,
    #[strum(to_string = "cha")]
    Charisma,
}

/// Read/write view over a stat block used by combat.
///
/// Implementors must keep `hp <= max_hp` after every mutation.
pub trait CombatStats {
    fn level(&self) -> i32;
    fn defense(&self) -> i32;
    fn strength(&self) -> i32;
    fn agility(&self) -> i32;
    fn psi(&self) -> i32;
    fn hp(&self) -> u32;
    fn max_hp(&self) -> u32;

    /// Sets current HP, clamped to `[0, max_hp]`.
    fn set_hp(&mut self, hp: u32);

    /// Recomputes max HP from its inputs and clamps current HP down to it.
    fn recalculate_hp(&mut self);

    /// Offensive attribute used by the given attack kind.
    fn attack_value(&self, kind: AttackKind) -> i32 {
        match kind {
            AttackKind::Melee => self.strength(),
            AttackKind::Ranged => self.agility(),
            AttackKind::Psi => self.psi(),
        }
    }

    fn is_alive(&self) -> bool {
        self.hp() > 0
    }

    /// Subtracts `amount` from HP (floored at 0) and returns the HP actually lost.
    fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.hp();
        self.set_hp(before.saturating_sub(amount));
        before - self.hp()
    }
}

/// Max HP formula shared by both stat variants.
///
/// Evaluated in `i64` and clamped into `u32`, so extreme inputs saturate
/// instead of overflowing.
#[inline]
pub(crate) fn max_hp_for(level: i32, con: i32) -> u32 {
    let max_hp =
        i64::from(crate::config::CombatConfig::HP_PER_LEVEL) * i64::from(level) + i64::from(con);
    max_hp.clamp(0, i64::from(u32::MAX)) as u32
}
