use crate::stats::AttackKind;

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Action points every unit receives at the start of its phase.
    pub action_points: u32,
    /// Maximum Euclidean distance (in cells) for melee attacks.
    pub melee_range: u32,
    /// Maximum Euclidean distance (in cells) for ranged attacks.
    pub ranged_range: u32,
    /// Maximum Euclidean distance (in cells) for psi attacks.
    pub psi_range: u32,
    /// Experience granted to each survivor per level of every defeated enemy.
    pub xp_per_enemy_level: u32,
}

impl CombatConfig {
    // ===== fixed progression rules =====
    /// Experience needed for the next level is `XP_BASE * level^2`.
    pub const XP_BASE: u32 = 100;
    /// HP restored on every level-up (capped at the new maximum).
    pub const LEVEL_UP_HEAL: u32 = 10;
    /// Allocation points granted on every level-up.
    pub const POINTS_PER_LEVEL: u32 = 5;
    /// Max HP gained per level.
    pub const HP_PER_LEVEL: i32 = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ACTION_POINTS: u32 = 2;
    pub const DEFAULT_MELEE_RANGE: u32 = 1;
    pub const DEFAULT_RANGED_RANGE: u32 = 10;
    pub const DEFAULT_PSI_RANGE: u32 = 10;
    pub const DEFAULT_XP_PER_ENEMY_LEVEL: u32 = 50;

    pub fn new() -> Self {
        Self {
            action_points: Self::DEFAULT_ACTION_POINTS,
            melee_range: Self::DEFAULT_MELEE_RANGE,
            ranged_range: Self::DEFAULT_RANGED_RANGE,
            psi_range: Self::DEFAULT_PSI_RANGE,
            xp_per_enemy_level: Self::DEFAULT_XP_PER_ENEMY_LEVEL,
        }
    }

    /// Range threshold for the given attack kind.
    pub fn range_for(&self, kind: AttackKind) -> u32 {
        match kind {
            AttackKind::Melee => self.melee_range,
            AttackKind::Ranged => self.ranged_range,
            AttackKind::Psi => self.psi_range,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
