use crate::config::CombatConfig;
use crate::stats::{CombatStats, PlayerStats};

/// Persistent roster member. Outlives battles; units only borrow its stats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    pub role: String,
    pub stats: PlayerStats,
    /// Allocation points earned from level-ups and not yet spent.
    pub pending_points: u32,
}

impl Character {
    pub const DEFAULT_ROLE: &'static str = "agent";

    /// Creates a fresh level-1 character with default stats.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Self::DEFAULT_ROLE.to_string(),
            stats: PlayerStats::default(),
            pending_points: 0,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_stats(mut self, stats: PlayerStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_pending_points(mut self, points: u32) -> Self {
        self.pending_points = points;
        self
    }

    /// Adds experience and credits allocation points for every level gained.
    ///
    /// Returns the number of levels gained.
    pub fn grant_xp(&mut self, amount: u32) -> u32 {
        let levels = self.stats.gain_xp(amount);
        self.pending_points = self
            .pending_points
            .saturating_add(levels.saturating_mul(CombatConfig::POINTS_PER_LEVEL));
        levels
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }
}
