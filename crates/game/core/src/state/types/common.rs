use std::fmt;

/// Identifier for a unit within one battle.
///
/// Assigned at battle setup and never reused, so it stays valid in logs and
/// reports after the unit has been removed from its roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which controller a unit answers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

/// Discrete grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Squared Euclidean distance, exact in integers.
    pub fn distance_squared(self, other: Position) -> u64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        (dx * dx + dy * dy) as u64
    }

    pub fn distance(self, other: Position) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// True when `other` lies within `range` cells (Euclidean, inclusive).
    pub fn within(self, other: Position, range: u32) -> bool {
        let range = u64::from(range);
        self.distance_squared(other) <= range * range
    }

    /// Per-axis unit step from `self` toward `target`; each component is -1, 0 or 1.
    pub fn step_toward(self, target: Position) -> (i32, i32) {
        ((target.x - self.x).signum(), (target.y - self.y).signum())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
