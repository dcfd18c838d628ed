//! Battle state representation.
//!
//! Persistent characters live in the campaign roster and outlive battles.
//! During a battle each deployed character is wrapped in a [`Unit`] that
//! borrows its stat block, so every HP change lands on the character itself.
//! Enemies are spawned units owning their stats.
pub mod battle;
pub mod types;

pub use battle::{Battle, Fallen};
pub use types::{
    Character, Guard, Position, PsiAbility, PsiEffect, Side, StatSource, StatusCounters,
    StatusTick, Unit, UnitId,
};
