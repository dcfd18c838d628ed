//! Combat resolution system.
//!
//! Pure functions resolving one attack between two stat views. The caller
//! draws the random roll (exactly once per attack) and passes it in, so every
//! function here is deterministic.
//!
//! # Core Functions
//!
//! - `resolve_attack`: Complete attack resolution (hit check + damage)
//! - `calculate_hit_chance`: Attack vs Defense ratio
//! - `calculate_damage`: Damage after the defend reduction
//! - `apply_damage`: HP reduction (clamped to 0)

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::{apply_damage, calculate_damage};
pub use hit::{calculate_hit_chance, check_hit};
pub use result::{AttackOutcome, AttackResult, resolve_attack};
