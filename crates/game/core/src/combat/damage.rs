//! Damage calculation and application.

/// Calculate damage from a landed attack.
///
/// # Formula
///
/// ```text
/// damage = attack
/// if guarded: damage = max(damage - 1, 0)
/// ```
///
/// `guarded` is true when the defender holds the defend flag matching the
/// attack class.
pub fn calculate_damage(attack: i32, guarded: bool) -> u32 {
    let base = attack.max(0) as u32;
    if guarded { base.saturating_sub(1) } else { base }
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
