//! Hit chance calculations.

/// Calculate hit chance from the attacker's offensive attribute and the
/// defender's defense.
///
/// # Formula
///
/// ```text
/// hit_chance = attack / (attack + defense)
/// ```
///
/// A non-positive attack value never hits. Negative defense counts as zero.
///
/// # Returns
///
/// Hit chance in `[0, 1]`; strictly below 1 whenever `defense > 0`.
pub fn calculate_hit_chance(attack: i32, defense: i32) -> f64 {
    if attack <= 0 {
        return 0.0;
    }

    let attack = f64::from(attack);
    let defense = f64::from(defense.max(0));
    attack / (attack + defense)
}

/// Check if an attack hits against a roll drawn from `[0, 1)`.
pub fn check_hit(attack: i32, defense: i32, roll: f64) -> bool {
    attack > 0 && roll < calculate_hit_chance(attack, defense)
}
