//! Armour - Flat toughness and capped armor/protection reduction

use crate::config::MitigationConstants;

/// Subtract half the defender's toughness from the hit
///
/// Returns 0 or less when toughness absorbs the whole hit.
pub fn apply_toughness(damage: f64, toughness: f64) -> f64 {
    damage - toughness / 2.0
}

/// Fraction of damage removed by armor and the Protection enchantment
///
/// `min(armor * 0.02, 0.4) + min(protection * 0.01, 0.2)` with the default
/// constants, so at most 60% of a hit is absorbed here.
pub fn armor_reduction(armor: f64, protection: f64, constants: &MitigationConstants) -> f64 {
    let from_armor = (armor.max(0.0) * constants.armor_per_point).min(constants.armor_cap);
    let from_protection =
        (protection.max(0.0) * constants.protection_per_level).min(constants.protection_cap);
    from_armor + from_protection
}

pub fn apply_armor(damage: f64, armor: f64, protection: f64, constants: &MitigationConstants) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    damage * (1.0 - armor_reduction(armor, protection, constants))
}
