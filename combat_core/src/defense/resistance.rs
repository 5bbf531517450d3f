//! Resistance - Status-driven damage multipliers

use crate::config::MitigationConstants;

/// Damage multiplier for N stacks of Vulnerable
pub fn vulnerability_multiplier(stacks: u32, constants: &MitigationConstants) -> f64 {
    1.0 + stacks as f64 * constants.vulnerable_per_stack
}

/// Damage after a Resistance status with the given amplifier
///
/// A high enough amplifier drives the result to 0 or below; the caller
/// treats that as a cancelled hit.
pub fn apply_resistance(damage: f64, amplifier: u32, constants: &MitigationConstants) -> f64 {
    damage * (1.0 - amplifier as f64 * constants.resistance_per_amplifier)
}
