//! Tunable combat constants

use super::ConfigError;
use crate::types::Tick;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every number the mitigation chain, durability and ability code reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    #[serde(default)]
    pub critical: CriticalConstants,
    #[serde(default)]
    pub mitigation: MitigationConstants,
    #[serde(default)]
    pub counter: CounterConstants,
    #[serde(default)]
    pub durability: DurabilityConstants,
    #[serde(default)]
    pub abilities: AbilityConstants,
    #[serde(default)]
    pub scheduling: SchedulingConstants,
}

impl CombatConstants {
    /// Load constants from a TOML file and validate them
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let constants: CombatConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string and validate them
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: CombatConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject values that would make the formulas misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.durability;
        if d.armor_hit_divisor <= 0.0 || d.general_divisor <= 0.0 {
            return Err(ConfigError::ValidationError(
                "durability divisors must be positive".to_string(),
            ));
        }

        let m = &self.mitigation;
        for (name, cap) in [
            ("environment_cap", m.environment_cap),
            ("blast_cap", m.blast_cap),
            ("armor_cap", m.armor_cap),
            ("protection_cap", m.protection_cap),
        ] {
            if !(0.0..=1.0).contains(&cap) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be within 0..=1, got {}",
                    name, cap
                )));
            }
        }
        if m.armor_cap + m.protection_cap > 1.0 {
            return Err(ConfigError::ValidationError(
                "armor_cap + protection_cap must not exceed 1".to_string(),
            ));
        }
        if self.counter.damage < 0.0 {
            return Err(ConfigError::ValidationError(
                "counter damage must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalConstants {
    /// Multiplier before critical damage bonus is added (1.25 = 125%)
    #[serde(default = "default_crit_base")]
    pub base_multiplier: f64,
}

impl Default for CriticalConstants {
    fn default() -> Self {
        CriticalConstants {
            base_multiplier: default_crit_base(),
        }
    }
}

fn default_crit_base() -> f64 {
    1.25
}

/// Percentages are decimals (0.04 = 4% per level)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationConstants {
    #[serde(default = "default_vulnerable_per_stack")]
    pub vulnerable_per_stack: f64,
    #[serde(default = "default_fire_per_level")]
    pub fire_per_level: f64,
    #[serde(default = "default_environment_per_level")]
    pub environment_per_level: f64,
    #[serde(default = "default_environment_cap")]
    pub environment_cap: f64,
    #[serde(default = "default_blast_per_level")]
    pub blast_per_level: f64,
    #[serde(default = "default_blast_cap")]
    pub blast_cap: f64,
    /// Blast protection level that turns explosions into healing
    #[serde(default = "default_blast_immunity_level")]
    pub blast_immunity_level: u32,
    /// Fraction of the negated explosion damage healed instead
    #[serde(default = "default_blast_heal_ratio")]
    pub blast_heal_ratio: f64,
    #[serde(default = "default_armor_per_point")]
    pub armor_per_point: f64,
    #[serde(default = "default_armor_cap")]
    pub armor_cap: f64,
    #[serde(default = "default_protection_per_level")]
    pub protection_per_level: f64,
    #[serde(default = "default_protection_cap")]
    pub protection_cap: f64,
    #[serde(default = "default_resistance_per_amplifier")]
    pub resistance_per_amplifier: f64,
    /// Armor removed per fracture stack
    #[serde(default = "default_fracture_armor_per_stack")]
    pub fracture_armor_per_stack: f64,
}

impl Default for MitigationConstants {
    fn default() -> Self {
        MitigationConstants {
            vulnerable_per_stack: default_vulnerable_per_stack(),
            fire_per_level: default_fire_per_level(),
            environment_per_level: default_environment_per_level(),
            environment_cap: default_environment_cap(),
            blast_per_level: default_blast_per_level(),
            blast_cap: default_blast_cap(),
            blast_immunity_level: default_blast_immunity_level(),
            blast_heal_ratio: default_blast_heal_ratio(),
            armor_per_point: default_armor_per_point(),
            armor_cap: default_armor_cap(),
            protection_per_level: default_protection_per_level(),
            protection_cap: default_protection_cap(),
            resistance_per_amplifier: default_resistance_per_amplifier(),
            fracture_armor_per_stack: default_fracture_armor_per_stack(),
        }
    }
}

fn default_vulnerable_per_stack() -> f64 {
    0.025
}

fn default_fire_per_level() -> f64 {
    0.1
}

fn default_environment_per_level() -> f64 {
    0.04
}

fn default_environment_cap() -> f64 {
    0.8
}

fn default_blast_per_level() -> f64 {
    0.1
}

fn default_blast_cap() -> f64 {
    1.0
}

fn default_blast_immunity_level() -> u32 {
    10
}

fn default_blast_heal_ratio() -> f64 {
    0.5
}

fn default_armor_per_point() -> f64 {
    0.02
}

fn default_armor_cap() -> f64 {
    0.4
}

fn default_protection_per_level() -> f64 {
    0.01
}

fn default_protection_cap() -> f64 {
    0.2
}

fn default_resistance_per_amplifier() -> f64 {
    0.05
}

fn default_fracture_armor_per_stack() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterConstants {
    /// Fixed damage dealt back to the attacker on a successful counter
    #[serde(default = "default_counter_damage")]
    pub damage: f64,
}

impl Default for CounterConstants {
    fn default() -> Self {
        CounterConstants {
            damage: default_counter_damage(),
        }
    }
}

fn default_counter_damage() -> f64 {
    2.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurabilityConstants {
    /// Divisor for armor wear when hit by an attack or projectile
    #[serde(default = "default_armor_hit_divisor")]
    pub armor_hit_divisor: f64,
    /// Divisor for wear from every other cause
    #[serde(default = "default_general_divisor")]
    pub general_divisor: f64,
}

impl Default for DurabilityConstants {
    fn default() -> Self {
        DurabilityConstants {
            armor_hit_divisor: default_armor_hit_divisor(),
            general_divisor: default_general_divisor(),
        }
    }
}

fn default_armor_hit_divisor() -> f64 {
    4.0
}

fn default_general_divisor() -> f64 {
    8.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityConstants {
    /// Ticks between a chain damage trigger and the hits landing
    #[serde(default = "default_chain_delay")]
    pub chain_damage_delay: Tick,
}

impl Default for AbilityConstants {
    fn default() -> Self {
        AbilityConstants {
            chain_damage_delay: default_chain_delay(),
        }
    }
}

fn default_chain_delay() -> Tick {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConstants {
    /// Ticks to wait after an equipment change before re-reading the slots
    #[serde(default = "default_sync_delay")]
    pub attribute_sync_delay: Tick,
}

impl Default for SchedulingConstants {
    fn default() -> Self {
        SchedulingConstants {
            attribute_sync_delay: default_sync_delay(),
        }
    }
}

fn default_sync_delay() -> Tick {
    1
}
