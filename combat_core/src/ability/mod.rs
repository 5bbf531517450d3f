//! Passive abilities - Chance and cooldown gated effects bound to items
//!
//! An item carries at most one binding per (trigger, kind) key. The binding
//! stores its parameters as TOML text and is decoded every time it is
//! evaluated, so a broken payload only disables that one binding.

mod binding;
mod params;
mod trigger;

pub use binding::{AbilityBinding, CooldownState};
pub use params::{AbilityEffect, AbilityParams, EffectTarget};
pub use trigger::{evaluate, AbilityActivation, TriggerEvent};

pub(crate) use trigger::release_cooldown;

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// When a binding is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCondition {
    /// The owner landed a hit; the event target is the defender
    DamageDealt,
    /// The owner was hit; the event target is the attacker
    DamageTaken,
    /// The owner's hit killed the defender
    Kill,
}

/// What a binding does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    /// Add stacks of a status
    StackInstance,
    /// Damage everything around a point
    ChainDamage,
}

impl fmt::Display for TriggerCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TriggerCondition::DamageDealt => "damage_dealt",
            TriggerCondition::DamageTaken => "damage_taken",
            TriggerCondition::Kill => "kill",
        };
        f.write_str(name)
    }
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AbilityKind::StackInstance => "stack_instance",
            AbilityKind::ChainDamage => "chain_damage",
        };
        f.write_str(name)
    }
}

/// Identity of a binding on an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbilityKey {
    pub trigger: TriggerCondition,
    pub kind: AbilityKind,
}

impl AbilityKey {
    pub fn new(trigger: TriggerCondition, kind: AbilityKind) -> Self {
        AbilityKey { trigger, kind }
    }
}

impl fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.trigger, self.kind)
    }
}

/// Why a binding could not be used
#[derive(Error, Debug)]
pub enum AbilityError {
    #[error("ability {0} has no payload")]
    MissingPayload(AbilityKey),
    #[error("failed to decode ability payload: {0}")]
    Decode(#[from] ConfigError),
    #[error("invalid ability parameter `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        let key = AbilityKey::new(TriggerCondition::Kill, AbilityKind::ChainDamage);
        assert_eq!(key.to_string(), "kill:chain_damage");
    }

    #[test]
    fn test_key_ordering_groups_by_trigger() {
        let dealt = AbilityKey::new(TriggerCondition::DamageDealt, AbilityKind::ChainDamage);
        let taken = AbilityKey::new(TriggerCondition::DamageTaken, AbilityKind::StackInstance);
        assert!(dealt < taken);
    }

    #[test]
    fn test_missing_payload_message() {
        let key = AbilityKey::new(TriggerCondition::DamageTaken, AbilityKind::StackInstance);
        let err = AbilityError::MissingPayload(key);
        assert_eq!(err.to_string(), "ability damage_taken:stack_instance has no payload");
    }
}
