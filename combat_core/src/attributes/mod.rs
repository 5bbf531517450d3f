//! Attributes - Effective combat attributes aggregated from all sources

mod aggregator;
mod value;

pub use aggregator::{effective, AttributeAccumulator};
pub use value::AttributeValue;

use crate::source::AttributeSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every attribute the mitigation chain reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    // === Offense ===
    /// Percent chance (0-100) to land a critical hit
    CriticalChance,
    /// Percent bonus added to the base critical multiplier
    CriticalDamage,

    // === Avoidance ===
    CounterChance,
    DodgeChance,

    // === Defenses ===
    /// Flat reduction, half of it is subtracted from each hit
    Toughness,
    Armor,

    // === Utility ===
    /// Percent of ability cooldowns removed; negative values lengthen them
    CooldownReduction,

    // === Protection levels (summed over worn armor) ===
    Protection,
    FireProtection,
    BlastProtection,
    ProjectileProtection,
    FeatherFalling,
}

impl AttributeKind {
    /// Get all attribute kinds
    pub fn all() -> &'static [AttributeKind] {
        &[
            AttributeKind::CriticalChance,
            AttributeKind::CriticalDamage,
            AttributeKind::CounterChance,
            AttributeKind::DodgeChance,
            AttributeKind::Toughness,
            AttributeKind::Armor,
            AttributeKind::CooldownReduction,
            AttributeKind::Protection,
            AttributeKind::FireProtection,
            AttributeKind::BlastProtection,
            AttributeKind::ProjectileProtection,
            AttributeKind::FeatherFalling,
        ]
    }

    /// Attributes allowed to go below zero
    pub fn is_signed(&self) -> bool {
        matches!(self, AttributeKind::CooldownReduction)
    }

    /// Fixed base value every participant starts with
    pub fn base_value(&self) -> f64 {
        0.0
    }
}

/// Effective attributes of one participant at one instant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeSet {
    values: BTreeMap<AttributeKind, AttributeValue>,
}

impl AttributeSet {
    /// Create an empty set (every attribute reads as zero)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set by applying sources in priority order
    pub fn from_sources(sources: &[&dyn AttributeSource]) -> Self {
        let mut sorted: Vec<_> = sources.to_vec();
        sorted.sort_by_key(|s| s.priority());

        let mut accumulator = AttributeAccumulator::new();
        for source in sorted {
            source.apply(&mut accumulator);
        }
        accumulator.finish()
    }

    pub(crate) fn from_values(values: BTreeMap<AttributeKind, AttributeValue>) -> Self {
        AttributeSet { values }
    }

    /// Effective value, clamped at zero unless the attribute is signed
    pub fn get(&self, kind: AttributeKind) -> f64 {
        let raw = self.values.get(&kind).map(|v| v.compute()).unwrap_or(0.0);
        if kind.is_signed() {
            raw
        } else {
            raw.max(0.0)
        }
    }

    /// Per-source breakdown of an attribute
    pub fn breakdown(&self, kind: AttributeKind) -> AttributeValue {
        self.values.get(&kind).cloned().unwrap_or_default()
    }

    /// Protection level as a whole number
    pub fn level(&self, kind: AttributeKind) -> u32 {
        self.get(kind).floor() as u32
    }

    /// Iterate non-zero attributes
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKind, f64)> + '_ {
        self.values
            .keys()
            .map(|k| (*k, self.get(*k)))
            .filter(|(_, v)| *v != 0.0)
    }

    /// Override an attribute's base value, mostly for tests and tooling
    pub fn set_base(&mut self, kind: AttributeKind, value: f64) {
        self.values.entry(kind).or_default().base = value;
    }
}
