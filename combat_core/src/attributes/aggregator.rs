//! AttributeAccumulator - Collects attribute contributions before building an AttributeSet

use super::{AttributeKind, AttributeSet, AttributeValue};
use crate::config::MitigationConstants;
use crate::host::Equipment;
use crate::source::{AttributeSource, BaseAttributes, GearSource, StatusSource};
use crate::status::StatusEffectRegistry;
use crate::types::{EntityId, EquipmentSlot};
use std::collections::BTreeMap;

/// Accumulates attribute contributions from various sources
///
/// Sources write into the layer they own; `finish` freezes the result into
/// an AttributeSet.
#[derive(Debug, Clone, Default)]
pub struct AttributeAccumulator {
    values: BTreeMap<AttributeKind, AttributeValue>,
}

impl AttributeAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        AttributeAccumulator::default()
    }

    pub fn add_base(&mut self, kind: AttributeKind, value: f64) {
        self.values.entry(kind).or_default().base += value;
    }

    pub fn add_equipment(&mut self, kind: AttributeKind, value: f64) {
        self.values.entry(kind).or_default().add_equipment(value);
    }

    pub fn add_status(&mut self, kind: AttributeKind, value: f64) {
        self.values.entry(kind).or_default().add_status(value);
    }

    /// Current running total for an attribute
    pub fn total(&self, kind: AttributeKind) -> f64 {
        self.values.get(&kind).map(|v| v.compute()).unwrap_or(0.0)
    }

    pub fn finish(self) -> AttributeSet {
        AttributeSet::from_values(self.values)
    }
}

/// Compute the effective attributes of an entity right now
///
/// Sums the fixed base, every occupied equipment slot and every active
/// status. Nothing is cached: call again after equipment or statuses change.
pub fn effective<E: Equipment + ?Sized>(
    entity: EntityId,
    equipment: &E,
    statuses: &StatusEffectRegistry,
    constants: &MitigationConstants,
) -> AttributeSet {
    let base = BaseAttributes;
    let status = StatusSource::new(statuses.get(entity), constants);
    let gear: Vec<GearSource<'_>> = EquipmentSlot::all()
        .iter()
        .filter_map(|slot| {
            equipment
                .equipped(entity, *slot)
                .map(|item| GearSource::new(*slot, item))
        })
        .collect();

    let mut sources: Vec<&dyn AttributeSource> = vec![&base, &status];
    sources.extend(gear.iter().map(|g| g as &dyn AttributeSource));

    AttributeSet::from_sources(&sources)
}
