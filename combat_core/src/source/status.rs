//! StatusSource - Attribute changes caused by active statuses

use crate::attributes::{AttributeAccumulator, AttributeKind};
use crate::config::MitigationConstants;
use crate::source::AttributeSource;
use crate::status::{StatusEffect, StatusKind};
use std::collections::BTreeMap;

/// Attribute contributions of an entity's active statuses
pub struct StatusSource {
    statuses: BTreeMap<StatusKind, StatusEffect>,
    fracture_armor_per_stack: f64,
}

impl StatusSource {
    pub fn new(statuses: BTreeMap<StatusKind, StatusEffect>, constants: &MitigationConstants) -> Self {
        StatusSource {
            statuses,
            fracture_armor_per_stack: constants.fracture_armor_per_stack,
        }
    }
}

impl AttributeSource for StatusSource {
    fn id(&self) -> &str {
        "statuses"
    }

    fn priority(&self) -> i32 {
        200 // Statuses apply after gear
    }

    fn apply(&self, attributes: &mut AttributeAccumulator) {
        for effect in self.statuses.values() {
            match effect.kind {
                StatusKind::Fracture => {
                    // Never strip more armor than the entity currently has
                    let available = attributes.total(AttributeKind::Armor).max(0.0);
                    let removed =
                        (effect.stacks as f64 * self.fracture_armor_per_stack).min(available);
                    attributes.add_status(AttributeKind::Armor, -removed);
                }
                // Read directly by the mitigation chain
                StatusKind::Vulnerable | StatusKind::Resistance => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityId;

    fn fracture(stacks: u32) -> BTreeMap<StatusKind, StatusEffect> {
        let mut map = BTreeMap::new();
        map.insert(
            StatusKind::Fracture,
            StatusEffect {
                entity: EntityId(1),
                kind: StatusKind::Fracture,
                stacks,
                applied_at: 0,
                expires_at: 40,
            },
        );
        map
    }

    #[test]
    fn test_fracture_flat_reduction() {
        let mut acc = AttributeAccumulator::new();
        acc.add_equipment(AttributeKind::Armor, 10.0);
        StatusSource::new(fracture(3), &MitigationConstants::default()).apply(&mut acc);
        assert!((acc.total(AttributeKind::Armor) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_priority() {
        let source = StatusSource::new(BTreeMap::new(), &MitigationConstants::default());
        assert_eq!(source.priority(), 200);
    }
}
