//! Host interfaces - What the combat core needs from the game server
//!
//! The server owns entities, their equipment and their health. The core
//! reads and mutates them only through these traits. `Arena` is a complete
//! in-memory host for tests and offline simulation.

mod arena;

pub use arena::Arena;

use crate::ability::AbilityKey;
use crate::attributes::AttributeSet;
use crate::item::Item;
use crate::types::{EntityId, EquipmentSlot, ParticipantKind, Position};
use serde::Serialize;

/// Lookup of combat participants
pub trait Participants {
    /// None when the entity does not exist (anymore)
    fn kind(&self, id: EntityId) -> Option<ParticipantKind>;

    fn health(&self, id: EntityId) -> Option<f64>;

    fn max_health(&self, id: EntityId) -> Option<f64>;

    fn position(&self, id: EntityId) -> Option<Position>;

    /// Living entities within `radius` of `center`, excluding `center` itself
    fn nearby(&self, center: EntityId, radius: f64) -> Vec<EntityId>;

    fn exists(&self, id: EntityId) -> bool {
        self.kind(id).is_some()
    }

    fn is_alive(&self, id: EntityId) -> bool {
        self.health(id).is_some_and(|h| h > 0.0)
    }
}

/// Access to equipped items
pub trait Equipment {
    fn equipped(&self, id: EntityId, slot: EquipmentSlot) -> Option<&Item>;

    fn equipped_mut(&mut self, id: EntityId, slot: EquipmentSlot) -> Option<&mut Item>;

    /// Take the item out of its slot (used when it breaks)
    fn remove_equipped(&mut self, id: EntityId, slot: EquipmentSlot) -> Option<Item>;
}

/// User-facing events the core emits; rendering them is the host's job
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Feedback {
    CriticalHit { target: EntityId, multiplier: f64 },
    Dodged { attacker: Option<EntityId> },
    Countered { attacker: EntityId, damage: f64 },
    ExplosionAbsorbed { healed: f64 },
    ItemBroken { slot: EquipmentSlot, item: String },
    AbilityFired { slot: EquipmentSlot, key: AbilityKey },
    AttributesSynced { attributes: AttributeSet },
}

/// Receiver of health changes and feedback; fire-and-forget
pub trait HealthSink {
    /// Apply a signed health change (negative = damage)
    fn apply_health_delta(&mut self, id: EntityId, delta: f64);

    fn feedback(&mut self, _id: EntityId, _feedback: Feedback) {}
}

/// Everything the resolver needs from the host
pub trait Host: Participants + Equipment + HealthSink {}

impl<T: Participants + Equipment + HealthSink> Host for T {}
