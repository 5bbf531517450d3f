//! Arena - In-memory host for tests and simulations

use super::{Equipment, Feedback, HealthSink, Participants};
use crate::item::Item;
use crate::types::{EntityId, EquipmentSlot, ParticipantKind, Position};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct ArenaEntity {
    kind: ParticipantKind,
    health: f64,
    max_health: f64,
    position: Position,
    equipment: BTreeMap<EquipmentSlot, Item>,
}

/// A self-contained world of participants
#[derive(Debug, Clone, Default)]
pub struct Arena {
    entities: BTreeMap<EntityId, ArenaEntity>,
    next_id: u64,
    feedback: Vec<(EntityId, Feedback)>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn(&mut self, kind: ParticipantKind, max_health: f64, position: Position) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.entities.insert(
            id,
            ArenaEntity {
                kind,
                health: max_health,
                max_health,
                position,
                equipment: BTreeMap::new(),
            },
        );
        id
    }

    /// Spawn a player or creature at full health
    pub fn spawn_living(&mut self, max_health: f64, position: Position) -> EntityId {
        self.spawn(ParticipantKind::Living, max_health, position)
    }

    pub fn spawn_projectile(&mut self, shooter: Option<EntityId>, position: Position) -> EntityId {
        self.spawn(ParticipantKind::Projectile { shooter }, 1.0, position)
    }

    pub fn spawn_inanimate(&mut self, position: Position) -> EntityId {
        self.spawn(ParticipantKind::Inanimate, 1.0, position)
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.entities.remove(&id).is_some()
    }

    /// Put an item in a slot, returning what was there
    pub fn equip(&mut self, id: EntityId, slot: EquipmentSlot, item: Item) -> Option<Item> {
        self.entities
            .get_mut(&id)
            .and_then(|e| e.equipment.insert(slot, item))
    }

    pub fn unequip(&mut self, id: EntityId, slot: EquipmentSlot) -> Option<Item> {
        self.remove_equipped(id, slot)
    }

    pub fn set_health(&mut self, id: EntityId, health: f64) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.health = health.clamp(0.0, entity.max_health);
        }
    }

    pub fn set_position(&mut self, id: EntityId, position: Position) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position = position;
        }
    }

    /// Everything emitted so far
    pub fn feedback_log(&self) -> &[(EntityId, Feedback)] {
        &self.feedback
    }

    pub fn take_feedback(&mut self) -> Vec<(EntityId, Feedback)> {
        std::mem::take(&mut self.feedback)
    }
}

impl Participants for Arena {
    fn kind(&self, id: EntityId) -> Option<ParticipantKind> {
        self.entities.get(&id).map(|e| e.kind)
    }

    fn health(&self, id: EntityId) -> Option<f64> {
        self.entities.get(&id).map(|e| e.health)
    }

    fn max_health(&self, id: EntityId) -> Option<f64> {
        self.entities.get(&id).map(|e| e.max_health)
    }

    fn position(&self, id: EntityId) -> Option<Position> {
        self.entities.get(&id).map(|e| e.position)
    }

    fn nearby(&self, center: EntityId, radius: f64) -> Vec<EntityId> {
        let Some(origin) = self.position(center) else {
            return Vec::new();
        };
        self.entities
            .iter()
            .filter(|(id, e)| {
                **id != center
                    && e.kind.is_living()
                    && e.health > 0.0
                    && e.position.distance(&origin) <= radius
            })
            .map(|(id, _)| *id)
            .collect()
    }
}

impl Equipment for Arena {
    fn equipped(&self, id: EntityId, slot: EquipmentSlot) -> Option<&Item> {
        self.entities.get(&id).and_then(|e| e.equipment.get(&slot))
    }

    fn equipped_mut(&mut self, id: EntityId, slot: EquipmentSlot) -> Option<&mut Item> {
        self.entities
            .get_mut(&id)
            .and_then(|e| e.equipment.get_mut(&slot))
    }

    fn remove_equipped(&mut self, id: EntityId, slot: EquipmentSlot) -> Option<Item> {
        self.entities
            .get_mut(&id)
            .and_then(|e| e.equipment.remove(&slot))
    }
}

impl HealthSink for Arena {
    fn apply_health_delta(&mut self, id: EntityId, delta: f64) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.health = (entity.health + delta).clamp(0.0, entity.max_health);
        }
    }

    fn feedback(&mut self, id: EntityId, feedback: Feedback) {
        self.feedback.push((id, feedback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_delta_clamps() {
        let mut arena = Arena::new();
        let id = arena.spawn_living(20.0, Position::default());

        arena.apply_health_delta(id, -5.0);
        assert_eq!(arena.health(id), Some(15.0));

        arena.apply_health_delta(id, 100.0);
        assert_eq!(arena.health(id), Some(20.0));

        arena.apply_health_delta(id, -50.0);
        assert_eq!(arena.health(id), Some(0.0));
        assert!(!arena.is_alive(id));
    }

    #[test]
    fn test_nearby_only_living_in_radius() {
        let mut arena = Arena::new();
        let center = arena.spawn_living(20.0, Position::new(0.0, 0.0, 0.0));
        let close = arena.spawn_living(20.0, Position::new(2.0, 0.0, 0.0));
        let far = arena.spawn_living(20.0, Position::new(10.0, 0.0, 0.0));
        let arrow = arena.spawn_projectile(Some(center), Position::new(1.0, 0.0, 0.0));
        let dead = arena.spawn_living(20.0, Position::new(1.0, 1.0, 0.0));
        arena.set_health(dead, 0.0);

        let found = arena.nearby(center, 3.0);
        assert_eq!(found, vec![close]);
        assert!(!found.contains(&far));
        assert!(!found.contains(&arrow));
    }

    #[test]
    fn test_missing_entity() {
        let mut arena = Arena::new();
        let id = arena.spawn_living(20.0, Position::default());
        assert!(arena.despawn(id));
        assert!(!arena.exists(id));
        assert!(arena.nearby(id, 5.0).is_empty());
        // Writes to vanished entities are ignored
        arena.apply_health_delta(id, -1.0);
        assert!(arena.equip(id, EquipmentSlot::Boots, Item::new("boots")).is_none());
    }
}
