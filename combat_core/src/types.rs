//! Core types shared across the combat engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Game tick counter
pub type Tick = u64;

/// Opaque identity of a combat participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        EntityId(raw)
    }
}

/// What kind of thing a participant is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    /// Players and creatures: carry equipment, statuses and abilities
    Living,
    /// Arrows, tridents and the like
    Projectile { shooter: Option<EntityId> },
    /// Anything else that can be the source of damage (falling blocks, TNT)
    Inanimate,
}

impl ParticipantKind {
    pub fn is_living(&self) -> bool {
        matches!(self, ParticipantKind::Living)
    }
}

/// World position, used for radius lookups
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Helmet,
    Chestplate,
    Leggings,
    Boots,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
            EquipmentSlot::Helmet,
            EquipmentSlot::Chestplate,
            EquipmentSlot::Leggings,
            EquipmentSlot::Boots,
        ]
    }

    /// Slots whose items count as worn armor
    pub fn armor() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Helmet,
            EquipmentSlot::Chestplate,
            EquipmentSlot::Leggings,
            EquipmentSlot::Boots,
        ]
    }

    pub fn is_armor(&self) -> bool {
        Self::armor().contains(self)
    }
}

/// Why damage happened, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageCause {
    // Direct contact
    EntityAttack,
    EntitySweepAttack,
    // Ranged
    Projectile,
    // Environment
    Fall,
    Fire,
    FireTick,
    Lava,
    HotFloor,
    BlockExplosion,
    EntityExplosion,
    // Magic
    Magic,
    Poison,
    Wither,
    /// Damage dealt by a passive ability (chain damage)
    Ability,
    Other,
}

impl DamageCause {
    /// Melee hits that allow a counter attack
    pub fn is_contact(&self) -> bool {
        matches!(self, DamageCause::EntityAttack | DamageCause::EntitySweepAttack)
    }

    /// Hits that wear armor at the on-hit rate
    pub fn is_attack(&self) -> bool {
        self.is_contact() || *self == DamageCause::Projectile
    }

    pub fn is_fire(&self) -> bool {
        matches!(
            self,
            DamageCause::Fire | DamageCause::FireTick | DamageCause::Lava | DamageCause::HotFloor
        )
    }

    pub fn is_explosion(&self) -> bool {
        matches!(self, DamageCause::BlockExplosion | DamageCause::EntityExplosion)
    }

    pub fn is_magic(&self) -> bool {
        matches!(self, DamageCause::Magic | DamageCause::Poison | DamageCause::Wither)
    }
}
