//! combat_core - Combat damage resolution and status effect engine
//!
//! This library provides:
//! - AttributeSet: Effective combat attributes aggregated from base, gear and statuses
//! - StatusEffectRegistry: Timed, stacking statuses per entity
//! - Combat resolution: The ordered mitigation chain from raw to applied damage
//! - Durability: Armor wear and breaking
//! - Passive abilities: Chance and cooldown gated effects bound to items
//! - CombatContext: Explicit engine state driven tick by tick by the host

pub mod ability;
pub mod attributes;
pub mod combat;
pub mod config;
pub mod context;
pub mod defense;
pub mod durability;
pub mod host;
pub mod item;
pub mod prelude;
pub mod scheduler;
pub mod source;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use ability::{AbilityBinding, AbilityError, AbilityKey, AbilityKind, TriggerCondition};
pub use attributes::{AttributeKind, AttributeSet, AttributeValue};
pub use combat::{CancelReason, CombatResult, CombatSignal};
pub use config::{CombatConstants, ConfigError};
pub use context::{CombatContext, TickReport};
pub use durability::WearOutcome;
pub use host::{Arena, Equipment, Feedback, HealthSink, Host, Participants};
pub use item::{Durability, Enchantment, Item};
pub use scheduler::{DeferredTask, DeferredTaskQueue};
pub use source::{AttributeSource, BaseAttributes, GearSource, StatusSource};
pub use status::{StatusEffect, StatusEffectRegistry, StatusKind};
pub use types::{DamageCause, EntityId, EquipmentSlot, ParticipantKind, Position, Tick};
