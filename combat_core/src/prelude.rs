//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::types::{DamageCause, EntityId, EquipmentSlot, ParticipantKind, Position, Tick};
pub use crate::attributes::{AttributeKind, AttributeSet};

// Engine
pub use crate::context::{CombatContext, TickReport};
pub use crate::combat::{CancelReason, CombatResult, CombatSignal};

// Items and abilities
pub use crate::item::{Enchantment, Item};
pub use crate::ability::{AbilityKind, TriggerCondition};

// Statuses
pub use crate::status::{StatusEffect, StatusKind};

// Host
pub use crate::host::{Arena, Equipment, Feedback, HealthSink, Host, Participants};

// Config
pub use crate::config::CombatConstants;
