//! Status effects - Timed, stacking conditions on participants

mod registry;
mod types;

pub use registry::StatusEffectRegistry;
pub use types::{StatusEffect, StatusKind};
