//! Combat resolution - Run damage signals through the mitigation chain

mod resolution;
mod result;

pub use resolution::{heal, resolve, resolve_with_rng, CombatSignal};
pub use result::{CancelReason, CombatResult, MitigationStage, MitigationStep, WearRecord};
