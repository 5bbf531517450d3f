//! AttributeSource - Trait and implementations for attribute providers

mod base;
mod gear;
mod status;

pub use base::BaseAttributes;
pub use gear::GearSource;
pub use status::StatusSource;

use crate::attributes::AttributeAccumulator;

/// Trait for anything that contributes attributes to an AttributeSet
pub trait AttributeSource {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// Suggested priorities:
    /// - Base attributes: -100
    /// - Gear: 0
    /// - Statuses: 200
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's contributions to the accumulator
    fn apply(&self, attributes: &mut AttributeAccumulator);
}
