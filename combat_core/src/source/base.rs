//! BaseAttributes - Fixed per-attribute starting values

use crate::attributes::{AttributeAccumulator, AttributeKind};
use crate::source::AttributeSource;

/// The fixed base every participant starts from
pub struct BaseAttributes;

impl AttributeSource for BaseAttributes {
    fn id(&self) -> &str {
        "base_attributes"
    }

    fn priority(&self) -> i32 {
        -100 // Base applies first
    }

    fn apply(&self, attributes: &mut AttributeAccumulator) {
        for kind in AttributeKind::all() {
            attributes.add_base(*kind, kind.base_value());
        }
    }
}
