//! AttributeValue - Additive breakdown of one attribute (Base + Equipment + Status)

use serde::{Deserialize, Serialize};

/// Represents an attribute as the sum of its three contribution layers
///
/// Final value is `base + equipment + status`. Each layer is kept apart so a
/// display can show where a number came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// Fixed per-attribute base
    pub base: f64,
    /// Sum of all equipped-slot contributions
    pub equipment: f64,
    /// Sum of all status-derived contributions (may be negative)
    pub status: f64,
}

impl AttributeValue {
    /// Create a new AttributeValue with the given base
    pub fn with_base(base: f64) -> Self {
        AttributeValue {
            base,
            ..Default::default()
        }
    }

    /// Calculate final value: base + equipment + status
    pub fn compute(&self) -> f64 {
        self.base + self.equipment + self.status
    }

    pub fn add_equipment(&mut self, value: f64) {
        self.equipment += value;
    }

    pub fn add_status(&mut self, value: f64) {
        self.status += value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_basic() {
        let value = AttributeValue::with_base(5.0);
        assert!((value.compute() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_layers_are_additive() {
        let mut value = AttributeValue::with_base(5.0);
        value.add_equipment(8.0);
        value.add_equipment(2.0);
        value.add_status(-3.0);
        assert!((value.compute() - 12.0).abs() < f64::EPSILON);
        assert!((value.equipment - 10.0).abs() < f64::EPSILON);
    }
}
