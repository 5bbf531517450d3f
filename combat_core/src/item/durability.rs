//! Durability - Accumulated wear on an item

use serde::{Deserialize, Serialize};

/// Wear state of an item; only the durability manager writes `wear`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDurability")]
pub struct Durability {
    wear: u32,
    max: u32,
}

/// Durability as stored, before the wear clamp
#[derive(Deserialize)]
struct RawDurability {
    #[serde(default)]
    wear: u32,
    max: u32,
}

impl From<RawDurability> for Durability {
    fn from(raw: RawDurability) -> Self {
        Durability::new(raw.max).with_wear(raw.wear)
    }
}

impl Durability {
    pub fn new(max: u32) -> Self {
        Durability { wear: 0, max }
    }

    /// Start from an already worn state, clamped at the maximum
    pub fn with_wear(mut self, wear: u32) -> Self {
        self.wear = wear.min(self.max);
        self
    }

    pub fn wear(&self) -> u32 {
        self.wear
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.wear)
    }

    pub(crate) fn set_wear(&mut self, wear: u32) {
        self.wear = wear.min(self.max);
    }
}
