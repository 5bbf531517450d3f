//! Status effect type definitions

use crate::types::{EntityId, Tick};
use serde::{Deserialize, Serialize};

/// Kinds of status the combat core reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Each stack increases incoming damage by a fixed percentage
    Vulnerable,
    /// Each stack strips a flat amount of armor
    Fracture,
    /// Stack count is the amplifier of a temporary damage resistance
    Resistance,
}

/// An active status on one entity
///
/// A registered effect always has at least one stack; zero stacks means the
/// entry does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub entity: EntityId,
    pub kind: StatusKind,
    pub stacks: u32,
    /// Tick of the most recent application
    pub applied_at: Tick,
    /// Tick at which the whole entry is removed
    pub expires_at: Tick,
}

impl StatusEffect {
    /// Ticks left before expiry
    pub fn remaining(&self, now: Tick) -> Tick {
        self.expires_at.saturating_sub(now)
    }

    /// Length of the current timer
    pub fn duration(&self) -> Tick {
        self.expires_at.saturating_sub(self.applied_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_saturates() {
        let effect = StatusEffect {
            entity: EntityId(7),
            kind: StatusKind::Vulnerable,
            stacks: 2,
            applied_at: 10,
            expires_at: 50,
        };
        assert_eq!(effect.remaining(20), 30);
        assert_eq!(effect.remaining(80), 0);
        assert_eq!(effect.duration(), 40);
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&StatusKind::Vulnerable).unwrap();
        assert_eq!(json, "\"vulnerable\"");
        let back: StatusKind = serde_json::from_str("\"fracture\"").unwrap();
        assert_eq!(back, StatusKind::Fracture);
    }
}
