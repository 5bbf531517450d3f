//! CombatResult - Outcome of resolving one damage signal

use crate::ability::AbilityActivation;
use crate::durability::WearOutcome;
use crate::types::{DamageCause, EntityId, EquipmentSlot};
use serde::Serialize;

/// Why a hit applied no damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// Raw damage was zero or negative
    NoDamage,
    /// Defender does not exist or is already dead
    InvalidDefender,
    /// A protection enchantment removed the whole hit
    EnvironmentImmunity,
    /// Blast immunity turned the explosion into healing
    ExplosionAbsorbed,
    /// The counter attack killed the attacker
    CounterKill,
    Dodged,
    Toughness,
    Resistance,
}

/// Steps of the chain that change the damage number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationStage {
    Critical,
    Vulnerable,
    Environment,
    Toughness,
    Armor,
    Resistance,
}

/// Damage before and after one stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MitigationStep {
    pub stage: MitigationStage,
    pub before: f64,
    pub after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WearRecord {
    pub slot: EquipmentSlot,
    pub outcome: WearOutcome,
}

/// Result of resolving a damage signal
#[derive(Debug, Clone, Serialize)]
pub struct CombatResult {
    // === Signal ===
    pub cause: DamageCause,
    /// Who is credited with the hit (a projectile's shooter, not the arrow)
    pub attacker: Option<EntityId>,
    pub defender: EntityId,

    // === Damage Breakdown ===
    /// Damage as reported by the host
    pub raw_damage: f64,
    /// Damage after the critical and vulnerability multipliers
    pub amplified_damage: f64,
    /// Health actually removed from the defender
    pub applied_damage: f64,
    /// Every stage that changed the number, in order
    pub steps: Vec<MitigationStep>,

    // === Outcome ===
    /// Set when the chain short-circuited; applied damage is then 0
    pub cancelled: Option<CancelReason>,
    pub critical: bool,
    /// Counter damage dealt back to the attacker
    pub counter_damage: f64,
    /// Health restored by blast immunity
    pub healed: f64,
    pub is_killing_blow: bool,

    // === Side Effects ===
    pub wear: Vec<WearRecord>,
    pub abilities_fired: Vec<AbilityActivation>,
}

impl CombatResult {
    pub fn new(cause: DamageCause, attacker: Option<EntityId>, defender: EntityId, raw: f64) -> Self {
        CombatResult {
            cause,
            attacker,
            defender,
            raw_damage: raw,
            amplified_damage: raw.max(0.0),
            applied_damage: 0.0,
            steps: Vec::new(),
            cancelled: None,
            critical: false,
            counter_damage: 0.0,
            healed: 0.0,
            is_killing_blow: false,
            wear: Vec::new(),
            abilities_fired: Vec::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.is_some()
    }

    pub(crate) fn cancel(&mut self, reason: CancelReason) {
        self.cancelled = Some(reason);
        self.applied_damage = 0.0;
    }

    pub(crate) fn record(&mut self, stage: MitigationStage, before: f64, after: f64) {
        self.steps.push(MitigationStep {
            stage,
            before,
            after,
        });
    }

    /// Damage removed between the amplified and applied numbers
    pub fn total_mitigated(&self) -> f64 {
        (self.amplified_damage - self.applied_damage).max(0.0)
    }

    /// Items that broke during this hit
    pub fn broken_items(&self) -> impl Iterator<Item = &str> {
        self.wear.iter().filter_map(|w| match &w.outcome {
            WearOutcome::Broken { item } => Some(item.as_str()),
            _ => None,
        })
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if let Some(reason) = self.cancelled {
            parts.push(format!("cancelled ({:?})", reason));
        } else if self.applied_damage > 0.0 {
            parts.push(format!("{:.1} damage taken", self.applied_damage));
        }

        if self.critical {
            parts.push("critical".to_string());
        }

        if self.total_mitigated() > 0.0 && !self.is_cancelled() {
            parts.push(format!("{:.1} mitigated", self.total_mitigated()));
        }

        if self.counter_damage > 0.0 {
            parts.push(format!("{:.1} countered", self.counter_damage));
        }

        if self.healed > 0.0 {
            parts.push(format!("{:.1} healed", self.healed));
        }

        for item in self.broken_items() {
            parts.push(format!("{} broke", item));
        }

        if !self.abilities_fired.is_empty() {
            parts.push(format!("{} abilities fired", self.abilities_fired.len()));
        }

        if self.is_killing_blow {
            parts.push("FATAL".to_string());
        }

        if parts.is_empty() {
            "No damage".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_zeroes_damage() {
        let mut result = CombatResult::new(DamageCause::EntityAttack, None, EntityId(1), 10.0);
        result.applied_damage = 7.0;
        result.cancel(CancelReason::Dodged);
        assert!(result.is_cancelled());
        assert!((result.applied_damage - 0.0).abs() < f64::EPSILON);
        assert!(result.summary().contains("Dodged"));
    }

    #[test]
    fn test_summary_parts() {
        let mut result = CombatResult::new(DamageCause::EntityAttack, None, EntityId(1), 10.0);
        result.amplified_damage = 12.5;
        result.applied_damage = 7.5;
        result.critical = true;
        result.is_killing_blow = true;
        result.wear.push(WearRecord {
            slot: EquipmentSlot::Helmet,
            outcome: WearOutcome::Broken {
                item: "gold_helmet".to_string(),
            },
        });

        let summary = result.summary();
        assert!(summary.contains("7.5 damage"));
        assert!(summary.contains("critical"));
        assert!(summary.contains("5.0 mitigated"));
        assert!(summary.contains("gold_helmet broke"));
        assert!(summary.contains("FATAL"));
    }

    #[test]
    fn test_empty_summary() {
        let result = CombatResult::new(DamageCause::Fall, None, EntityId(1), 0.0);
        assert_eq!(result.summary(), "No damage");
    }
}
