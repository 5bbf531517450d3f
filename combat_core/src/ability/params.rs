//! Ability parameters - Decoding of the per-binding TOML payload
//!
//! Common keys:
//! - `chance` percent 0-100 (default 100)
//! - `cooldown` in ticks (default 0)
//! - `health_below` percent of the event defender's max health (optional)
//!
//! `stack_instance` keys: `status`, `stacks` (default 1), `duration`,
//! `target` ("self" or "target", default "target").
//!
//! `chain_damage` keys: `damage`, `radius`, `target` (default "target").

use super::{AbilityError, AbilityKind};
use crate::status::StatusKind;
use crate::types::Tick;
use serde::{Deserialize, Serialize};

/// Who an effect is applied to (or centered on)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    /// The binding's owner
    #[serde(rename = "self")]
    Owner,
    /// The other party of the triggering event
    #[default]
    Target,
}

/// The effect a binding applies when it fires
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbilityEffect {
    StackInstance {
        status: StatusKind,
        stacks: u32,
        duration: Tick,
        target: EffectTarget,
    },
    ChainDamage {
        damage: f64,
        radius: f64,
        target: EffectTarget,
    },
}

impl AbilityEffect {
    pub fn target(&self) -> EffectTarget {
        match self {
            AbilityEffect::StackInstance { target, .. } | AbilityEffect::ChainDamage { target, .. } => {
                *target
            }
        }
    }
}

/// Fully decoded binding parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityParams {
    /// Percent chance to fire (0-100)
    pub chance: f64,
    /// Base cooldown in ticks before reduction
    pub cooldown: Tick,
    /// Only fire while the event defender is below this percent of max health
    pub health_below: Option<f64>,
    pub effect: AbilityEffect,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParams {
    chance: Option<f64>,
    cooldown: Option<Tick>,
    health_below: Option<f64>,
    status: Option<StatusKind>,
    stacks: Option<u32>,
    duration: Option<Tick>,
    damage: Option<f64>,
    radius: Option<f64>,
    target: Option<EffectTarget>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, AbilityError> {
    value.ok_or(AbilityError::InvalidValue {
        field,
        reason: "missing".to_string(),
    })
}

fn percent(value: f64, field: &'static str) -> Result<f64, AbilityError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(AbilityError::InvalidValue {
            field,
            reason: format!("{} is outside 0..=100", value),
        });
    }
    Ok(value)
}

fn non_negative(value: f64, field: &'static str) -> Result<f64, AbilityError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AbilityError::InvalidValue {
            field,
            reason: format!("{} must be a non-negative number", value),
        });
    }
    Ok(value)
}

impl AbilityParams {
    /// Decode and validate a payload for the given ability kind
    pub fn decode(kind: AbilityKind, payload: &str) -> Result<Self, AbilityError> {
        let raw: RawParams = crate::config::parse_toml(payload)?;

        let chance = percent(raw.chance.unwrap_or(100.0), "chance")?;
        let health_below = raw
            .health_below
            .map(|h| percent(h, "health_below"))
            .transpose()?;
        let target = raw.target.unwrap_or_default();

        let effect = match kind {
            AbilityKind::StackInstance => {
                let stacks = raw.stacks.unwrap_or(1);
                if stacks == 0 {
                    return Err(AbilityError::InvalidValue {
                        field: "stacks",
                        reason: "must be at least 1".to_string(),
                    });
                }
                let duration = required(raw.duration, "duration")?;
                if duration == 0 {
                    return Err(AbilityError::InvalidValue {
                        field: "duration",
                        reason: "must be at least 1 tick".to_string(),
                    });
                }
                AbilityEffect::StackInstance {
                    status: required(raw.status, "status")?,
                    stacks,
                    duration,
                    target,
                }
            }
            AbilityKind::ChainDamage => AbilityEffect::ChainDamage {
                damage: non_negative(required(raw.damage, "damage")?, "damage")?,
                radius: non_negative(required(raw.radius, "radius")?, "radius")?,
                target,
            },
        };

        Ok(AbilityParams {
            chance,
            cooldown: raw.cooldown.unwrap_or(0),
            health_below,
            effect,
        })
    }
}
