//! Damage resolution - The ordered mitigation chain and its side effects

use super::result::{CancelReason, CombatResult, MitigationStage, WearRecord};
use crate::ability::{self, TriggerCondition, TriggerEvent};
use crate::attributes::AttributeKind;
use crate::context::CombatContext;
use crate::defense::{
    apply_armor, apply_resistance, apply_toughness, critical_multiplier, environment_mitigation,
    roll_chance, vulnerability_multiplier, EnvironmentMitigation,
};
use crate::durability::apply_wear;
use crate::host::{Feedback, HealthSink, Host, Participants};
use crate::status::StatusKind;
use crate::types::{DamageCause, EntityId, EquipmentSlot, ParticipantKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A raw "damage occurred" report from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatSignal {
    pub cause: DamageCause,
    /// The entity that caused the damage, if any (may be a projectile)
    pub attacker: Option<EntityId>,
    pub defender: EntityId,
    pub amount: f64,
}

impl CombatSignal {
    /// Damage without an attacker (falls, fire, lava...)
    pub fn new(cause: DamageCause, defender: EntityId, amount: f64) -> Self {
        CombatSignal {
            cause,
            attacker: None,
            defender,
            amount,
        }
    }

    /// A melee hit
    pub fn melee(attacker: EntityId, defender: EntityId, amount: f64) -> Self {
        CombatSignal::new(DamageCause::EntityAttack, defender, amount).with_attacker(attacker)
    }

    pub fn with_attacker(mut self, attacker: EntityId) -> Self {
        self.attacker = Some(attacker);
        self
    }
}

/// Resolve a damage signal against the host (thread RNG)
///
/// Runs the mitigation chain:
/// 1. Critical hit (attacker attributes)
/// 2. Vulnerable stacks
/// 3. Cause-specific protection enchantments
/// 4. Counter attack (melee only)
/// 5. Dodge
/// 6. Toughness
/// 7. Armor and Protection
/// 8. Resistance status
///
/// then wears the defender's armor, applies the health change and evaluates
/// passive abilities.
pub fn resolve<H: Host + ?Sized>(
    ctx: &mut CombatContext,
    host: &mut H,
    signal: &CombatSignal,
) -> CombatResult {
    let mut rng = rand::thread_rng();
    resolve_with_rng(ctx, host, signal, &mut rng)
}

/// Resolve a damage signal with a provided RNG (for deterministic testing)
pub fn resolve_with_rng<H: Host + ?Sized>(
    ctx: &mut CombatContext,
    host: &mut H,
    signal: &CombatSignal,
    rng: &mut impl Rng,
) -> CombatResult {
    let defender = signal.defender;
    let cause = signal.cause;
    let credited = signal.attacker.and_then(|a| credited_attacker(&*host, a));
    let mut result = CombatResult::new(cause, credited, defender, signal.amount);

    if !signal.amount.is_finite() || signal.amount <= 0.0 {
        return cancelled(result, CancelReason::NoDamage);
    }
    if !host.is_alive(defender) {
        return cancelled(result, CancelReason::InvalidDefender);
    }

    let constants = ctx.constants().clone();
    let defender_attrs = ctx.attributes(&*host, defender);
    let living_source = credited.filter(|id| is_living(&*host, *id));
    let mut damage = signal.amount;

    // Step 1: Critical hit
    if let Some(source) = living_source {
        let attrs = ctx.attributes(&*host, source);
        if roll_chance(attrs.get(AttributeKind::CriticalChance), rng) {
            let multiplier =
                critical_multiplier(&constants.critical, attrs.get(AttributeKind::CriticalDamage));
            let before = damage;
            damage *= multiplier;
            result.critical = true;
            result.record(MitigationStage::Critical, before, damage);
            host.feedback(
                source,
                Feedback::CriticalHit {
                    target: defender,
                    multiplier,
                },
            );
        }
    }

    // Step 2: Vulnerable
    let vulnerable = ctx.statuses().stacks(defender, StatusKind::Vulnerable);
    if vulnerable > 0 {
        let before = damage;
        damage *= vulnerability_multiplier(vulnerable, &constants.mitigation);
        result.record(MitigationStage::Vulnerable, before, damage);
    }
    result.amplified_damage = damage;

    // Step 3: Environmental protection
    match environment_mitigation(cause, &defender_attrs, &constants.mitigation) {
        EnvironmentMitigation::Unaffected => {}
        EnvironmentMitigation::Reduce(reduction) => {
            if reduction >= 1.0 {
                return cancelled(result, CancelReason::EnvironmentImmunity);
            }
            if reduction > 0.0 {
                let before = damage;
                damage *= 1.0 - reduction;
                result.record(MitigationStage::Environment, before, damage);
            }
        }
        EnvironmentMitigation::Absorb => {
            let healed = damage * constants.mitigation.blast_heal_ratio;
            host.apply_health_delta(defender, healed);
            host.feedback(defender, Feedback::ExplosionAbsorbed { healed });
            result.healed = healed;
            return cancelled(result, CancelReason::ExplosionAbsorbed);
        }
    }

    // Step 4: Counter (direct contact from a living attacker only)
    if let Some(attacker) = signal.attacker.filter(|a| cause.is_contact() && is_living(&*host, *a)) {
        if host.is_alive(attacker)
            && roll_chance(defender_attrs.get(AttributeKind::CounterChance), rng)
        {
            let counter = constants.counter.damage;
            host.apply_health_delta(attacker, -counter);
            host.feedback(
                defender,
                Feedback::Countered {
                    attacker,
                    damage: counter,
                },
            );
            result.counter_damage = counter;

            if !host.is_alive(attacker) {
                ctx.entity_died(attacker);
                return cancelled(result, CancelReason::CounterKill);
            }
        }
    }

    // Step 5: Dodge
    if roll_chance(defender_attrs.get(AttributeKind::DodgeChance), rng) {
        host.feedback(defender, Feedback::Dodged { attacker: credited });
        return cancelled(result, CancelReason::Dodged);
    }

    // Step 6: Toughness
    let toughness = defender_attrs.get(AttributeKind::Toughness);
    if toughness > 0.0 {
        let before = damage;
        damage = apply_toughness(damage, toughness);
        result.record(MitigationStage::Toughness, before, damage.max(0.0));
        if damage <= 0.0 {
            return cancelled(result, CancelReason::Toughness);
        }
    }

    // Step 7: Armor and Protection (Fracture is already in the armor value)
    let armor = defender_attrs.get(AttributeKind::Armor);
    let protection = defender_attrs.level(AttributeKind::Protection) as f64;
    if armor > 0.0 || protection > 0.0 {
        let before = damage;
        damage = apply_armor(damage, armor, protection, &constants.mitigation);
        result.record(MitigationStage::Armor, before, damage);
    }

    // Step 8: Resistance
    let amplifier = ctx.statuses().stacks(defender, StatusKind::Resistance);
    if amplifier > 0 {
        let before = damage;
        damage = apply_resistance(damage, amplifier, &constants.mitigation);
        result.record(MitigationStage::Resistance, before, damage.max(0.0));
        if damage <= 0.0 {
            return cancelled(result, CancelReason::Resistance);
        }
    }

    // Step 9: Durability, then health
    result.applied_damage = damage;
    for slot in EquipmentSlot::armor() {
        if host.equipped(defender, *slot).is_none() {
            continue;
        }
        let outcome = apply_wear(host, defender, *slot, damage, cause, &constants.durability, rng);
        result.wear.push(WearRecord {
            slot: *slot,
            outcome,
        });
    }
    host.apply_health_delta(defender, -damage);
    result.is_killing_blow = !host.is_alive(defender);

    debug!(
        %defender,
        ?cause,
        raw = signal.amount,
        applied = damage,
        killing_blow = result.is_killing_blow,
        "hit resolved"
    );

    // Chain damage never re-triggers abilities
    if cause != DamageCause::Ability {
        fire_passives(ctx, host, &mut result, living_source, rng);
    }

    if result.is_killing_blow {
        ctx.entity_died(defender);
    }

    result
}

/// Forward a heal to the host unchanged
pub fn heal<H: HealthSink + ?Sized>(host: &mut H, entity: EntityId, amount: f64) {
    debug!(%entity, amount, "heal");
    host.apply_health_delta(entity, amount);
}

fn fire_passives<H: Host + ?Sized>(
    ctx: &mut CombatContext,
    host: &mut H,
    result: &mut CombatResult,
    source: Option<EntityId>,
    rng: &mut impl Rng,
) {
    let defender = result.defender;

    if let Some(source) = source {
        let event = TriggerEvent {
            trigger: TriggerCondition::DamageDealt,
            owner: source,
            target: Some(defender),
            defender,
        };
        result
            .abilities_fired
            .extend(ability::evaluate(ctx, host, &event, rng));
    }

    if !result.is_killing_blow {
        let event = TriggerEvent {
            trigger: TriggerCondition::DamageTaken,
            owner: defender,
            target: result.attacker,
            defender,
        };
        result
            .abilities_fired
            .extend(ability::evaluate(ctx, host, &event, rng));
    }

    if let Some(source) = source.filter(|_| result.is_killing_blow) {
        let event = TriggerEvent {
            trigger: TriggerCondition::Kill,
            owner: source,
            target: Some(defender),
            defender,
        };
        result
            .abilities_fired
            .extend(ability::evaluate(ctx, host, &event, rng));
    }
}

/// The entity credited with a hit: projectiles resolve to their shooter
fn credited_attacker<P: Participants + ?Sized>(host: &P, attacker: EntityId) -> Option<EntityId> {
    match host.kind(attacker)? {
        ParticipantKind::Projectile { shooter } => shooter.filter(|s| host.exists(*s)),
        _ => Some(attacker),
    }
}

fn is_living<P: Participants + ?Sized>(host: &P, id: EntityId) -> bool {
    host.kind(id).is_some_and(|k| k.is_living())
}

fn cancelled(mut result: CombatResult, reason: CancelReason) -> CombatResult {
    debug!(defender = %result.defender, cause = ?result.cause, ?reason, "hit cancelled");
    result.cancel(reason);
    result
}
