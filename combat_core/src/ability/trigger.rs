//! Passive trigger - Evaluate an owner's bindings for one trigger condition

use super::{AbilityEffect, AbilityKey, EffectTarget, TriggerCondition};
use crate::attributes::AttributeKind;
use crate::context::CombatContext;
use crate::defense::roll_chance;
use crate::host::{Equipment, Feedback, Host};
use crate::scheduler::DeferredTask;
use crate::types::{EntityId, EquipmentSlot, Tick};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

/// The event a set of bindings is evaluated against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    pub trigger: TriggerCondition,
    /// Whose equipment is searched
    pub owner: EntityId,
    /// The other party: the defender for dealt/kill, the attacker for taken
    pub target: Option<EntityId>,
    /// Defender of the underlying hit, read by the `health_below` gate
    pub defender: EntityId,
}

/// A binding that fired
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityActivation {
    pub owner: EntityId,
    pub slot: EquipmentSlot,
    pub key: AbilityKey,
    pub effect: AbilityEffect,
}

/// Evaluate every ready binding of the owner that matches the trigger
///
/// Bindings with a missing or malformed payload are skipped with a warning.
/// A failed health gate or chance roll leaves the binding untouched. On
/// success the effect is applied, the cooldown (reduced by the owner's
/// CooldownReduction) starts and a clear is scheduled.
pub fn evaluate<H: Host + ?Sized>(
    ctx: &mut CombatContext,
    host: &mut H,
    event: &TriggerEvent,
    rng: &mut impl Rng,
) -> Vec<AbilityActivation> {
    let mut fired = Vec::new();
    if !host.kind(event.owner).is_some_and(|k| k.is_living()) {
        return fired;
    }

    let now = ctx.now();
    let cooldown_reduction = ctx
        .attributes(&*host, event.owner)
        .get(AttributeKind::CooldownReduction);

    for slot in EquipmentSlot::all() {
        let keys = host
            .equipped(event.owner, *slot)
            .map(|item| item.abilities_for(event.trigger))
            .unwrap_or_default();

        for key in keys {
            let Some(binding) = host.equipped(event.owner, *slot).and_then(|i| i.ability(key)) else {
                continue;
            };
            if !binding.is_ready(now) {
                debug!(owner = %event.owner, %key, "ability on cooldown");
                continue;
            }
            let params = match binding.decode() {
                Ok(params) => params,
                Err(err) => {
                    warn!(owner = %event.owner, ?slot, %key, error = %err, "skipping ability binding");
                    continue;
                }
            };

            if let Some(threshold) = params.health_below {
                if !below_health(&*host, event.defender, threshold) {
                    continue;
                }
            }
            if !roll_chance(params.chance, rng) {
                continue;
            }
            if !apply_effect(ctx, host, event, &params.effect) {
                continue;
            }

            let cooldown = scaled_cooldown(params.cooldown, cooldown_reduction);
            if cooldown > 0 {
                if let Some(binding) = host
                    .equipped_mut(event.owner, *slot)
                    .and_then(|i| i.ability_mut(key))
                {
                    binding.start_cooldown(now + cooldown);
                }
                ctx.schedule(
                    cooldown,
                    DeferredTask::ClearCooldown {
                        entity: event.owner,
                        slot: *slot,
                        key,
                    },
                );
            }

            debug!(owner = %event.owner, ?slot, %key, cooldown, "ability fired");
            host.feedback(event.owner, Feedback::AbilityFired { slot: *slot, key });
            fired.push(AbilityActivation {
                owner: event.owner,
                slot: *slot,
                key,
                effect: params.effect,
            });
        }
    }

    fired
}

/// Clear a binding's cooldown once it has run out
///
/// Returns false when the item left the slot or the binding was re-armed.
pub(crate) fn release_cooldown<E: Equipment + ?Sized>(
    equipment: &mut E,
    entity: EntityId,
    slot: EquipmentSlot,
    key: AbilityKey,
    now: Tick,
) -> bool {
    equipment
        .equipped_mut(entity, slot)
        .and_then(|item| item.ability_mut(key))
        .is_some_and(|binding| binding.release(now))
}

/// Cooldown after percent reduction, never negative
fn scaled_cooldown(base: Tick, reduction_percent: f64) -> Tick {
    let scaled = base as f64 * (1.0 - reduction_percent / 100.0);
    scaled.max(0.0).round() as Tick
}

fn below_health<H: Host + ?Sized>(host: &H, defender: EntityId, threshold: f64) -> bool {
    match (host.health(defender), host.max_health(defender)) {
        (Some(health), Some(max)) if max > 0.0 => health / max * 100.0 < threshold,
        _ => false,
    }
}

/// Apply the effect; false when there was nothing to apply it to
fn apply_effect<H: Host + ?Sized>(
    ctx: &mut CombatContext,
    host: &mut H,
    event: &TriggerEvent,
    effect: &AbilityEffect,
) -> bool {
    let subject = match effect.target() {
        EffectTarget::Owner => Some(event.owner),
        EffectTarget::Target => event.target,
    };
    let Some(subject) = subject else {
        debug!(owner = %event.owner, "ability has no target");
        return false;
    };

    match *effect {
        AbilityEffect::StackInstance {
            status,
            stacks,
            duration,
            ..
        } => {
            if !host.is_alive(subject) {
                return false;
            }
            ctx.add_status(subject, status, stacks, duration).is_some()
        }
        AbilityEffect::ChainDamage { damage, radius, .. } => {
            if !host.exists(subject) {
                return false;
            }
            let delay = ctx.constants().abilities.chain_damage_delay;
            for victim in host.nearby(subject, radius) {
                if victim == event.owner {
                    continue;
                }
                ctx.schedule(
                    delay,
                    DeferredTask::ChainHit {
                        source: event.owner,
                        victim,
                        amount: damage,
                    },
                );
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityKind;
    use crate::config::CombatConstants;
    use crate::host::Arena;
    use crate::item::Item;
    use crate::status::StatusKind;
    use crate::types::Position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const VULNERABLE_ON_HIT: &str = r#"
chance = 100
cooldown = 40
status = "vulnerable"
stacks = 2
duration = 100
"#;

    fn setup(payload: &str) -> (CombatContext, Arena, EntityId, EntityId) {
        let mut arena = Arena::new();
        let owner = arena.spawn_living(20.0, Position::default());
        let target = arena.spawn_living(20.0, Position::new(1.0, 0.0, 0.0));
        arena.equip(
            owner,
            EquipmentSlot::MainHand,
            Item::new("cursed_blade").with_ability(
                TriggerCondition::DamageDealt,
                AbilityKind::StackInstance,
                payload,
            ),
        );
        (CombatContext::new(CombatConstants::default()), arena, owner, target)
    }

    fn dealt(owner: EntityId, target: EntityId) -> TriggerEvent {
        TriggerEvent {
            trigger: TriggerCondition::DamageDealt,
            owner,
            target: Some(target),
            defender: target,
        }
    }

    #[test]
    fn test_stack_instance_applies_to_target() {
        let (mut ctx, mut arena, owner, target) = setup(VULNERABLE_ON_HIT);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let fired = evaluate(&mut ctx, &mut arena, &dealt(owner, target), &mut rng);
        assert_eq!(fired.len(), 1);
        assert_eq!(ctx.statuses().stacks(target, StatusKind::Vulnerable), 2);
        assert!(arena
            .feedback_log()
            .iter()
            .any(|(id, f)| *id == owner && matches!(f, Feedback::AbilityFired { .. })));
    }

    #[test]
    fn test_cooldown_blocks_second_fire() {
        let (mut ctx, mut arena, owner, target) = setup(VULNERABLE_ON_HIT);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        evaluate(&mut ctx, &mut arena, &dealt(owner, target), &mut rng);
        let again = evaluate(&mut ctx, &mut arena, &dealt(owner, target), &mut rng);
        assert!(again.is_empty());
        assert_eq!(ctx.statuses().stacks(target, StatusKind::Vulnerable), 2);
    }

    #[test]
    fn test_wrong_trigger_ignored() {
        let (mut ctx, mut arena, owner, target) = setup(VULNERABLE_ON_HIT);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let event = TriggerEvent {
            trigger: TriggerCondition::Kill,
            ..dealt(owner, target)
        };
        assert!(evaluate(&mut ctx, &mut arena, &event, &mut rng).is_empty());
    }

    #[test]
    fn test_malformed_payload_skipped() {
        let (mut ctx, mut arena, owner, target) = setup("status = ");
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(evaluate(&mut ctx, &mut arena, &dealt(owner, target), &mut rng).is_empty());
        assert_eq!(ctx.statuses().tracked_entities(), 0);
    }

    #[test]
    fn test_zero_chance_never_fires() {
        let payload = "chance = 0\nstatus = \"fracture\"\nduration = 10";
        let (mut ctx, mut arena, owner, target) = setup(payload);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            assert!(evaluate(&mut ctx, &mut arena, &dealt(owner, target), &mut rng).is_empty());
        }
    }

    #[test]
    fn test_health_gate() {
        let payload = "health_below = 50\nstatus = \"fracture\"\nduration = 10";
        let (mut ctx, mut arena, owner, target) = setup(payload);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        assert!(evaluate(&mut ctx, &mut arena, &dealt(owner, target), &mut rng).is_empty());

        arena.set_health(target, 9.0);
        assert_eq!(evaluate(&mut ctx, &mut arena, &dealt(owner, target), &mut rng).len(), 1);
    }

    #[test]
    fn test_chain_damage_queues_hits_around_target() {
        let payload = "damage = 3.0\nradius = 2.5";
        let mut arena = Arena::new();
        let owner = arena.spawn_living(20.0, Position::default());
        let target = arena.spawn_living(20.0, Position::new(5.0, 0.0, 0.0));
        let bystander = arena.spawn_living(20.0, Position::new(6.0, 0.0, 0.0));
        let far = arena.spawn_living(20.0, Position::new(20.0, 0.0, 0.0));
        arena.equip(
            owner,
            EquipmentSlot::MainHand,
            Item::new("storm_axe").with_ability(
                TriggerCondition::DamageDealt,
                AbilityKind::ChainDamage,
                payload,
            ),
        );
        let mut ctx = CombatContext::new(CombatConstants::default());
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        evaluate(&mut ctx, &mut arena, &dealt(owner, target), &mut rng);

        let victims: Vec<_> = ctx
            .pending_tasks()
            .filter_map(|(tick, task)| match task {
                DeferredTask::ChainHit { victim, .. } => Some((tick, *victim)),
                _ => None,
            })
            .collect();
        assert_eq!(victims, vec![(1, bystander)]);
        assert!(!victims.iter().any(|(_, v)| *v == far));
    }

    #[test]
    fn test_scaled_cooldown() {
        assert_eq!(scaled_cooldown(40, 0.0), 40);
        assert_eq!(scaled_cooldown(40, 25.0), 30);
        assert_eq!(scaled_cooldown(40, -50.0), 60);
        assert_eq!(scaled_cooldown(40, 150.0), 0);
    }

    #[test]
    fn test_release_cooldown_when_item_moved() {
        let (mut ctx, mut arena, owner, target) = setup(VULNERABLE_ON_HIT);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        evaluate(&mut ctx, &mut arena, &dealt(owner, target), &mut rng);

        let key = AbilityKey::new(TriggerCondition::DamageDealt, AbilityKind::StackInstance);
        let item = arena.unequip(owner, EquipmentSlot::MainHand).unwrap();
        assert!(!release_cooldown(&mut arena, owner, EquipmentSlot::MainHand, key, 40));

        // The stale flag still lets the binding fire once the release tick passed
        let binding = item.ability(key).unwrap();
        assert!(!binding.is_ready(39));
        assert!(binding.is_ready(40));
    }
}
