//! Passive abilities driven through full hits and ticks

use combat_core::prelude::*;
use combat_core::AbilityKey;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const MARK_ON_HIT: &str = r#"
chance = 100
cooldown = 40
status = "vulnerable"
stacks = 1
duration = 200
"#;

fn fired_count(arena: &Arena, owner: EntityId) -> usize {
    arena
        .feedback_log()
        .iter()
        .filter(|(id, f)| *id == owner && matches!(f, Feedback::AbilityFired { .. }))
        .count()
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(77)
}

#[test]
fn test_cooldown_forty_allows_one_application() {
    let mut ctx = CombatContext::new(CombatConstants::default());
    let mut arena = Arena::new();
    let mut rng = rng();
    let attacker = arena.spawn_living(20.0, Position::default());
    let defender = arena.spawn_living(10_000.0, Position::new(1.0, 0.0, 0.0));
    arena.equip(
        attacker,
        EquipmentSlot::MainHand,
        Item::new("marking_dagger").with_ability(
            TriggerCondition::DamageDealt,
            AbilityKind::StackInstance,
            MARK_ON_HIT,
        ),
    );

    for _ in 0..40 {
        ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 1.0), &mut rng);
        ctx.tick(&mut arena, &mut rng);
    }
    assert_eq!(fired_count(&arena, attacker), 1);
    assert_eq!(ctx.statuses().stacks(defender, StatusKind::Vulnerable), 1);

    // Released on tick 40
    assert_eq!(ctx.now(), 40);
    ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 1.0), &mut rng);
    assert_eq!(fired_count(&arena, attacker), 2);
    assert_eq!(ctx.statuses().stacks(defender, StatusKind::Vulnerable), 2);
}

#[test]
fn test_cooldown_reduction_shortens_cooldown() {
    let mut ctx = CombatContext::new(CombatConstants::default());
    let mut arena = Arena::new();
    let mut rng = rng();
    let attacker = arena.spawn_living(20.0, Position::default());
    let defender = arena.spawn_living(10_000.0, Position::new(1.0, 0.0, 0.0));
    arena.equip(
        attacker,
        EquipmentSlot::MainHand,
        Item::new("marking_dagger").with_ability(
            TriggerCondition::DamageDealt,
            AbilityKind::StackInstance,
            MARK_ON_HIT,
        ),
    );
    arena.equip(
        attacker,
        EquipmentSlot::Helmet,
        Item::new("circlet").with_modifier(AttributeKind::CooldownReduction, 50.0),
    );

    for _ in 0..40 {
        ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 1.0), &mut rng);
        ctx.tick(&mut arena, &mut rng);
    }
    assert_eq!(fired_count(&arena, attacker), 2);
}

#[test]
fn test_chain_damage_lands_next_tick_without_retrigger() {
    let mut ctx = CombatContext::new(CombatConstants::default());
    let mut arena = Arena::new();
    let mut rng = rng();
    let attacker = arena.spawn_living(20.0, Position::default());
    let defender = arena.spawn_living(20.0, Position::new(1.0, 0.0, 0.0));
    let bystander = arena.spawn_living(20.0, Position::new(2.0, 0.0, 0.0));
    arena.equip(
        attacker,
        EquipmentSlot::MainHand,
        Item::new("storm_axe").with_ability(
            TriggerCondition::DamageDealt,
            AbilityKind::ChainDamage,
            "damage = 3.0\nradius = 5.0",
        ),
    );
    arena.equip(
        bystander,
        EquipmentSlot::Chestplate,
        Item::new("reactive_plate").with_ability(
            TriggerCondition::DamageTaken,
            AbilityKind::StackInstance,
            "status = \"resistance\"\nduration = 50\ntarget = \"self\"",
        ),
    );

    let hit = ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 4.0), &mut rng);
    assert_eq!(hit.abilities_fired.len(), 1);
    assert_eq!(arena.health(bystander), Some(20.0));

    let report = ctx.tick(&mut arena, &mut rng);
    assert_eq!(report.chain_hits.len(), 1);
    let chain = &report.chain_hits[0];
    assert_eq!(chain.cause, DamageCause::Ability);
    assert_eq!(chain.defender, bystander);
    assert_eq!(arena.health(bystander), Some(17.0));
    assert_eq!(arena.health(attacker), Some(20.0));

    // Ability damage does not fire passives on either side
    assert!(chain.abilities_fired.is_empty());
    assert_eq!(fired_count(&arena, bystander), 0);
    assert_eq!(fired_count(&arena, attacker), 1);
}

#[test]
fn test_kill_trigger_buffs_the_killer() {
    let mut ctx = CombatContext::new(CombatConstants::default());
    let mut arena = Arena::new();
    let mut rng = rng();
    let attacker = arena.spawn_living(20.0, Position::default());
    let defender = arena.spawn_living(5.0, Position::new(1.0, 0.0, 0.0));
    arena.equip(
        attacker,
        EquipmentSlot::MainHand,
        Item::new("reaper").with_ability(
            TriggerCondition::Kill,
            AbilityKind::StackInstance,
            "status = \"resistance\"\nstacks = 2\nduration = 100\ntarget = \"self\"",
        ),
    );

    let result = ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 9.0), &mut rng);
    assert!(result.is_killing_blow);
    assert_eq!(ctx.statuses().stacks(attacker, StatusKind::Resistance), 2);
}

#[test]
fn test_damage_taken_targets_the_attacker() {
    let mut ctx = CombatContext::new(CombatConstants::default());
    let mut arena = Arena::new();
    let mut rng = rng();
    let attacker = arena.spawn_living(20.0, Position::default());
    let defender = arena.spawn_living(20.0, Position::new(1.0, 0.0, 0.0));
    arena.equip(
        defender,
        EquipmentSlot::Chestplate,
        Item::new("spiked_mail").with_ability(
            TriggerCondition::DamageTaken,
            AbilityKind::StackInstance,
            "status = \"fracture\"\nstacks = 3\nduration = 60",
        ),
    );

    ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 2.0), &mut rng);
    assert_eq!(ctx.statuses().stacks(attacker, StatusKind::Fracture), 3);
    assert_eq!(ctx.statuses().stacks(defender, StatusKind::Fracture), 0);
}

#[test]
fn test_misconfigured_binding_does_not_block_others() {
    let mut ctx = CombatContext::new(CombatConstants::default());
    let mut arena = Arena::new();
    let mut rng = rng();
    let attacker = arena.spawn_living(20.0, Position::default());
    let defender = arena.spawn_living(100.0, Position::new(1.0, 0.0, 0.0));

    let mut blade = Item::new("half_finished_blade").with_ability(
        TriggerCondition::DamageDealt,
        AbilityKind::StackInstance,
        MARK_ON_HIT,
    );
    blade.declare_ability(TriggerCondition::DamageDealt, AbilityKind::ChainDamage);
    arena.equip(attacker, EquipmentSlot::MainHand, blade);

    let result = ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 2.0), &mut rng);
    assert_eq!(result.abilities_fired.len(), 1);
    assert_eq!(
        result.abilities_fired[0].key,
        AbilityKey::new(TriggerCondition::DamageDealt, AbilityKind::StackInstance)
    );
}

#[test]
fn test_cooldown_state_stays_with_moved_item() {
    let mut ctx = CombatContext::new(CombatConstants::default());
    let mut arena = Arena::new();
    let mut rng = rng();
    let attacker = arena.spawn_living(20.0, Position::default());
    let defender = arena.spawn_living(10_000.0, Position::new(1.0, 0.0, 0.0));
    arena.equip(
        attacker,
        EquipmentSlot::MainHand,
        Item::new("marking_dagger").with_ability(
            TriggerCondition::DamageDealt,
            AbilityKind::StackInstance,
            MARK_ON_HIT,
        ),
    );

    ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 1.0), &mut rng);

    // Swap hands: the scheduled clear targets the old slot and misses
    let dagger = arena.unequip(attacker, EquipmentSlot::MainHand).unwrap();
    arena.equip(attacker, EquipmentSlot::OffHand, dagger);
    ctx.equipment_changed(attacker);

    ctx.advance(&mut arena, 39, &mut rng);
    ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 1.0), &mut rng);
    assert_eq!(fired_count(&arena, attacker), 1);

    // Past the release tick the stale flag no longer blocks
    ctx.tick(&mut arena, &mut rng);
    ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 1.0), &mut rng);
    assert_eq!(fired_count(&arena, attacker), 2);
}

#[test]
fn test_duplicate_keys_in_loaded_item_fire_once() {
    let mut ctx = CombatContext::new(CombatConstants::default());
    let mut arena = Arena::new();
    let mut rng = rng();
    let attacker = arena.spawn_living(20.0, Position::default());
    let defender = arena.spawn_living(100.0, Position::new(1.0, 0.0, 0.0));

    let json = r#"{
        "id": "twice_bound_blade",
        "abilities": [
            {"key": {"trigger": "damage_dealt", "kind": "stack_instance"},
             "payload": "status = \"vulnerable\"\nstacks = 2\nduration = 100"},
            {"key": {"trigger": "damage_dealt", "kind": "stack_instance"},
             "payload": "status = \"fracture\"\nstacks = 2\nduration = 100"}
        ]
    }"#;
    let blade: Item = serde_json::from_str(json).unwrap();
    arena.equip(attacker, EquipmentSlot::MainHand, blade);

    let result = ctx.resolve(&mut arena, &CombatSignal::melee(attacker, defender, 1.0), &mut rng);
    assert_eq!(result.abilities_fired.len(), 1);
    assert_eq!(ctx.statuses().stacks(defender, StatusKind::Vulnerable), 0);
    assert_eq!(ctx.statuses().stacks(defender, StatusKind::Fracture), 2);
}
