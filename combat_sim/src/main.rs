//! Combat Sim - A headless duel driving combat_core tick by tick
//!
//! This binary shows:
//! - Loading tunable constants from `combat.toml` when present
//! - Equipping participants with armor, enchantments and passive abilities
//! - Resolving melee, projectile and environmental damage
//! - Deferred work (status expiry, cooldowns, chain damage) running per tick

use combat_core::prelude::*;
use combat_core::{combat, CombatResult, ConfigError};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use tracing::{info, warn};

const MAX_TICKS: Tick = 400;
const SEED: u64 = 0x5eed;

/// One side of the duel
struct Fighter {
    name: &'static str,
    id: EntityId,
    /// Ticks between swings
    swing_interval: Tick,
    damage: f64,
}

fn load_constants() -> Result<CombatConstants, ConfigError> {
    let path = Path::new("combat.toml");
    if path.exists() {
        info!(path = %path.display(), "loading combat constants");
        CombatConstants::load(path)
    } else {
        Ok(CombatConstants::default())
    }
}

fn equip_knight(arena: &mut Arena, id: EntityId) {
    arena.equip(
        id,
        EquipmentSlot::MainHand,
        Item::new("knight_sword")
            .with_modifier(AttributeKind::CriticalChance, 15.0)
            .with_modifier(AttributeKind::CriticalDamage, 30.0)
            .with_durability(250)
            .with_ability(
                TriggerCondition::DamageDealt,
                AbilityKind::StackInstance,
                "chance = 35\ncooldown = 40\nstatus = \"fracture\"\nstacks = 2\nduration = 80",
            ),
    );
    arena.equip(
        id,
        EquipmentSlot::Chestplate,
        Item::new("iron_chestplate")
            .with_modifier(AttributeKind::Armor, 6.0)
            .with_enchantment(Enchantment::Protection, 2)
            .with_enchantment(Enchantment::Unbreaking, 1)
            .with_durability(240),
    );
    arena.equip(
        id,
        EquipmentSlot::Helmet,
        Item::new("iron_helmet")
            .with_modifier(AttributeKind::Armor, 2.0)
            .with_enchantment(Enchantment::ProjectileProtection, 3)
            .with_durability(165),
    );
    arena.equip(
        id,
        EquipmentSlot::OffHand,
        Item::new("buckler")
            .with_modifier(AttributeKind::CounterChance, 20.0)
            .with_ability(
                TriggerCondition::DamageTaken,
                AbilityKind::StackInstance,
                "health_below = 40\ncooldown = 100\nstatus = \"resistance\"\nstacks = 4\nduration = 60\ntarget = \"self\"",
            ),
    );
}

fn equip_berserker(arena: &mut Arena, id: EntityId) {
    arena.equip(
        id,
        EquipmentSlot::MainHand,
        Item::new("storm_axe")
            .with_modifier(AttributeKind::CriticalChance, 25.0)
            .with_modifier(AttributeKind::CriticalDamage, 50.0)
            .with_ability(
                TriggerCondition::DamageDealt,
                AbilityKind::ChainDamage,
                "chance = 30\ncooldown = 30\ndamage = 2.0\nradius = 4.0",
            )
            .with_ability(
                TriggerCondition::Kill,
                AbilityKind::StackInstance,
                "status = \"resistance\"\nstacks = 2\nduration = 100\ntarget = \"self\"",
            ),
    );
    arena.equip(
        id,
        EquipmentSlot::Leggings,
        Item::new("leather_leggings")
            .with_modifier(AttributeKind::Armor, 3.0)
            .with_modifier(AttributeKind::DodgeChance, 10.0)
            .with_modifier(AttributeKind::Toughness, 1.0)
            .with_durability(75),
    );
    arena.equip(
        id,
        EquipmentSlot::Boots,
        Item::new("leather_boots")
            .with_modifier(AttributeKind::Armor, 1.0)
            .with_enchantment(Enchantment::FeatherFalling, 4)
            .with_durability(65),
    );
}

fn log_result(tick: Tick, label: &str, result: &CombatResult) {
    info!(tick, attacker = label, defender = %result.defender, "{}", result.summary());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let constants = load_constants()?;
    let mut ctx = CombatContext::new(constants);
    let mut arena = Arena::new();
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);

    let knight = Fighter {
        name: "knight",
        id: arena.spawn_living(30.0, Position::new(0.0, 0.0, 0.0)),
        swing_interval: 12,
        damage: 6.0,
    };
    let berserker = Fighter {
        name: "berserker",
        id: arena.spawn_living(26.0, Position::new(1.5, 0.0, 0.0)),
        swing_interval: 9,
        damage: 5.0,
    };
    // Skeleton archer on the ridge; it only shoots
    let archer = arena.spawn_living(10.0, Position::new(12.0, 3.0, 0.0));
    // A squire standing close enough to catch chain damage
    let squire = arena.spawn_living(12.0, Position::new(2.5, 0.0, 1.0));

    equip_knight(&mut arena, knight.id);
    equip_berserker(&mut arena, berserker.id);
    ctx.equipment_changed(knight.id);
    ctx.equipment_changed(berserker.id);

    info!(knight = %knight.id, berserker = %berserker.id, archer = %archer, squire = %squire, "duel begins");

    let mut history: Vec<CombatResult> = Vec::new();
    let fighters = [(&knight, &berserker), (&berserker, &knight)];

    while ctx.now() < MAX_TICKS {
        let now = ctx.now();

        for (attacker, defender) in fighters {
            if now % attacker.swing_interval != 0 || !arena.is_alive(attacker.id) {
                continue;
            }
            let raw = attacker.damage * rng.gen_range(0.8..1.2);
            let result = ctx.resolve(
                &mut arena,
                &CombatSignal::melee(attacker.id, defender.id, raw),
                &mut rng,
            );
            log_result(now, attacker.name, &result);
            history.push(result);
        }

        if now % 25 == 0 && arena.is_alive(archer) {
            let arrow = arena.spawn_projectile(Some(archer), Position::new(11.0, 3.0, 0.0));
            let signal =
                CombatSignal::new(DamageCause::Projectile, knight.id, 4.0).with_attacker(arrow);
            let result = ctx.resolve(&mut arena, &signal, &mut rng);
            arena.despawn(arrow);
            log_result(now, "archer", &result);
            history.push(result);
        }

        if now == 60 {
            // The berserker leaps off a wall
            let result = ctx.resolve(
                &mut arena,
                &CombatSignal::new(DamageCause::Fall, berserker.id, 7.0),
                &mut rng,
            );
            log_result(now, "gravity", &result);
            history.push(result);
        }

        if now == 90 {
            // The squire wanders toward a primed TNT block
            arena.set_position(squire, Position::new(4.0, 0.0, 2.0));
            let tnt = arena.spawn_inanimate(Position::new(3.0, 0.0, 1.0));
            for victim in [knight.id, squire] {
                let signal = CombatSignal::new(DamageCause::EntityExplosion, victim, 8.0)
                    .with_attacker(tnt);
                let result = ctx.resolve(&mut arena, &signal, &mut rng);
                log_result(now, "tnt", &result);
                history.push(result);
            }
            arena.despawn(tnt);
        }

        if now == 150 && arena.is_alive(knight.id) {
            info!(tick = now, "knight drinks a healing potion");
            combat::heal(&mut arena, knight.id, 6.0);
        }

        let report = ctx.tick(&mut arena, &mut rng);
        for (entity, kind) in &report.expired {
            info!(tick = report.tick, %entity, ?kind, "status expired");
        }
        for result in report.chain_hits {
            log_result(report.tick, "chain", &result);
            history.push(result);
        }

        for (id, feedback) in arena.take_feedback() {
            match feedback {
                Feedback::AttributesSynced { attributes } => {
                    let summary: Vec<String> = attributes
                        .iter()
                        .map(|(kind, value)| format!("{:?}={:.1}", kind, value))
                        .collect();
                    info!(entity = %id, "attributes: {}", summary.join(", "));
                }
                other => info!(entity = %id, ?other, "feedback"),
            }
        }

        if !arena.is_alive(knight.id) || !arena.is_alive(berserker.id) {
            break;
        }
    }

    let winner = match (arena.is_alive(knight.id), arena.is_alive(berserker.id)) {
        (true, false) => knight.name,
        (false, true) => berserker.name,
        _ => "nobody",
    };
    if winner == "nobody" {
        warn!(ticks = ctx.now(), "duel ended without a winner");
    } else {
        info!(ticks = ctx.now(), winner, "duel over");
    }

    println!("{}", serde_json::to_string_pretty(&history)?);
    Ok(())
}
