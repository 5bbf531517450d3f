//! Durability manager - Wear on equipped items from mitigated damage

use crate::config::DurabilityConstants;
use crate::host::{Equipment, Feedback, HealthSink};
use crate::item::Enchantment;
use crate::types::{DamageCause, EntityId, EquipmentSlot};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// What happened to one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WearOutcome {
    /// Empty slot or an item without durability
    Unaffected,
    /// Unbreaking skipped the wear
    Preserved,
    Worn { wear: u32, remaining: u32 },
    /// Wear went past the maximum; the item was removed from the slot
    Broken { item: String },
}

/// Wear points a hit of `damage` inflicts
///
/// Attacks (melee and projectiles) wear armor at the higher rate; every hit
/// costs at least one point.
pub fn wear_amount(damage: f64, cause: DamageCause, constants: &DurabilityConstants) -> u32 {
    let divisor = if cause.is_attack() {
        constants.armor_hit_divisor
    } else {
        constants.general_divisor
    };
    ((damage.max(0.0) / divisor).floor() as u32).max(1)
}

/// Apply wear to the item in one slot
///
/// With Unbreaking level L a 1/(L+1) roll skips the wear entirely. Wear that
/// would exceed the maximum clamps at the maximum, removes the item and
/// emits `ItemBroken` to the owner.
pub fn apply_wear<H: Equipment + HealthSink + ?Sized>(
    host: &mut H,
    entity: EntityId,
    slot: EquipmentSlot,
    damage: f64,
    cause: DamageCause,
    constants: &DurabilityConstants,
    rng: &mut impl Rng,
) -> WearOutcome {
    let Some(item) = host.equipped_mut(entity, slot) else {
        return WearOutcome::Unaffected;
    };
    let unbreaking = item.enchantment_level(Enchantment::Unbreaking);
    let Some(durability) = item.durability.as_mut() else {
        return WearOutcome::Unaffected;
    };

    if unbreaking > 0 && rng.gen_range(0..=unbreaking) == 0 {
        debug!(%entity, ?slot, unbreaking, "wear preserved");
        return WearOutcome::Preserved;
    }

    let amount = wear_amount(damage, cause, constants);
    let total = durability.wear().saturating_add(amount);
    durability.set_wear(total);

    if total <= durability.max() {
        let remaining = durability.remaining();
        debug!(%entity, ?slot, amount, remaining, "item worn");
        return WearOutcome::Worn {
            wear: amount,
            remaining,
        };
    }

    let id = item.id.clone();
    host.remove_equipped(entity, slot);
    debug!(%entity, ?slot, item = %id, "item broke");
    host.feedback(
        entity,
        Feedback::ItemBroken {
            slot,
            item: id.clone(),
        },
    );
    WearOutcome::Broken { item: id }
}
