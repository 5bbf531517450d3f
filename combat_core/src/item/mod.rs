//! Item - The equipment data the combat core reads and mutates

mod durability;

pub use durability::Durability;

use crate::ability::{AbilityBinding, AbilityKey, AbilityKind, TriggerCondition};
use crate::attributes::AttributeKind;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A flat attribute contribution declared by an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeModifier {
    pub attribute: AttributeKind,
    pub amount: f64,
}

/// Enchantments the combat core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enchantment {
    Protection,
    FireProtection,
    BlastProtection,
    ProjectileProtection,
    FeatherFalling,
    /// Chance to skip durability loss
    Unbreaking,
}

impl Enchantment {
    /// The aggregated attribute this enchantment feeds while worn
    pub fn attribute(&self) -> Option<AttributeKind> {
        match self {
            Enchantment::Protection => Some(AttributeKind::Protection),
            Enchantment::FireProtection => Some(AttributeKind::FireProtection),
            Enchantment::BlastProtection => Some(AttributeKind::BlastProtection),
            Enchantment::ProjectileProtection => Some(AttributeKind::ProjectileProtection),
            Enchantment::FeatherFalling => Some(AttributeKind::FeatherFalling),
            Enchantment::Unbreaking => None,
        }
    }
}

/// Later bindings replace earlier ones with the same key
fn unique_bindings<'de, D>(deserializer: D) -> Result<Vec<AbilityBinding>, D::Error>
where
    D: Deserializer<'de>,
{
    let bindings = Vec::<AbilityBinding>::deserialize(deserializer)?;
    let mut unique: Vec<AbilityBinding> = Vec::with_capacity(bindings.len());
    for binding in bindings {
        match unique.iter_mut().find(|b| b.key == binding.key) {
            Some(existing) => *existing = binding,
            None => unique.push(binding),
        }
    }
    Ok(unique)
}

/// An equippable item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Item type identifier (e.g. "iron_chestplate")
    pub id: String,
    /// Flat attribute modifiers
    #[serde(default)]
    pub modifiers: Vec<AttributeModifier>,
    /// Enchantment levels
    #[serde(default)]
    pub enchantments: BTreeMap<Enchantment, u32>,
    /// None for items that never wear out
    #[serde(default)]
    pub durability: Option<Durability>,
    /// Passive abilities, at most one per key
    #[serde(default, deserialize_with = "unique_bindings")]
    abilities: Vec<AbilityBinding>,
}

impl Item {
    /// Create a bare item with no modifiers, enchantments or durability
    pub fn new(id: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            modifiers: Vec::new(),
            enchantments: BTreeMap::new(),
            durability: None,
            abilities: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, attribute: AttributeKind, amount: f64) -> Self {
        self.modifiers.push(AttributeModifier { attribute, amount });
        self
    }

    pub fn with_enchantment(mut self, enchantment: Enchantment, level: u32) -> Self {
        self.enchantments.insert(enchantment, level);
        self
    }

    pub fn with_durability(mut self, max: u32) -> Self {
        self.durability = Some(Durability::new(max));
        self
    }

    pub fn with_ability(
        mut self,
        trigger: TriggerCondition,
        kind: AbilityKind,
        payload: impl Into<String>,
    ) -> Self {
        self.set_ability(trigger, kind, payload);
        self
    }

    /// Level of an enchantment, 0 when absent
    pub fn enchantment_level(&self, enchantment: Enchantment) -> u32 {
        self.enchantments.get(&enchantment).copied().unwrap_or(0)
    }

    /// Bind an ability, replacing any binding with the same key
    pub fn set_ability(
        &mut self,
        trigger: TriggerCondition,
        kind: AbilityKind,
        payload: impl Into<String>,
    ) -> Option<AbilityBinding> {
        let key = AbilityKey::new(trigger, kind);
        self.replace_binding(AbilityBinding::new(key, payload.into()))
    }

    /// Register an ability kind without a payload (a misconfigured binding)
    pub fn declare_ability(&mut self, trigger: TriggerCondition, kind: AbilityKind) {
        let key = AbilityKey::new(trigger, kind);
        self.replace_binding(AbilityBinding::undecoded(key));
    }

    fn replace_binding(&mut self, binding: AbilityBinding) -> Option<AbilityBinding> {
        match self.abilities.iter_mut().find(|b| b.key == binding.key) {
            Some(existing) => Some(std::mem::replace(existing, binding)),
            None => {
                self.abilities.push(binding);
                None
            }
        }
    }

    pub fn ability(&self, key: AbilityKey) -> Option<&AbilityBinding> {
        self.abilities.iter().find(|b| b.key == key)
    }

    pub(crate) fn ability_mut(&mut self, key: AbilityKey) -> Option<&mut AbilityBinding> {
        self.abilities.iter_mut().find(|b| b.key == key)
    }

    /// Keys of the bindings that fire on a trigger
    pub fn abilities_for(&self, trigger: TriggerCondition) -> Vec<AbilityKey> {
        self.abilities
            .iter()
            .filter(|b| b.key.trigger == trigger)
            .map(|b| b.key)
            .collect()
    }

    pub fn abilities(&self) -> &[AbilityBinding] {
        &self.abilities
    }
}
