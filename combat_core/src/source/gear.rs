//! GearSource - Attributes from equipped items

use crate::attributes::AttributeAccumulator;
use crate::item::Item;
use crate::source::AttributeSource;
use crate::types::EquipmentSlot;

/// Attributes from one equipped item
pub struct GearSource<'a> {
    /// Which slot this item is in
    pub slot: EquipmentSlot,
    /// The equipped item
    pub item: &'a Item,
}

impl<'a> GearSource<'a> {
    /// Create a new gear source
    pub fn new(slot: EquipmentSlot, item: &'a Item) -> Self {
        GearSource { slot, item }
    }
}

impl AttributeSource for GearSource<'_> {
    fn id(&self) -> &str {
        &self.item.id
    }

    fn apply(&self, attributes: &mut AttributeAccumulator) {
        for modifier in &self.item.modifiers {
            attributes.add_equipment(modifier.attribute, modifier.amount);
        }

        // Protection enchantments only count while worn
        if self.slot.is_armor() {
            for (enchantment, level) in &self.item.enchantments {
                if let Some(kind) = enchantment.attribute() {
                    attributes.add_equipment(kind, *level as f64);
                }
            }
        }
    }
}
