//src/items/src/lib.rs
//! Item model: single-use consumables and slotted equipment.
//!
//! Items are immutable once created. Ownership moves from a loot drop into a
//! character's inventory and, for equipment, into an equipment slot.

pub mod catalog;
pub mod consumable;
pub mod equipment;
pub mod record;

pub use crate::consumable::{Consumable, ConsumableEffect};
pub use crate::equipment::{Equipment, EquipmentSlot};
pub use crate::record::ItemRecord;

/// Base item: name, trade value and the variant payload
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Item {
    pub name: String,
    pub value: u32,
    pub kind: ItemKind,
}

/// Item variants
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum ItemKind {
    Consumable(Consumable),
    Equipment(Equipment),
}

impl Item {
    pub fn consumable(name: &str, value: u32, effect: ConsumableEffect, magnitude: u32) -> Self {
        Self {
            name: name.to_string(),
            value,
            kind: ItemKind::Consumable(Consumable::new(effect, magnitude)),
        }
    }

    pub fn equipment(
        name: &str,
        value: u32,
        slot: EquipmentSlot,
        attack_bonus: u32,
        defense_bonus: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            value,
            kind: ItemKind::Equipment(Equipment::new(slot, attack_bonus, defense_bonus)),
        }
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable(_))
    }

    pub fn as_consumable(&self) -> Option<&Consumable> {
        match &self.kind {
            ItemKind::Consumable(c) => Some(c),
            ItemKind::Equipment(_) => None,
        }
    }

    pub fn as_equipment(&self) -> Option<&Equipment> {
        match &self.kind {
            ItemKind::Equipment(e) => Some(e),
            ItemKind::Consumable(_) => None,
        }
    }

    /// One-line description used by inventory listings
    pub fn summary(&self) -> String {
        match &self.kind {
            ItemKind::Consumable(c) => format!("{} (Potion - {})", self.name, c.describe()),
            ItemKind::Equipment(e) => format!("{} (Equip - {})", self.name, e.describe()),
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_accessors() {
        let potion = Item::consumable("Health Potion", 10, ConsumableEffect::Health, 30);
        assert!(potion.is_consumable());
        assert!(potion.as_equipment().is_none());
        assert_eq!(potion.as_consumable().map(|c| c.magnitude), Some(30));

        let sword = Item::equipment("Iron Sword", 50, EquipmentSlot::Weapon, 6, 0);
        assert!(!sword.is_consumable());
        assert_eq!(sword.as_equipment().map(|e| e.slot), Some(EquipmentSlot::Weapon));
    }

    #[test]
    fn summary_mentions_bonuses() {
        let armor = Item::equipment("Chain Mail", 60, EquipmentSlot::Armor, 0, 5);
        assert_eq!(armor.summary(), "Chain Mail (Equip - DEF+5)");
        let potion = Item::consumable("Mana Potion", 10, ConsumableEffect::Mana, 25);
        assert_eq!(potion.summary(), "Mana Potion (Potion - restores 25 MP)");
    }
}
