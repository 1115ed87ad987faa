//src/items/src/catalog.rs
//! Named item constructors used by loot tables.

use crate::{ConsumableEffect, EquipmentSlot, Item};

/// Price of every generic potion
pub const POTION_VALUE: u32 = 10;

// ------------------------------------------------------------------ potions

pub fn health_potion() -> Item {
    Item::consumable("Health Potion", POTION_VALUE, ConsumableEffect::Health, 30)
}

pub fn greater_health_potion() -> Item {
    Item::consumable("Greater Health Potion", 25, ConsumableEffect::Health, 60)
}

pub fn mana_potion() -> Item {
    Item::consumable("Mana Potion", POTION_VALUE, ConsumableEffect::Mana, 25)
}

pub fn ether_flask() -> Item {
    Item::consumable("Ether Flask", 30, ConsumableEffect::Mana, 60)
}

// ------------------------------------------------------------------ weapons

pub fn rusty_dagger() -> Item {
    Item::equipment("Rusty Dagger", 20, EquipmentSlot::Weapon, 2, 0)
}

pub fn bandit_cutlass() -> Item {
    Item::equipment("Bandit Cutlass", 45, EquipmentSlot::Weapon, 5, 0)
}

pub fn wolf_fang_blade() -> Item {
    Item::equipment("Wolf Fang Blade", 50, EquipmentSlot::Weapon, 6, 0)
}

pub fn orcish_axe() -> Item {
    Item::equipment("Orcish Axe", 60, EquipmentSlot::Weapon, 8, 0)
}

pub fn thorn_bow() -> Item {
    Item::equipment("Thorn Bow", 55, EquipmentSlot::Weapon, 7, 0)
}

pub fn miners_pick() -> Item {
    Item::equipment("Miner's Pick", 50, EquipmentSlot::Weapon, 6, 1)
}

pub fn cultist_wand() -> Item {
    Item::equipment("Cultist Wand", 65, EquipmentSlot::Weapon, 9, 0)
}

pub fn ogre_club() -> Item {
    Item::equipment("Ogre King's Club", 150, EquipmentSlot::Weapon, 14, 0)
}

pub fn dragonfang_sword() -> Item {
    Item::equipment("Dragonfang Sword", 200, EquipmentSlot::Weapon, 16, 2)
}

pub fn lich_staff() -> Item {
    Item::equipment("Staff of the Lich", 220, EquipmentSlot::Weapon, 18, 0)
}

// ------------------------------------------------------------------ armor

pub fn leather_armor() -> Item {
    Item::equipment("Leather Armor", 40, EquipmentSlot::Armor, 0, 3)
}

pub fn wolf_pelt() -> Item {
    Item::equipment("Wolf Pelt", 35, EquipmentSlot::Armor, 0, 2)
}

pub fn chain_mail() -> Item {
    Item::equipment("Chain Mail", 60, EquipmentSlot::Armor, 0, 5)
}

pub fn troll_hide() -> Item {
    Item::equipment("Troll Hide", 80, EquipmentSlot::Armor, 0, 7)
}

pub fn bone_shield_plate() -> Item {
    Item::equipment("Bone Plate", 70, EquipmentSlot::Armor, 0, 6)
}

pub fn spider_silk_cloak() -> Item {
    Item::equipment("Spider Silk Cloak", 160, EquipmentSlot::Armor, 2, 8)
}

pub fn dragon_scale_armor() -> Item {
    Item::equipment("Dragon Scale Armor", 240, EquipmentSlot::Armor, 0, 12)
}

/// Generic consumable drop shared by every enemy
pub fn generic_consumables() -> Vec<Item> {
    vec![health_potion(), mana_potion()]
}
