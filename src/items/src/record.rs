//src/items/src/record.rs
//! Serialized form of an item inside a character snapshot.
//!
//! The `tipo` field discriminates the variant; the remaining keys follow the
//! flat save format (`nome`, `valor`, ...).

use serde::{Deserialize, Serialize};

use crate::{Consumable, ConsumableEffect, Equipment, EquipmentSlot, Item, ItemKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum ItemRecord {
    #[serde(rename = "consumivel")]
    Consumable {
        #[serde(rename = "nome")]
        name: String,
        #[serde(rename = "valor", default)]
        value: u32,
        #[serde(rename = "efeito")]
        effect: EffectTag,
        #[serde(rename = "valor_efeito")]
        magnitude: u32,
    },
    #[serde(rename = "equipamento")]
    Equipment {
        #[serde(rename = "nome")]
        name: String,
        #[serde(rename = "valor", default)]
        value: u32,
        slot: SlotTag,
        #[serde(rename = "ataque_bonus", default)]
        attack_bonus: u32,
        #[serde(rename = "defesa_bonus", default)]
        defense_bonus: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTag {
    #[serde(rename = "vida")]
    Health,
    #[serde(rename = "mana")]
    Mana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotTag {
    #[serde(rename = "arma")]
    Weapon,
    #[serde(rename = "armadura")]
    Armor,
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        match &item.kind {
            ItemKind::Consumable(c) => ItemRecord::Consumable {
                name: item.name.clone(),
                value: item.value,
                effect: match c.effect {
                    ConsumableEffect::Health => EffectTag::Health,
                    ConsumableEffect::Mana => EffectTag::Mana,
                },
                magnitude: c.magnitude,
            },
            ItemKind::Equipment(e) => ItemRecord::Equipment {
                name: item.name.clone(),
                value: item.value,
                slot: match e.slot {
                    EquipmentSlot::Weapon => SlotTag::Weapon,
                    EquipmentSlot::Armor => SlotTag::Armor,
                },
                attack_bonus: e.attack_bonus,
                defense_bonus: e.defense_bonus,
            },
        }
    }
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        match record {
            ItemRecord::Consumable {
                name,
                value,
                effect,
                magnitude,
            } => {
                let effect = match effect {
                    EffectTag::Health => ConsumableEffect::Health,
                    EffectTag::Mana => ConsumableEffect::Mana,
                };
                Item {
                    name,
                    value,
                    kind: ItemKind::Consumable(Consumable::new(effect, magnitude)),
                }
            }
            ItemRecord::Equipment {
                name,
                value,
                slot,
                attack_bonus,
                defense_bonus,
            } => {
                let slot = match slot {
                    SlotTag::Weapon => EquipmentSlot::Weapon,
                    SlotTag::Armor => EquipmentSlot::Armor,
                };
                Item {
                    name,
                    value,
                    kind: ItemKind::Equipment(Equipment::new(slot, attack_bonus, defense_bonus)),
                }
            }
        }
    }
}
