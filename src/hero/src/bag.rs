// src/hero/src/bag.rs
use items::{EquipmentSlot, Item, ItemKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BagError {
    #[error("The inventory is empty")]
    Empty,
    #[error("No consumables in the inventory")]
    NoConsumables,
    #[error("No item at position {0}")]
    InvalidIndex(usize),
    #[error("{0} cannot be used")]
    NotConsumable(String),
    #[error("{0} cannot be equipped")]
    NotEquipment(String),
    #[error("Nothing equipped in the {0} slot")]
    EmptySlot(EquipmentSlot),
}

/// Inventory in acquisition order plus the two equipment slots.
///
/// An item is either in the inventory or in a slot, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bag {
    items: Vec<Item>,
    weapon: Option<Item>,
    armor: Option<Item>,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumables with their inventory positions
    pub fn consumables(&self) -> Vec<(usize, &Item)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_consumable())
            .collect()
    }

    /// Equipment with their inventory positions
    pub fn equipment(&self) -> Vec<(usize, &Item)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_consumable())
            .collect()
    }

    pub fn remove(&mut self, index: usize) -> Result<Item, BagError> {
        if self.items.is_empty() {
            return Err(BagError::Empty);
        }
        if index >= self.items.len() {
            return Err(BagError::InvalidIndex(index));
        }
        Ok(self.items.remove(index))
    }

    /// Take a consumable out of the inventory
    pub fn take_consumable(&mut self, index: usize) -> Result<Item, BagError> {
        if self.consumables().is_empty() {
            return Err(BagError::NoConsumables);
        }
        let item = self.items.get(index).ok_or(BagError::InvalidIndex(index))?;
        if !item.is_consumable() {
            return Err(BagError::NotConsumable(item.name.clone()));
        }
        Ok(self.items.remove(index))
    }

    /// Move an inventory item into its slot. The item it replaces, if any,
    /// goes back to the inventory and is returned by reference in the result.
    pub fn equip(&mut self, index: usize) -> Result<Option<&Item>, BagError> {
        let item = self.items.get(index).ok_or(BagError::InvalidIndex(index))?;
        let slot = match &item.kind {
            ItemKind::Equipment(e) => e.slot,
            ItemKind::Consumable(_) => return Err(BagError::NotEquipment(item.name.clone())),
        };
        let item = self.items.remove(index);
        let previous = self.slot_mut(slot).replace(item);
        match previous {
            Some(old) => {
                self.items.push(old);
                Ok(self.items.last())
            }
            None => Ok(None),
        }
    }

    /// Move an equipped item back to the inventory
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<&Item, BagError> {
        let item = self.slot_mut(slot).take().ok_or(BagError::EmptySlot(slot))?;
        self.items.push(item);
        self.items.last().ok_or(BagError::EmptySlot(slot))
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
        }
    }

    /// Put an item straight into a slot, used when restoring a save
    pub(crate) fn set_equipped(&mut self, slot: EquipmentSlot, item: Item) {
        *self.slot_mut(slot) = Some(item);
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
        }
    }

    fn equipped_items(&self) -> impl Iterator<Item = &Item> {
        self.weapon.iter().chain(self.armor.iter())
    }

    pub fn attack_bonus(&self) -> u32 {
        self.equipped_items()
            .filter_map(Item::as_equipment)
            .map(|e| e.attack_bonus)
            .sum()
    }

    pub fn defense_bonus(&self) -> u32 {
        self.equipped_items()
            .filter_map(Item::as_equipment)
            .map(|e| e.defense_bonus)
            .sum()
    }
}
