//src/items/src/equipment.rs
use strum::{Display, EnumIter};

/// Equipment slot
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum EquipmentSlot {
    #[strum(serialize = "Weapon")]
    Weapon,
    #[strum(serialize = "Armor")]
    Armor,
}

/// Stat-modifying gear. Bonuses are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equipment {
    pub slot: EquipmentSlot,
    pub attack_bonus: u32,
    pub defense_bonus: u32,
}

impl Equipment {
    pub fn new(slot: EquipmentSlot, attack_bonus: u32, defense_bonus: u32) -> Self {
        Self {
            slot,
            attack_bonus,
            defense_bonus,
        }
    }

    pub fn describe(&self) -> String {
        match (self.attack_bonus, self.defense_bonus) {
            (0, 0) => "no bonus".to_string(),
            (atk, 0) => format!("ATK+{}", atk),
            (0, def) => format!("DEF+{}", def),
            (atk, def) => format!("ATK+{} DEF+{}", atk, def),
        }
    }
}
