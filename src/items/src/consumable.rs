//src/items/src/consumable.rs
use strum::{Display, EnumIter};

/// What a consumable restores
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ConsumableEffect {
    #[strum(serialize = "HP")]
    Health,
    #[strum(serialize = "MP")]
    Mana,
}

/// Single-use item payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consumable {
    pub effect: ConsumableEffect,
    pub magnitude: u32,
}

impl Consumable {
    pub fn new(effect: ConsumableEffect, magnitude: u32) -> Self {
        Self { effect, magnitude }
    }

    pub fn describe(&self) -> String {
        match self.effect {
            ConsumableEffect::Health => format!("heals {} HP", self.magnitude),
            ConsumableEffect::Mana => format!("restores {} MP", self.magnitude),
        }
    }
}
