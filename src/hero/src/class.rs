// src/hero/src/class.rs

use combat::Attributes;
use strum::{Display, EnumIter, EnumString};

/// Playable classes
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Class {
    #[default]
    Warrior, // tough, little mana
    Mage,   // fragile, huge mana pool
    Archer, // balanced
}

impl Class {
    /// Level-1 attributes
    pub fn base_attributes(self) -> Attributes {
        match self {
            Class::Warrior => Attributes::new(120, 15, 5, 20),
            Class::Mage => Attributes::new(70, 5, 2, 100),
            Class::Archer => Attributes::new(90, 12, 3, 40),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Class::Warrior => "High health and defense, hits hard with little mana",
            Class::Mage => "Frail body, devastating spells fuelled by a large mana pool",
            Class::Archer => "Balanced fighter with precise shots and quick reflexes",
        }
    }

    /// Class tag used in save files
    pub fn snapshot_tag(self) -> &'static str {
        match self {
            Class::Warrior => "Guerreiro",
            Class::Mage => "Mago",
            Class::Archer => "Arqueiro",
        }
    }

    pub fn from_snapshot_tag(tag: &str) -> Option<Self> {
        match tag {
            "Guerreiro" => Some(Class::Warrior),
            "Mago" => Some(Class::Mage),
            "Arqueiro" => Some(Class::Archer),
            _ => None,
        }
    }
}
