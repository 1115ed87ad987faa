// src/hero/src/progression.rs

//! Per-class progression data: stat growth per level and the abilities or
//! passives each level unlocks.
//!
//! Tables are read-only values shared through `Arc`; characters resolve their
//! ability and passive definitions from the table they were built with.

use std::collections::BTreeMap;
use std::sync::Arc;

use combat::{Attributes, StatusInfliction, StatusKind};

use crate::ability::{AbilityDef, AbilityId, DamageFormula, PassiveDef, PassiveEffect, PassiveId};
use crate::class::Class;

/// Experience needed to leave `level`
pub fn experience_threshold(level: u32) -> u32 {
    level * 100
}

/// Stat deltas applied when reaching a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatGrowth {
    pub health: u32,
    pub mana: u32,
    pub attack: u32,
    pub defense: u32,
}

impl StatGrowth {
    pub const fn new(health: u32, mana: u32, attack: u32, defense: u32) -> Self {
        Self {
            health,
            mana,
            attack,
            defense,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Unlock {
    Ability(AbilityDef),
    Passive(PassiveDef),
}

impl Unlock {
    pub fn name(&self) -> &'static str {
        match self {
            Unlock::Ability(def) => def.name,
            Unlock::Passive(def) => def.name,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Unlock::Ability(def) => def.description,
            Unlock::Passive(def) => def.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgressionTable {
    class: Class,
    base: Attributes,
    default_growth: StatGrowth,
    growth: BTreeMap<u32, StatGrowth>,
    unlocks: BTreeMap<u32, Unlock>,
}

impl ProgressionTable {
    pub fn new(class: Class, base: Attributes, default_growth: StatGrowth) -> Self {
        Self {
            class,
            base,
            default_growth,
            growth: BTreeMap::new(),
            unlocks: BTreeMap::new(),
        }
    }

    /// Override the growth of one level
    pub fn with_growth(mut self, level: u32, growth: StatGrowth) -> Self {
        self.growth.insert(level, growth);
        self
    }

    pub fn with_unlock(mut self, level: u32, unlock: Unlock) -> Self {
        self.unlocks.insert(level, unlock);
        self
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn base_attributes(&self) -> Attributes {
        self.base
    }

    /// Deltas for reaching `level`; levels without a row use the default growth
    pub fn growth_for(&self, level: u32) -> StatGrowth {
        self.growth
            .get(&level)
            .copied()
            .unwrap_or(self.default_growth)
    }

    pub fn unlock_at(&self, level: u32) -> Option<&Unlock> {
        self.unlocks.get(&level)
    }

    pub fn unlocks(&self) -> impl Iterator<Item = (u32, &Unlock)> {
        self.unlocks.iter().map(|(level, unlock)| (*level, unlock))
    }

    pub fn ability(&self, id: AbilityId) -> Option<&AbilityDef> {
        self.unlocks.values().find_map(|unlock| match unlock {
            Unlock::Ability(def) if def.id == id => Some(def),
            _ => None,
        })
    }

    pub fn passive(&self, id: PassiveId) -> Option<&PassiveDef> {
        self.unlocks.values().find_map(|unlock| match unlock {
            Unlock::Passive(def) if def.id == id => Some(def),
            _ => None,
        })
    }

    /// Maximum mana a character of this class has at `level`
    pub fn max_mana_at(&self, level: u32) -> u32 {
        self.base.max_mana + (2..=level).map(|l| self.growth_for(l).mana).sum::<u32>()
    }

    pub fn standard(class: Class) -> Self {
        match class {
            Class::Warrior => warrior(),
            Class::Mage => mage(),
            Class::Archer => archer(),
        }
    }
}

/// One shared table per class, handed to every character
#[derive(Debug, Clone)]
pub struct ProgressionTables {
    warrior: Arc<ProgressionTable>,
    mage: Arc<ProgressionTable>,
    archer: Arc<ProgressionTable>,
}

impl ProgressionTables {
    pub fn standard() -> Self {
        Self {
            warrior: Arc::new(warrior()),
            mage: Arc::new(mage()),
            archer: Arc::new(archer()),
        }
    }

    pub fn for_class(&self, class: Class) -> Arc<ProgressionTable> {
        match class {
            Class::Warrior => Arc::clone(&self.warrior),
            Class::Mage => Arc::clone(&self.mage),
            Class::Archer => Arc::clone(&self.archer),
        }
    }
}

impl Default for ProgressionTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn warrior() -> ProgressionTable {
    ProgressionTable::new(
        Class::Warrior,
        Class::Warrior.base_attributes(),
        StatGrowth::new(15, 3, 3, 2),
    )
    .with_unlock(
        1,
        Unlock::Ability(AbilityDef::new(
            AbilityId::DevastatingStrike,
            "Devastating Strike",
            "A crushing two-handed blow dealing double attack damage",
            10,
            DamageFormula::Multiplier(2.0),
        )),
    )
    .with_unlock(
        3,
        Unlock::Passive(PassiveDef {
            id: PassiveId::Berserk,
            name: "Berserk",
            description: "Base attack doubles while health is below 30%",
            effect: PassiveEffect::Rage {
                below_health: 0.3,
                factor: 2,
            },
        }),
    )
    .with_unlock(
        5,
        Unlock::Ability(
            AbilityDef::new(
                AbilityId::ShieldBash,
                "Shield Bash",
                "Slams the shield into the foe, 40% chance to stun",
                15,
                DamageFormula::Multiplier(1.2),
            )
            .inflicting(StatusInfliction::new(StatusKind::Stun, 0.4, 1, 0)),
        ),
    )
    .with_unlock(
        7,
        Unlock::Passive(PassiveDef {
            id: PassiveId::IronSkin,
            name: "Iron Skin",
            description: "Reduces all damage taken by 20%",
            effect: PassiveEffect::DamageReduction(0.2),
        }),
    )
    .with_unlock(
        9,
        Unlock::Ability(
            AbilityDef::new(
                AbilityId::Bloodthirst,
                "Bloodthirst",
                "A savage strike that heals for a quarter of the damage",
                25,
                DamageFormula::Multiplier(2.5),
            )
            .healing(0.25),
        ),
    )
}

fn mage() -> ProgressionTable {
    ProgressionTable::new(
        Class::Mage,
        Class::Mage.base_attributes(),
        StatGrowth::new(8, 15, 2, 1),
    )
    .with_unlock(
        1,
        Unlock::Ability(
            AbilityDef::new(
                AbilityId::Fireball,
                "Fireball",
                "Hurls a ball of fire that may set the target ablaze",
                25,
                DamageFormula::Additive {
                    multiplier: 1.0,
                    bonus: 35,
                },
            )
            .inflicting(StatusInfliction::new(StatusKind::Burn, 0.3, 3, 5)),
        ),
    )
    .with_unlock(
        3,
        Unlock::Passive(PassiveDef {
            id: PassiveId::ArcaneShield,
            name: "Arcane Shield",
            description: "+5 defense while mana is above 50%",
            effect: PassiveEffect::ManaWard {
                above_mana: 0.5,
                bonus: 5,
            },
        }),
    )
    .with_unlock(
        5,
        Unlock::Ability(
            AbilityDef::new(
                AbilityId::FrostLance,
                "Frost Lance",
                "A shard of ice that may freeze the target solid",
                20,
                DamageFormula::Additive {
                    multiplier: 1.0,
                    bonus: 25,
                },
            )
            .inflicting(StatusInfliction::new(StatusKind::Freeze, 0.4, 1, 0)),
        ),
    )
    .with_unlock(
        7,
        Unlock::Passive(PassiveDef {
            id: PassiveId::ArcaneFocus,
            name: "Arcane Focus",
            description: "+20% critical hit chance",
            effect: PassiveEffect::CritBonus(0.2),
        }),
    )
    .with_unlock(
        9,
        Unlock::Ability(
            AbilityDef::new(
                AbilityId::Meteor,
                "Meteor",
                "Calls down a burning meteor on the battlefield",
                45,
                DamageFormula::Additive {
                    multiplier: 1.5,
                    bonus: 60,
                },
            )
            .inflicting(StatusInfliction::new(StatusKind::Burn, 0.5, 3, 8)),
        ),
    )
}

fn archer() -> ProgressionTable {
    ProgressionTable::new(
        Class::Archer,
        Class::Archer.base_attributes(),
        StatGrowth::new(10, 6, 2, 1),
    )
    .with_unlock(
        1,
        Unlock::Ability(AbilityDef::new(
            AbilityId::PreciseShot,
            "Precise Shot",
            "A carefully aimed arrow at a weak spot",
            15,
            DamageFormula::Additive {
                multiplier: 1.5,
                bonus: 10,
            },
        )),
    )
    .with_unlock(
        3,
        Unlock::Passive(PassiveDef {
            id: PassiveId::Evasion,
            name: "Evasion",
            description: "20% chance to dodge incoming attacks",
            effect: PassiveEffect::Dodge(0.2),
        }),
    )
    .with_unlock(
        5,
        Unlock::Ability(
            AbilityDef::new(
                AbilityId::CripplingShot,
                "Crippling Shot",
                "An arrow to the legs, 30% chance to stun",
                18,
                DamageFormula::Additive {
                    multiplier: 1.3,
                    bonus: 5,
                },
            )
            .inflicting(StatusInfliction::new(StatusKind::Stun, 0.3, 1, 0)),
        ),
    )
    .with_unlock(
        7,
        Unlock::Passive(PassiveDef {
            id: PassiveId::EagleEye,
            name: "Eagle Eye",
            description: "+20% critical hit chance",
            effect: PassiveEffect::CritBonus(0.2),
        }),
    )
    .with_unlock(
        9,
        Unlock::Ability(AbilityDef::new(
            AbilityId::ArrowRain,
            "Arrow Rain",
            "A volley of arrows falls on the enemy",
            30,
            DamageFormula::Additive {
                multiplier: 2.2,
                bonus: 15,
            },
        )),
    )
}
