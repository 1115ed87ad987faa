// src/hero/src/character.rs
use std::sync::Arc;

use combat::{Attributes, BASE_CRIT_CHANCE, CRIT_MULTIPLIER, Combatant, GameRng};
use items::{ConsumableEffect, EquipmentSlot, Item};

use crate::ability::{AbilityDef, AbilityId, Cast, CastFailure, PassiveDef, PassiveEffect, PassiveId, scale};
use crate::bag::{Bag, BagError};
use crate::class::Class;
use crate::progression::{ProgressionTable, ProgressionTables, Unlock, experience_threshold};

/// Result of a basic attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub damage: u32,
    pub critical: bool,
}

/// Result of incoming damage after passives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub damage: u32,
    pub evaded: bool,
}

/// The player-controlled combatant
#[derive(Debug, Clone)]
pub struct Character {
    name: String,
    class: Class,
    level: u32,
    experience: u32,
    attributes: Attributes,
    bag: Bag,
    abilities: Vec<AbilityId>,
    passives: Vec<PassiveId>,
    progression: Arc<ProgressionTable>,
}

impl Character {
    /// Level-1 character with the class's level-1 unlock already learned
    pub fn new(name: &str, class: Class, tables: &ProgressionTables) -> Self {
        Self::with_progression(name, tables.for_class(class))
    }

    pub fn with_progression(name: &str, progression: Arc<ProgressionTable>) -> Self {
        let mut character = Self {
            name: name.to_string(),
            class: progression.class(),
            level: 1,
            experience: 0,
            attributes: progression.base_attributes(),
            bag: Bag::new(),
            abilities: Vec::new(),
            passives: Vec::new(),
            progression,
        };
        character.learn_level(1);
        character
    }

    pub(crate) fn restore(
        name: String,
        level: u32,
        experience: u32,
        attributes: Attributes,
        bag: Bag,
        progression: Arc<ProgressionTable>,
    ) -> Self {
        Self {
            name,
            class: progression.class(),
            level,
            experience,
            attributes,
            bag,
            abilities: Vec::new(),
            passives: Vec::new(),
            progression,
        }
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    pub fn progression(&self) -> &ProgressionTable {
        &self.progression
    }

    pub fn abilities(&self) -> &[AbilityId] {
        &self.abilities
    }

    pub fn passives(&self) -> &[PassiveId] {
        &self.passives
    }

    pub fn knows(&self, id: AbilityId) -> bool {
        self.abilities.contains(&id)
    }

    pub fn has_passive(&self, id: PassiveId) -> bool {
        self.passives.contains(&id)
    }

    fn passive_effects(&self) -> impl Iterator<Item = PassiveEffect> + '_ {
        self.passives
            .iter()
            .filter_map(|id| self.progression.passive(*id))
            .map(|def| def.effect)
    }

    /// Base attack (doubled by rage passives at low health) plus weapon bonuses
    pub fn total_attack(&self) -> u32 {
        let ratio = self.attributes.health_ratio();
        let base = self
            .passive_effects()
            .fold(self.attributes.attack, |attack, effect| match effect {
                PassiveEffect::Rage {
                    below_health,
                    factor,
                } if ratio < below_health => attack * factor,
                _ => attack,
            });
        base + self.bag.attack_bonus()
    }

    /// Base defense plus armor bonuses and mana wards while mana is high
    pub fn total_defense(&self) -> u32 {
        let ratio = self.attributes.mana_ratio();
        let ward: u32 = self
            .passive_effects()
            .map(|effect| match effect {
                PassiveEffect::ManaWard { above_mana, bonus } if ratio > above_mana => bonus,
                _ => 0,
            })
            .sum();
        self.attributes.defense + self.bag.defense_bonus() + ward
    }

    pub fn crit_chance(&self) -> f64 {
        BASE_CRIT_CHANCE
            + self
                .passive_effects()
                .map(|effect| match effect {
                    PassiveEffect::CritBonus(bonus) => bonus,
                    _ => 0.0,
                })
                .sum::<f64>()
    }

    fn dodge_chance(&self) -> f64 {
        self.passive_effects()
            .map(|effect| match effect {
                PassiveEffect::Dodge(chance) => chance,
                _ => 0.0,
            })
            .sum()
    }

    fn damage_reduction(&self) -> f64 {
        self.passive_effects()
            .map(|effect| match effect {
                PassiveEffect::DamageReduction(r) => r,
                _ => 0.0,
            })
            .sum::<f64>()
            .min(1.0)
    }

    /// Total attack varied by ±10%, with a chance of a 1.5x critical
    pub fn basic_damage(&self, rng: &mut GameRng) -> Strike {
        let factor: f64 = rng.random_range(0.9..=1.1);
        let mut damage = scale(self.total_attack(), factor);
        let critical = rng.chance(self.crit_chance());
        if critical {
            damage = scale(damage, CRIT_MULTIPLIER);
        }
        Strike { damage, critical }
    }

    /// Incoming damage: dodge passives may avoid it, then total defense is
    /// subtracted, then damage reduction passives shave off a fraction.
    pub fn receive_hit(&mut self, raw: u32, rng: &mut GameRng) -> HitOutcome {
        let dodge = self.dodge_chance();
        if dodge > 0.0 && rng.chance(dodge) {
            return HitOutcome {
                damage: 0,
                evaded: true,
            };
        }
        let mut damage = raw.saturating_sub(self.total_defense());
        let reduction = self.damage_reduction();
        if reduction > 0.0 {
            damage = scale(damage, 1.0 - reduction);
        }
        self.attributes.lose_health(damage);
        HitOutcome {
            damage,
            evaded: false,
        }
    }

    /// Experience still needed for the next level
    pub fn experience_to_next_level(&self) -> u32 {
        experience_threshold(self.level).saturating_sub(self.experience)
    }

    /// Add experience and resolve every level-up it pays for.
    ///
    /// Returns one message per level gained and per unlock.
    pub fn gain_experience(&mut self, amount: u32) -> Vec<String> {
        let mut messages = Vec::new();
        self.experience += amount;

        while self.experience >= experience_threshold(self.level) {
            self.experience -= experience_threshold(self.level);
            self.level += 1;

            let growth = self.progression.growth_for(self.level);
            self.attributes.max_health += growth.health;
            self.attributes.max_mana += growth.mana;
            self.attributes.restore_mana(growth.mana);
            self.attributes.attack += growth.attack;
            self.attributes.defense += growth.defense;
            self.attributes.restore_full_health();

            log::info!("{} reached level {}", self.name, self.level);
            messages.push(format!(
                "{} reached level {}! HP +{} MP +{} ATK +{} DEF +{}",
                self.name, self.level, growth.health, growth.mana, growth.attack, growth.defense
            ));
            messages.extend(self.learn_level(self.level));
        }
        messages
    }

    /// Learn whatever `level` unlocks; already known entries are skipped
    pub(crate) fn learn_level(&mut self, level: u32) -> Option<String> {
        let progression = Arc::clone(&self.progression);
        let unlock = progression.unlock_at(level)?;
        let learned = match unlock {
            Unlock::Ability(def) => self.learn_ability(def.id),
            Unlock::Passive(def) => self.learn_passive(def.id),
        };
        learned.then(|| format!("New {}: {} - {}", kind_label(unlock), unlock.name(), unlock.description()))
    }

    pub(crate) fn learn_ability(&mut self, id: AbilityId) -> bool {
        if self.knows(id) {
            return false;
        }
        self.abilities.push(id);
        true
    }

    pub(crate) fn learn_passive(&mut self, id: PassiveId) -> bool {
        if self.has_passive(id) {
            return false;
        }
        self.passives.push(id);
        true
    }

    /// Known abilities, cheapest first
    pub fn abilities_by_cost(&self) -> Vec<&AbilityDef> {
        let mut defs: Vec<&AbilityDef> = self
            .abilities
            .iter()
            .filter_map(|id| self.progression.ability(*id))
            .collect();
        defs.sort_by_key(|def| def.mana_cost);
        defs
    }

    pub fn passive_defs(&self) -> Vec<&PassiveDef> {
        self.passives
            .iter()
            .filter_map(|id| self.progression.passive(*id))
            .collect()
    }

    /// Cast a known ability.
    ///
    /// Fails without touching mana when the ability is unknown or the mana is
    /// short. On success mana is spent, damage computed from total attack,
    /// self-heal applied and the status infliction rolled.
    pub fn cast_special(&mut self, id: AbilityId, rng: &mut GameRng) -> Result<Cast, CastFailure> {
        if !self.knows(id) {
            return Err(CastFailure::Unknown(id));
        }
        let def = self
            .progression
            .ability(id)
            .cloned()
            .ok_or(CastFailure::Unknown(id))?;

        if !self.attributes.spend_mana(def.mana_cost) {
            return Err(CastFailure::InsufficientMana {
                caster: self.name.clone(),
                ability: def.name,
                cost: def.mana_cost,
                available: self.attributes.mana,
            });
        }

        let damage = def.formula.damage(self.total_attack());
        let healed = def
            .self_heal
            .map(|ratio| self.attributes.heal(scale(damage, ratio)))
            .unwrap_or(0);
        let inflicted = def.inflicts.and_then(|inflict| inflict.roll(rng));

        let mut message = format!("{} used {} ({} MP)!", self.name, def.name, def.mana_cost);
        if healed > 0 {
            message.push_str(&format!(" Recovered {} HP.", healed));
        }
        log::debug!("{} cast {} for {} damage", self.name, def.name, damage);

        Ok(Cast {
            ability: id,
            damage,
            message,
            healed,
            inflicted,
        })
    }

    /// Drink a potion from the inventory
    pub fn use_consumable(&mut self, index: usize) -> Result<String, BagError> {
        let item = self.bag.take_consumable(index)?;
        let Some(consumable) = item.as_consumable() else {
            return Err(BagError::NotConsumable(item.name.clone()));
        };
        let message = match consumable.effect {
            ConsumableEffect::Health => {
                let healed = self.attributes.heal(consumable.magnitude);
                format!("Used {} and recovered {} HP.", item.name, healed)
            }
            ConsumableEffect::Mana => {
                let restored = self.attributes.restore_mana(consumable.magnitude);
                format!("Used {} and recovered {} MP.", item.name, restored)
            }
        };
        Ok(message)
    }

    pub fn equip(&mut self, index: usize) -> Result<String, BagError> {
        let name = self
            .bag
            .items()
            .get(index)
            .map(|item| item.name.clone())
            .ok_or(BagError::InvalidIndex(index))?;
        let message = match self.bag.equip(index)? {
            Some(old) => format!("Equipped {} (returned {} to the bag).", name, old.name),
            None => format!("Equipped {}.", name),
        };
        Ok(message)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<String, BagError> {
        let item = self.bag.unequip(slot)?;
        Ok(format!("Unequipped {}.", item.name))
    }

    pub fn add_item(&mut self, item: Item) {
        self.bag.add(item);
    }

    /// `Aria the Mage - level 3 (XP 40/300)`
    pub fn summary(&self) -> String {
        format!(
            "{} the {} - level {} (XP {}/{})",
            self.name,
            self.class,
            self.level,
            self.experience,
            experience_threshold(self.level)
        )
    }
}

fn kind_label(unlock: &Unlock) -> &'static str {
    match unlock {
        Unlock::Ability(_) => "ability",
        Unlock::Passive(_) => "passive",
    }
}

impl Combatant for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    fn attack_power(&self) -> u32 {
        self.total_attack()
    }

    fn defense(&self) -> u32 {
        self.total_defense()
    }

    fn apply_damage(&mut self, raw: u32, rng: &mut GameRng) -> u32 {
        self.receive_hit(raw, rng).damage
    }
}
