// src/hero/src/snapshot.rs

//! Flat save format of a character.
//!
//! Keys follow the established save files (`classe`, `nome`, `atributos`, ...);
//! `mana_max` is optional so older saves still load.

use combat::{Attributes, Combatant};
use items::{EquipmentSlot, Item, ItemRecord};
use serde::{Deserialize, Serialize};

use crate::ability::{AbilityId, PassiveId};
use crate::bag::Bag;
use crate::character::Character;
use crate::class::Class;
use crate::progression::ProgressionTables;
use crate::HeroError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    #[serde(rename = "classe")]
    pub class: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nivel")]
    pub level: u32,
    pub xp: u32,
    #[serde(rename = "atributos")]
    pub attributes: AttributesRecord,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "passivas", default)]
    pub passives: Vec<String>,
    #[serde(rename = "inventario", default)]
    pub inventory: Vec<ItemRecord>,
    #[serde(rename = "equipamentos", default)]
    pub equipment: EquipmentRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributesRecord {
    #[serde(rename = "vida")]
    pub health: u32,
    #[serde(rename = "vida_max")]
    pub max_health: u32,
    #[serde(rename = "ataque")]
    pub attack: u32,
    #[serde(rename = "defesa")]
    pub defense: u32,
    pub mana: u32,
    #[serde(rename = "mana_max", default, skip_serializing_if = "Option::is_none")]
    pub max_mana: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    #[serde(rename = "arma")]
    pub weapon: Option<ItemRecord>,
    #[serde(rename = "armadura")]
    pub armor: Option<ItemRecord>,
}

impl From<&Attributes> for AttributesRecord {
    fn from(attrs: &Attributes) -> Self {
        Self {
            health: attrs.health,
            max_health: attrs.max_health,
            attack: attrs.attack,
            defense: attrs.defense,
            mana: attrs.mana,
            max_mana: Some(attrs.max_mana),
        }
    }
}

impl Character {
    pub fn to_snapshot(&self) -> CharacterSnapshot {
        let bag = self.bag();
        CharacterSnapshot {
            class: self.class().snapshot_tag().to_string(),
            name: self.name().to_string(),
            level: self.level(),
            xp: self.experience(),
            attributes: AttributesRecord::from(self.attributes()),
            skills: self.abilities().iter().map(|id| id.key().to_string()).collect(),
            passives: self.passives().iter().map(|id| id.key().to_string()).collect(),
            inventory: bag.items().iter().map(ItemRecord::from).collect(),
            equipment: EquipmentRecord {
                weapon: bag.equipped(EquipmentSlot::Weapon).map(ItemRecord::from),
                armor: bag.equipped(EquipmentSlot::Armor).map(ItemRecord::from),
            },
        }
    }

    /// Rebuild a character from a snapshot.
    ///
    /// An unknown class tag falls back to Warrior and unknown skill or passive
    /// keys are dropped; both are logged. Every unlock up to the saved level is
    /// known afterwards, whatever the `skills` key held. A missing `mana_max` is rebuilt from
    /// the class's progression up to the saved level.
    pub fn from_snapshot(
        snapshot: CharacterSnapshot,
        tables: &ProgressionTables,
    ) -> Result<Self, HeroError> {
        if snapshot.level == 0 {
            return Err(HeroError::InvalidSnapshot("level must be at least 1".into()));
        }
        if snapshot.attributes.max_health == 0 {
            return Err(HeroError::InvalidSnapshot("vida_max must be positive".into()));
        }

        let class = Class::from_snapshot_tag(&snapshot.class).unwrap_or_else(|| {
            log::warn!(
                "Unknown class '{}' in save of {}, defaulting to {}",
                snapshot.class,
                snapshot.name,
                Class::Warrior
            );
            Class::Warrior
        });
        let progression = tables.for_class(class);

        let record = snapshot.attributes;
        let mut attributes = Attributes {
            health: record.health,
            max_health: record.max_health,
            attack: record.attack,
            defense: record.defense,
            mana: record.mana,
            max_mana: record
                .max_mana
                .unwrap_or_else(|| progression.max_mana_at(snapshot.level)),
        };
        attributes.clamp();

        let mut bag = Bag::new();
        for record in snapshot.inventory {
            bag.add(Item::from(record));
        }
        for (slot, record) in [
            (EquipmentSlot::Weapon, snapshot.equipment.weapon),
            (EquipmentSlot::Armor, snapshot.equipment.armor),
        ] {
            let Some(record) = record else { continue };
            let item = Item::from(record);
            match item.as_equipment() {
                Some(equipment) if equipment.slot == slot => bag.set_equipped(slot, item),
                _ => {
                    log::warn!("{} does not fit the {} slot, moved to the inventory", item.name, slot);
                    bag.add(item);
                }
            }
        }

        let mut character = Character::restore(
            snapshot.name,
            snapshot.level,
            snapshot.xp,
            attributes,
            bag,
            progression,
        );

        for key in &snapshot.skills {
            match key.parse::<AbilityId>() {
                Ok(id) if character.progression().ability(id).is_some() => {
                    character.learn_ability(id);
                }
                _ => log::warn!("Skipping unknown skill '{}'", key),
            }
        }
        for key in &snapshot.passives {
            match key.parse::<PassiveId>() {
                Ok(id) if character.progression().passive(id).is_some() => {
                    character.learn_passive(id);
                }
                _ => log::warn!("Skipping unknown passive '{}'", key),
            }
        }
        // saves may predate a key or carry another class's kit
        for level in 1..=character.level() {
            if let Some(message) = character.learn_level(level) {
                log::debug!("{} relearned on load: {}", character.name(), message);
            }
        }

        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::catalog;
    use pretty_assertions::assert_eq;

    fn seasoned_mage(tables: &ProgressionTables) -> Character {
        let mut mage = Character::new("Aria", Class::Mage, tables);
        mage.gain_experience(100 + 200 + 300 + 400 + 50);
        mage.add_item(catalog::mana_potion());
        mage.add_item(catalog::cultist_wand());
        mage.add_item(catalog::leather_armor());
        mage.equip(1).unwrap();
        mage.attributes_mut().health -= 20;
        mage
    }

    #[test]
    fn snapshot_round_trip_preserves_character() {
        let tables = ProgressionTables::standard();
        let mage = seasoned_mage(&tables);
        let restored = Character::from_snapshot(mage.to_snapshot(), &tables).unwrap();

        assert_eq!(restored.name(), "Aria");
        assert_eq!(restored.class(), Class::Mage);
        assert_eq!(restored.level(), mage.level());
        assert_eq!(restored.experience(), 50);
        assert_eq!(restored.attributes(), mage.attributes());
        assert_eq!(restored.bag(), mage.bag());
        assert_eq!(restored.abilities(), mage.abilities());
        assert_eq!(restored.passives(), mage.passives());
    }

    #[test]
    fn snapshot_uses_save_file_keys() {
        let tables = ProgressionTables::standard();
        let json = serde_json::to_value(seasoned_mage(&tables).to_snapshot()).unwrap();
        assert_eq!(json["classe"], "Mago");
        assert_eq!(json["nivel"], 5);
        assert_eq!(json["atributos"]["mana_max"], 160);
        assert_eq!(json["equipamentos"]["arma"]["nome"], "Cultist Wand");
        assert!(json["equipamentos"]["armadura"].is_null());
        assert_eq!(json["skills"][0], "fireball");
    }

    #[test]
    fn old_save_without_mana_max_loads() {
        let tables = ProgressionTables::standard();
        let json = r#"{
            "classe": "Arqueiro",
            "nome": "Robin",
            "nivel": 3,
            "xp": 20,
            "atributos": {"vida": 80, "vida_max": 110, "ataque": 16, "defesa": 5, "mana": 30},
            "skills": ["precise_shot", "golpe_secreto"],
            "passivas": ["evasion"],
            "inventario": [{"tipo": "consumivel", "nome": "Health Potion", "valor": 10, "efeito": "vida", "valor_efeito": 30}],
            "equipamentos": {"arma": null, "armadura": null}
        }"#;
        let snapshot: CharacterSnapshot = serde_json::from_str(json).unwrap();
        let archer = Character::from_snapshot(snapshot, &tables).unwrap();
        assert_eq!(archer.attributes().max_mana, 40 + 6 + 6);
        assert_eq!(archer.abilities(), &[AbilityId::PreciseShot]);
        assert!(archer.has_passive(PassiveId::Evasion));
        assert_eq!(archer.bag().len(), 1);
    }

    #[test]
    fn unknown_class_falls_back_to_warrior() {
        let tables = ProgressionTables::standard();
        let mut snapshot = Character::new("Odd", Class::Mage, &tables).to_snapshot();
        snapshot.class = "Bardo".to_string();
        let loaded = Character::from_snapshot(snapshot, &tables).unwrap();
        assert_eq!(loaded.class(), Class::Warrior);
        // the mage skill is dropped, the warrior kit takes its place
        assert_eq!(loaded.abilities(), &[AbilityId::DevastatingStrike]);
    }

    #[test]
    fn missing_skills_are_relearned_from_the_level() {
        let tables = ProgressionTables::standard();
        let json = r#"{
            "classe": "Guerreiro",
            "nome": "Borin",
            "nivel": 5,
            "xp": 0,
            "atributos": {"vida": 170, "vida_max": 180, "ataque": 27, "defesa": 13, "mana": 28}
        }"#;
        let snapshot: CharacterSnapshot = serde_json::from_str(json).unwrap();
        let warrior = Character::from_snapshot(snapshot, &tables).unwrap();
        assert_eq!(
            warrior.abilities(),
            &[AbilityId::DevastatingStrike, AbilityId::ShieldBash]
        );
        assert!(warrior.has_passive(PassiveId::Berserk));
        // relearning touches neither health nor mana
        assert_eq!(warrior.attributes().health, 170);
        assert_eq!(warrior.attributes().mana, 28);
    }

    #[test]
    fn level_zero_is_rejected() {
        let tables = ProgressionTables::standard();
        let mut snapshot = Character::new("Zero", Class::Archer, &tables).to_snapshot();
        snapshot.level = 0;
        assert!(matches!(
            Character::from_snapshot(snapshot, &tables),
            Err(HeroError::InvalidSnapshot(_))
        ));
    }
}
