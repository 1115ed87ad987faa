// src/combat/src/enemy.rs

use items::Item;
use strum::{Display, EnumIter};

use crate::attributes::Attributes;
use crate::boss::{BossKind, BossState};
use crate::combatant::Combatant;
use crate::effect::{StatusEffect, StatusInfliction};
use crate::rng::GameRng;

/// Probability that a common enemy uses its special move
pub const SPECIAL_ACTION_CHANCE: f64 = 0.25;
/// Probability of a generic potion drop
pub const GENERIC_DROP_CHANCE: f64 = 0.4;

/// Every enemy variant in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum EnemyKind {
    #[strum(to_string = "Goblin Raider")]
    GoblinRaider,
    #[strum(to_string = "Wild Wolf")]
    WildWolf,
    #[strum(to_string = "Highway Bandit")]
    HighwayBandit,
    #[strum(to_string = "Orc Warrior")]
    OrcWarrior,
    #[strum(to_string = "Ogre King")]
    OgreKing,
    #[strum(to_string = "Thorn Sprite")]
    ThornSprite,
    #[strum(to_string = "Giant Spider")]
    GiantSpider,
    #[strum(to_string = "Dire Wolf")]
    DireWolf,
    #[strum(to_string = "Forest Troll")]
    ForestTroll,
    #[strum(to_string = "Spider Queen")]
    SpiderQueen,
    #[strum(to_string = "Cave Bat")]
    CaveBat,
    #[strum(to_string = "Kobold Miner")]
    KoboldMiner,
    #[strum(to_string = "Rock Crawler")]
    RockCrawler,
    #[strum(to_string = "Cave Troll")]
    CaveTroll,
    #[strum(to_string = "Young Dragon")]
    YoungDragon,
    Skeleton,
    Zombie,
    Cultist,
    Wraith,
    #[strum(to_string = "Lich Lord")]
    LichLord,
}

impl EnemyKind {
    pub fn boss_kind(self) -> Option<BossKind> {
        match self {
            EnemyKind::OgreKing => Some(BossKind::OgreKing),
            EnemyKind::SpiderQueen => Some(BossKind::SpiderQueen),
            EnemyKind::YoungDragon => Some(BossKind::YoungDragon),
            EnemyKind::LichLord => Some(BossKind::LichLord),
            _ => None,
        }
    }

    pub fn is_boss(self) -> bool {
        self.boss_kind().is_some()
    }
}

/// How a special move changes a plain attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecialEffect {
    Bonus(u32),
    Multiplier(f32),
}

/// Scripted move a common enemy uses now and then
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialMove {
    pub name: &'static str,
    pub effect: SpecialEffect,
}

impl SpecialMove {
    pub const fn bonus(name: &'static str, bonus: u32) -> Self {
        Self {
            name,
            effect: SpecialEffect::Bonus(bonus),
        }
    }

    pub const fn multiplier(name: &'static str, factor: f32) -> Self {
        Self {
            name,
            effect: SpecialEffect::Multiplier(factor),
        }
    }

    pub fn damage(&self, attack: u32) -> u32 {
        match self.effect {
            SpecialEffect::Bonus(bonus) => attack + bonus,
            SpecialEffect::Multiplier(factor) => (attack as f32 * factor).round() as u32,
        }
    }
}

/// Turn logic of an enemy
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Common(SpecialMove),
    Boss(BossKind),
}

/// Result of an enemy's `take_turn`
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyAction {
    pub damage: u32,
    pub description: String,
    /// Fraction of dealt damage the enemy heals back
    pub lifesteal: f32,
}

impl EnemyAction {
    pub fn new(damage: u32, description: String) -> Self {
        Self {
            damage,
            description,
            lifesteal: 0.0,
        }
    }

    pub fn with_lifesteal(mut self, ratio: f32) -> Self {
        self.lifesteal = ratio;
        self
    }
}

/// Side effects of a hit that landed on the player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitAftermath {
    pub healed: u32,
    pub inflicted: Option<StatusEffect>,
}

/// An opponent for a single mission
#[derive(Debug, Clone)]
pub struct Enemy {
    kind: EnemyKind,
    name: String,
    attributes: Attributes,
    experience_reward: u32,
    behavior: Behavior,
    inflicts: Option<StatusInfliction>,
    loot_table: Vec<Item>,
    rare_drop_chance: f64,
    flee_chance: f64,
    boss_state: BossState,
}

impl Enemy {
    /// Bare enemy: no condition to inflict, no loot, no escape. Catalog
    /// templates fill in the rest through the `with_*` setters.
    pub(crate) fn new(
        kind: EnemyKind,
        attributes: Attributes,
        experience_reward: u32,
        behavior: Behavior,
    ) -> Self {
        Self {
            kind,
            name: kind.to_string(),
            attributes,
            experience_reward,
            behavior,
            inflicts: None,
            loot_table: Vec::new(),
            rare_drop_chance: 0.0,
            flee_chance: 0.0,
            boss_state: BossState::default(),
        }
    }

    pub fn with_infliction(mut self, infliction: StatusInfliction) -> Self {
        self.inflicts = Some(infliction);
        self
    }

    /// Rare drops and the chance that one of them falls
    pub fn with_loot(mut self, loot: Vec<Item>, rare_drop_chance: f64) -> Self {
        self.loot_table = loot;
        self.rare_drop_chance = rare_drop_chance;
        self
    }

    pub fn with_flee_chance(mut self, chance: f64) -> Self {
        self.flee_chance = chance;
        self
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.behavior, Behavior::Boss(_))
    }

    pub fn experience_reward(&self) -> u32 {
        self.experience_reward
    }

    /// Chance the player escapes this enemy
    pub fn flee_chance(&self) -> f64 {
        self.flee_chance
    }

    pub fn inflicts(&self) -> Option<&StatusInfliction> {
        self.inflicts.as_ref()
    }

    pub fn loot_table(&self) -> &[Item] {
        &self.loot_table
    }

    /// Choose and describe this turn's attack
    pub fn take_turn(&mut self, rng: &mut GameRng) -> EnemyAction {
        let attack = self.attributes.attack;
        match &self.behavior {
            Behavior::Common(special) => {
                if rng.chance(SPECIAL_ACTION_CHANCE) {
                    EnemyAction::new(
                        special.damage(attack),
                        format!("{} uses {}!", self.name, special.name),
                    )
                } else {
                    EnemyAction::new(attack, format!("{} attacks!", self.name))
                }
            }
            Behavior::Boss(boss) => boss.act(
                &self.name,
                attack,
                self.attributes.health_ratio(),
                &mut self.boss_state,
                rng,
            ),
        }
    }

    /// Lifesteal and status infliction after `dealt` damage reached the player.
    /// Nothing happens when the hit was fully absorbed.
    pub fn after_hit(&mut self, action: &EnemyAction, dealt: u32, rng: &mut GameRng) -> HitAftermath {
        let mut aftermath = HitAftermath::default();
        if dealt == 0 {
            return aftermath;
        }
        if action.lifesteal > 0.0 {
            let drained = (dealt as f32 * action.lifesteal).round() as u32;
            aftermath.healed = self.attributes.heal(drained);
        }
        aftermath.inflicted = self.inflicts.and_then(|inflict| inflict.roll(rng));
        aftermath
    }

    /// Independent rolls for a generic potion and a rare item from the loot table
    pub fn generate_loot(&self, rng: &mut GameRng) -> Vec<Item> {
        let mut drops = Vec::new();
        if rng.chance(GENERIC_DROP_CHANCE) {
            if let Some(potion) = rng.choose(&items::catalog::generic_consumables()) {
                drops.push(potion.clone());
            }
        }
        if rng.chance(self.rare_drop_chance) {
            if let Some(rare) = rng.choose(&self.loot_table) {
                drops.push(rare.clone());
            }
        }
        drops
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::StatusKind;

    fn wolf(inflicts: Option<StatusInfliction>) -> Enemy {
        let wolf = Enemy::new(
            EnemyKind::WildWolf,
            Attributes::new(50, 12, 2, 0),
            80,
            Behavior::Common(SpecialMove::multiplier("Savage Bite", 1.5)),
        )
        .with_loot(vec![items::catalog::wolf_pelt()], 1.0)
        .with_flee_chance(0.4);
        match inflicts {
            Some(infliction) => wolf.with_infliction(infliction),
            None => wolf,
        }
    }

    #[test]
    fn common_turns_are_plain_or_special() {
        let mut rng = GameRng::new(21);
        let mut enemy = wolf(None);
        let mut specials = 0;
        for _ in 0..400 {
            let action = enemy.take_turn(&mut rng);
            match action.damage {
                12 => assert!(action.description.contains("attacks")),
                18 => {
                    specials += 1;
                    assert!(action.description.contains("Savage Bite"));
                }
                other => panic!("unexpected damage {}", other),
            }
        }
        assert!((60..=140).contains(&specials), "{} specials", specials);
    }

    #[test]
    fn absorbed_hits_have_no_aftermath() {
        let mut rng = GameRng::new(1);
        let mut enemy = wolf(Some(StatusInfliction::new(StatusKind::Poison, 1.0, 3, 4)));
        let action = EnemyAction::new(12, String::new()).with_lifesteal(0.5);
        assert_eq!(enemy.after_hit(&action, 0, &mut rng), HitAftermath::default());

        let landed = enemy.after_hit(&action, 10, &mut rng);
        assert_eq!(landed.inflicted.map(|e| e.kind()), Some(StatusKind::Poison));
    }

    #[test]
    fn lifesteal_heals_fraction_of_dealt() {
        let mut rng = GameRng::new(1);
        let mut enemy = wolf(None);
        enemy.attributes_mut().lose_health(30);
        let action = EnemyAction::new(20, String::new()).with_lifesteal(0.5);
        let aftermath = enemy.after_hit(&action, 16, &mut rng);
        assert_eq!(aftermath.healed, 8);
        assert_eq!(enemy.attributes().health, 28);
    }

    #[test]
    fn certain_rare_drop_comes_from_table() {
        let mut rng = GameRng::new(8);
        let enemy = wolf(None);
        for _ in 0..20 {
            let loot = enemy.generate_loot(&mut rng);
            assert!(loot.iter().any(|item| item.name == "Wolf Pelt"));
            assert!(loot.len() <= 2);
        }
    }

    #[test]
    fn bosses_are_flagged() {
        assert!(EnemyKind::LichLord.is_boss());
        assert!(!EnemyKind::Zombie.is_boss());
        assert_eq!(EnemyKind::GoblinRaider.to_string(), "Goblin Raider");
    }
}
