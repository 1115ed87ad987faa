// src/combat/src/catalog.rs

//! Enemy rosters per scenario and the difficulty-driven selection rule.
//!
//! The catalog is plain data built once and lent to the mission engine; it
//! never changes while the game runs.

use std::collections::HashMap;

use items::{Item, catalog as loot};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

use crate::attributes::Attributes;
use crate::boss::BossKind;
use crate::effect::{StatusInfliction, StatusKind};
use crate::enemy::{Behavior, Enemy, EnemyKind, SpecialMove};
use crate::rng::GameRng;

/// Chance that Hard difficulty spawns the scenario boss
pub const BOSS_CHANCE: f64 = 0.3;
/// Chance a common enemy drops something from its loot table
pub const COMMON_RARE_DROP_CHANCE: f64 = 0.15;
/// Chance a boss drops something from its loot table
pub const BOSS_RARE_DROP_CHANCE: f64 = 0.6;
pub const BASE_FLEE_CHANCE: f64 = 0.4;
pub const BOSS_FLEE_CHANCE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Scenario {
    Trail,
    Forest,
    Cave,
    Ruins,
}

impl Scenario {
    /// Cramped scenarios are harder to escape from
    pub fn flee_penalty(self) -> f64 {
        match self {
            Scenario::Cave | Scenario::Ruins => 0.05,
            Scenario::Trail | Scenario::Forest => 0.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::Trail => "A dusty road where raiders and wolves prey on travellers",
            Scenario::Forest => "Dense woods ruled by spiders and trolls",
            Scenario::Cave => "Dark tunnels with a dragon's lair at the bottom",
            Scenario::Ruins => "A haunted city where the dead walk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Only the weakest foes of the scenario",
            Difficulty::Medium => "Any common foe of the scenario",
            Difficulty::Hard => "Tougher foes and a chance to meet the boss",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No enemies are registered for scenario {0}")]
    UnknownScenario(Scenario),
    #[error("A roster needs at least 2 common enemies, got {0}")]
    RosterTooSmall(usize),
}

/// Fixed stats and behavior an enemy is spawned from
#[derive(Debug, Clone)]
pub struct EnemyTemplate {
    pub kind: EnemyKind,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience: u32,
    pub behavior: Behavior,
    pub inflicts: Option<StatusInfliction>,
    pub loot: Vec<Item>,
}

impl EnemyTemplate {
    pub fn common(
        kind: EnemyKind,
        (health, attack, defense): (u32, u32, u32),
        experience: u32,
        special: SpecialMove,
    ) -> Self {
        Self {
            kind,
            health,
            attack,
            defense,
            experience,
            behavior: Behavior::Common(special),
            inflicts: None,
            loot: Vec::new(),
        }
    }

    pub fn boss(boss: BossKind, (health, attack, defense): (u32, u32, u32), experience: u32) -> Self {
        let kind = match boss {
            BossKind::OgreKing => EnemyKind::OgreKing,
            BossKind::SpiderQueen => EnemyKind::SpiderQueen,
            BossKind::YoungDragon => EnemyKind::YoungDragon,
            BossKind::LichLord => EnemyKind::LichLord,
        };
        Self {
            kind,
            health,
            attack,
            defense,
            experience,
            behavior: Behavior::Boss(boss),
            inflicts: None,
            loot: Vec::new(),
        }
    }

    pub fn inflicting(mut self, infliction: StatusInfliction) -> Self {
        self.inflicts = Some(infliction);
        self
    }

    pub fn with_loot(mut self, loot: Vec<Item>) -> Self {
        self.loot = loot;
        self
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.behavior, Behavior::Boss(_))
    }

    /// Create a fresh enemy for a mission in `scenario`
    pub fn spawn(&self, scenario: Scenario) -> Enemy {
        let (rare_drop_chance, flee_chance) = if self.is_boss() {
            (BOSS_RARE_DROP_CHANCE, BOSS_FLEE_CHANCE)
        } else {
            (
                COMMON_RARE_DROP_CHANCE,
                BASE_FLEE_CHANCE - scenario.flee_penalty(),
            )
        };
        let enemy = Enemy::new(
            self.kind,
            Attributes::new(self.health, self.attack, self.defense, 0),
            self.experience,
            self.behavior.clone(),
        )
        .with_loot(self.loot.clone(), rare_drop_chance)
        .with_flee_chance(flee_chance);
        match self.inflicts {
            Some(infliction) => enemy.with_infliction(infliction),
            None => enemy,
        }
    }

    /// `Wild Wolf - HP 50 ATK 12 DEF 2 XP 80`
    pub fn summary(&self) -> String {
        format!(
            "{}{} - HP {} ATK {} DEF {} XP {}",
            self.kind,
            if self.is_boss() { " (BOSS)" } else { "" },
            self.health,
            self.attack,
            self.defense,
            self.experience
        )
    }
}

/// Commons ordered weakest first, plus the scenario boss
#[derive(Debug, Clone)]
pub struct Roster {
    common: Vec<EnemyTemplate>,
    boss: EnemyTemplate,
}

impl Roster {
    pub fn new(common: Vec<EnemyTemplate>, boss: EnemyTemplate) -> Result<Self, CatalogError> {
        if common.len() < 2 {
            return Err(CatalogError::RosterTooSmall(common.len()));
        }
        Ok(Self { common, boss })
    }

    pub fn common(&self) -> &[EnemyTemplate] {
        &self.common
    }

    pub fn boss(&self) -> &EnemyTemplate {
        &self.boss
    }

    /// Commons a difficulty draws from
    pub fn pool(&self, difficulty: Difficulty) -> &[EnemyTemplate] {
        match difficulty {
            Difficulty::Easy => &self.common[..2],
            Difficulty::Medium => &self.common,
            Difficulty::Hard => &self.common[1..],
        }
    }
}

/// Immutable table of rosters, injected into the mission engine
#[derive(Debug, Clone, Default)]
pub struct EnemyCatalog {
    rosters: HashMap<Scenario, Roster>,
}

impl EnemyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(mut self, scenario: Scenario, roster: Roster) -> Self {
        self.rosters.insert(scenario, roster);
        self
    }

    pub fn roster(&self, scenario: Scenario) -> Result<&Roster, CatalogError> {
        self.rosters
            .get(&scenario)
            .ok_or(CatalogError::UnknownScenario(scenario))
    }

    /// Scenarios that have a roster, in menu order
    pub fn scenarios(&self) -> Vec<Scenario> {
        Scenario::iter()
            .filter(|s| self.rosters.contains_key(s))
            .collect()
    }

    /// Pick an enemy for a mission.
    ///
    /// Easy draws from the two weakest commons, Medium from every common, Hard
    /// spawns the boss with [`BOSS_CHANCE`] and otherwise draws from the commons
    /// minus the weakest.
    pub fn select(
        &self,
        difficulty: Difficulty,
        scenario: Scenario,
        rng: &mut GameRng,
    ) -> Result<Enemy, CatalogError> {
        let roster = self.roster(scenario)?;
        if difficulty == Difficulty::Hard && rng.chance(BOSS_CHANCE) {
            log::debug!("{}: boss {} selected", scenario, roster.boss.kind);
            return Ok(roster.boss.spawn(scenario));
        }
        let pool = roster.pool(difficulty);
        let template = rng
            .choose(pool)
            .ok_or(CatalogError::RosterTooSmall(pool.len()))?;
        log::debug!("{} {}: {} selected", scenario, difficulty, template.kind);
        Ok(template.spawn(scenario))
    }

    /// The stock rosters for all four scenarios
    pub fn standard() -> Self {
        Self::new()
            .with_roster(Scenario::Trail, trail())
            .with_roster(Scenario::Forest, forest())
            .with_roster(Scenario::Cave, cave())
            .with_roster(Scenario::Ruins, ruins())
    }
}

fn build(common: Vec<EnemyTemplate>, boss: EnemyTemplate) -> Roster {
    // stock rosters always carry four commons
    Roster { common, boss }
}

fn trail() -> Roster {
    build(
        vec![
            EnemyTemplate::common(
                EnemyKind::GoblinRaider,
                (30, 8, 1),
                50,
                SpecialMove::bonus("Dirty Trick", 5),
            )
            .with_loot(vec![loot::rusty_dagger(), loot::health_potion()]),
            EnemyTemplate::common(
                EnemyKind::WildWolf,
                (50, 12, 2),
                80,
                SpecialMove::multiplier("Savage Bite", 1.5),
            )
            .with_loot(vec![loot::wolf_pelt(), loot::wolf_fang_blade()]),
            EnemyTemplate::common(
                EnemyKind::HighwayBandit,
                (60, 13, 3),
                100,
                SpecialMove::bonus("Ambush", 8),
            )
            .with_loot(vec![loot::bandit_cutlass(), loot::leather_armor()]),
            EnemyTemplate::common(
                EnemyKind::OrcWarrior,
                (80, 15, 4),
                120,
                SpecialMove::multiplier("Brutal Swing", 1.6),
            )
            .with_loot(vec![loot::orcish_axe(), loot::chain_mail()]),
        ],
        EnemyTemplate::boss(BossKind::OgreKing, (200, 25, 8), 500)
            .with_loot(vec![loot::ogre_club(), loot::troll_hide()]),
    )
}

fn forest() -> Roster {
    build(
        vec![
            EnemyTemplate::common(
                EnemyKind::ThornSprite,
                (35, 9, 1),
                55,
                SpecialMove::bonus("Thorn Volley", 6),
            )
            .with_loot(vec![loot::thorn_bow(), loot::mana_potion()]),
            EnemyTemplate::common(
                EnemyKind::GiantSpider,
                (45, 11, 2),
                70,
                SpecialMove::bonus("Venom Fang", 5),
            )
            .inflicting(StatusInfliction::new(StatusKind::Poison, 0.35, 3, 4))
            .with_loot(vec![loot::health_potion(), loot::leather_armor()]),
            EnemyTemplate::common(
                EnemyKind::DireWolf,
                (60, 13, 3),
                90,
                SpecialMove::multiplier("Pack Howl", 1.5),
            )
            .with_loot(vec![loot::wolf_pelt(), loot::wolf_fang_blade()]),
            EnemyTemplate::common(
                EnemyKind::ForestTroll,
                (90, 16, 5),
                140,
                SpecialMove::multiplier("Uprooted Tree", 1.6),
            )
            .with_loot(vec![loot::troll_hide(), loot::greater_health_potion()]),
        ],
        EnemyTemplate::boss(BossKind::SpiderQueen, (210, 22, 7), 520)
            .inflicting(StatusInfliction::new(StatusKind::Poison, 0.4, 3, 6))
            .with_loot(vec![loot::spider_silk_cloak(), loot::ether_flask()]),
    )
}

fn cave() -> Roster {
    build(
        vec![
            EnemyTemplate::common(
                EnemyKind::CaveBat,
                (30, 10, 0),
                50,
                SpecialMove::bonus("Screech Dive", 4),
            )
            .with_loot(vec![loot::health_potion(), loot::mana_potion()]),
            EnemyTemplate::common(
                EnemyKind::KoboldMiner,
                (45, 11, 3),
                70,
                SpecialMove::bonus("Pickaxe Swing", 6),
            )
            .with_loot(vec![loot::miners_pick(), loot::leather_armor()]),
            EnemyTemplate::common(
                EnemyKind::RockCrawler,
                (65, 12, 7),
                100,
                SpecialMove::multiplier("Boulder Crush", 1.5),
            )
            .with_loot(vec![loot::chain_mail(), loot::greater_health_potion()]),
            EnemyTemplate::common(
                EnemyKind::CaveTroll,
                (95, 17, 5),
                150,
                SpecialMove::multiplier("Stalactite Slam", 1.6),
            )
            .with_loot(vec![loot::troll_hide(), loot::orcish_axe()]),
        ],
        EnemyTemplate::boss(BossKind::YoungDragon, (220, 24, 9), 550)
            .inflicting(StatusInfliction::new(StatusKind::Burn, 0.35, 3, 8))
            .with_loot(vec![loot::dragonfang_sword(), loot::dragon_scale_armor()]),
    )
}

fn ruins() -> Roster {
    build(
        vec![
            EnemyTemplate::common(
                EnemyKind::Skeleton,
                (40, 11, 2),
                65,
                SpecialMove::bonus("Bone Throw", 5),
            )
            .with_loot(vec![loot::bone_shield_plate(), loot::rusty_dagger()]),
            EnemyTemplate::common(
                EnemyKind::Zombie,
                (60, 12, 2),
                85,
                SpecialMove::bonus("Rotten Grasp", 6),
            )
            .inflicting(StatusInfliction::new(StatusKind::Poison, 0.25, 4, 3))
            .with_loot(vec![loot::health_potion(), loot::leather_armor()]),
            EnemyTemplate::common(
                EnemyKind::Cultist,
                (55, 15, 3),
                105,
                SpecialMove::multiplier("Dark Flame", 1.5),
            )
            .inflicting(StatusInfliction::new(StatusKind::Burn, 0.25, 2, 5))
            .with_loot(vec![loot::cultist_wand(), loot::ether_flask()]),
            EnemyTemplate::common(
                EnemyKind::Wraith,
                (80, 18, 4),
                160,
                SpecialMove::multiplier("Soul Rend", 1.6),
            )
            .with_loot(vec![loot::bone_shield_plate(), loot::greater_health_potion()]),
        ],
        EnemyTemplate::boss(BossKind::LichLord, (250, 27, 8), 650)
            .with_loot(vec![loot::lich_staff(), loot::ether_flask()]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::Combatant;

    #[test]
    fn every_scenario_has_four_commons_weakest_first() {
        let catalog = EnemyCatalog::standard();
        assert_eq!(catalog.scenarios().len(), 4);
        for scenario in Scenario::iter() {
            let roster = catalog.roster(scenario).unwrap();
            assert_eq!(roster.common().len(), 4);
            assert!(roster.boss().is_boss());
            let first = &roster.common()[0];
            for other in &roster.common()[1..] {
                assert!(first.experience <= other.experience);
            }
        }
    }

    #[test]
    fn easy_only_draws_two_weakest() {
        let catalog = EnemyCatalog::standard();
        let mut rng = GameRng::new(17);
        let roster = catalog.roster(Scenario::Trail).unwrap();
        let allowed = [roster.common()[0].kind, roster.common()[1].kind];
        for _ in 0..300 {
            let enemy = catalog
                .select(Difficulty::Easy, Scenario::Trail, &mut rng)
                .unwrap();
            assert!(allowed.contains(&enemy.kind()));
        }
    }

    #[test]
    fn hard_never_draws_weakest_common() {
        let catalog = EnemyCatalog::standard();
        let mut rng = GameRng::new(23);
        for _ in 0..300 {
            let enemy = catalog
                .select(Difficulty::Hard, Scenario::Ruins, &mut rng)
                .unwrap();
            assert_ne!(enemy.kind(), EnemyKind::Skeleton);
        }
    }

    #[test]
    fn hard_spawns_boss_about_thirty_percent() {
        let catalog = EnemyCatalog::standard();
        let mut rng = GameRng::new(2024);
        let trials = 10_000;
        let bosses = (0..trials)
            .filter(|_| {
                catalog
                    .select(Difficulty::Hard, Scenario::Cave, &mut rng)
                    .map(|e| e.is_boss())
                    .unwrap_or(false)
            })
            .count();
        let ratio = bosses as f64 / trials as f64;
        assert!((0.27..0.33).contains(&ratio), "boss ratio {}", ratio);
    }

    #[test]
    fn flee_chance_depends_on_scenario_and_boss() {
        let catalog = EnemyCatalog::standard();
        let trail = catalog.roster(Scenario::Trail).unwrap();
        let cave = catalog.roster(Scenario::Cave).unwrap();
        assert!((trail.common()[0].spawn(Scenario::Trail).flee_chance() - 0.4).abs() < 1e-9);
        assert!((cave.common()[0].spawn(Scenario::Cave).flee_chance() - 0.35).abs() < 1e-9);
        assert!((cave.boss().spawn(Scenario::Cave).flee_chance() - 0.15).abs() < 1e-9);
    }

    #[test]
    fn spawned_enemy_starts_at_full_health() {
        let catalog = EnemyCatalog::standard();
        let boss = catalog.roster(Scenario::Trail).unwrap().boss().spawn(Scenario::Trail);
        assert_eq!(boss.name(), "Ogre King");
        assert_eq!(boss.attributes().health, 200);
        assert_eq!(boss.experience_reward(), 500);
    }

    #[test]
    fn roster_rejects_single_common() {
        let goblin = EnemyTemplate::common(
            EnemyKind::GoblinRaider,
            (30, 8, 1),
            50,
            SpecialMove::bonus("Dirty Trick", 5),
        );
        let boss = EnemyTemplate::boss(BossKind::OgreKing, (200, 25, 8), 500);
        assert_eq!(
            Roster::new(vec![goblin], boss).err(),
            Some(CatalogError::RosterTooSmall(1))
        );
    }

    #[test]
    fn missing_scenario_is_an_error() {
        let catalog = EnemyCatalog::new();
        let mut rng = GameRng::new(0);
        assert_eq!(
            catalog.select(Difficulty::Easy, Scenario::Forest, &mut rng).err(),
            Some(CatalogError::UnknownScenario(Scenario::Forest))
        );
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("ruins".parse::<Scenario>().ok(), Some(Scenario::Ruins));
        assert_eq!("HARD".parse::<Difficulty>().ok(), Some(Difficulty::Hard));
    }
}
