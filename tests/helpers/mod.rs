#![allow(dead_code)]

//! Test helpers: a scripted player and seeded builders for missions and
//! sessions.

use std::collections::VecDeque;
use std::io::Cursor;
use std::path::Path;

use std::sync::Arc;

use terminal_rpg::combat::{
    Difficulty, Enemy, EnemyKind, EnemyTemplate, GameRng, Scenario, SpecialMove, StatusInfliction,
};
use terminal_rpg::hero::{
    AbilityDef, AbilityId, Character, Class, ProgressionTable, ProgressionTables, StatGrowth,
    Unlock,
};
use terminal_rpg::items::Item;
use terminal_rpg::{
    BattleView, CombatChoice, ConsoleUi, GameConfig, MemoryEventLog, PlayerInterface, Selection,
    Session, Tone,
};

/// Plays back queued answers; runs out into basic attacks and cancels
#[derive(Debug, Default)]
pub struct ScriptedInterface {
    pub actions: VecDeque<CombatChoice>,
    pub abilities: VecDeque<Selection<usize>>,
    pub items: VecDeque<Selection<usize>>,
    pub narration: Vec<String>,
    pub decisions: usize,
}

impl ScriptedInterface {
    pub fn new(actions: impl IntoIterator<Item = CombatChoice>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_ability(mut self, pick: Selection<usize>) -> Self {
        self.abilities.push_back(pick);
        self
    }

    pub fn with_item(mut self, pick: Selection<usize>) -> Self {
        self.items.push_back(pick);
        self
    }

    pub fn said(&self, needle: &str) -> bool {
        self.narration.iter().any(|line| line.contains(needle))
    }
}

impl PlayerInterface for ScriptedInterface {
    fn show_status(&mut self, _view: &BattleView<'_>) {}

    fn choose_action(&mut self, _view: &BattleView<'_>) -> CombatChoice {
        self.decisions += 1;
        self.actions.pop_front().unwrap_or(CombatChoice::Attack)
    }

    fn choose_ability(&mut self, abilities: &[&AbilityDef]) -> Selection<AbilityId> {
        self.abilities
            .pop_front()
            .unwrap_or(Selection::Cancel)
            .map(|i| abilities[i].id)
    }

    fn choose_item(&mut self, items: &[(usize, &Item)]) -> Selection<usize> {
        self.items
            .pop_front()
            .unwrap_or(Selection::Cancel)
            .map(|i| items[i].0)
    }

    fn narrate(&mut self, _tone: Tone, message: &str) {
        self.narration.push(message.to_string());
    }
}

pub fn rng(seed: u64) -> GameRng {
    GameRng::new(seed)
}

pub fn character(name: &str, class: Class) -> Character {
    Character::new(name, class, &ProgressionTables::standard())
}

/// Level-1 warrior whose only ability is `ability`
pub fn character_with_ability(name: &str, ability: AbilityDef) -> Character {
    let table = ProgressionTable::new(
        Class::Warrior,
        Class::Warrior.base_attributes(),
        StatGrowth::default(),
    )
    .with_unlock(1, Unlock::Ability(ability));
    Character::with_progression(name, Arc::new(table))
}

/// Builder for hand-made opponents
pub struct EnemyBuilder {
    template: EnemyTemplate,
    rare_drop_chance: f64,
    flee_chance: f64,
}

impl EnemyBuilder {
    pub fn new(health: u32, attack: u32, defense: u32) -> Self {
        // a special that changes nothing keeps damage predictable
        let template = EnemyTemplate::common(
            EnemyKind::GoblinRaider,
            (health, attack, defense),
            10,
            SpecialMove::bonus("Feint", 0),
        );
        Self {
            template,
            rare_drop_chance: 0.0,
            flee_chance: 0.0,
        }
    }

    pub fn experience(mut self, xp: u32) -> Self {
        self.template.experience = xp;
        self
    }

    pub fn flee_chance(mut self, chance: f64) -> Self {
        self.flee_chance = chance;
        self
    }

    pub fn inflicting(mut self, infliction: StatusInfliction) -> Self {
        self.template = self.template.inflicting(infliction);
        self
    }

    pub fn guaranteed_drop(mut self, item: Item) -> Self {
        self.template = self.template.with_loot(vec![item]);
        self.rare_drop_chance = 1.0;
        self
    }

    pub fn build(self) -> Enemy {
        let loot = self.template.loot.clone();
        self.template
            .spawn(Scenario::Trail)
            .with_loot(loot, self.rare_drop_chance)
            .with_flee_chance(self.flee_chance)
    }
}

pub type TestSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

/// Session over scripted console input, saving under `save_dir`
pub fn session(save_dir: &Path, input: &str, seed: u64) -> TestSession {
    let config = GameConfig {
        save_dir: save_dir.to_path_buf(),
        log_file: save_dir.join("game.log"),
        seed,
        difficulty: Difficulty::Easy,
        scenario: Scenario::Trail,
    };
    let ui = ConsoleUi::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()).plain();
    Session::new(&config, ui, Box::new(MemoryEventLog::new())).unwrap()
}

/// Everything the session printed so far
pub fn transcript(session: TestSession) -> String {
    String::from_utf8(session.into_ui().into_output()).unwrap()
}
