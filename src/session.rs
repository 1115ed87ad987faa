// src/session.rs

//! Menu-driven session: character creation, missions, inventory, saving,
//! loading and the ranking.
//!
//! The session owns the active character, the shared catalogs and the RNG.
//! Errors never end the session; they are printed and the menu comes back.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use combat::{Combatant, Difficulty, EnemyCatalog, GameRng, Scenario};
use error::{GameError, handle_error};
use hero::{Character, Class, ProgressionTables};
use items::EquipmentSlot;
use save::{JsonRepository, QUICK_SAVE_NAME, RankingEntry, SnapshotStore};
use strum::IntoEnumIterator;

use crate::config::GameConfig;
use crate::event_log::EventSink;
use crate::mission::{Mission, MissionOutcome, MissionResult};
use crate::ui::{ConsoleUi, Tone};

/// Name and class picked before the character exists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: Option<String>,
    pub class: Option<Class>,
}

pub struct Session<R, W> {
    ui: ConsoleUi<R, W>,
    tables: ProgressionTables,
    catalog: EnemyCatalog,
    rng: GameRng,
    repository: JsonRepository,
    events: Box<dyn EventSink>,
    hero: Option<Character>,
    draft: Draft,
    difficulty: Difficulty,
    scenario: Scenario,
    last_save: Option<String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        config: &GameConfig,
        ui: ConsoleUi<R, W>,
        events: Box<dyn EventSink>,
    ) -> Result<Self, GameError> {
        let repository = JsonRepository::new(&config.save_dir)?;
        log::info!("Session started with seed {}", config.seed);
        Ok(Self {
            ui,
            tables: ProgressionTables::standard(),
            catalog: EnemyCatalog::standard(),
            rng: GameRng::new(config.seed),
            repository,
            events,
            hero: None,
            draft: Draft::default(),
            difficulty: config.difficulty,
            scenario: config.scenario,
            last_save: None,
        })
    }

    pub fn hero(&self) -> Option<&Character> {
        self.hero.as_ref()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn last_save(&self) -> Option<&str> {
        self.last_save.as_deref()
    }

    pub fn ui(&self) -> &ConsoleUi<R, W> {
        &self.ui
    }

    pub fn into_ui(self) -> ConsoleUi<R, W> {
        self.ui
    }

    // ---- operations ----

    pub fn create_character(&mut self, name: &str, class: Class) -> &Character {
        log::info!("Created {} the {}", name, class);
        self.hero.insert(Character::new(name, class, &self.tables))
    }

    fn hero_mut(&mut self) -> Result<&mut Character, GameError> {
        self.hero.as_mut().ok_or(GameError::MissingCharacter)
    }

    /// Run a mission with the current difficulty and scenario. A defeated
    /// character is discarded.
    pub fn start_mission(&mut self) -> Result<MissionResult, GameError> {
        let hero = self.hero.as_mut().ok_or(GameError::MissingCharacter)?;
        let mission = Mission::new(&self.catalog, self.difficulty, self.scenario);
        let result = mission.run(hero, &mut self.ui, self.events.as_mut(), &mut self.rng)?;

        self.ui
            .say(Tone::Plain, &format!("\nMission result: {}", result.detail));
        if result.outcome == MissionOutcome::Defeat {
            self.ui.say(
                Tone::Defeat,
                "Your character has died. Create a new one to keep playing.",
            );
            self.hero = None;
        }
        Ok(result)
    }

    pub fn save(&mut self, name: &str) -> Result<PathBuf, GameError> {
        let hero = self.hero.as_ref().ok_or(GameError::MissingCharacter)?;
        let path = self.repository.persist(&hero.to_snapshot(), name)?;
        self.last_save = Some(JsonRepository::file_name(name)?);
        Ok(path)
    }

    pub fn quick_save(&mut self) -> Result<PathBuf, GameError> {
        self.save(QUICK_SAVE_NAME)
    }

    /// Replace the active character with a saved one
    pub fn load(&mut self, name: &str) -> Result<&Character, GameError> {
        let snapshot = self.repository.retrieve(name)?;
        let character = Character::from_snapshot(snapshot, &self.tables)?;
        log::info!("Loaded {} from {}", character.name(), name);
        Ok(&*self.hero.insert(character))
    }

    /// Load whatever this session saved last
    pub fn load_last(&mut self) -> Result<&Character, GameError> {
        let name = self
            .last_save
            .clone()
            .ok_or_else(|| GameError::NotFound("no save made in this session".to_string()))?;
        self.load(&name)
    }

    pub fn ranking(&self) -> Result<Vec<RankingEntry>, GameError> {
        self.repository.ranking()
    }

    // ---- menus ----

    fn report(&mut self, error: &GameError) {
        log::debug!("{:?}", error);
        self.ui.say(Tone::Warning, &handle_error(error));
    }

    fn invalid_option(&mut self) {
        self.ui.say(Tone::Warning, "Invalid option.");
    }

    /// Main menu loop; returns when the player quits or input runs out
    pub fn run(&mut self) {
        self.ui.say(Tone::Heading, "Welcome, adventurer!");
        loop {
            let active = match &self.hero {
                Some(hero) => hero.summary(),
                None => "no active character".to_string(),
            };
            let Some(choice) = self.ui.menu(
                &format!("Main Menu ({})", active),
                &[
                    ("1", "Create character"),
                    ("2", "Mission"),
                    ("3", "Inventory"),
                    ("4", "Save"),
                    ("5", "Load"),
                    ("6", "Ranking"),
                    ("0", "Quit"),
                ],
            ) else {
                break;
            };
            match choice.as_str() {
                "1" => self.creation_menu(),
                "2" => self.mission_menu(),
                "3" => self.inventory_menu(),
                "4" => self.save_menu(),
                "5" => self.load_menu(),
                "6" => self.show_ranking(),
                "0" => {
                    self.ui.say(Tone::Heading, "Farewell!");
                    break;
                }
                _ => self.invalid_option(),
            }
        }
        log::info!("Session ended");
    }

    fn creation_menu(&mut self) {
        loop {
            if let Some(hero) = &self.hero {
                let attrs = hero.attributes();
                let line = format!(
                    "Active character: {} | HP {} | ATK {} | MP {}",
                    hero.summary(),
                    attrs.health,
                    hero.total_attack(),
                    attrs.mana
                );
                self.ui.say(Tone::Player, &line);
            }
            let name = self.draft.name.clone().unwrap_or_else(|| "(not set)".into());
            let class = self
                .draft
                .class
                .map(|c| c.to_string())
                .unwrap_or_else(|| "(not set)".into());
            self.ui.say(Tone::Plain, &format!("Name (draft): {}", name));
            self.ui.say(Tone::Plain, &format!("Class (draft): {}", class));

            let Some(choice) = self.ui.menu(
                "Create Character",
                &[
                    ("1", "Set name"),
                    ("2", "Choose class"),
                    ("3", "Confirm and create"),
                    ("4", "Help"),
                    ("0", "Back"),
                ],
            ) else {
                return;
            };
            match choice.as_str() {
                "1" => {
                    if let Some(name) = self.ui.prompt("Character name:") {
                        if !name.is_empty() {
                            self.draft.name = Some(name);
                        }
                    }
                }
                "2" => self.choose_class(),
                "3" => self.confirm_creation(),
                "4" => {
                    self.ui.say(Tone::Plain, "Set a name and a class, then confirm.");
                    self.ui.say(Tone::Plain, "Creating replaces the active character.");
                }
                "0" => return,
                _ => self.invalid_option(),
            }
        }
    }

    fn choose_class(&mut self) {
        let classes: Vec<Class> = Class::iter().collect();
        self.ui.say(Tone::Plain, "\nAvailable classes:");
        for (i, class) in classes.iter().enumerate() {
            self.ui
                .say(Tone::Plain, &format!("[{}] {} - {}", i + 1, class, class.description()));
        }
        let Some(answer) = self.ui.prompt(">") else {
            return;
        };
        match pick_from(&answer, &classes) {
            Some(class) => {
                self.draft.class = Some(class);
                self.ui.say(Tone::Plain, &format!("Class selected: {}", class));
            }
            None => self.invalid_option(),
        }
    }

    fn confirm_creation(&mut self) {
        let (Some(name), Some(class)) = (self.draft.name.clone(), self.draft.class) else {
            self.ui
                .say(Tone::Warning, "Set both a NAME and a CLASS before confirming.");
            return;
        };
        let summary = self.create_character(&name, class).summary();
        self.ui.say(Tone::Victory, &format!("Character created: {}", summary));
    }

    fn mission_menu(&mut self) {
        loop {
            self.ui
                .say(Tone::Plain, &format!("\nCurrent difficulty: {}", self.difficulty));
            self.ui
                .say(Tone::Plain, &format!("Current scenario:   {}", self.scenario));
            let Some(choice) = self.ui.menu(
                "Mission",
                &[
                    ("1", "Choose difficulty"),
                    ("2", "Choose scenario"),
                    ("3", "Preview mission"),
                    ("4", "Start mission"),
                    ("9", "Help"),
                    ("0", "Back"),
                ],
            ) else {
                return;
            };
            match choice.as_str() {
                "1" => {
                    if let Some(difficulty) = self.choose_from(
                        "Difficulties:",
                        &Difficulty::iter().collect::<Vec<_>>(),
                        |d| d.description(),
                    ) {
                        self.difficulty = difficulty;
                        self.ui
                            .say(Tone::Plain, &format!("Difficulty set: {}", difficulty));
                    }
                }
                "2" => {
                    if let Some(scenario) =
                        self.choose_from("Scenarios:", &Scenario::iter().collect::<Vec<_>>(), |s| s.description())
                    {
                        self.scenario = scenario;
                        self.ui.say(Tone::Plain, &format!("Scenario set: {}", scenario));
                    }
                }
                "3" => self.preview_mission(),
                "4" => {
                    if let Err(e) = self.start_mission() {
                        self.report(&e);
                    }
                }
                "9" => {
                    self.ui.say(Tone::Plain, "Pick a difficulty and a scenario, then start.");
                    self.ui
                        .say(Tone::Plain, "Easy meets the weakest foes; Hard may meet the boss.");
                }
                "0" => return,
                _ => self.invalid_option(),
            }
        }
    }

    fn choose_from<T: Copy + std::fmt::Display>(
        &mut self,
        title: &str,
        options: &[T],
        describe: impl Fn(T) -> &'static str,
    ) -> Option<T> {
        self.ui.say(Tone::Plain, &format!("\n{}", title));
        for (i, option) in options.iter().enumerate() {
            self.ui.say(
                Tone::Plain,
                &format!("[{}] {} - {}", i + 1, option, describe(*option)),
            );
        }
        let answer = self.ui.prompt(">")?;
        let picked = pick_from(&answer, options);
        if picked.is_none() {
            self.invalid_option();
        }
        picked
    }

    fn preview_mission(&mut self) {
        self.ui.say(Tone::Heading, "\nMission Preview");
        self.ui
            .say(Tone::Plain, &format!("- Difficulty: {} ({})", self.difficulty, self.difficulty.description()));
        self.ui
            .say(Tone::Plain, &format!("- Scenario:   {} ({})", self.scenario, self.scenario.description()));
        let lines: Vec<String> = match self.catalog.roster(self.scenario) {
            Ok(roster) => {
                let mut lines: Vec<String> = roster
                    .pool(self.difficulty)
                    .iter()
                    .map(|t| format!("  {}", t.summary()))
                    .collect();
                if self.difficulty == Difficulty::Hard {
                    lines.push(format!("  Boss: {}", roster.boss().summary()));
                }
                lines
            }
            Err(e) => vec![format!("  {}", e)],
        };
        self.ui.say(Tone::Plain, "- Possible enemies:");
        for line in lines {
            self.ui.say(Tone::Enemy, &line);
        }
    }

    fn inventory_menu(&mut self) {
        loop {
            let Some(hero) = self.hero.as_ref() else {
                self.report(&GameError::MissingCharacter);
                return;
            };
            let bag = hero.bag();
            let weapon = bag
                .equipped(EquipmentSlot::Weapon)
                .map(|i| i.name.clone())
                .unwrap_or_else(|| "Bare hands".into());
            let armor = bag
                .equipped(EquipmentSlot::Armor)
                .map(|i| i.name.clone())
                .unwrap_or_else(|| "Plain clothes".into());
            let mut lines = vec![
                format!("Equipped: [Weapon: {}] [Armor: {}]", weapon, armor),
                format!(
                    "Totals: Attack {} | Defense {}",
                    hero.total_attack(),
                    hero.total_defense()
                ),
            ];
            for passive in hero.passive_defs() {
                lines.push(format!("Passive: {} - {}", passive.name, passive.description));
            }
            lines.push("\nBackpack:".to_string());
            if bag.is_empty() {
                lines.push("(empty)".to_string());
            }
            for (i, item) in bag.items().iter().enumerate() {
                lines.push(format!("[{}] {}", i + 1, item.summary()));
            }
            let count = bag.len();

            self.ui.say(Tone::Heading, "\n=== Inventory & Equipment ===");
            for line in lines {
                self.ui.say(Tone::Plain, &line);
            }
            self.ui
                .say(Tone::Plain, "\n[N] Item number to use or equip");
            self.ui.say(Tone::Plain, "[W] Unequip weapon  [A] Unequip armor");
            self.ui.say(Tone::Plain, "[0] Back");
            let Some(answer) = self.ui.prompt(">") else {
                return;
            };

            let outcome = match answer.to_ascii_lowercase().as_str() {
                "0" => return,
                "w" => self.unequip(EquipmentSlot::Weapon),
                "a" => self.unequip(EquipmentSlot::Armor),
                other => match other.parse::<usize>() {
                    Ok(n) if (1..=count).contains(&n) => self.use_or_equip(n - 1),
                    _ => Err(GameError::InvalidSelection(answer.clone())),
                },
            };
            match outcome {
                Ok(message) => self.ui.say(Tone::Player, &message),
                Err(e) => self.report(&e),
            }
        }
    }

    /// Drink a consumable or equip an item at an inventory position
    pub fn use_or_equip(&mut self, index: usize) -> Result<String, GameError> {
        let hero = self.hero_mut()?;
        let consumable = hero
            .bag()
            .items()
            .get(index)
            .map(|item| item.is_consumable())
            .ok_or_else(|| GameError::InvalidSelection(format!("no item {}", index + 1)))?;
        let message = if consumable {
            hero.use_consumable(index)?
        } else {
            hero.equip(index)?
        };
        Ok(message)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<String, GameError> {
        Ok(self.hero_mut()?.unequip(slot)?)
    }

    fn save_menu(&mut self) {
        loop {
            let Some(choice) = self.ui.menu(
                "Save",
                &[
                    ("1", "Quick save"),
                    ("2", "Save with a name"),
                    ("9", "Help"),
                    ("0", "Back"),
                ],
            ) else {
                return;
            };
            let result = match choice.as_str() {
                "1" => self.quick_save(),
                "2" => {
                    let Some(name) = self.ui.prompt("Save file name (e.g. save1):") else {
                        return;
                    };
                    self.save(&name)
                }
                "9" => {
                    self.ui.say(Tone::Plain, "Quick save always writes the same slot.");
                    self.ui
                        .say(Tone::Plain, "A blank name writes the automatic slot.");
                    continue;
                }
                "0" => return,
                _ => {
                    self.invalid_option();
                    continue;
                }
            };
            match result {
                Ok(path) => self
                    .ui
                    .say(Tone::Victory, &format!("Game saved to '{}'.", path.display())),
                Err(e) => self.report(&e),
            }
        }
    }

    fn load_menu(&mut self) {
        loop {
            let Some(choice) = self.ui.menu(
                "Load",
                &[
                    ("1", "Load last save"),
                    ("2", "Load by name"),
                    ("9", "Help"),
                    ("0", "Back"),
                ],
            ) else {
                return;
            };
            let result = match choice.as_str() {
                "1" => self.load_last().map(|hero| hero.summary()),
                "2" => {
                    let saves = self.repository.list_saves().unwrap_or_default();
                    if !saves.is_empty() {
                        self.ui
                            .say(Tone::Plain, &format!("Saves: {}", saves.join(", ")));
                    }
                    let Some(name) = self.ui.prompt("Save file to load:") else {
                        return;
                    };
                    self.load(&name).map(|hero| hero.summary())
                }
                "9" => {
                    self.ui
                        .say(Tone::Plain, "Last save loads what this session saved most recently.");
                    self.ui
                        .say(Tone::Plain, "Loading replaces the active character.");
                    continue;
                }
                "0" => return,
                _ => {
                    self.invalid_option();
                    continue;
                }
            };
            match result {
                Ok(summary) => self.ui.say(Tone::Victory, &format!("Loaded {}!", summary)),
                Err(e) => self.report(&e),
            }
        }
    }

    fn show_ranking(&mut self) {
        let ranking = match self.ranking() {
            Ok(ranking) => ranking,
            Err(e) => {
                self.report(&e);
                return;
            }
        };
        self.ui.say(Tone::Heading, "\n=== Ranking ===");
        if ranking.is_empty() {
            self.ui.say(Tone::Plain, "No saved characters yet.");
        }
        for (i, entry) in ranking.iter().enumerate() {
            let class = entry
                .class
                .as_deref()
                .map(|tag| {
                    Class::from_snapshot_tag(tag)
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| tag.to_string())
                })
                .unwrap_or_else(|| "?".to_string());
            let level = entry
                .level
                .map(|l| l.to_string())
                .unwrap_or_else(|| "?".to_string());
            self.ui.say(
                Tone::Plain,
                &format!("{}. {} - {} XP (level {}, {})", i + 1, entry.name, entry.xp, level, class),
            );
        }
    }
}

/// `"1"..="len"` picks from `options`
fn pick_from<T: Copy>(answer: &str, options: &[T]) -> Option<T> {
    let n = answer.trim().parse::<usize>().ok()?;
    n.checked_sub(1).and_then(|i| options.get(i)).copied()
}
