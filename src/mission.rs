// src/mission.rs

//! One encounter from the intro to its outcome.
//!
//! A turn runs in a fixed order: the player's conditions tick, the enemy's
//! conditions tick, the player acts, then the enemy answers unless it is
//! stunned or frozen. Conditions belong to the mission and vanish with it.

use std::fmt;

use combat::{
    Combatant, Difficulty, ENEMY_DAMAGE_VARIANCE, Enemy, EnemyCatalog, GameRng, Scenario,
    StatusEffect, StatusEffects, StatusTick,
};
use error::GameError;
use hero::{CastFailure, Character};
use items::Item;

use crate::event_log::{EventSink, GameEvent};
use crate::ui::{BattleView, CombatChoice, PlayerInterface, Selection, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionOutcome {
    Victory,
    Defeat,
    Fled,
}

impl fmt::Display for MissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MissionOutcome::Victory => "Victory",
            MissionOutcome::Defeat => "Defeat",
            MissionOutcome::Fled => "Fled",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissionResult {
    pub outcome: MissionOutcome,
    pub detail: String,
    pub enemy: String,
    pub turns: u32,
    pub experience_gained: u32,
    pub level_up_messages: Vec<String>,
    pub loot: Vec<Item>,
}

impl MissionResult {
    pub fn won(&self) -> bool {
        self.outcome == MissionOutcome::Victory
    }
}

/// Engine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Intro,
    TurnLoop,
    Finished(MissionOutcome),
}

/// What the player's decision amounted to
#[derive(Debug)]
enum PlayerMove {
    /// Damage to push through the enemy's defense, with a condition to
    /// apply if any of it lands
    Strike {
        damage: u32,
        label: String,
        inflicted: Option<StatusEffect>,
    },
    /// The turn was spent without hurting the enemy
    Spent,
    Escaped,
}

/// A mission configured with a difficulty and a scenario
#[derive(Debug, Clone, Copy)]
pub struct Mission<'a> {
    catalog: &'a EnemyCatalog,
    difficulty: Difficulty,
    scenario: Scenario,
}

impl<'a> Mission<'a> {
    pub fn new(catalog: &'a EnemyCatalog, difficulty: Difficulty, scenario: Scenario) -> Self {
        Self {
            catalog,
            difficulty,
            scenario,
        }
    }

    pub fn title(&self) -> String {
        format!("Exploring the {} ({})", self.scenario, self.difficulty)
    }

    /// Pick an opponent from the catalog and fight it
    pub fn run(
        &self,
        hero: &mut Character,
        ui: &mut dyn PlayerInterface,
        events: &mut dyn EventSink,
        rng: &mut GameRng,
    ) -> Result<MissionResult, GameError> {
        let enemy = self
            .catalog
            .select(self.difficulty, self.scenario, rng)
            .map_err(|e| GameError::InvalidSelection(e.to_string()))?;
        Ok(self.fight(hero, enemy, ui, events, rng))
    }

    /// Fight a given opponent to the end
    pub fn fight(
        &self,
        hero: &mut Character,
        enemy: Enemy,
        ui: &mut dyn PlayerInterface,
        events: &mut dyn EventSink,
        rng: &mut GameRng,
    ) -> MissionResult {
        let mut battle = Battle {
            hero,
            enemy,
            hero_effects: StatusEffects::new(),
            enemy_effects: StatusEffects::new(),
            turn: 0,
            ui,
            events,
            rng,
        };

        let mut phase = Phase::Intro;
        loop {
            phase = match phase {
                Phase::Intro => {
                    battle.intro(self);
                    Phase::TurnLoop
                }
                Phase::TurnLoop => match battle.play_turn() {
                    Some(outcome) => Phase::Finished(outcome),
                    None => Phase::TurnLoop,
                },
                Phase::Finished(outcome) => return battle.conclude(outcome),
            };
        }
    }
}

struct Battle<'m> {
    hero: &'m mut Character,
    enemy: Enemy,
    hero_effects: StatusEffects,
    enemy_effects: StatusEffects,
    turn: u32,
    ui: &'m mut dyn PlayerInterface,
    events: &'m mut dyn EventSink,
    rng: &'m mut GameRng,
}

impl Battle<'_> {
    fn intro(&mut self, mission: &Mission<'_>) {
        self.ui.narrate(Tone::Heading, &format!("\n{}", "=".repeat(40)));
        self.ui
            .narrate(Tone::Heading, &format!("MISSION STARTED: {}", mission.title()));
        let kind = if self.enemy.is_boss() { "boss" } else { "foe" };
        self.ui.narrate(
            Tone::Enemy,
            &format!("A {} appears: {}!", kind, self.enemy.name()),
        );
        self.ui.narrate(Tone::Heading, &"=".repeat(40));

        log::info!(
            "{} starts a mission against {} ({}, {})",
            self.hero.name(),
            self.enemy.name(),
            mission.scenario,
            mission.difficulty
        );
        self.events.record(&GameEvent::MissionStarted {
            hero: self.hero.name().to_string(),
            enemy: self.enemy.name().to_string(),
            scenario: mission.scenario,
            difficulty: mission.difficulty,
        });
    }

    /// One full turn; `Some` once the fight is decided
    fn play_turn(&mut self) -> Option<MissionOutcome> {
        self.turn += 1;
        log::debug!("Turn {} begins", self.turn);

        // 1. conditions on the player
        let tick = self.hero_effects.tick(&mut *self.hero);
        self.report_tick(&tick, true);
        if !self.hero.is_alive() {
            return Some(MissionOutcome::Defeat);
        }

        // 2. conditions on the enemy
        let tick = self.enemy_effects.tick(&mut self.enemy);
        self.report_tick(&tick, false);
        if !self.enemy.is_alive() {
            return Some(MissionOutcome::Victory);
        }
        let enemy_skips = tick.skip_turn;

        // 3. the player's decision
        self.show_status();
        match self.player_move() {
            PlayerMove::Escaped => return Some(MissionOutcome::Fled),
            PlayerMove::Spent => {}
            PlayerMove::Strike {
                damage,
                label,
                inflicted,
            } => {
                // 4. damage to the enemy
                let dealt = self.enemy.apply_damage(damage, self.rng);
                self.ui.narrate(
                    Tone::Player,
                    &format!("--> You {} and dealt {} damage!", label, dealt),
                );
                self.record_hit(self.hero.name().to_string(), self.enemy.name().to_string(), dealt);
                if let Some(effect) = inflicted.filter(|_| dealt > 0) {
                    self.ui.narrate(
                        Tone::Status,
                        &format!("{} is afflicted: {}", self.enemy.name(), effect.description()),
                    );
                    self.enemy_effects.add(effect);
                }
                if !self.enemy.is_alive() {
                    return Some(MissionOutcome::Victory);
                }
            }
        }

        // 5. the enemy's answer
        if enemy_skips {
            self.ui.narrate(
                Tone::Status,
                &format!("{} cannot act this turn.", self.enemy.name()),
            );
            return None;
        }
        self.enemy_turn();
        if !self.hero.is_alive() {
            return Some(MissionOutcome::Defeat);
        }
        None
    }

    fn show_status(&mut self) {
        let view = BattleView {
            turn: self.turn,
            hero: &*self.hero,
            enemy: &self.enemy,
            hero_effects: &self.hero_effects,
            enemy_effects: &self.enemy_effects,
        };
        self.ui.show_status(&view);
    }

    /// Ask until the player commits to something that costs the turn
    fn player_move(&mut self) -> PlayerMove {
        loop {
            let view = BattleView {
                turn: self.turn,
                hero: &*self.hero,
                enemy: &self.enemy,
                hero_effects: &self.hero_effects,
                enemy_effects: &self.enemy_effects,
            };
            let choice = self.ui.choose_action(&view);
            let attempt = match choice {
                CombatChoice::Attack => Ok(self.basic_attack()),
                CombatChoice::Special => self.special(),
                CombatChoice::UseItem => self.use_item(),
                CombatChoice::Flee => Ok(self.try_flee()),
                CombatChoice::Invalid(input) => Err(GameError::InvalidSelection(input)),
            };
            match attempt {
                Ok(Some(player_move)) => return player_move,
                // backed out of a sub-menu
                Ok(None) => continue,
                Err(e) if e.consumes_turn() => {
                    self.ui.narrate(
                        Tone::Warning,
                        &format!("{} You stumble and lose the turn.", error::handle_error(&e)),
                    );
                    return PlayerMove::Spent;
                }
                Err(e) => {
                    self.ui.narrate(Tone::Warning, &error::handle_error(&e));
                }
            }
        }
    }

    fn basic_attack(&mut self) -> Option<PlayerMove> {
        let strike = self.hero.basic_damage(self.rng);
        let label = if strike.critical {
            "landed a CRITICAL hit".to_string()
        } else {
            "attacked with your weapon".to_string()
        };
        Some(PlayerMove::Strike {
            damage: strike.damage,
            label,
            inflicted: None,
        })
    }

    fn special(&mut self) -> Result<Option<PlayerMove>, GameError> {
        let chosen = {
            let abilities = self.hero.abilities_by_cost();
            if abilities.is_empty() {
                return Err(CastFailure::NoneKnown.into());
            }
            self.ui.choose_ability(&abilities)
        };
        let id = match chosen {
            Selection::Chosen(id) => id,
            Selection::Cancel => return Ok(None),
            Selection::Invalid(input) => return Err(GameError::InvalidSelection(input)),
        };
        let name = self
            .hero
            .progression()
            .ability(id)
            .map(|def| def.name)
            .unwrap_or("a special ability");
        let cast = self.hero.cast_special(id, self.rng)?;
        self.ui.narrate(Tone::Player, &cast.message);
        if cast.damage == 0 {
            return Ok(Some(PlayerMove::Spent));
        }
        Ok(Some(PlayerMove::Strike {
            damage: cast.damage,
            label: format!("unleashed {}", name),
            inflicted: cast.inflicted,
        }))
    }

    fn use_item(&mut self) -> Result<Option<PlayerMove>, GameError> {
        let chosen = {
            let consumables = self.hero.bag().consumables();
            if consumables.is_empty() {
                return Err(GameError::InsufficientResource(
                    "You have no consumables to use.".to_string(),
                ));
            }
            self.ui.choose_item(&consumables)
        };
        let index = match chosen {
            Selection::Chosen(index) => index,
            Selection::Cancel => return Ok(None),
            Selection::Invalid(input) => return Err(GameError::InvalidSelection(input)),
        };
        let message = self.hero.use_consumable(index)?;
        self.ui.narrate(Tone::Player, &message);
        Ok(Some(PlayerMove::Spent))
    }

    fn try_flee(&mut self) -> Option<PlayerMove> {
        let chance = self.enemy.flee_chance();
        if self.rng.chance(chance) {
            self.ui.narrate(Tone::Warning, "You managed to run away!");
            Some(PlayerMove::Escaped)
        } else {
            self.ui.narrate(
                Tone::Warning,
                &format!("You failed to flee! {} blocks the way.", self.enemy.name()),
            );
            Some(PlayerMove::Spent)
        }
    }

    fn enemy_turn(&mut self) {
        let action = self.enemy.take_turn(self.rng);
        let raw = self.rng.vary(action.damage, ENEMY_DAMAGE_VARIANCE);
        self.ui.narrate(Tone::Enemy, &action.description);

        let hit = self.hero.receive_hit(raw, self.rng);
        if hit.evaded {
            self.ui.narrate(Tone::Player, "You dodged the attack!");
        } else {
            self.ui.narrate(
                Tone::Enemy,
                &format!("<-- {} dealt {} damage to you!", self.enemy.name(), hit.damage),
            );
        }
        self.record_hit(self.enemy.name().to_string(), self.hero.name().to_string(), hit.damage);

        let aftermath = self.enemy.after_hit(&action, hit.damage, self.rng);
        if aftermath.healed > 0 {
            self.ui.narrate(
                Tone::Enemy,
                &format!("{} drains {} HP.", self.enemy.name(), aftermath.healed),
            );
        }
        if let Some(effect) = aftermath.inflicted {
            self.ui.narrate(
                Tone::Status,
                &format!("You are afflicted: {}", effect.description()),
            );
            self.hero_effects.add(effect);
        }
    }

    fn report_tick(&mut self, tick: &StatusTick, on_hero: bool) {
        for message in &tick.messages {
            self.ui.narrate(Tone::Status, message);
        }
        let target = if on_hero { self.hero.name() } else { self.enemy.name() }.to_string();
        for &(status, amount) in &tick.sources {
            self.events.record(&GameEvent::StatusDamage {
                turn: self.turn,
                target: target.clone(),
                status,
                amount,
            });
        }
    }

    fn record_hit(&mut self, attacker: String, target: String, amount: u32) {
        log::debug!("Turn {}: {} -> {} for {}", self.turn, attacker, target, amount);
        self.events.record(&GameEvent::DamageDealt {
            turn: self.turn,
            attacker,
            target,
            amount,
        });
    }

    fn conclude(self, outcome: MissionOutcome) -> MissionResult {
        let Battle {
            hero,
            enemy,
            turn,
            ui,
            events,
            rng,
            ..
        } = self;

        let mut result = MissionResult {
            outcome,
            detail: String::new(),
            enemy: enemy.name().to_string(),
            turns: turn,
            experience_gained: 0,
            level_up_messages: Vec::new(),
            loot: Vec::new(),
        };

        ui.narrate(Tone::Heading, &format!("\n{}", "=".repeat(40)));
        match outcome {
            MissionOutcome::Victory => {
                let xp = enemy.experience_reward();
                ui.narrate(Tone::Victory, &format!("VICTORY! {} has fallen.", enemy.name()));
                ui.narrate(Tone::Victory, &format!("You gained {} XP.", xp));

                result.level_up_messages = hero.gain_experience(xp);
                for message in &result.level_up_messages {
                    ui.narrate(Tone::Victory, &format!("*** {}", message));
                }
                if result.level_up_messages.is_empty() {
                    ui.narrate(
                        Tone::Plain,
                        &format!("XP: {} ({} to the next level)", hero.experience(), hero.experience_to_next_level()),
                    );
                }

                result.loot = enemy.generate_loot(rng);
                for item in &result.loot {
                    ui.narrate(Tone::Player, &format!("Loot: {}", item.summary()));
                    hero.add_item(item.clone());
                }
                result.experience_gained = xp;
                result.detail = "Won the fight.".to_string();
            }
            MissionOutcome::Defeat => {
                ui.narrate(Tone::Defeat, "DEFEAT... Your vision fades.");
                result.detail = "Died in combat.".to_string();
            }
            MissionOutcome::Fled => {
                result.detail = "Fled from the fight.".to_string();
            }
        }

        log::info!(
            "Mission against {} ended: {} after {} turns",
            result.enemy,
            outcome,
            turn
        );
        events.record(&GameEvent::MissionEnded {
            hero: hero.name().to_string(),
            enemy: result.enemy.clone(),
            outcome,
            turns: turn,
        });
        result
    }
}
