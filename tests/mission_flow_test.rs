mod helpers;

use helpers::{EnemyBuilder, ScriptedInterface, character, character_with_ability, rng};
use pretty_assertions::assert_eq;
use terminal_rpg::combat::{
    Combatant, Difficulty, EnemyCatalog, Scenario, StatusInfliction, StatusKind,
};
use terminal_rpg::hero::{AbilityDef, AbilityId, Class, DamageFormula};
use terminal_rpg::items::catalog;
use terminal_rpg::{CombatChoice, MemoryEventLog, Mission, MissionOutcome, Selection};

fn trail(catalog: &EnemyCatalog) -> Mission<'_> {
    Mission::new(catalog, Difficulty::Easy, Scenario::Trail)
}

#[test]
fn failed_flee_lets_the_enemy_act() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character("Borin", Class::Warrior);
    let enemy = EnemyBuilder::new(1, 30, 0).flee_chance(0.0).build();
    let mut ui = ScriptedInterface::new([CombatChoice::Flee, CombatChoice::Attack]);
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(21));

    assert_eq!(result.outcome, MissionOutcome::Victory);
    assert_eq!(result.turns, 2);
    assert!(ui.said("failed to flee"));
    assert!(hero.attributes().health < 120);
}

#[test]
fn successful_flee_ends_without_rewards() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character("Lyra", Class::Archer);
    let enemy = EnemyBuilder::new(500, 5, 0).experience(999).flee_chance(1.0).build();
    let mut ui = ScriptedInterface::new([CombatChoice::Flee]);
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(4));

    assert_eq!(result.outcome, MissionOutcome::Fled);
    assert_eq!(result.turns, 1);
    assert_eq!(result.experience_gained, 0);
    assert_eq!(hero.experience(), 0);
    assert_eq!(hero.attributes().health, hero.attributes().max_health);
}

#[test]
fn six_hundred_experience_at_level_one_reaches_level_four() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character("Aria", Class::Mage);
    let enemy = EnemyBuilder::new(1, 0, 0)
        .experience(600)
        .guaranteed_drop(catalog::cultist_wand())
        .build();
    let mut ui = ScriptedInterface::new([]);
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(8));

    assert!(result.won());
    assert_eq!(result.experience_gained, 600);
    assert_eq!(hero.level(), 4);
    assert_eq!(hero.experience(), 0);
    assert!(result.loot.iter().any(|item| item.name == "Cultist Wand"));
    assert!(hero.bag().items().iter().any(|item| item.name == "Cultist Wand"));
    // level 3 unlocks Arcane Shield
    assert!(
        result
            .level_up_messages
            .iter()
            .any(|m| m.contains("Arcane Shield"))
    );
}

#[test]
fn drinking_a_potion_uses_the_turn() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character("Borin", Class::Warrior);
    hero.attributes_mut().health = 50;
    hero.add_item(catalog::health_potion());
    let enemy = EnemyBuilder::new(1, 0, 0).build();
    let mut ui = ScriptedInterface::new([CombatChoice::UseItem]).with_item(Selection::Chosen(0));
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(2));

    assert_eq!(result.turns, 2);
    assert_eq!(hero.attributes().health, 80);
    // only loot from the win is left
    assert_eq!(hero.bag().len(), result.loot.len());
    assert!(ui.said("recovered 30 HP"));
}

#[test]
fn cancelling_the_item_menu_keeps_the_turn() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character("Borin", Class::Warrior);
    hero.add_item(catalog::mana_potion());
    let enemy = EnemyBuilder::new(1, 0, 0).build();
    let mut ui = ScriptedInterface::new([CombatChoice::UseItem, CombatChoice::Attack])
        .with_item(Selection::Cancel);
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(2));

    assert_eq!(result.turns, 1);
    assert_eq!(ui.decisions, 2);
    assert_eq!(hero.bag().len(), 1 + result.loot.len());
}

#[test]
fn casting_without_mana_is_refused_and_retried() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character("Aria", Class::Mage);
    hero.attributes_mut().mana = 0;
    let enemy = EnemyBuilder::new(1, 0, 0).build();
    let mut ui = ScriptedInterface::new([CombatChoice::Special, CombatChoice::Attack])
        .with_ability(Selection::Chosen(0));
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(13));

    assert_eq!(result.turns, 1);
    assert_eq!(ui.decisions, 2);
    assert_eq!(hero.attributes().mana, 0);
    assert!(ui.said("does not have enough mana for Fireball"));
}

#[test]
fn invalid_ability_pick_costs_the_turn() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character("Borin", Class::Warrior);
    let enemy = EnemyBuilder::new(1, 0, 0).build();
    let mut ui = ScriptedInterface::new([CombatChoice::Special])
        .with_ability(Selection::Invalid("7".into()));
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(13));

    assert_eq!(result.turns, 2);
    assert_eq!(hero.attributes().mana, 20);
    assert!(ui.said("lose the turn"));
}

#[test]
fn enemy_poison_ticks_at_the_start_of_the_next_turn() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character("Borin", Class::Warrior);
    // armor soaks 5; the hit lands for 5-7 and always poisons for 4
    let enemy = EnemyBuilder::new(500, 11, 0)
        .inflicting(StatusInfliction::new(StatusKind::Poison, 1.0, 3, 4))
        .flee_chance(1.0)
        .build();
    let mut ui = ScriptedInterface::new([CombatChoice::Attack, CombatChoice::Flee]);
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(31));

    assert_eq!(result.outcome, MissionOutcome::Fled);
    assert!(
        log.lines()
            .contains(&"[COMBAT] Turn 2: Borin took 4 poison damage.".to_string())
    );
}

#[test]
fn catalog_mission_logs_start_and_end() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character("Borin", Class::Warrior);
    let mut ui = ScriptedInterface::new([]);
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog)
        .run(&mut hero, &mut ui, &mut log, &mut rng(77))
        .unwrap();

    let pool: Vec<String> = catalog
        .roster(Scenario::Trail)
        .unwrap()
        .pool(Difficulty::Easy)
        .iter()
        .map(|t| t.kind.to_string())
        .collect();
    assert!(pool.contains(&result.enemy));

    let lines = log.lines();
    assert!(lines[0].starts_with("[INFO] Mission started: Borin vs"));
    assert!(lines.last().unwrap().starts_with("[INFO] Mission ended"));
    assert!(
        lines
            .iter()
            .filter(|l| l.starts_with("[COMBAT]"))
            .count()
            >= result.turns as usize
    );
}

/// Costs nothing, hits for plain attack damage and always lands `kind`
fn sure_hex(kind: StatusKind, turns: u32, potency: u32) -> AbilityDef {
    AbilityDef::new(
        AbilityId::DevastatingStrike,
        "Hex Strike",
        "Test strike that never misses its condition",
        0,
        DamageFormula::Multiplier(1.0),
    )
    .inflicting(StatusInfliction::new(kind, 1.0, turns, potency))
}

fn enemy_hit_on(lines: &[String], turn: u32) -> bool {
    let prefix = format!("[COMBAT] Turn {}: Goblin Raider dealt", turn);
    lines.iter().any(|l| l.starts_with(&prefix))
}

#[test]
fn stunned_enemy_loses_its_next_action() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character_with_ability("Borin", sure_hex(StatusKind::Stun, 1, 0));
    let enemy = EnemyBuilder::new(500, 40, 0).flee_chance(1.0).build();
    let mut ui = ScriptedInterface::new([
        CombatChoice::Special,
        CombatChoice::Attack,
        CombatChoice::Flee,
    ])
    .with_ability(Selection::Chosen(0));
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(17));

    assert_eq!(result.outcome, MissionOutcome::Fled);
    assert_eq!(result.turns, 3);
    assert!(ui.said("is afflicted: stunned"));
    assert!(ui.said("cannot act"));
    let lines = log.lines();
    // the stun lands after the enemy already answered on turn 1
    assert!(enemy_hit_on(&lines, 1));
    assert!(!enemy_hit_on(&lines, 2));
}

#[test]
fn condition_needs_damage_to_land() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character_with_ability("Borin", sure_hex(StatusKind::Stun, 1, 0));
    // armor swallows the whole strike
    let enemy = EnemyBuilder::new(500, 0, 100).flee_chance(1.0).build();
    let mut ui = ScriptedInterface::new([
        CombatChoice::Special,
        CombatChoice::Attack,
        CombatChoice::Flee,
    ])
    .with_ability(Selection::Chosen(0));
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(17));

    assert_eq!(result.outcome, MissionOutcome::Fled);
    assert!(!ui.said("is afflicted"));
    assert!(!ui.said("cannot act"));
    assert!(enemy_hit_on(&log.lines(), 2));
}

#[test]
fn burn_finishes_the_enemy_before_the_player_moves() {
    let catalog = EnemyCatalog::standard();
    let mut hero = character_with_ability("Borin", sure_hex(StatusKind::Burn, 3, 20));
    // the 15 damage strike leaves 15 HP for the burn to take
    let enemy = EnemyBuilder::new(30, 0, 0).build();
    let mut ui = ScriptedInterface::new([CombatChoice::Special]).with_ability(Selection::Chosen(0));
    let mut log = MemoryEventLog::new();

    let result = trail(&catalog).fight(&mut hero, enemy, &mut ui, &mut log, &mut rng(5));

    assert_eq!(result.outcome, MissionOutcome::Victory);
    assert_eq!(result.turns, 2);
    assert_eq!(ui.decisions, 1);
    assert!(
        log.lines()
            .contains(&"[COMBAT] Turn 2: Goblin Raider took 15 burn damage.".to_string())
    );
}
