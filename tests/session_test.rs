mod helpers;

use std::fs;

use helpers::{session, transcript};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tempfile::tempdir;
use terminal_rpg::combat::Combatant;
use terminal_rpg::error::GameError;
use terminal_rpg::hero::{AbilityId, Class};
use terminal_rpg::items::EquipmentSlot;
use terminal_rpg::ui::{Selection, pick};

fn write_save(dir: &std::path::Path, file: &str, value: serde_json::Value) {
    fs::write(dir.join(file), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

#[test]
fn character_is_created_through_the_menus() {
    let dir = tempdir().unwrap();
    let mut game = session(dir.path(), "1\n1\nBorin\n2\n1\n3\n0\n0\n", 1);

    game.run();

    let hero = game.hero().unwrap();
    assert_eq!(hero.name(), "Borin");
    assert_eq!(hero.class(), Class::Warrior);
    assert_eq!(hero.level(), 1);
    let out = transcript(game);
    assert!(out.contains("Character created: Borin the Warrior - level 1"));
    assert!(out.contains("Farewell!"));
}

#[test]
fn confirming_without_a_class_is_refused() {
    let dir = tempdir().unwrap();
    let mut game = session(dir.path(), "1\n1\nBorin\n3\n0\n0\n", 1);

    game.run();

    assert!(game.hero().is_none());
    assert!(transcript(game).contains("Set both a NAME and a CLASS"));
}

#[test]
fn mission_without_a_character_asks_for_one() {
    let dir = tempdir().unwrap();
    let mut game = session(dir.path(), "2\n4\n0\n0\n", 1);

    game.run();

    assert!(transcript(game).contains("Create or load a character first."));
}

#[test]
fn unknown_main_menu_input_is_reported() {
    let dir = tempdir().unwrap();
    let mut game = session(dir.path(), "x\n0\n", 1);

    game.run();

    let out = transcript(game);
    assert!(out.contains("Invalid option."));
    assert!(out.contains("Farewell!"));
}

#[test]
fn running_out_of_input_ends_the_session() {
    let dir = tempdir().unwrap();
    let mut game = session(dir.path(), "1\n", 1);

    game.run();

    assert!(game.ui().is_closed());
    assert!(!transcript(game).contains("Farewell!"));
}

#[test]
fn difficulty_and_scenario_are_chosen_from_lists() {
    let dir = tempdir().unwrap();
    let mut game = session(dir.path(), "2\n1\n3\n2\n2\n0\n0\n", 1);

    game.run();

    assert_eq!(game.difficulty().to_string(), "Hard");
    assert_eq!(game.scenario().to_string(), "Forest");
}

#[test]
fn save_and_load_restore_the_character() {
    let dir = tempdir().unwrap();
    let mut game = session(dir.path(), "", 1);

    assert!(matches!(game.save("x"), Err(GameError::MissingCharacter)));
    assert!(matches!(game.load_last(), Err(GameError::NotFound(_))));

    game.create_character("Aria", Class::Mage);
    let path = game.save("aria").unwrap();
    assert!(path.ends_with("aria.json"));
    assert_eq!(game.last_save(), Some("aria.json"));

    game.create_character("Other", Class::Archer);
    let loaded = game.load_last().unwrap();
    assert_eq!(loaded.name(), "Aria");
    assert_eq!(loaded.class(), Class::Mage);
    assert_eq!(loaded.attributes().mana, 100);

    game.quick_save().unwrap();
    assert!(dir.path().join("quick_save.json").is_file());
    assert_eq!(game.last_save(), Some("quick_save.json"));

    assert!(matches!(game.save("../outside"), Err(GameError::InvalidSelection(_))));
    assert_eq!(game.last_save(), Some("quick_save.json"));
}

#[test]
fn loading_a_missing_save_is_not_found() {
    let dir = tempdir().unwrap();
    let mut game = session(dir.path(), "5\n2\nghost\n0\n0\n", 1);

    assert!(matches!(game.load("ghost"), Err(GameError::NotFound(_))));

    game.run();

    assert!(transcript(game).contains("Save 'ghost.json' was not found."));
}

#[test]
fn ranking_orders_by_experience() {
    let dir = tempdir().unwrap();
    write_save(
        dir.path(),
        "low.json",
        serde_json::json!({"nome": "Low", "xp": 10, "nivel": 5, "classe": "Mago"}),
    );
    write_save(
        dir.path(),
        "high.json",
        serde_json::json!({"nome": "High", "xp": 90, "nivel": 1, "classe": "Guerreiro"}),
    );
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    let mut game = session(dir.path(), "6\n0\n", 1);

    let names: Vec<String> = game.ranking().unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["High".to_string(), "Low".to_string()]);

    game.run();

    let out = transcript(game);
    assert!(out.contains("1. High - 90 XP (level 1, Warrior)"));
    assert!(out.contains("2. Low - 10 XP (level 5, Mage)"));
}

#[test]
fn inventory_menu_equips_and_unequips() {
    let dir = tempdir().unwrap();
    write_save(
        dir.path(),
        "armed.json",
        serde_json::json!({
            "classe": "Guerreiro",
            "nome": "Borin",
            "nivel": 1,
            "xp": 0,
            "atributos": {"vida": 120, "vida_max": 120, "ataque": 15, "defesa": 5, "mana": 20},
            "inventario": [{"tipo": "equipamento", "nome": "Rusty Sword", "slot": "arma", "ataque_bonus": 4}]
        }),
    );
    let mut game = session(dir.path(), "", 1);
    // no skills key: the level-1 kit is learned on load
    let loaded = game.load("armed").unwrap();
    assert_eq!(loaded.abilities(), &[AbilityId::DevastatingStrike]);

    let message = game.use_or_equip(0).unwrap();
    assert!(message.contains("Rusty Sword"));
    let hero = game.hero().unwrap();
    assert_eq!(hero.total_attack(), 19);
    assert!(hero.bag().is_empty());

    game.unequip(EquipmentSlot::Weapon).unwrap();
    let hero = game.hero().unwrap();
    assert_eq!(hero.total_attack(), 15);
    assert_eq!(hero.bag().len(), 1);

    assert!(matches!(game.use_or_equip(4), Err(GameError::InvalidSelection(_))));
}

#[test]
fn defeat_discards_the_character() {
    let dir = tempdir().unwrap();
    write_save(
        dir.path(),
        "doomed.json",
        serde_json::json!({
            "classe": "Guerreiro",
            "nome": "Doomed",
            "nivel": 1,
            "xp": 0,
            "atributos": {"vida": 1, "vida_max": 120, "ataque": 1, "defesa": 0, "mana": 20}
        }),
    );
    let mut game = session(dir.path(), "2\n4\n1\n0\n0\n", 3);
    game.load("doomed").unwrap();

    game.run();

    assert!(game.hero().is_none());
    let out = transcript(game);
    assert!(out.contains("DEFEAT"));
    assert!(out.contains("Your character has died."));
}

proptest! {
    #[test]
    fn pick_stays_in_range(answer in "\\PC{0,6}", len in 0usize..10) {
        match pick(&answer, len) {
            Selection::Chosen(i) => prop_assert!(i < len),
            Selection::Cancel => prop_assert_eq!(answer.trim().parse::<usize>().ok(), Some(0)),
            Selection::Invalid(_) => {}
        }
    }
}
