// src/ui.rs

//! Player-facing presentation.
//!
//! The mission engine only talks to [`PlayerInterface`]; [`ConsoleUi`] is the
//! line-oriented implementation over any reader/writer pair, so the same code
//! drives stdin/stdout and in-memory buffers.

use std::io::{BufRead, Write};

use combat::{Combatant, Enemy, StatusEffects};
use crossterm::style::{Attribute, Color, style, Stylize};
use hero::{AbilityDef, AbilityId, Character};
use items::Item;

const BAR_WIDTH: usize = 20;

/// What the player wants to do this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatChoice {
    Attack,
    Special,
    UseItem,
    Flee,
    /// Input that matched no option
    Invalid(String),
}

/// Answer to a sub-menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Chosen(T),
    Cancel,
    Invalid(String),
}

/// Colour hint for a line of narration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Heading,
    Player,
    Enemy,
    Status,
    Warning,
    Victory,
    Defeat,
}

/// Everything the player sees at the top of a turn
#[derive(Debug, Clone, Copy)]
pub struct BattleView<'a> {
    pub turn: u32,
    pub hero: &'a Character,
    pub enemy: &'a Enemy,
    pub hero_effects: &'a StatusEffects,
    pub enemy_effects: &'a StatusEffects,
}

pub trait PlayerInterface {
    fn show_status(&mut self, view: &BattleView<'_>);

    fn choose_action(&mut self, view: &BattleView<'_>) -> CombatChoice;

    /// Pick one of the known abilities, cheapest first
    fn choose_ability(&mut self, abilities: &[&AbilityDef]) -> Selection<AbilityId>;

    /// Pick a consumable; the returned value is its inventory position
    fn choose_item(&mut self, items: &[(usize, &Item)]) -> Selection<usize>;

    fn narrate(&mut self, tone: Tone, message: &str);
}

/// Console front end over a reader and a writer
pub struct ConsoleUi<R, W> {
    input: R,
    output: W,
    colored: bool,
    closed: bool,
}

impl<R: BufRead, W: Write> ConsoleUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            colored: true,
            closed: false,
        }
    }

    /// Disable colour escapes
    pub fn plain(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Input reached end of file
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next trimmed input line, `None` once the input is exhausted
    pub fn read_line(&mut self) -> Option<String> {
        if self.closed {
            return None;
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                self.closed = true;
                None
            }
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                log::warn!("Failed to read input: {}", e);
                self.closed = true;
                None
            }
        }
    }

    pub fn prompt(&mut self, label: &str) -> Option<String> {
        self.write_raw(&format!("{} ", label));
        self.read_line()
    }

    /// Print numbered options and read the choice
    pub fn menu(&mut self, title: &str, options: &[(&str, &str)]) -> Option<String> {
        self.say(Tone::Heading, &format!("\n=== {} ===", title));
        for (key, label) in options {
            self.say(Tone::Plain, &format!("[{}] {}", key, label));
        }
        self.prompt(">")
    }

    pub fn say(&mut self, tone: Tone, message: &str) {
        let line = self.paint(tone, message);
        self.write_raw(&format!("{}\n", line));
    }

    fn write_raw(&mut self, text: &str) {
        if let Err(e) = self
            .output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
        {
            log::warn!("Failed to write to the console: {}", e);
        }
    }

    fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.colored {
            return text.to_string();
        }
        let styled = style(text);
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Heading => styled.with(Color::Cyan).attribute(Attribute::Bold).to_string(),
            Tone::Player => styled.with(Color::Green).to_string(),
            Tone::Enemy => styled.with(Color::Red).to_string(),
            Tone::Status => styled.with(Color::Magenta).to_string(),
            Tone::Warning => styled.with(Color::Yellow).to_string(),
            Tone::Victory => styled.with(Color::Yellow).attribute(Attribute::Bold).to_string(),
            Tone::Defeat => styled.with(Color::DarkRed).attribute(Attribute::Bold).to_string(),
        }
    }

    fn bar_line(&self, name: &str, bar: String, tone: Tone) -> String {
        let bar = if self.colored {
            let color = if tone == Tone::Player { Color::Green } else { Color::Red };
            style(bar).with(color).to_string()
        } else {
            bar
        };
        format!("{:15} {}", name, bar)
    }
}

fn effects_label(effects: &StatusEffects) -> String {
    if effects.is_empty() {
        return String::new();
    }
    let list: Vec<String> = effects.iter().map(|e| e.description()).collect();
    format!(" {{{}}}", list.join(", "))
}

impl<R: BufRead, W: Write> PlayerInterface for ConsoleUi<R, W> {
    fn show_status(&mut self, view: &BattleView<'_>) {
        let hero_attrs = view.hero.attributes();
        let hero_line = format!(
            "{} | MP {}/{}{}",
            self.bar_line(view.hero.name(), hero_attrs.health_bar(BAR_WIDTH), Tone::Player),
            hero_attrs.mana,
            hero_attrs.max_mana,
            effects_label(view.hero_effects)
        );
        let enemy_line = format!(
            "{}{}",
            self.bar_line(
                view.enemy.name(),
                view.enemy.attributes().health_bar(BAR_WIDTH),
                Tone::Enemy
            ),
            effects_label(view.enemy_effects)
        );
        self.say(Tone::Heading, &format!("\n--- Turn {} ---", view.turn));
        self.write_raw(&format!("{}\n{}\n", hero_line, enemy_line));
        self.say(Tone::Plain, &"-".repeat(30));
    }

    fn choose_action(&mut self, _view: &BattleView<'_>) -> CombatChoice {
        self.say(Tone::Plain, "Your move:");
        for option in ["[1] Basic attack", "[2] Special ability", "[3] Use item", "[4] Flee"] {
            self.say(Tone::Plain, option);
        }
        // Running out of input means nobody is there to fight
        let Some(answer) = self.prompt(">") else {
            return CombatChoice::Flee;
        };
        match answer.as_str() {
            "1" => CombatChoice::Attack,
            "2" => CombatChoice::Special,
            "3" => CombatChoice::UseItem,
            "4" => CombatChoice::Flee,
            _ => CombatChoice::Invalid(answer),
        }
    }

    fn choose_ability(&mut self, abilities: &[&AbilityDef]) -> Selection<AbilityId> {
        self.say(Tone::Plain, "Abilities:");
        for (i, def) in abilities.iter().enumerate() {
            self.say(Tone::Plain, &format!("[{}] {}", i + 1, def.menu_label()));
        }
        self.say(Tone::Plain, "[0] Cancel");
        let Some(answer) = self.prompt(">") else {
            return Selection::Cancel;
        };
        pick(&answer, abilities.len()).map(|i| abilities[i].id)
    }

    fn choose_item(&mut self, items: &[(usize, &Item)]) -> Selection<usize> {
        self.say(Tone::Plain, "Consumables:");
        for (i, (_, item)) in items.iter().enumerate() {
            self.say(Tone::Plain, &format!("[{}] {}", i + 1, item.summary()));
        }
        self.say(Tone::Plain, "[0] Cancel");
        let Some(answer) = self.prompt(">") else {
            return Selection::Cancel;
        };
        pick(&answer, items.len()).map(|i| items[i].0)
    }

    fn narrate(&mut self, tone: Tone, message: &str) {
        self.say(tone, message);
    }
}

impl<T> Selection<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Selection<U> {
        match self {
            Selection::Chosen(value) => Selection::Chosen(f(value)),
            Selection::Cancel => Selection::Cancel,
            Selection::Invalid(input) => Selection::Invalid(input),
        }
    }
}

/// `"0"` cancels, `"1"..="len"` picks a zero-based position
pub fn pick(answer: &str, len: usize) -> Selection<usize> {
    match answer.trim().parse::<usize>() {
        Ok(0) => Selection::Cancel,
        Ok(n) if n <= len => Selection::Chosen(n - 1),
        _ => Selection::Invalid(answer.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat::{EnemyCatalog, Scenario};
    use hero::{Class, ProgressionTables};
    use std::io::Cursor;

    fn console(input: &str) -> ConsoleUi<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleUi::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()).plain()
    }

    fn printed(ui: ConsoleUi<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(ui.into_output()).unwrap()
    }

    #[test]
    fn pick_maps_menu_numbers() {
        assert_eq!(pick("0", 3), Selection::Cancel);
        assert_eq!(pick("2", 3), Selection::Chosen(1));
        assert_eq!(pick("4", 3), Selection::Invalid("4".into()));
        assert_eq!(pick("abc", 3), Selection::Invalid("abc".into()));
    }

    #[test]
    fn action_menu_reads_choices() {
        let tables = ProgressionTables::standard();
        let hero = Character::new("Borin", Class::Warrior, &tables);
        let catalog = EnemyCatalog::standard();
        let enemy = catalog.roster(Scenario::Trail).unwrap().common()[0].spawn(Scenario::Trail);
        let effects = StatusEffects::new();
        let view = BattleView {
            turn: 1,
            hero: &hero,
            enemy: &enemy,
            hero_effects: &effects,
            enemy_effects: &effects,
        };

        let mut ui = console("1\nxyz\n4\n");
        assert_eq!(ui.choose_action(&view), CombatChoice::Attack);
        assert_eq!(ui.choose_action(&view), CombatChoice::Invalid("xyz".into()));
        assert_eq!(ui.choose_action(&view), CombatChoice::Flee);
        // end of input
        assert_eq!(ui.choose_action(&view), CombatChoice::Flee);
        assert!(ui.is_closed());
    }

    #[test]
    fn status_shows_health_bars() {
        let tables = ProgressionTables::standard();
        let hero = Character::new("Borin", Class::Warrior, &tables);
        let catalog = EnemyCatalog::standard();
        let enemy = catalog.roster(Scenario::Trail).unwrap().common()[0].spawn(Scenario::Trail);
        let effects = StatusEffects::new();
        let mut ui = console("");
        ui.show_status(&BattleView {
            turn: 2,
            hero: &hero,
            enemy: &enemy,
            hero_effects: &effects,
            enemy_effects: &effects,
        });
        let out = printed(ui);
        assert!(out.contains("--- Turn 2 ---"));
        assert!(out.contains("120/120 HP | MP 20/20"));
    }

    #[test]
    fn item_menu_returns_inventory_position() {
        let potion = items::catalog::health_potion();
        let ether = items::catalog::mana_potion();
        let list = vec![(2, &potion), (5, &ether)];
        let mut ui = console("2\n0\n");
        assert_eq!(ui.choose_item(&list), Selection::Chosen(5));
        assert_eq!(ui.choose_item(&list), Selection::Cancel);
    }

    #[test]
    fn plain_console_writes_no_escapes() {
        let mut ui = console("");
        ui.say(Tone::Victory, "Victory!");
        assert_eq!(printed(ui), "Victory!\n");
    }
}
