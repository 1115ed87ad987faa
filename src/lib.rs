//! Terminal turn-based RPG: the session controller, the mission engine and
//! the console front end built on the domain crates.

pub mod config;
pub mod event_log;
pub mod mission;
pub mod session;
pub mod ui;

pub use combat;
pub use error;
pub use hero;
pub use items;
pub use save;

pub use crate::config::{Cli, GameConfig};
pub use crate::event_log::{EventSink, FileEventLog, GameEvent, MemoryEventLog};
pub use crate::mission::{Mission, MissionOutcome, MissionResult};
pub use crate::session::Session;
pub use crate::ui::{BattleView, CombatChoice, ConsoleUi, PlayerInterface, Selection, Tone};
