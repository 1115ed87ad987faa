// src/event_log.rs

//! Append-only gameplay log.
//!
//! The mission engine reports what happened as [`GameEvent`]s; a sink decides
//! where the lines end up. The file sink never interrupts play: a failed write
//! is reported through `log::warn!` and the event is dropped.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use combat::{Difficulty, Scenario, StatusKind};

use crate::mission::MissionOutcome;

/// Severity column of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Info,
    Combat,
}

impl EventLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EventLevel::Info => "INFO",
            EventLevel::Combat => "COMBAT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    MissionStarted {
        hero: String,
        enemy: String,
        scenario: Scenario,
        difficulty: Difficulty,
    },
    /// One damage exchange between the two sides
    DamageDealt {
        turn: u32,
        attacker: String,
        target: String,
        amount: u32,
    },
    /// Damage over time from a status condition
    StatusDamage {
        turn: u32,
        target: String,
        status: StatusKind,
        amount: u32,
    },
    MissionEnded {
        hero: String,
        enemy: String,
        outcome: MissionOutcome,
        turns: u32,
    },
}

impl GameEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::MissionStarted { .. } => "MissionStarted",
            GameEvent::DamageDealt { .. } => "DamageDealt",
            GameEvent::StatusDamage { .. } => "StatusDamage",
            GameEvent::MissionEnded { .. } => "MissionEnded",
        }
    }

    pub fn level(&self) -> EventLevel {
        match self {
            GameEvent::DamageDealt { .. } | GameEvent::StatusDamage { .. } => EventLevel::Combat,
            GameEvent::MissionStarted { .. } | GameEvent::MissionEnded { .. } => EventLevel::Info,
        }
    }

    pub fn message(&self) -> String {
        match self {
            GameEvent::MissionStarted {
                hero,
                enemy,
                scenario,
                difficulty,
            } => format!(
                "Mission started: {} vs {} ({}, {})",
                hero, enemy, scenario, difficulty
            ),
            GameEvent::DamageDealt {
                turn,
                attacker,
                target,
                amount,
            } => format!("Turn {}: {} dealt {} damage to {}.", turn, attacker, amount, target),
            GameEvent::StatusDamage {
                turn,
                target,
                status,
                amount,
            } => format!("Turn {}: {} took {} {} damage.", turn, target, amount, status),
            GameEvent::MissionEnded {
                hero,
                enemy,
                outcome,
                turns,
            } => format!(
                "Mission ended: {} against {} - {} after {} turns",
                hero, enemy, outcome, turns
            ),
        }
    }

    /// `[LEVEL] message`, without the timestamp
    pub fn line(&self) -> String {
        format!("[{}] {}", self.level().as_str(), self.message())
    }
}

/// Where gameplay events are written
pub trait EventSink {
    fn record(&mut self, event: &GameEvent);
}

/// Appends timestamped lines to a text file
#[derive(Debug, Clone)]
pub struct FileEventLog {
    path: PathBuf,
}

impl FileEventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

impl EventSink for FileEventLog {
    fn record(&mut self, event: &GameEvent) {
        let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("[{}] {}", ts, event.line());
        if let Err(e) = self.append(&line) {
            log::warn!("Could not write to {}: {}", self.path.display(), e);
        }
    }
}

/// Keeps events in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryEventLog {
    events: Vec<GameEvent>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(GameEvent::line).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for MemoryEventLog {
    fn record(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
