// src/config.rs

//! Command line options and logger setup.

use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::time::SystemTime;

use clap::Parser;
use combat::{Difficulty, Scenario};

#[derive(Debug, Parser)]
#[command(name = "terminal_rpg")]
#[command(about = "A turn-based terminal RPG")]
#[command(version)]
pub struct Cli {
    /// Directory holding the character saves
    #[arg(long, default_value = "saves")]
    pub save_dir: PathBuf,

    /// Gameplay event log, appended to on every mission
    #[arg(long, default_value = "game.log")]
    pub log_file: PathBuf,

    /// Seed for every random roll; derived from the clock when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Starting mission difficulty (easy, medium, hard)
    #[arg(long, default_value = "easy")]
    pub difficulty: Difficulty,

    /// Starting mission scenario (trail, forest, cave, ruins)
    #[arg(long, default_value = "trail")]
    pub scenario: Scenario,

    /// Verbose diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Settings the session is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub save_dir: PathBuf,
    pub log_file: PathBuf,
    pub seed: u64,
    pub difficulty: Difficulty,
    pub scenario: Scenario,
}

impl GameConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            save_dir: cli.save_dir.clone(),
            log_file: cli.log_file.clone(),
            seed: cli.seed.unwrap_or_else(clock_seed),
            difficulty: cli.difficulty,
            scenario: cli.scenario,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            log_file: PathBuf::from("game.log"),
            seed: clock_seed(),
            difficulty: Difficulty::Easy,
            scenario: Scenario::Trail,
        }
    }
}

/// Nanoseconds since the epoch mixed with the process id
pub fn clock_seed() -> u64 {
    let time = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    (time ^ process::id() as u128) as u64
}

pub fn level_for(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Diagnostics go to stderr so they never mix with the game screen.
/// `RUST_LOG` overrides the level picked from `-v`.
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(verbosity));
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.format(|fmt, record| {
        let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(fmt, "{} [{}] {}: {}", ts, record.level(), record.target(), record.args())
    });
    builder.target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::parse_from(["terminal_rpg", "--seed", "42"]);
        let config = GameConfig::from_cli(&cli);
        assert_eq!(config.save_dir, PathBuf::from("saves"));
        assert_eq!(config.log_file, PathBuf::from("game.log"));
        assert_eq!(config.seed, 42);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.scenario, Scenario::Trail);
    }

    #[test]
    fn mission_options_parse_case_insensitively() {
        let cli = Cli::parse_from(["terminal_rpg", "--difficulty", "HARD", "--scenario", "ruins", "-vv"]);
        assert_eq!(cli.difficulty, Difficulty::Hard);
        assert_eq!(cli.scenario, Scenario::Ruins);
        assert_eq!(level_for(cli.verbose), log::LevelFilter::Debug);
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        assert!(Cli::try_parse_from(["terminal_rpg", "--scenario", "swamp"]).is_err());
    }

    #[test]
    fn quiet_by_default() {
        assert_eq!(level_for(0), log::LevelFilter::Warn);
        assert_eq!(level_for(9), log::LevelFilter::Trace);
    }
}
