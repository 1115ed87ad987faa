use std::io;

use anyhow::Context;
use clap::Parser;
use terminal_rpg::{
    Cli, ConsoleUi, FileEventLog, GameConfig, Session,
    config::init_logging,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = GameConfig::from_cli(&cli);
    log::info!("Starting with seed {}", config.seed);

    let ui = ConsoleUi::new(io::stdin().lock(), io::stdout());
    let events = Box::new(FileEventLog::new(&config.log_file));
    let mut session = Session::new(&config, ui, events).with_context(|| {
        format!("Failed to open the save directory {}", config.save_dir.display())
    })?;

    session.run();
    Ok(())
}
