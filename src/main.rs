//! Sidegames CLI
//!
//! Replays one game's hole-result log and prints its settlement.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- game.toml events.csv > settlement.csv
//! ```
//!
//! `game.toml` carries the rules and roster; `events.csv` is the ordered
//! event log. See the crate docs for the row formats.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use sidegames::{Game, GameError, GameFile, Result, Roster};
use std::env;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(GameError::MissingArgument);
    }

    let game_file = GameFile::from_toml(&fs::read_to_string(&args[1])?)?;
    let roster = Roster::new(game_file.players)?;
    let mut game = Game::new(game_file.config, roster)?;

    let events = File::open(&args[2])?;
    game.process_csv(BufReader::new(events))?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    game.write_settlement(handle)?;

    Ok(())
}
