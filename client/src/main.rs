use std::{
    env,
    io::{self, Write},
    sync::{Arc, RwLock},
    thread,
};

use anyhow::Context;
use config::ClientConfig;
use liblife::Grid;
use ticker::Pacer;

mod cli;
mod config;
mod renderer;
mod ticker;

pub struct State {
    grid: Grid,
    pacer: Pacer,
}

impl State {
    pub fn new(grid: Grid, pacer: Pacer) -> Self {
        Self { grid, pacer }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: client [rows] [cols] [config.json]
    let mut args = env::args().skip(1);

    let rows = match args.next() {
        Some(arg) => parse_dimension(&arg)?,
        None => prompt_dimension("Input the number of rows: ")?,
    };
    let cols = match args.next() {
        Some(arg) => parse_dimension(&arg)?,
        None => prompt_dimension("Input the number of columns: ")?,
    };

    let config = match args.next() {
        Some(config_path) => ClientConfig::load(config_path)?,
        None => ClientConfig::default(),
    };

    let grid = Grid::new(rows, cols).context("Couldn't create grid")?;
    log::debug!("Created {rows}x{cols} grid with {config:?}");

    cli::print_controls();
    println!("Game is paused");

    let state_arc = Arc::new(RwLock::new(State::new(
        grid,
        Pacer::new(config.cycle_period()),
    )));

    let cli_state_arc = state_arc.clone();
    thread::spawn(move || cli::run_cli(cli_state_arc));

    renderer::run(state_arc, &config)
}

fn parse_dimension(arg: &str) -> anyhow::Result<usize> {
    let value = arg
        .trim()
        .parse::<usize>()
        .with_context(|| format!("{arg:?} is not a valid grid dimension"))?;

    anyhow::ensure!(value > 0, "grid dimensions must be positive");
    Ok(value)
}

fn prompt_dimension(prompt: &str) -> anyhow::Result<usize> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Couldn't read from stdin")?;

    parse_dimension(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_must_be_positive_integers() {
        assert_eq!(parse_dimension("12").unwrap(), 12);
        assert_eq!(parse_dimension(" 7\n").unwrap(), 7);
        assert!(parse_dimension("0").is_err());
        assert!(parse_dimension("-3").is_err());
        assert!(parse_dimension("ten").is_err());
    }
}
