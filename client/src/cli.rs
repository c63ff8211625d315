use std::{
    io,
    process::exit,
    sync::{Arc, RwLock},
};

use anyhow::{Context, bail};
use colored::Colorize;
use liblife::Position;

use crate::{State, ticker, ticker::CyclePeriod};

pub fn run_cli(state_arc: Arc<RwLock<State>>) {
    for line_res in io::stdin().lines() {
        let line = match line_res {
            Ok(line) => line,
            Err(e) => {
                log::error!("Couldn't read from stdin: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(line.split_whitespace())
            .and_then(|command| command.execute(&state_arc))
        {
            Ok(()) => println!("{}", "OK".green()),
            Err(e) => eprintln!("{} {e:#}", "!".red()),
        }
    }

    log::debug!("Console closed");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Step(usize),
    Run(Option<CyclePeriod>),
    Pause,
    Rate(CyclePeriod),
    Toggle(Position),
    Clear,
    Random(usize),
    Status,
    Help,
    Exit,
}

impl Command {
    fn parse<'a, I>(mut args: I) -> anyhow::Result<Self>
    where
        I: Iterator<Item = &'a str>,
    {
        let command = match args.next().context("No command")? {
            "step" => {
                let times = args.next().unwrap_or("1").parse::<usize>()?;
                Command::Step(times)
            }

            "run" => {
                let period = args.next().map(parse_period).transpose()?;
                Command::Run(period)
            }

            "pause" | "stop" => Command::Pause,

            "rate" => {
                let period = parse_period(args.next().context("missing period in ms")?)?;
                Command::Rate(period)
            }

            "toggle" => {
                let row = args.next().context("missing row")?.parse::<usize>()?;
                let col = args.next().context("missing column")?.parse::<usize>()?;
                Command::Toggle(Position { row, col })
            }

            "clear" => Command::Clear,

            "random" => {
                let alive_count = args
                    .next()
                    .context("missing alive count")?
                    .parse::<usize>()?;
                Command::Random(alive_count)
            }

            "status" => Command::Status,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,

            other => bail!("Unknown command {other:?}, try \"help\""),
        };

        if let Some(extra) = args.next() {
            bail!("Unexpected argument {extra:?}");
        }

        Ok(command)
    }

    fn execute(self, state_arc: &Arc<RwLock<State>>) -> anyhow::Result<()> {
        match self {
            Command::Step(times) => {
                // Relock per generation so drawing and input keep up during long runs.
                for _ in 0..times {
                    state_arc.write().unwrap().grid.advance();
                }
            }

            Command::Run(period) => {
                if let Some(period) = period {
                    ticker::set_period(state_arc, period);
                }
                ticker::resume(state_arc);
            }

            Command::Pause => ticker::pause(state_arc),

            Command::Rate(period) => ticker::set_period(state_arc, period),

            Command::Toggle(pos) => {
                state_arc.write().unwrap().grid.toggle(pos)?;
            }

            Command::Clear => state_arc.write().unwrap().grid.clear(),

            Command::Random(alive_count) => {
                state_arc.write().unwrap().grid.randomize(alive_count)?;
                log::info!("Filled grid with {alive_count} random cells");
            }

            Command::Status => {
                let state = state_arc.read().unwrap();
                println!(
                    "{}x{} grid, generation {}, {} alive, {} at {} ms",
                    state.grid.rows(),
                    state.grid.cols(),
                    state.grid.generation(),
                    state.grid.population(),
                    if state.pacer.is_paused() { "paused" } else { "running" },
                    state.pacer.period().millis(),
                );
            }

            Command::Help => print_commands(),

            Command::Exit => exit(0),
        }

        Ok(())
    }
}

fn parse_period(arg: &str) -> anyhow::Result<CyclePeriod> {
    let millis = arg
        .parse::<u64>()
        .with_context(|| format!("invalid period {arg:?}"))?;
    Ok(CyclePeriod::from_millis(millis))
}

pub fn print_controls() {
    println!("{}", "White cells are alive, black cells are dead".bold());
    println!("Lmb to change the state of the selected cell");
    println!("Rmb to move the world view");
    println!("I/O - Zoom in / Zoom out");
    println!("Right/Left arrow keys - increase/decrease cycle frequency");
    println!("Space bar - pause/unpause the game");
    println!("Type \"help\" for console commands");
    println!();
}

fn print_commands() {
    println!("{}", "Commands:".bold());
    println!("  step [n]          advance n generations (default 1)");
    println!("  run [period_ms]   unpause, optionally setting the cycle period");
    println!("  pause             pause automatic generations");
    println!("  rate <period_ms>  set the cycle period ({}..={} ms)", CyclePeriod::MIN, CyclePeriod::MAX);
    println!("  toggle <row> <col>");
    println!("  clear             kill every cell");
    println!("  random <count>    clear and place count random live cells");
    println!("  status            show generation, population and pacing");
    println!("  exit");
}

#[cfg(test)]
mod tests {
    use liblife::Grid;

    use super::*;
    use crate::ticker::Pacer;

    fn parse(line: &str) -> anyhow::Result<Command> {
        Command::parse(line.split_whitespace())
    }

    #[test]
    fn parses_commands_with_defaults() {
        assert_eq!(parse("step").unwrap(), Command::Step(1));
        assert_eq!(parse("step 12").unwrap(), Command::Step(12));
        assert_eq!(parse("run").unwrap(), Command::Run(None));
        assert_eq!(
            parse("run 256").unwrap(),
            Command::Run(Some(CyclePeriod::from_millis(256)))
        );
        assert_eq!(parse("stop").unwrap(), Command::Pause);
        assert_eq!(
            parse("toggle 3 9").unwrap(),
            Command::Toggle(Position { row: 3, col: 9 })
        );
        assert_eq!(parse("random 40").unwrap(), Command::Random(40));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse("").is_err());
        assert!(parse("dance").is_err());
        assert!(parse("step many").is_err());
        assert!(parse("rate").is_err());
        assert!(parse("toggle 3").is_err());
        assert!(parse("clear now").is_err());
    }

    #[test]
    fn rate_is_clamped() {
        assert_eq!(
            parse("rate 5").unwrap(),
            Command::Rate(CyclePeriod::from_millis(CyclePeriod::MIN))
        );
    }

    #[test]
    fn long_step_lets_readers_in_between_generations() {
        let grid = Grid::new(64, 64).unwrap();
        let state_arc = Arc::new(RwLock::new(State::new(grid, Pacer::default())));

        let stepper_state_arc = state_arc.clone();
        let stepper = std::thread::spawn(move || {
            Command::Step(20_000).execute(&stepper_state_arc).unwrap();
        });

        // Wait until stepping is underway, then make sure a reader gets in before it ends.
        while state_arc.read().unwrap().grid.generation() == 0 {
            std::thread::yield_now();
        }
        let seen = state_arc.read().unwrap().grid.generation();

        stepper.join().unwrap();

        assert!(seen < 20_000, "reader only got in after all {seen} generations");
        assert_eq!(state_arc.read().unwrap().grid.generation(), 20_000);
    }

    #[test]
    fn executes_grid_commands() {
        let grid = Grid::new(10, 10).unwrap();
        let state_arc = Arc::new(RwLock::new(State::new(grid, Pacer::default())));

        for line in ["toggle 5 4", "toggle 5 5", "toggle 5 6", "step 2"] {
            parse(line).unwrap().execute(&state_arc).unwrap();
        }

        {
            let state = state_arc.read().unwrap();
            assert_eq!(state.grid.generation(), 2);
            assert_eq!(state.grid.population(), 3);
            assert!(state.grid.is_alive((5, 4)).unwrap());
        }

        assert!(parse("toggle 10 0").unwrap().execute(&state_arc).is_err());
        assert!(parse("random 101").unwrap().execute(&state_arc).is_err());

        parse("clear").unwrap().execute(&state_arc).unwrap();
        assert_eq!(state_arc.read().unwrap().grid.population(), 0);
    }
}
