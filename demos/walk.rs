//! Terminal demo: an agent walks across varied terrain toward random targets.
//!
//! Run: cargo run --bin walk -- [config.json] [--steps N]
//!
//! Set `RUST_LOG=debug` to see every planned path.

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::Print,
    terminal::{Clear, ClearType},
};
use tilewalk_core::GridAdapter;
use tilewalk_demos::{load_config, new_controller, random_target, render, status};
use tilewalk_mover::{MoveController, MoverConfig, StepOutcome};

/// Consecutive failed ticks before giving up on a target.
const MAX_STALLS: u32 = 5;

/// Walk an agent across a small terrain map toward random targets.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file with `speed` and `max_expansions`; defaults apply otherwise
    config: Option<PathBuf>,

    /// Stop after this many ticks instead of running forever
    #[arg(long)]
    steps: Option<usize>,
}

fn draw<G: GridAdapter>(out: &mut impl Write, controller: &MoveController<G>) -> io::Result<()> {
    execute!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print(render(controller)),
        Print(status(controller)),
        Print("\n"),
    )
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => MoverConfig::default(),
    };
    log::info!(
        "speed {} cells/s, search budget {}",
        config.speed,
        config.max_expansions
    );

    let mut controller = new_controller(config)?;
    let mut stdout = io::stdout();
    let mut ticks = 0;
    let mut stalls = 0;
    while args.steps.is_none_or(|max| ticks < max) {
        if controller.at_target() || stalls >= MAX_STALLS {
            stalls = 0;
            let Some(cell) =
                random_target(controller.grid(), controller.allowed_tiles(), controller.cell())
            else {
                return Err("no traversable cell to walk to".into());
            };
            controller.set_target(controller.grid().cell_to_world(cell));
        }

        thread::sleep(controller.time_between_steps());
        let outcome = controller.tick();
        ticks += 1;
        match outcome {
            StepOutcome::Stalled(err) => {
                stalls += 1;
                log::warn!("stalled ({stalls}/{MAX_STALLS}): {err}");
            }
            _ => stalls = 0,
        }

        draw(&mut stdout, &controller)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_config_and_steps() {
        let args = Args::try_parse_from(["walk", "fast.json", "--steps", "3"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("fast.json")));
        assert_eq!(args.steps, Some(3));

        let args = Args::try_parse_from(["walk"]).unwrap();
        assert_eq!(args.config, None);
        assert_eq!(args.steps, None);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Args::try_parse_from(["walk", "--steps"]).is_err());
        assert!(Args::try_parse_from(["walk", "--steps", "many"]).is_err());
        assert!(Args::try_parse_from(["walk", "--fast"]).is_err());
    }

    #[test]
    fn draw_clears_then_prints_frame() {
        let controller = new_controller(MoverConfig::default()).unwrap();
        let mut out = Vec::new();
        draw(&mut out, &controller).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[2J"));
        assert!(text.contains(&render(&controller)));
        assert!(text.contains(&status(&controller)));
    }
}
