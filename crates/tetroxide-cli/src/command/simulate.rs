use std::path::PathBuf;

use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::Serialize;
use tetroxide_engine::{Direction, DropSpeed, GameSession, PieceSeed};

use crate::{logging, util::Output};

const DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::SoftDrop,
    Direction::Rotate,
];

/// PCG stream selector mixed into the seed for simulated inputs.
const INPUT_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed for pieces and inputs (32 hex digits); random if omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many gravity ticks even if the game is still running
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
    /// Random inputs applied between two gravity ticks
    #[arg(long, default_value_t = 3)]
    inputs_per_tick: usize,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Write log records to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct SimulationSummary {
    seed: PieceSeed,
    ticks: u64,
    inputs: u64,
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    game_over: bool,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        max_ticks,
        inputs_per_tick,
        output,
        log_file,
    } = arg;

    match log_file {
        Some(path) => logging::init_to_file(path)?,
        None => logging::init_to_stderr()?,
    }

    let seed = seed.unwrap_or_else(rand::random);
    log::info!("simulating with seed {seed}, at most {max_ticks} ticks");
    let summary = simulate(seed, *max_ticks, *inputs_per_tick);
    log::info!(
        "finished after {} ticks: score {}, {} lines",
        summary.ticks,
        summary.score,
        summary.total_cleared_lines
    );

    Output::save_json(&summary, output.clone())?;
    Ok(())
}

/// Plays one game with random inputs, `inputs_per_tick` between each gravity tick.
fn simulate(seed: PieceSeed, max_ticks: u64, inputs_per_tick: usize) -> SimulationSummary {
    let mut session = GameSession::with_seed(60, DropSpeed::DEFAULT, seed);
    let mut rng = input_rng(seed);

    let mut ticks = 0;
    let mut inputs = 0;
    while ticks < max_ticks && session.session_state().is_playing() {
        for _ in 0..inputs_per_tick {
            if session.session_state().is_game_over() {
                break;
            }
            session.apply_input(DIRECTIONS[rng.random_range(0..DIRECTIONS.len())]);
            inputs += 1;
        }
        session.tick();
        ticks += 1;
    }

    let stats = session.stats();
    SimulationSummary {
        seed,
        ticks,
        inputs,
        score: stats.score(),
        completed_pieces: stats.completed_pieces(),
        total_cleared_lines: stats.total_cleared_lines(),
        line_cleared_counter: *stats.line_cleared_counter(),
        game_over: session.session_state().is_game_over(),
    }
}

/// Generator for simulated inputs, on a different PCG stream than the pieces.
#[allow(clippy::cast_possible_truncation)]
fn input_rng(seed: PieceSeed) -> Pcg32 {
    let bits = u128::from_le_bytes(seed.to_bytes());
    let state = bits as u64;
    let stream = (bits >> 64) as u64;
    Pcg32::new(state, stream ^ INPUT_STREAM)
}
