use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use tetroxide_engine::{DropSpeed, PieceSeed};
use tetroxide_runtime::{Runtime, ScreenStack};

use crate::{command::play::screens::TitleScreen, logging};

mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    drop_speed: DropSpeedArg,
    /// Seed for the piece sequence of the first game (32 hex digits)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DropSpeedArg {
    /// Initial time between automatic drops, in milliseconds
    #[arg(long, default_value_t = 500)]
    drop_interval_ms: u64,
    /// Shortest time between automatic drops, in milliseconds
    #[arg(long, default_value_t = 100)]
    min_drop_interval_ms: u64,
    /// How much the drop interval shrinks at each speed-up, in milliseconds
    #[arg(long, default_value_t = 50)]
    speed_up_step_ms: u64,
    /// Time between speed-ups, in seconds
    #[arg(long, default_value_t = 30)]
    speed_up_period_secs: u64,
}

impl Default for DropSpeedArg {
    fn default() -> Self {
        Self {
            drop_interval_ms: 500,
            min_drop_interval_ms: 100,
            speed_up_step_ms: 50,
            speed_up_period_secs: 30,
        }
    }
}

impl DropSpeedArg {
    pub(crate) fn to_drop_speed(&self) -> anyhow::Result<DropSpeed> {
        let speed = DropSpeed {
            initial_interval: Duration::from_millis(self.drop_interval_ms),
            min_interval: Duration::from_millis(self.min_drop_interval_ms),
            step: Duration::from_millis(self.speed_up_step_ms),
            speed_up_period: Duration::from_secs(self.speed_up_period_secs),
        };
        speed.validate().context("Invalid drop speed options")?;
        Ok(speed)
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        drop_speed,
        seed,
        log_file,
    } = arg;

    // The terminal belongs to the TUI, so logs only go to a file.
    if let Some(path) = log_file {
        logging::init_to_file(path)?;
    }
    let speed = drop_speed.to_drop_speed()?;
    log::info!("starting play mode with {speed:?}");

    let mut screens = ScreenStack::new(Box::new(TitleScreen::new(speed, *seed)));
    Runtime::new()
        .run(&mut screens)
        .context("Terminal I/O failed")?;
    Ok(())
}
