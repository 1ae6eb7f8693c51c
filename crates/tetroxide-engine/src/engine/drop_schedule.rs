use std::time::Duration;

/// How fast pieces fall and how that speed ramps up over time.
///
/// The drop interval starts at `initial_interval` and shrinks by `step` once every
/// `speed_up_period`, never going below `min_interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropSpeed {
    pub initial_interval: Duration,
    pub min_interval: Duration,
    pub step: Duration,
    pub speed_up_period: Duration,
}

impl Default for DropSpeed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidDropSpeedError {
    #[display("drop intervals must be non-zero")]
    ZeroInterval,
    #[display("speed-up period must be non-zero")]
    ZeroPeriod,
    #[display(
        "minimum drop interval ({} ms) is longer than the initial interval ({} ms)",
        min.as_millis(),
        initial.as_millis()
    )]
    FloorAboveInitial {
        #[error(not(source))]
        min: Duration,
        #[error(not(source))]
        initial: Duration,
    },
}

impl DropSpeed {
    pub const DEFAULT: Self = Self {
        initial_interval: Duration::from_millis(500),
        min_interval: Duration::from_millis(100),
        step: Duration::from_millis(50),
        speed_up_period: Duration::from_secs(30),
    };

    pub fn validate(&self) -> Result<(), InvalidDropSpeedError> {
        if self.initial_interval.is_zero() || self.min_interval.is_zero() {
            return Err(InvalidDropSpeedError::ZeroInterval);
        }
        if self.speed_up_period.is_zero() {
            return Err(InvalidDropSpeedError::ZeroPeriod);
        }
        if self.min_interval > self.initial_interval {
            return Err(InvalidDropSpeedError::FloorAboveInitial {
                min: self.min_interval,
                initial: self.initial_interval,
            });
        }
        Ok(())
    }

    /// Returns the interval that follows `current` after one speed-up.
    #[must_use]
    pub fn next_interval(&self, current: Duration) -> Duration {
        current.saturating_sub(self.step).max(self.min_interval)
    }
}

/// Frame-counting timer for automatic drops and speed-ups.
///
/// The owner calls [`advance`](Self::advance) once per frame; it reports when a drop
/// is due. The first drop is due on the first frame, later ones one interval apart.
/// A speed-up is applied as soon as the schedule is created and then once every period. Stopping is the owner's business: a schedule that is not advanced
/// neither drops nor speeds up.
#[derive(Debug, Clone)]
pub struct DropSchedule {
    speed: DropSpeed,
    fps: u64,
    interval: Duration,
    drop_frames: u64,
    speed_up_frames: u64,
}

fn frames_for(duration: Duration, fps: u64) -> u64 {
    let frames = duration.as_millis() * u128::from(fps) / 1000;
    u64::try_from(frames).unwrap_or(u64::MAX).max(1)
}

impl DropSchedule {
    #[must_use]
    pub fn new(speed: DropSpeed, fps: u64) -> Self {
        let fps = fps.max(1);
        let mut this = Self {
            speed,
            fps,
            interval: speed.initial_interval,
            drop_frames: 1,
            speed_up_frames: frames_for(speed.speed_up_period, fps),
        };
        this.speed_up();
        this
    }

    #[must_use]
    pub fn speed(&self) -> DropSpeed {
        self.speed
    }

    /// Returns the current time between automatic drops.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Advances one frame and returns whether an automatic drop is due.
    pub fn advance(&mut self) -> bool {
        self.speed_up_frames = self.speed_up_frames.saturating_sub(1);
        if self.speed_up_frames == 0 {
            self.speed_up_frames = frames_for(self.speed.speed_up_period, self.fps);
            self.speed_up();
        }

        self.drop_frames = self.drop_frames.saturating_sub(1);
        if self.drop_frames == 0 {
            self.drop_frames = frames_for(self.interval, self.fps);
            return true;
        }
        false
    }

    fn speed_up(&mut self) {
        let next = self.speed.next_interval(self.interval);
        if next != self.interval {
            log::info!("drop interval shortened to {} ms", next.as_millis());
            self.interval = next;
        }
    }
}
