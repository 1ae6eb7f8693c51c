use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

/// When the screen gets redrawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw after every tick or terminal event.
    #[default]
    OnDirty,
    /// Redraw after a change, at most once per interval.
    ///
    /// Changes arriving faster than the interval are folded into one redraw.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(crate) enum LoopEvent {
    Tick,
    Render,
    Terminal(Event),
}

/// Produces ticks, render requests and terminal events one at a time.
#[derive(Debug)]
pub(crate) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    /// Starts with ticks disabled and a pending first render.
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: now,
            dirty: true,
        }
    }

    pub(crate) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Changes the tick interval. The next tick is one full interval away.
    pub(crate) fn set_tick_interval(&mut self, interval: Option<Duration>, now: Instant) {
        if interval != self.tick_interval {
            self.last_tick = now;
        }
        self.tick_interval = interval;
    }

    pub(crate) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until a tick or render is due or the terminal reports an event.
    pub(crate) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }
            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the tick or render that is due at `now`, ticks first.
    fn due_event(&mut self, now: Instant) -> Option<LoopEvent> {
        if let Some(interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= interval
        {
            // Catch up by whole intervals so a slow frame does not shift the cadence.
            self.last_tick += interval;
            if now.duration_since(self.last_tick) >= interval {
                self.last_tick = now;
            }
            self.dirty = true;
            return Some(LoopEvent::Tick);
        }

        let render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if render {
            self.last_render = now;
            self.dirty = false;
            return Some(LoopEvent::Render);
        }
        None
    }

    /// Time left until the next tick or render, or `None` to wait for input only.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let deadline = [next_tick, next_render].into_iter().flatten().min()?;
        Some(deadline.saturating_duration_since(now))
    }
}
