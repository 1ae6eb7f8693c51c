use std::{
    io,
    time::{Duration, Instant},
};

use crate::{
    App,
    event_loop::{EventLoop, LoopEvent, RenderMode},
};

/// Owns the terminal event loop and feeds an [`App`] until it asks to exit.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of ticks per second, or disables ticks with `None`.
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        log::debug!("tick interval set to {interval:?}");
        self.events.set_tick_interval(interval, Instant::now());
    }

    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.events.tick_interval()
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Takes over the terminal and runs `app` to completion.
    ///
    /// Ticks go to [`App::update`], render requests to [`App::draw`] and terminal
    /// events to [`App::handle_event`]. The terminal is restored on return, also
    /// when an I/O error ends the loop early.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    LoopEvent::Tick => app.update(&mut self),
                    LoopEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    LoopEvent::Terminal(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
