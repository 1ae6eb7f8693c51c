use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use crate::{App, Runtime};

/// One screen of the application, such as a menu or the playfield.
///
/// Only the top screen of a [`ScreenStack`] receives events, ticks and draw calls.
///
/// [`on_active`](Self::on_active) runs whenever the screen comes to the top: when it
/// is first shown and again when a screen pushed above it is popped. This is where a
/// screen sets the tick rate and render mode it needs.
/// [`on_close`](Self::on_close) runs once, right before the screen is dropped from the
/// stack by [`ScreenTransition::Pop`] or [`ScreenTransition::Exit`].
///
/// ```rust
/// use crossterm::event::Event;
/// use ratatui::Frame;
/// use tetroxide_runtime::{RenderMode, Runtime, Screen, ScreenTransition};
///
/// #[derive(Debug)]
/// struct Clock {
///     ticks: u64,
/// }
///
/// impl Screen for Clock {
///     fn on_active(&mut self, runtime: &mut Runtime) {
///         runtime.set_tick_rate(Some(1.0));
///         runtime.set_render_mode(RenderMode::OnDirty);
///     }
///
///     fn on_close(&mut self, _runtime: &mut Runtime) {}
///
///     fn handle_event(&mut self, _runtime: &mut Runtime, _event: &Event) -> ScreenTransition {
///         ScreenTransition::Pop
///     }
///
///     fn update(&mut self, _runtime: &mut Runtime) {
///         self.ticks += 1;
///     }
///
///     fn draw(&self, _frame: &mut Frame) {}
/// }
/// ```
pub trait Screen: fmt::Debug {
    fn on_active(&mut self, runtime: &mut Runtime);

    fn on_close(&mut self, runtime: &mut Runtime);

    /// Handles a terminal event and tells the stack what to do next.
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition;

    /// Called on every tick.
    fn update(&mut self, runtime: &mut Runtime);

    fn draw(&self, frame: &mut Frame);
}

/// What the [`ScreenStack`] does after a screen handled an event.
#[derive(Debug, derive_more::IsVariant)]
pub enum ScreenTransition {
    Stay,
    /// Shows a new screen above the current one, which is kept underneath.
    Push(Box<dyn Screen>),
    /// Closes the current screen and reactivates the one below, if any.
    Pop,
    /// Closes every screen, top first, and ends the application.
    Exit,
}

/// A stack of screens driven as one [`App`].
///
/// The application exits once [`ScreenTransition::Exit`] is returned or the last
/// screen is popped.
#[derive(Debug)]
pub struct ScreenStack<'a> {
    screens: Vec<Box<dyn Screen + 'a>>,
    should_exit: bool,
}

impl<'a> ScreenStack<'a> {
    #[must_use]
    pub fn new(initial: Box<dyn Screen + 'a>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    fn apply_transition(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                log::debug!("push screen {screen:?}");
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                if let Some(mut screen) = self.screens.pop() {
                    log::debug!("pop screen {screen:?}");
                    screen.on_close(runtime);
                }
                if let Some(screen) = self.screens.last_mut() {
                    screen.on_active(runtime);
                }
            }
            ScreenTransition::Exit => {
                log::debug!("closing {} screen(s)", self.screens.len());
                while let Some(mut screen) = self.screens.pop() {
                    screen.on_close(runtime);
                }
                self.should_exit = true;
            }
        }
    }
}

impl App for ScreenStack<'_> {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(screen) = self.screens.last_mut() {
            let transition = screen.handle_event(runtime, &event);
            self.apply_transition(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(screen) = self.screens.last() {
            screen.draw(frame);
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        if let Some(screen) = self.screens.last_mut() {
            screen.update(runtime);
        }
    }
}
