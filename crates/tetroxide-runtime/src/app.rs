use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Something [`Runtime::run`] can drive.
pub trait App {
    /// Called once before the first event, typically to set the tick rate.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles a key press, resize or other terminal event.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by one tick.
    fn update(&mut self, runtime: &mut Runtime);
}
