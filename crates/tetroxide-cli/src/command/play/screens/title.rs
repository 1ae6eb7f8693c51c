use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Paragraph},
};
use tetroxide_engine::{DropSpeed, PieceSeed};
use tetroxide_runtime::{RenderMode, Runtime, Screen, ScreenTransition};

use crate::{
    command::play::screens::GameScreen,
    view::widgets::{KeyBinding, KeyBindingDisplay, color, style},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Start,
    Quit,
}

impl MenuItem {
    const ALL: [Self; 2] = [Self::Start, Self::Quit];

    fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "START",
            MenuItem::Quit => "QUIT",
        }
    }
}

const LOGO: &[&str] = &["T E T R O X I D E", "", "falling blocks in the terminal"];

const KEY_BINDINGS: &[KeyBinding<'static>] = &[
    (&["↑", "↓"], "Select"),
    (&["Enter"], "Confirm"),
    (&["S"], "Start"),
    (&["Q", "Esc"], "Quit"),
];

/// Start menu shown when the program launches and after leaving a game.
#[derive(Debug)]
pub struct TitleScreen {
    speed: DropSpeed,
    seed: Option<PieceSeed>,
    selected: usize,
}

impl TitleScreen {
    /// `seed` fixes the pieces of the first game started from this menu.
    pub fn new(speed: DropSpeed, seed: Option<PieceSeed>) -> Self {
        Self {
            speed,
            seed,
            selected: 0,
        }
    }

    fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    fn activate(&mut self, item: MenuItem) -> ScreenTransition {
        match item {
            MenuItem::Start => {
                let game = match self.seed.take() {
                    Some(seed) => GameScreen::with_seed(self.speed, seed),
                    None => GameScreen::new(self.speed),
                };
                ScreenTransition::Push(Box::new(game))
            }
            MenuItem::Quit => ScreenTransition::Exit,
        }
    }
}

impl Screen for TitleScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(None);
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Some(key) = event.as_key_press_event() else {
            return ScreenTransition::Stay;
        };
        let len = MenuItem::ALL.len();
        match key.code {
            KeyCode::Up => self.selected = (self.selected + len - 1) % len,
            KeyCode::Down | KeyCode::Tab => self.selected = (self.selected + 1) % len,
            KeyCode::Enter => return self.activate(self.selected_item()),
            KeyCode::Char('s') => return self.activate(MenuItem::Start),
            KeyCode::Char('q') | KeyCode::Esc => return self.activate(MenuItem::Quit),
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn update(&mut self, _runtime: &mut Runtime) {}

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(Block::new().style(style::DEFAULT), frame.area());

        let logo = Text::from_iter(LOGO.iter().copied())
            .style(Style::new().fg(color::CYAN).add_modifier(Modifier::BOLD))
            .centered();
        let menu = Text::from_iter(MenuItem::ALL.iter().map(|item| {
            if *item == self.selected_item() {
                Line::styled(
                    format!("> {} <", item.label()),
                    Style::new()
                        .fg(color::BLACK)
                        .bg(color::YELLOW)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::styled(item.label(), style::DEFAULT)
            }
        }))
        .centered();

        let [logo_area, menu_area, help_area] = Layout::vertical([
            Constraint::Length(logo.height().try_into().unwrap_or(u16::MAX)),
            Constraint::Length(menu.height().try_into().unwrap_or(u16::MAX)),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .spacing(2)
        .areas(frame.area());

        frame.render_widget(Paragraph::new(logo), logo_area);
        frame.render_widget(Paragraph::new(menu), menu_area);
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_starts_by_default() {
        let mut screen = TitleScreen::new(DropSpeed::DEFAULT, None);
        let mut runtime = Runtime::new();
        let transition = screen.handle_event(&mut runtime, &press(KeyCode::Enter));
        assert!(transition.is_push());
    }

    #[test]
    fn test_menu_selection_wraps() {
        let mut screen = TitleScreen::new(DropSpeed::DEFAULT, None);
        let mut runtime = Runtime::new();

        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Down)).is_stay());
        assert_eq!(screen.selected_item(), MenuItem::Quit);
        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Down)).is_stay());
        assert_eq!(screen.selected_item(), MenuItem::Start);
        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Up)).is_stay());
        assert_eq!(screen.selected_item(), MenuItem::Quit);

        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Enter)).is_exit());
    }

    #[test]
    fn test_shortcuts() {
        let mut screen = TitleScreen::new(DropSpeed::DEFAULT, None);
        let mut runtime = Runtime::new();
        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Char('s'))).is_push());
        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Char('q'))).is_exit());
        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Esc)).is_exit());
        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Char('x'))).is_stay());
    }

    #[test]
    fn test_seed_applies_to_first_game_only() {
        let seed = PieceSeed::from_bytes([1; 16]);
        let mut screen = TitleScreen::new(DropSpeed::DEFAULT, Some(seed));
        let mut runtime = Runtime::new();

        screen.handle_event(&mut runtime, &press(KeyCode::Char('s')));
        assert_eq!(screen.seed, None);
    }

    #[test]
    fn test_title_disables_ticks() {
        let mut screen = TitleScreen::new(DropSpeed::DEFAULT, None);
        let mut runtime = Runtime::new();
        runtime.set_tick_rate(Some(60.0));
        screen.on_active(&mut runtime);
        assert_eq!(runtime.tick_interval(), None);
    }
}
