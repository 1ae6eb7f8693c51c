use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tetroxide_engine::{Direction, DropSpeed, GameSession, PieceSeed, SessionState};
use tetroxide_runtime::{RenderMode, Runtime, Screen, ScreenTransition};

use crate::view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay};

const FPS: u64 = 60;

const PLAYING_KEYS: &[KeyBinding<'static>] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Q"], "Title"),
];

const GAME_OVER_KEYS: &[KeyBinding<'static>] = &[
    (&["R"], "Play Again"),
    (&["T", "Esc", "Q"], "Title"),
];

/// Maps a key to the engine input it stands for, if any.
fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Down => Some(Direction::SoftDrop),
        KeyCode::Up => Some(Direction::Rotate),
        _ => None,
    }
}

#[derive(Debug)]
pub struct GameScreen {
    session: GameSession,
}

impl GameScreen {
    pub fn new(speed: DropSpeed) -> Self {
        Self {
            session: GameSession::new(FPS, speed),
        }
    }

    pub fn with_seed(speed: DropSpeed, seed: PieceSeed) -> Self {
        Self {
            session: GameSession::with_seed(FPS, speed, seed),
        }
    }
}

impl Screen for GameScreen {
    #[expect(clippy::cast_precision_loss)]
    fn on_active(&mut self, runtime: &mut Runtime) {
        log::info!("game started with seed {}", self.session.seed());
        runtime.set_tick_rate(Some(FPS as f64));
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS as f64));
    }

    fn on_close(&mut self, _runtime: &mut Runtime) {
        log::info!("left game with score {}", self.session.score());
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Some(key) = event.as_key_press_event() else {
            return ScreenTransition::Stay;
        };
        match self.session.session_state() {
            SessionState::Playing => match key.code {
                KeyCode::Char('q') => return ScreenTransition::Pop,
                code => {
                    if let Some(direction) = direction_for(code) {
                        self.session.apply_input(direction);
                    }
                }
            },
            SessionState::GameOver => match key.code {
                KeyCode::Char('r') => self.session.restart(),
                KeyCode::Char('t' | 'q') | KeyCode::Esc => return ScreenTransition::Pop,
                _ => {}
            },
        }
        ScreenTransition::Stay
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.session.increment_frame();
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = match self.session.session_state() {
            SessionState::Playing => PLAYING_KEYS,
            SessionState::GameOver => GAME_OVER_KEYS,
        };
        let session_display = SessionDisplay::new(&self.session);

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(session_display.height()), Constraint::Length(1)])
                .areas(frame.area());
        frame.render_widget(&session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use tetroxide_engine::{Block, Board, Piece, PieceKind};

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([0x42; 16]);

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn finish_game(screen: &mut GameScreen, runtime: &mut Runtime) {
        // Piling pieces straight down fills the spawn area quickly.
        for _ in 0..1000 {
            if screen.session.session_state().is_game_over() {
                return;
            }
            screen.handle_event(runtime, &press(KeyCode::Down));
        }
        panic!("game did not end");
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(direction_for(KeyCode::Left), Some(Direction::Left));
        assert_eq!(direction_for(KeyCode::Right), Some(Direction::Right));
        assert_eq!(direction_for(KeyCode::Down), Some(Direction::SoftDrop));
        assert_eq!(direction_for(KeyCode::Up), Some(Direction::Rotate));
        assert_eq!(direction_for(KeyCode::Char(' ')), None);
        assert_eq!(direction_for(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_arrow_keys_move_piece() {
        let mut screen = GameScreen::with_seed(DropSpeed::DEFAULT, SEED);
        let mut runtime = Runtime::new();
        let start = *screen.session.falling_piece().unwrap();

        screen.handle_event(&mut runtime, &press(KeyCode::Left));
        assert_eq!(screen.session.falling_piece(), Some(&start.left()));

        screen.handle_event(&mut runtime, &press(KeyCode::Right));
        screen.handle_event(&mut runtime, &press(KeyCode::Down));
        assert_eq!(screen.session.falling_piece(), Some(&start.down()));
    }

    #[test]
    fn test_unknown_keys_and_releases_are_ignored() {
        let mut screen = GameScreen::with_seed(DropSpeed::DEFAULT, SEED);
        let mut runtime = Runtime::new();
        let start = *screen.session.falling_piece().unwrap();

        let release = Event::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        for event in [press(KeyCode::Char('x')), press(KeyCode::Char('r')), release] {
            assert!(screen.handle_event(&mut runtime, &event).is_stay());
        }
        assert_eq!(screen.session.falling_piece(), Some(&start));
        assert_eq!(screen.session.board(), &Board::EMPTY);
    }

    #[test]
    fn test_quit_returns_to_title() {
        let mut screen = GameScreen::with_seed(DropSpeed::DEFAULT, SEED);
        let mut runtime = Runtime::new();
        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Char('q'))).is_pop());
    }

    #[test]
    fn test_game_over_keys() {
        let mut screen = GameScreen::with_seed(DropSpeed::DEFAULT, SEED);
        let mut runtime = Runtime::new();
        finish_game(&mut screen, &mut runtime);

        let board = screen.session.board().clone();
        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Left)).is_stay());
        assert_eq!(screen.session.board(), &board);

        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Esc)).is_pop());
        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Char('t'))).is_pop());

        assert!(screen.handle_event(&mut runtime, &press(KeyCode::Char('r'))).is_stay());
        assert!(screen.session.session_state().is_playing());
        assert_eq!(screen.session.score(), 0);
        assert_eq!(screen.session.board(), &Board::EMPTY);
    }

    #[test]
    fn test_ticks_drive_session() {
        let mut screen = GameScreen::with_seed(DropSpeed::DEFAULT, SEED);
        let mut runtime = Runtime::new();
        screen.on_active(&mut runtime);
        assert!(runtime.tick_interval().is_some());

        let row = screen.session.falling_piece().unwrap().position().row();
        for _ in 0..FPS {
            screen.update(&mut runtime);
        }
        assert!(screen.session.falling_piece().unwrap().position().row() > row);
        assert_eq!(screen.session.total_frames(), FPS);
    }

    #[test]
    fn test_locked_blocks_keep_piece_colour() {
        let mut screen = GameScreen::with_seed(DropSpeed::DEFAULT, SEED);
        let mut runtime = Runtime::new();
        let kind: PieceKind = screen.session.falling_piece().map(Piece::kind).unwrap();

        while screen.session.stats().completed_pieces() == 0 {
            screen.handle_event(&mut runtime, &press(KeyCode::Down));
        }
        let locked: Vec<Block> = screen
            .session
            .board()
            .rows()
            .flatten()
            .copied()
            .filter(|block| !block.is_empty())
            .collect();
        assert_eq!(locked, vec![Block::Piece(kind); 4]);
    }
}
