use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Color,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tetroxide_engine::{GameSession, SessionState};

use crate::view::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// The whole playfield: stats on the left, the board, and the next piece on the right.
///
/// Once the game is over a `GAME OVER` banner is drawn across the board.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self { session }
    }

    fn border_color(&self) -> Color {
        match self.session.session_state() {
            SessionState::Playing => color::WHITE,
            SessionState::GameOver => color::RED,
        }
    }

    fn panel(&self, title: &'static str) -> Block<'static> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::horizontal(1))
            .border_style(self.border_color())
            .style(style::DEFAULT)
    }

    fn board(&self) -> BoardDisplay<'a> {
        BoardDisplay::new(self.session.board())
            .falling_piece(self.session.falling_piece())
            .block(
                Block::bordered()
                    .border_style(self.border_color())
                    .style(style::DEFAULT),
            )
    }

    pub fn height(&self) -> u16 {
        self.board().height()
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.board();
        let next_panel = PieceDisplay::new()
            .piece(self.session.next_piece())
            .block(self.panel("NEXT"));
        let stats_panel = SessionStatsDisplay::new(self.session).block(self.panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats_panel.width()),
            Constraint::Length(board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats_panel.height())]).areas(left_column);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        stats_panel.render(stats_area, buf);
        board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if self.session.session_state().is_game_over() {
            let text = Text::from(vec![
                Line::from("GAME OVER"),
                Line::from(format!("SCORE {}", self.session.score())),
            ])
            .style(style::GAME_OVER)
            .centered();
            let popup = board_area.centered(Constraint::Length(board.width()), Constraint::Length(4));
            let banner = Block::new().style(style::GAME_OVER);
            let inner = banner.inner(popup);
            Clear.render(popup, buf);
            banner.render(popup, buf);
            text.render(inner.centered_vertically(Constraint::Length(2)), buf);
        }
    }
}
