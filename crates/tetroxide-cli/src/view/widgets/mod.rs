use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, piece_display::*,
    session_display::*, session_stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod piece_display;
mod session_display;
mod session_stats_display;

pub mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 165, 0);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const MAGENTA: Color = Color::Rgb(128, 0, 128);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(64, 64, 64);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn solid(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = solid(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);

    pub const I_BLOCK: Style = solid(color::CYAN);
    pub const J_BLOCK: Style = solid(color::BLUE);
    pub const L_BLOCK: Style = solid(color::ORANGE);
    pub const O_BLOCK: Style = solid(color::YELLOW);
    pub const S_BLOCK: Style = solid(color::GREEN);
    pub const T_BLOCK: Style = solid(color::MAGENTA);
    pub const Z_BLOCK: Style = solid(color::RED);

    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);
}

/// Rows taken up by the borders and padding of `block`.
fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let probe = Rect::new(0, 0, 100, 100);
    probe.height - block.map_or(probe, |block| block.inner(probe)).height
}

/// Columns taken up by the borders and padding of `block`.
fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let probe = Rect::new(0, 0, 100, 100);
    probe.width - block.map_or(probe, |block| block.inner(probe)).width
}
