use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetroxide_engine::{Board, COLS, Piece, ROWS};

use crate::view::widgets::BlockDisplay;

/// The board with the falling piece drawn over the locked blocks.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            falling_piece: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: Option<&Piece>) -> Self {
        Self {
            falling_piece: piece.copied(),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        grid_len(COLS) * BlockDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        grid_len(ROWS) * BlockDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

fn grid_len(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut board = self.board.clone();
        if let Some(piece) = &self.falling_piece {
            board.fill_piece(piece);
        }

        let horizontal = Layout::horizontal([Constraint::Length(BlockDisplay::WIDTH); COLS])
            .flex(Flex::Center);
        let vertical = Layout::vertical([Constraint::Length(BlockDisplay::HEIGHT); ROWS]);
        let grid_rows = area
            .layout::<ROWS>(&vertical)
            .into_iter()
            .map(|row| row.layout::<COLS>(&horizontal));

        for (grid_row, row) in iter::zip(grid_rows, board.rows()) {
            for (grid_cell, block) in iter::zip(grid_row, row) {
                BlockDisplay::from_block(*block, true).render(grid_cell, buf);
            }
        }
    }
}
