use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetroxide_engine::{Block, PieceKind};

use crate::view::widgets::BlockDisplay;

/// A single piece in its spawn orientation, centred in a 4 × 4 box.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
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
        4 * BlockDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        4 * BlockDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        BlockDisplay::from_block(Block::Empty, false).render(area, buf);
        let Some(piece) = self.piece else {
            return;
        };

        let shape = piece.shape();
        let (rows, cols) = shape.size();
        let rows = u16::try_from(rows).unwrap_or(0);
        let cols = u16::try_from(cols).unwrap_or(0);
        let piece_area = area.centered(
            Constraint::Length(cols * BlockDisplay::WIDTH),
            Constraint::Length(rows * BlockDisplay::HEIGHT),
        );

        let horizontal = Layout::horizontal((0..cols).map(|_| Constraint::Length(BlockDisplay::WIDTH)))
            .flex(Flex::Center);
        let vertical = Layout::vertical((0..rows).map(|_| Constraint::Length(BlockDisplay::HEIGHT)));
        let occupied = BlockDisplay::from_block(Block::Piece(piece), false);

        for (row, grid_row) in piece_area.layout_vec(&vertical).into_iter().enumerate() {
            for (col, grid_cell) in grid_row.layout_vec(&horizontal).into_iter().enumerate() {
                if shape.is_occupied((row, col)) {
                    occupied.render(grid_cell, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::widgets::color;

    fn filled_cells(buf: &Buffer) -> usize {
        buf.content().iter().filter(|cell| cell.bg != color::BLACK).count()
    }

    #[test]
    fn test_renders_four_blocks() {
        for kind in PieceKind::ALL {
            let display = PieceDisplay::new().piece(kind);
            let area = Rect::new(0, 0, display.width(), display.height());
            let mut buf = Buffer::empty(area);
            display.render(area, &mut buf);
            assert_eq!(
                filled_cells(&buf),
                4 * usize::from(BlockDisplay::WIDTH),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_empty_panel() {
        let display = PieceDisplay::new();
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        assert_eq!(filled_cells(&buf), 0);
    }
}
