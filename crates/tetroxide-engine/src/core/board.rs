use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceKind, PiecePosition, PieceShape};

/// Number of rows on the board.
pub const ROWS: usize = 20;
/// Number of columns on the board.
pub const COLS: usize = 10;

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked cell, tagged with the kind of the piece that left it (its colour).
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }
}

/// A single row of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRow {
    cells: [Block; COLS],
}

impl BoardRow {
    const EMPTY: Self = Self {
        cells: [Block::Empty; COLS],
    };

    #[must_use]
    pub fn cells(&self) -> &[Block; COLS] {
        &self.cells
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }
}

/// The fixed 20×10 grid of locked blocks.
///
/// The board never changes size. It is only mutated when a piece is locked
/// ([`fill_piece`](Self::fill_piece)) and when full rows are removed
/// ([`clear_lines`](Self::clear_lines)). Every lookup goes through a bounds check,
/// so coordinates outside the grid read as "not placeable" rather than panicking.
///
/// # Example
///
/// ```
/// use tetroxide_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::EMPTY;
/// let piece = Piece::new(PieceKind::O);
/// assert!(board.can_place_piece(&piece));
///
/// board.fill_piece(&piece);
/// assert!(!board.can_place_piece(&piece));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; ROWS],
    };

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; COLS]> {
        self.rows.iter().map(BoardRow::cells)
    }

    /// Returns the block at `(row, col)`, or `None` if the position is off the board.
    #[must_use]
    pub fn get(&self, row: i16, col: i16) -> Option<Block> {
        let (row, col) = cell_index(row, col)?;
        Some(self.rows[row].cells[col])
    }

    /// Overwrites the block at `(row, col)`.
    ///
    /// Returns `false`, leaving the board untouched, if the position is off the board.
    pub fn set(&mut self, row: i16, col: i16, block: Block) -> bool {
        let Some((row, col)) = cell_index(row, col) else {
            return false;
        };
        self.rows[row].cells[col] = block;
        true
    }

    /// Returns whether `shape` anchored at `anchor` lies fully on the board over empty cells.
    ///
    /// This is the only placement check in the engine; spawning, moving and rotating
    /// all go through it.
    #[must_use]
    pub fn can_place(&self, shape: &PieceShape, anchor: PiecePosition) -> bool {
        shape.cells().all(|(d_row, d_col)| {
            self.get(anchor.row() + d_row, anchor.col() + d_col)
                .is_some_and(Block::is_empty)
        })
    }

    #[must_use]
    pub fn can_place_piece(&self, piece: &Piece) -> bool {
        self.can_place(&piece.shape(), piece.position())
    }

    /// Writes the piece's kind into every cell it occupies.
    ///
    /// This is called when a piece is locked into position. Cells off the board are skipped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        for (row, col) in piece.occupied_positions() {
            self.set(row, col, Block::Piece(piece.kind()));
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Remaining rows keep their relative order and settle at the bottom; the same
    /// number of empty rows is inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for row in (0..ROWS).rev() {
            if self.rows[row].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[row + count] = self.rows[row];
            }
        }
        self.rows[..count].fill(BoardRow::EMPTY);
        count
    }
}

fn cell_index(row: i16, col: i16) -> Option<(usize, usize)> {
    let row = usize::try_from(row).ok().filter(|row| *row < ROWS)?;
    let col = usize::try_from(col).ok().filter(|col| *col < COLS)?;
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, row: usize, kind: PieceKind) {
        let row = i16::try_from(row).unwrap();
        for col in 0..10 {
            board.set(row, col, Block::Piece(kind));
        }
    }

    fn row_blocks(board: &Board, row: usize) -> [Block; COLS] {
        *board.rows().nth(row).unwrap()
    }

    #[test]
    fn test_initial_board_is_empty() {
        let board = Board::EMPTY;
        assert_eq!(board.rows().count(), ROWS);
        for row in board.rows() {
            assert!(row.iter().all(|b| b.is_empty()));
        }
    }

    #[test]
    fn test_get_and_set_respect_bounds() {
        let mut board = Board::EMPTY;
        assert!(board.set(0, 0, Block::Piece(PieceKind::I)));
        assert_eq!(board.get(0, 0), Some(Block::Piece(PieceKind::I)));

        assert!(!board.set(-1, 0, Block::Piece(PieceKind::I)));
        assert!(!board.set(0, 10, Block::Piece(PieceKind::I)));
        assert_eq!(board.get(20, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board, {
            let mut expected = Board::EMPTY;
            expected.set(0, 0, Block::Piece(PieceKind::I));
            expected
        });
    }

    #[test]
    fn test_can_place_rejects_out_of_bounds() {
        let board = Board::EMPTY;
        let shape = PieceKind::O.shape();

        assert!(board.can_place(&shape, PiecePosition::new(0, 0)));
        assert!(board.can_place(&shape, PiecePosition::new(18, 8)));

        assert!(!board.can_place(&shape, PiecePosition::new(-1, 0)));
        assert!(!board.can_place(&shape, PiecePosition::new(19, 0)));
        assert!(!board.can_place(&shape, PiecePosition::new(0, -1)));
        assert!(!board.can_place(&shape, PiecePosition::new(0, 9)));
    }

    #[test]
    fn test_can_place_rejects_occupied_cells() {
        let mut board = Board::EMPTY;
        let shape = PieceKind::T.shape();
        let anchor = PiecePosition::new(5, 5);
        assert!(board.can_place(&shape, anchor));

        for (d_row, d_col) in shape.cells() {
            let mut blocked = board.clone();
            blocked.set(5 + d_row, 5 + d_col, Block::Piece(PieceKind::Z));
            assert!(!blocked.can_place(&shape, anchor));
        }

        // A neighbouring block does not interfere.
        board.set(5, 5, Block::Piece(PieceKind::Z));
        assert!(board.can_place(&shape, anchor));
    }

    #[test]
    fn test_can_place_matches_cellwise_check_everywhere() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 15, PieceKind::J);
        board.set(15, 4, Block::Empty);
        board.set(7, 2, Block::Piece(PieceKind::L));

        for kind in PieceKind::ALL {
            let mut shape = kind.shape();
            for _ in 0..4 {
                for row in -4..24 {
                    for col in -4..14 {
                        let anchor = PiecePosition::new(row, col);
                        let expected = shape.cells().all(|(d_row, d_col)| {
                            let (r, c) = (row + d_row, col + d_col);
                            (0..20).contains(&r)
                                && (0..10).contains(&c)
                                && board.get(r, c) == Some(Block::Empty)
                        });
                        assert_eq!(board.can_place(&shape, anchor), expected);
                    }
                }
                shape = shape.rotated();
            }
        }
    }

    #[test]
    fn test_fill_piece_writes_kind() {
        let mut board = Board::EMPTY;
        let piece = Piece::with_position(PieceKind::S, PiecePosition::new(10, 2));
        board.fill_piece(&piece);

        for (row, col) in piece.occupied_positions() {
            assert_eq!(board.get(row, col), Some(Block::Piece(PieceKind::S)));
        }
        let filled = board
            .rows()
            .flatten()
            .filter(|block| !block.is_empty())
            .count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn test_clear_lines_without_full_rows() {
        let mut board = Board::EMPTY;
        for col in 0..9 {
            board.set(19, col, Block::Piece(PieceKind::I));
        }
        board.set(10, 3, Block::Piece(PieceKind::T));
        let before = board.clone();

        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_lines_removes_k_rows_and_keeps_order() {
        for k in 1..=4 {
            let mut board = Board::EMPTY;
            // Marker rows with a single block in a distinct column.
            board.set(12, 0, Block::Piece(PieceKind::L));
            board.set(14, 1, Block::Piece(PieceKind::J));
            for i in 0..k {
                fill_row(&mut board, ROWS - 1 - i, PieceKind::I);
            }

            assert_eq!(board.clear_lines(), k);

            for row in 0..k {
                assert!(row_blocks(&board, row).iter().all(|b| b.is_empty()));
            }
            assert!(row_blocks(&board, 19).iter().all(|b| b.is_empty()));
            assert_eq!(
                board.get((12 + k).try_into().unwrap(), 0),
                Some(Block::Piece(PieceKind::L))
            );
            assert_eq!(
                board.get((14 + k).try_into().unwrap(), 1),
                Some(Block::Piece(PieceKind::J))
            );
            let filled = board.rows().flatten().filter(|b| !b.is_empty()).count();
            assert_eq!(filled, 2);
        }
    }

    #[test]
    fn test_clear_lines_non_adjacent_rows() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 19, PieceKind::I);
        board.set(18, 5, Block::Piece(PieceKind::T));
        fill_row(&mut board, 17, PieceKind::O);
        board.set(16, 6, Block::Piece(PieceKind::S));

        assert_eq!(board.clear_lines(), 2);

        assert_eq!(board.get(19, 5), Some(Block::Piece(PieceKind::T)));
        assert_eq!(board.get(18, 6), Some(Block::Piece(PieceKind::S)));
        for row in 0..18 {
            assert!(row_blocks(&board, row).iter().all(|b| b.is_empty()));
        }
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut board = Board::EMPTY;
        for row in 0..ROWS {
            fill_row(&mut board, row, PieceKind::Z);
        }
        assert_eq!(board.clear_lines(), ROWS);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_block_serialization() {
        let json = serde_json::to_string(&Block::Piece(PieceKind::T)).unwrap();
        assert_eq!(json, r#"{"Piece":"T"}"#);
        assert_eq!(serde_json::to_string(&Block::Empty).unwrap(), "\"Empty\"");
    }
}
