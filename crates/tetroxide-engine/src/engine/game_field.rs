use crate::{
    PieceCollisionError,
    core::{
        board::Board,
        piece::{Piece, PieceKind, PiecePosition, PieceShape},
    },
};

use super::piece_generator::{PieceGenerator, PieceSeed};

/// Board, falling piece, and upcoming piece, with the placement rules between them.
///
/// A field starts without a falling piece; [`spawn_piece`](Self::spawn_piece) brings in
/// the first one. After a failed spawn there is no falling piece until the next
/// successful spawn.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Option<Piece>,
    generator: PieceGenerator,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_board(Board::EMPTY, seed)
    }

    /// Creates a field over an existing board, e.g. a partly filled one.
    #[must_use]
    pub fn with_board(board: Board, seed: PieceSeed) -> Self {
        Self {
            board,
            falling_piece: None,
            generator: PieceGenerator::with_seed(seed),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    /// Returns the kind that the next spawn will bring in.
    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.generator.peek_next()
    }

    #[must_use]
    pub fn can_place(&self, shape: &PieceShape, anchor: PiecePosition) -> bool {
        self.board.can_place(shape, anchor)
    }

    /// Replaces the falling piece if `piece` can be placed on the board.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !self.board.can_place_piece(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = Some(piece);
        Ok(())
    }

    /// Promotes the upcoming kind to the falling piece at the spawn position.
    ///
    /// If the spawned piece does not fit, the board is left as it is and the field is
    /// left without a falling piece.
    pub fn spawn_piece(&mut self) -> Result<(), PieceCollisionError> {
        let piece = Piece::new(self.generator.pop_next());
        self.falling_piece = None;
        self.set_falling_piece(piece)
    }

    /// Moves the falling piece by `(d_row, d_col)` if the destination is free.
    pub fn try_move(&mut self, d_row: i16, d_col: i16) -> Result<(), PieceCollisionError> {
        let piece = self.falling_piece.ok_or(PieceCollisionError)?;
        self.set_falling_piece(piece.moved(d_row, d_col))
    }

    /// Rotates the falling piece in place if the rotated shape fits at the same anchor.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.falling_piece.ok_or(PieceCollisionError)?;
        self.set_falling_piece(piece.rotated())
    }

    /// Locks the falling piece into the board, clears full rows, and spawns the next piece.
    ///
    /// Returns the number of cleared rows together with the outcome of the spawn.
    /// Without a falling piece nothing is locked and the spawn is not attempted.
    pub fn lock_piece(&mut self) -> (usize, Result<(), PieceCollisionError>) {
        let Some(piece) = self.falling_piece.take() else {
            return (0, Err(PieceCollisionError));
        };
        self.board.fill_piece(&piece);
        let cleared_lines = self.board.clear_lines();
        (cleared_lines, self.spawn_piece())
    }
}
