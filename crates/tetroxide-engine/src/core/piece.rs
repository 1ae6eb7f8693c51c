use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::board::COLS;

/// A falling piece: its kind, its current shape, and the anchor the shape hangs off.
///
/// Pieces are values. Moving or rotating returns a new `Piece`; whether the result may
/// be committed is decided by [`Board::can_place_piece`](super::board::Board::can_place_piece).
///
/// # Coordinate System
///
/// - `(0, 0)` is the top-left cell of the board
/// - Rows increase downward, columns increase rightward
/// - Absolute cell = anchor + offset, so cells may lie outside the board
///
/// # Example
///
/// ```
/// use tetroxide_engine::{Piece, PieceKind, PiecePosition};
///
/// let piece = Piece::new(PieceKind::O);
/// assert_eq!(piece.position(), PiecePosition::new(0, 3));
///
/// let cells: Vec<_> = piece.down().occupied_positions().collect();
/// assert_eq!(cells, [(1, 3), (2, 3), (1, 4), (2, 4)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    shape: PieceShape,
    kind: PieceKind,
}

impl Piece {
    /// Creates a piece of the given kind at the spawn position with its template shape.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self::with_position(kind, PiecePosition::SPAWN_POSITION)
    }

    #[must_use]
    pub fn with_position(kind: PieceKind, position: PiecePosition) -> Self {
        Self {
            position,
            shape: kind.shape(),
            kind,
        }
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn shape(&self) -> PieceShape {
        self.shape
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the absolute `(row, col)` of each of the four cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .cells()
            .map(move |(d_row, d_col)| (self.position.row + d_row, self.position.col + d_col))
    }

    #[must_use]
    pub fn moved(&self, d_row: i16, d_col: i16) -> Self {
        Self {
            position: self.position.offset(d_row, d_col),
            ..*self
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.moved(0, -1)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.moved(0, 1)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.moved(1, 0)
    }

    /// Returns this piece with its shape turned a quarter around the anchor.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }
}

/// Anchor of a piece on the board.
///
/// Signed so that candidate positions computed during movement can step past the
/// board edges; the board rejects them instead of the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePosition {
    row: i16,
    col: i16,
}

impl PiecePosition {
    /// Top-center of the board: row 0, column `COLS / 2 - 2`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN_POSITION: Self = Self::new(0, (COLS / 2) as i16 - 2);

    #[must_use]
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> i16 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> i16 {
        self.col
    }

    #[must_use]
    pub const fn offset(self, d_row: i16, d_col: i16) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }
}

/// Four `(row, col)` offsets relative to a piece's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape([(i16, i16); 4]);

impl PieceShape {
    #[must_use]
    pub const fn new(cells: [(i16, i16); 4]) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.0.iter().copied()
    }

    /// Turns the shape a quarter around the anchor, mapping each `(row, col)` to `(col, -row)`.
    ///
    /// The pivot is the anchor itself, not the centre of the shape, so most shapes
    /// drift when rotated. Four rotations give back the starting offsets.
    ///
    /// ```
    /// use tetroxide_engine::PieceKind;
    ///
    /// let shape = PieceKind::T.shape();
    /// let turned = shape.rotated().rotated().rotated().rotated();
    /// assert!(turned.same_cells(&shape));
    /// ```
    #[must_use]
    pub fn rotated(self) -> Self {
        Self(self.0.map(|(row, col)| (col, -row)))
    }

    /// Returns whether both shapes cover the same offsets, regardless of their order.
    #[must_use]
    pub fn same_cells(&self, other: &Self) -> bool {
        let mut lhs = self.0;
        let mut rhs = other.0;
        lhs.sort_unstable();
        rhs.sort_unstable();
        lhs == rhs
    }

    /// Returns `(rows, cols)` of the smallest box enclosing the shape.
    #[must_use]
    pub fn size(&self) -> (usize, usize) {
        let (min_row, min_col) = self.min_offset();
        let (max_row, max_col) = self
            .cells()
            .fold((i16::MIN, i16::MIN), |(r, c), (row, col)| {
                (r.max(row), c.max(col))
            });
        (
            usize::from(max_row.abs_diff(min_row)) + 1,
            usize::from(max_col.abs_diff(min_col)) + 1,
        )
    }

    /// Returns whether `(row, col)`, counted from the top-left of the enclosing box, is filled.
    #[must_use]
    pub fn is_occupied(&self, (row, col): (usize, usize)) -> bool {
        let (min_row, min_col) = self.min_offset();
        self.cells().any(|(r, c)| {
            usize::from(r.abs_diff(min_row)) == row && usize::from(c.abs_diff(min_col)) == col
        })
    }

    fn min_offset(&self) -> (i16, i16) {
        self.cells()
            .fold((i16::MAX, i16::MAX), |(r, c), (row, col)| {
                (r.min(row), c.min(col))
            })
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// Z-piece.
    Z = 5,
    /// T-piece.
    T = 6,
}

/// Each kind is equally likely, independently of earlier draws.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Returns the template shape a freshly spawned piece of this kind takes.
    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetroxide_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = [
    // I-piece
    PieceShape::new([(0, 1), (1, 1), (2, 1), (3, 1)]),
    // J-piece
    PieceShape::new([(0, 0), (0, 1), (1, 1), (2, 1)]),
    // L-piece
    PieceShape::new([(0, 1), (1, 1), (2, 1), (2, 0)]),
    // O-piece
    PieceShape::new([(0, 0), (1, 0), (0, 1), (1, 1)]),
    // S-piece
    PieceShape::new([(1, 0), (2, 0), (0, 1), (1, 1)]),
    // Z-piece
    PieceShape::new([(0, 0), (1, 0), (1, 1), (2, 1)]),
    // T-piece
    PieceShape::new([(1, 0), (0, 1), (1, 1), (2, 1)]),
];

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_spawn_position_is_top_center() {
        assert_eq!(PiecePosition::SPAWN_POSITION, PiecePosition::new(0, 3));
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            assert_eq!(piece.position(), PiecePosition::SPAWN_POSITION);
            assert_eq!(piece.shape(), kind.shape());
        }
    }

    #[test]
    fn test_o_piece_occupied_positions() {
        let piece = Piece::new(PieceKind::O);
        let mut cells: Vec<_> = piece.occupied_positions().collect();
        cells.sort_unstable();
        assert_eq!(cells, vec![(0, 3), (0, 4), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_moves_shift_anchor_only() {
        let piece = Piece::new(PieceKind::T);
        assert_eq!(piece.left().position(), PiecePosition::new(0, 2));
        assert_eq!(piece.right().position(), PiecePosition::new(0, 4));
        assert_eq!(piece.down().position(), PiecePosition::new(1, 3));
        assert_eq!(piece.left().right().down().shape(), piece.shape());
    }

    #[test]
    fn test_rotation_maps_offsets() {
        let shape = PieceShape::new([(0, 1), (1, 1), (2, 1), (3, 1)]);
        assert_eq!(
            shape.rotated(),
            PieceShape::new([(1, 0), (1, -1), (1, -2), (1, -3)])
        );
    }

    #[test]
    fn test_four_rotations_restore_every_shape() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let mut rotated = shape;
            for i in 1..4 {
                rotated = rotated.rotated();
                // The pivot is the anchor, so even the O-piece moves.
                assert!(
                    !rotated.same_cells(&shape),
                    "{kind:?} should change after {i} rotation(s)"
                );
            }
            assert!(rotated.rotated().same_cells(&shape), "{kind:?}");
        }
    }

    #[test]
    fn test_rotated_piece_keeps_anchor() {
        let piece = Piece::with_position(PieceKind::L, PiecePosition::new(5, 5));
        let rotated = piece.rotated();
        assert_eq!(rotated.position(), piece.position());
        assert_eq!(rotated.kind(), PieceKind::L);
        assert_eq!(rotated.shape(), PieceKind::L.shape().rotated());
    }

    #[test]
    fn test_shape_size_and_occupancy() {
        assert_eq!(PieceKind::I.shape().size(), (4, 1));
        assert_eq!(PieceKind::O.shape().size(), (2, 2));
        assert_eq!(PieceKind::T.shape().size(), (3, 2));
        assert_eq!(PieceKind::I.shape().rotated().size(), (1, 4));

        let t = PieceKind::T.shape();
        assert!(t.is_occupied((0, 1)));
        assert!(t.is_occupied((1, 0)));
        assert!(t.is_occupied((1, 1)));
        assert!(t.is_occupied((2, 1)));
        assert!(!t.is_occupied((0, 0)));
        assert!(!t.is_occupied((2, 0)));
    }

    #[test]
    fn test_uniform_distribution_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0_usize; PieceKind::LEN];
        for _ in 0..7000 {
            let kind: PieceKind = rng.random();
            counts[kind as usize] += 1;
        }
        for (kind, count) in PieceKind::ALL.iter().zip(counts) {
            assert!((700..1300).contains(&count), "{kind:?} drawn {count} times");
        }
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::from_char('i'), None);
    }

    #[test]
    fn test_piece_kind_serialization() {
        assert_eq!(serde_json::to_string(&PieceKind::S).unwrap(), "\"S\"");
        let kind: PieceKind = serde_json::from_str("\"Z\"").unwrap();
        assert_eq!(kind, PieceKind::Z);
        assert!(serde_json::from_str::<PieceKind>("\"X\"").is_err());
    }
}
