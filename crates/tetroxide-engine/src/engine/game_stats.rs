/// Returns the points awarded for clearing `cleared_lines` rows with a single lock.
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 700 points
/// - 4 lines: 1500 points
/// - any other count: 100 points per line
///
/// A lock can clear at most 4 rows, so the last arm never triggers in play, but the
/// function is defined for every count.
#[must_use]
pub const fn line_clear_points(cleared_lines: usize) -> usize {
    match cleared_lines {
        0 => 0,
        1 => 100,
        2 => 300,
        3 => 700,
        4 => 1500,
        n => n.saturating_mul(100),
    }
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// # Example
///
/// ```
/// use tetroxide_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 1500);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines they cleared.
    ///
    /// `[0]` counts locks that cleared nothing, `[1]` singles, up to `[4]` for four rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Adds the points for `cleared_lines` to the score. Does nothing for zero.
    pub const fn update_score(&mut self, cleared_lines: usize) {
        if cleared_lines == 0 {
            return;
        }
        self.score = self.score.saturating_add(line_clear_points(cleared_lines));
    }

    /// Records one locked piece that cleared `cleared_lines` rows.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.update_score(cleared_lines);
    }
}
