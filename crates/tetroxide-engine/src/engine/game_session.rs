use std::time::Duration;

use crate::core::{
    board::Board,
    piece::{Piece, PieceKind},
};

use super::{
    drop_schedule::{DropSchedule, DropSpeed},
    game_field::GameField,
    game_stats::GameStats,
    piece_generator::PieceSeed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// A discrete player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    SoftDrop,
    Rotate,
}

/// One game from the first spawn to game over, advanced frame by frame.
///
/// A session owns everything it needs; several sessions can run side by side
/// without sharing any state. The front end drives it with
/// [`increment_frame`](Self::increment_frame) at `fps` frames per second and with
/// [`apply_input`](Self::apply_input) for key presses, and reads the board, pieces,
/// statistics and state back for drawing.
///
/// Once the session is [`SessionState::GameOver`], every operation except
/// [`restart`](Self::restart) leaves it untouched.
///
/// # Example
///
/// ```
/// use tetroxide_engine::{Direction, DropSpeed, GameSession};
///
/// let mut session = GameSession::new(60, DropSpeed::DEFAULT);
/// session.apply_input(Direction::Left);
/// session.apply_input(Direction::Rotate);
/// session.increment_frame();
/// assert!(session.session_state().is_playing());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    schedule: DropSchedule,
    session_state: SessionState,
    seed: PieceSeed,
    fps: u64,
    total_frames: u64,
}

impl GameSession {
    #[must_use]
    pub fn new(fps: u64, speed: DropSpeed) -> Self {
        Self::with_seed(fps, speed, rand::random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible piece sequence.
    #[must_use]
    pub fn with_seed(fps: u64, speed: DropSpeed, seed: PieceSeed) -> Self {
        Self::with_field(fps, speed, seed, GameField::with_seed(seed))
    }

    fn with_field(fps: u64, speed: DropSpeed, seed: PieceSeed, field: GameField) -> Self {
        let fps = fps.max(1);
        let mut this = Self {
            field,
            stats: GameStats::new(),
            schedule: DropSchedule::new(speed, fps),
            session_state: SessionState::Playing,
            seed,
            fps,
            total_frames: 0,
        };
        if this.field.spawn_piece().is_err() {
            this.game_over();
        }
        this
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    /// Returns the falling piece, or `None` once the game is over.
    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.field.next_piece()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Returns the current time between automatic drops.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.schedule.interval()
    }

    #[must_use]
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Returns the playing time, measured in frames.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.total_frames.saturating_mul(1000) / self.fps)
    }

    /// Advances the session by one frame, dropping the piece when its interval elapses.
    ///
    /// Neither frames, drops nor speed-ups are counted after game over.
    pub fn increment_frame(&mut self) {
        if self.session_state.is_game_over() {
            return;
        }
        self.total_frames += 1;
        if self.schedule.advance() {
            self.tick();
        }
    }

    /// Moves the falling piece one row down, locking it if it cannot descend.
    pub fn tick(&mut self) {
        if self.session_state.is_game_over() {
            return;
        }
        if self.field.try_move(1, 0).is_err() {
            self.lock_piece();
        }
    }

    /// Applies one player input.
    ///
    /// Blocked moves and rotations are silently dropped. A blocked soft drop locks the
    /// piece right away instead of waiting for the next tick.
    pub fn apply_input(&mut self, direction: Direction) {
        if self.session_state.is_game_over() {
            return;
        }
        match direction {
            Direction::Left => _ = self.field.try_move(0, -1),
            Direction::Right => _ = self.field.try_move(0, 1),
            Direction::SoftDrop => {
                if self.field.try_move(1, 0).is_err() {
                    self.lock_piece();
                }
            }
            Direction::Rotate => _ = self.field.try_rotate(),
        }
    }

    /// Locks the falling piece, clears lines, scores them, and spawns the next piece.
    ///
    /// The game ends here if the next piece does not fit.
    pub fn lock_piece(&mut self) {
        if self.session_state.is_game_over() {
            return;
        }
        if let Some(piece) = self.field.falling_piece() {
            log::debug!(
                "locking {} piece at ({}, {})",
                piece.kind().as_char(),
                piece.position().row(),
                piece.position().col()
            );
        }
        let (cleared_lines, spawned) = self.field.lock_piece();
        self.stats.complete_piece_drop(cleared_lines);
        if cleared_lines > 0 {
            log::info!(
                "cleared {cleared_lines} line(s), score {}",
                self.stats.score()
            );
        }
        if spawned.is_err() {
            self.game_over();
        }
    }

    /// Starts over with a fresh board, score, schedule and a new random seed.
    pub fn restart(&mut self) {
        self.restart_with_seed(rand::random());
    }

    pub fn restart_with_seed(&mut self, seed: PieceSeed) {
        *self = Self::with_seed(self.fps, self.schedule.speed(), seed);
        log::info!("session restarted with seed {seed}");
    }

    fn game_over(&mut self) {
        self.session_state = SessionState::GameOver;
        log::info!(
            "game over: score {}, {} pieces, {} lines",
            self.stats.score(),
            self.stats.completed_pieces(),
            self.stats.total_cleared_lines()
        );
    }
}
