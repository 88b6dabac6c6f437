use serde::Serialize;

use crate::{Board, Piece, PieceCollisionError, PieceKind};

use super::{GameEvent, GameStats, PieceGenerator, PieceSeed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// A running game: board, falling piece, preview, statistics and session state.
///
/// Every operation is synchronous and total. The caller decides the cadence of
/// gravity by calling [`Self::step`], and drains the [`GameEvent`]s produced along
/// the way with [`Self::take_events`].
///
/// When a downward move is blocked, the falling piece is locked, full rows are
/// cleared and scored, and the next piece spawns. If the spawned piece collides the
/// session becomes [`SessionState::GameOver`].
///
/// # Example
///
/// ```
/// use neuroblox_engine::GameState;
///
/// let mut game = GameState::with_seed("000102030405060708090a0b0c0d0e0f".parse().unwrap());
/// game.hard_drop();
///
/// let events = game.take_events();
/// assert!(events[0].is_piece_locked());
/// assert_eq!(game.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    falling_piece: Piece,
    next_piece: PieceKind,
    generator: PieceGenerator,
    stats: GameStats,
    session_state: SessionState,
    piece_serial: u64,
    events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game on the standard board with a random piece sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(Board::standard(), PieceGenerator::new())
    }

    /// Creates a game on the standard board with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_generator(Board::standard(), PieceGenerator::with_seed(seed))
    }

    /// Creates a game on a prepared board with a deterministic piece sequence.
    ///
    /// If the first piece already collides on `board`, the game starts in
    /// [`SessionState::GameOver`].
    #[must_use]
    pub fn with_board(board: Board, seed: PieceSeed) -> Self {
        Self::with_generator(board, PieceGenerator::with_seed(seed))
    }

    fn with_generator(board: Board, mut generator: PieceGenerator) -> Self {
        let falling_piece = Piece::spawn(generator.next_kind(), board.width());
        let next_piece = generator.next_kind();
        let session_state = if board.is_colliding(&falling_piece) {
            SessionState::GameOver
        } else {
            SessionState::Playing
        };
        Self {
            board,
            falling_piece,
            next_piece,
            generator,
            stats: GameStats::new(),
            session_state,
            piece_serial: 0,
            events: vec![],
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next_piece
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
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Identifies the current falling piece instance.
    ///
    /// Incremented on every spawn (and on [`Self::set_falling_piece`] with a
    /// different kind), so observers can tell two consecutive pieces of the same
    /// kind apart.
    #[must_use]
    pub fn piece_serial(&self) -> u64 {
        self.piece_serial
    }

    /// Events queued since the last [`Self::take_events`].
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drains the event queue.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replaces the falling piece.
    ///
    /// # Errors
    ///
    /// Returns `PieceCollisionError` if the piece collides with the board; the
    /// falling piece is left unchanged.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(&piece) {
            return Err(PieceCollisionError);
        }
        if piece.kind() != self.falling_piece.kind() {
            self.piece_serial += 1;
        }
        self.falling_piece = piece;
        Ok(())
    }

    /// Translates the falling piece by `(dx, dy)`.
    ///
    /// Returns whether the piece moved. A blocked move with `dy > 0` locks the
    /// piece, clears and scores full rows, and spawns the next piece. Nothing
    /// happens unless the session is playing.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if !self.session_state.is_playing() {
            return false;
        }
        let moved = self.falling_piece.translated(dx, dy);
        if !self.board.is_colliding(&moved) {
            self.falling_piece = moved;
            return true;
        }
        if dy > 0 {
            self.lock_falling_piece();
        }
        false
    }

    /// Rotates the falling piece 90° clockwise in place.
    ///
    /// There are no wall kicks: a colliding rotation is discarded and `false`
    /// is returned.
    pub fn rotate(&mut self) -> bool {
        if !self.session_state.is_playing() {
            return false;
        }
        let rotated = self.falling_piece.rotated_right();
        if self.board.is_colliding(&rotated) {
            return false;
        }
        self.falling_piece = rotated;
        true
    }

    /// Drops the falling piece until it locks.
    pub fn hard_drop(&mut self) {
        while self.move_piece(0, 1) {}
    }

    /// Advances gravity by one row.
    pub fn step(&mut self) -> bool {
        self.move_piece(0, 1)
    }

    /// Advances gravity by `dy` rows at once; same as `move_piece(0, dy)`.
    pub fn step_by(&mut self, dy: i32) -> bool {
        self.move_piece(0, dy)
    }

    /// Restarts the game on an empty board of the same size.
    ///
    /// The piece generator continues its stream; everything else is as freshly
    /// constructed. The event queue is cleared and a single [`GameEvent::Reset`]
    /// is queued.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.width(), self.board.height());
        self.falling_piece = Piece::spawn(self.generator.next_kind(), self.board.width());
        self.next_piece = self.generator.next_kind();
        self.stats = GameStats::new();
        self.session_state = SessionState::Playing;
        self.piece_serial += 1;
        self.events.clear();
        self.events.push(GameEvent::Reset);
        tracing::debug!("game reset");
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => return,
        };
        let paused = self.session_state.is_paused();
        self.events.push(GameEvent::PauseToggled { paused });
    }

    fn lock_falling_piece(&mut self) {
        let piece = self.falling_piece;
        self.board.fill_piece(&piece);
        self.events.push(GameEvent::PieceLocked { piece });
        tracing::trace!(?piece, "piece locked");

        let count = self.board.clear_lines();
        self.stats.complete_piece_drop(count);
        if count > 0 {
            let (score, level) = (self.stats.score(), self.stats.level());
            tracing::debug!(count, score, level, "lines cleared");
            self.events
                .push(GameEvent::LinesCleared { count, score, level });
        }

        self.spawn_next_piece();
    }

    fn spawn_next_piece(&mut self) {
        let piece = Piece::spawn(self.next_piece, self.board.width());
        self.falling_piece = piece;
        self.next_piece = self.generator.next_kind();
        self.piece_serial += 1;
        self.events.push(GameEvent::PieceSpawned {
            piece,
            next: self.next_piece,
        });

        if self.board.is_colliding(&piece) {
            self.session_state = SessionState::GameOver;
            let score = self.stats.score();
            tracing::debug!(score, "game over");
            self.events.push(GameEvent::GameOver { score });
        }
    }
}
