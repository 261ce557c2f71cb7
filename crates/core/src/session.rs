//! Session module - the game state machine
//!
//! A session owns the board, the falling piece and the randomizer, and moves
//! through the phases
//!
//! ```text
//! Spawning -> Falling -> Locking -> LineClear -> Spawning ...
//!    |                                              |
//!    +----------------> GameOver <------------------+
//! ```
//!
//! `Locking`, `LineClear` and `Spawning` are resolved within the call that
//! enters them, so callers observe `Falling` or `GameOver` between calls.
//! Gravity runs on ticks; player actions are validated and applied between
//! ticks.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::movement::{can_move, lock, try_move, try_rotate};
use crate::pieces::Piece;
use crate::rng::Randomizer;
use crate::scoring::{calculate_line_score, get_drop_interval_ms, levels_gained};
use crate::snapshot::SessionSnapshot;
use crate::types::{Action, Direction, ShapeKind, Spin, BOARD_HEIGHT};

/// Most gravity ticks a single `advance` call will run
const MAX_CATCH_UP_TICKS: u32 = BOARD_HEIGHT as u32 + 1;

const EVENT_QUEUE_LEN: usize = 8;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    LineClear,
    GameOver,
}

/// Notable outcomes, consumed by the caller through [`Session::take_event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LinesCleared { count: u32, points: u32 },
    GameOver { final_score: u32 },
}

/// Parameters fixed for the life of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u32,
    pub start_level: u32,
    /// Best score known before this session started
    pub highscore: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            start_level: 0,
            highscore: 0,
        }
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    piece: Option<Piece>,
    randomizer: Randomizer,
    phase: Phase,
    score: u32,
    level: u32,
    lines: u32,
    highscore: u32,
    pieces_spawned: u32,
    drop_timer_ms: u32,
    /// Last tick id that was applied; older or equal ids are ignored
    last_tick_id: Option<u64>,
    events: ArrayVec<SessionEvent, EVENT_QUEUE_LEN>,
}

impl Session {
    /// Create a session with default settings and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(SessionConfig {
            seed,
            ..SessionConfig::default()
        })
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::from_board(config, Board::new())
    }

    /// Create a session that starts on a prepared board
    pub fn from_board(config: SessionConfig, board: Board) -> Self {
        Self {
            config,
            board,
            piece: None,
            randomizer: Randomizer::new(config.seed),
            phase: Phase::Spawning,
            score: 0,
            level: config.start_level,
            lines: 0,
            highscore: config.highscore,
            pieces_spawned: 0,
            drop_timer_ms: 0,
            last_tick_id: None,
            events: ArrayVec::new(),
        }
    }

    /// Spawn the first piece. Does nothing once the session has started.
    pub fn start(&mut self) {
        if self.phase != Phase::Spawning || self.pieces_spawned > 0 {
            return;
        }
        self.resolve_phases();
    }

    /// Begin a fresh session with the same settings, keeping the highscore
    pub fn restart(&mut self) {
        let config = SessionConfig {
            seed: self.randomizer.state(),
            highscore: self.highscore(),
            ..self.config
        };
        *self = Self::with_config(config);
        self.start();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Best score so far, the running score included
    pub fn highscore(&self) -> u32 {
        self.highscore.max(self.score)
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn next_shape(&self) -> ShapeKind {
        self.randomizer.peek()
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Gravity interval at the current level
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Time left before the next gravity tick
    pub fn ms_until_tick(&self) -> u32 {
        self.drop_interval_ms().saturating_sub(self.drop_timer_ms)
    }

    /// Accumulate wall-clock time and run a gravity tick per elapsed interval.
    ///
    /// Returns the number of ticks run. A long stall is capped at
    /// `MAX_CATCH_UP_TICKS` and the rest of the backlog is dropped.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if self.phase != Phase::Falling {
            return 0;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        let mut ran = 0;
        while self.phase == Phase::Falling
            && self.drop_timer_ms >= self.drop_interval_ms()
            && ran < MAX_CATCH_UP_TICKS
        {
            self.drop_timer_ms -= self.drop_interval_ms();
            self.gravity_step();
            ran += 1;
        }

        if self.drop_timer_ms >= self.drop_interval_ms() {
            self.drop_timer_ms = 0;
        }
        ran
    }

    /// Run one gravity step.
    ///
    /// Returns false if the session is not falling or `tick_id` was already
    /// applied, so re-running a tick never double-scores.
    pub fn tick(&mut self, tick_id: u64) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        if self.last_tick_id.is_some_and(|last| tick_id <= last) {
            return false;
        }
        self.last_tick_id = Some(tick_id);
        self.gravity_step()
    }

    /// Move the piece down one row, or lock it if it rests
    fn gravity_step(&mut self) -> bool {
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        if try_move(&self.board, piece, Direction::Down) {
            self.sync_board();
        } else {
            self.phase = Phase::Locking;
            self.resolve_phases();
        }
        true
    }

    /// Apply a player action to the falling piece.
    ///
    /// Returns true if the piece moved or rotated.
    pub fn apply_action(&mut self, action: Action) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };

        let applied = match action {
            Action::MoveLeft => try_move(&self.board, piece, Direction::Left),
            Action::MoveRight => try_move(&self.board, piece, Direction::Right),
            Action::SoftDrop => try_move(&self.board, piece, Direction::Down),
            Action::RotateCw => try_rotate(&self.board, piece, Spin::Clockwise),
            Action::RotateCcw => try_rotate(&self.board, piece, Spin::CounterClockwise),
            Action::None => false,
        };

        if applied {
            self.sync_board();
        }
        applied
    }

    /// Take the oldest pending event
    pub fn take_event(&mut self) -> Option<SessionEvent> {
        if self.events.is_empty() {
            None
        } else {
            Some(self.events.remove(0))
        }
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.board.write_snapshot(&mut out.board);
        out.next = self.randomizer.peek();
        out.phase = self.phase;
        out.game_over = self.is_game_over();
        out.score = self.score;
        out.highscore = self.highscore();
        out.level = self.level;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Step through transient phases until the session is falling or over
    fn resolve_phases(&mut self) {
        loop {
            match self.phase {
                Phase::Spawning => self.spawn(),
                Phase::Locking => self.lock_piece(),
                Phase::LineClear => self.clear_lines(),
                Phase::Falling | Phase::GameOver => break,
            }
        }
        self.sync_board();
    }

    fn spawn(&mut self) {
        let kind = self.randomizer.next();
        let piece = Piece::spawn(kind);

        let overlaps = piece
            .blocks()
            .iter()
            .any(|&(row, col)| !self.board.is_free(row, col));
        if overlaps || !can_move(&self.board, &piece).down {
            debug!(shape = ?kind, overlaps, "spawn blocked");
            self.finish();
            return;
        }

        trace!(shape = ?kind, next = ?self.randomizer.peek(), "spawn");
        self.piece = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.drop_timer_ms = 0;
        self.phase = Phase::Falling;
    }

    fn lock_piece(&mut self) {
        if let Some(piece) = self.piece.take() {
            self.board.clear_active_cells();
            lock(&mut self.board, &piece);
            debug!(shape = ?piece.kind(), position = ?piece.position(), "locked");
        }
        self.phase = Phase::LineClear;
    }

    fn clear_lines(&mut self) {
        let count = self.board.clear_full_lines();
        if count > 0 {
            let points = calculate_line_score(count, self.level);
            let before = self.lines;
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(count);
            self.level += levels_gained(before, self.lines);
            debug!(count, points, level = self.level, "lines cleared");
            self.push_event(SessionEvent::LinesCleared { count, points });
        }
        self.phase = Phase::Spawning;
    }

    fn finish(&mut self) {
        self.piece = None;
        self.phase = Phase::GameOver;
        self.highscore = self.highscore.max(self.score);
        info!(score = self.score, lines = self.lines, level = self.level, "game over");
        self.push_event(SessionEvent::GameOver {
            final_score: self.score,
        });
    }

    fn push_event(&mut self, event: SessionEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Wipe stale falling cells and redraw the current piece
    fn sync_board(&mut self) {
        self.board.clear_active_cells();
        if let Some(piece) = &self.piece {
            self.board.draw_active(piece);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn started(seed: u32) -> Session {
        let mut s = Session::new(seed);
        s.start();
        s
    }

    #[test]
    fn test_new_session() {
        let s = Session::new(12345);
        assert_eq!(s.phase(), Phase::Spawning);
        assert!(s.piece().is_none());
        assert_eq!(s.score(), 0);
        assert_eq!(s.level(), 0);
        assert_eq!(s.lines(), 0);
    }

    #[test]
    fn test_start_spawns_falling_piece() {
        let s = started(12345);
        assert_eq!(s.phase(), Phase::Falling);
        assert_eq!(s.pieces_spawned(), 1);
        assert!(s.piece().is_some());
        assert_eq!(s.snapshot().falling_cells(), 4);
    }

    #[test]
    fn test_start_is_once_only() {
        let mut s = started(3);
        s.start();
        assert_eq!(s.pieces_spawned(), 1);
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut s = started(12345);
        let (row, col) = s.piece().unwrap().position();
        assert!(s.tick(0));
        assert_eq!(s.piece().unwrap().position(), (row + 1, col));
    }

    #[test]
    fn test_repeated_tick_id_is_ignored() {
        let mut s = started(12345);
        assert!(s.tick(5));
        let pos = s.piece().unwrap().position();
        assert!(!s.tick(5));
        assert!(!s.tick(4));
        assert_eq!(s.piece().unwrap().position(), pos);
        assert!(s.tick(6));
    }

    #[test]
    fn test_advance_respects_interval() {
        let mut s = started(12345);
        let row = s.piece().unwrap().position().0;
        assert_eq!(s.advance(999), 0);
        assert_eq!(s.piece().unwrap().position().0, row);
        assert_eq!(s.advance(1), 1);
        assert_eq!(s.piece().unwrap().position().0, row + 1);
        assert_eq!(s.advance(2500), 2);
        assert_eq!(s.piece().unwrap().position().0, row + 3);
    }

    #[test]
    fn test_piece_locks_and_next_spawns() {
        let mut s = started(12345);
        let mut id = 0;
        while s.pieces_spawned() == 1 {
            assert!(s.tick(id));
            id += 1;
        }
        assert_eq!(s.phase(), Phase::Falling);
        assert_eq!(s.board().locked_count(), 4);
        assert_eq!(s.snapshot().falling_cells(), 4);
    }

    #[test]
    fn test_actions_ignored_after_game_over() {
        let mut s = started(1);
        s.finish();
        assert!(!s.apply_action(Action::MoveLeft));
        assert!(!s.tick(100));
        assert_eq!(s.advance(10_000), 0);
        assert_eq!(
            s.take_event(),
            Some(SessionEvent::GameOver { final_score: 0 })
        );
    }

    #[test]
    fn test_none_action_does_nothing() {
        let mut s = started(9);
        let before = s.piece().cloned();
        assert!(!s.apply_action(Action::None));
        assert_eq!(s.piece().cloned(), before);
    }

    #[test]
    fn test_restart_keeps_highscore() {
        let mut s = Session::with_config(SessionConfig {
            seed: 4,
            start_level: 3,
            highscore: 500,
        });
        s.start();
        s.board.set(19, 0, CellValue::Locked(1));
        s.restart();
        assert_eq!(s.highscore(), 500);
        assert_eq!(s.level(), 3);
        assert_eq!(s.board().locked_count(), 0);
        assert_eq!(s.phase(), Phase::Falling);
    }

    /// Session on `rows` whose first piece is a horizontal I over columns 3..=6
    fn opening_i(rows: &[&str], start_level: u32) -> Session {
        let seed = (1..)
            .find(|&seed| Randomizer::new(seed).peek() == ShapeKind::I)
            .unwrap();
        let config = SessionConfig {
            seed,
            start_level,
            highscore: 0,
        };
        let mut s = Session::from_board(config, Board::from_rows(rows));
        s.start();
        s
    }

    fn drop_current(s: &mut Session, mut tick_id: u64) -> u64 {
        let spawned = s.pieces_spawned();
        while s.pieces_spawned() == spawned && !s.is_game_over() {
            assert!(s.tick(tick_id));
            tick_id += 1;
        }
        tick_id
    }

    #[test]
    fn test_tenth_line_raises_level_and_speeds_gravity() {
        let mut s = opening_i(&["###....###"], 0);
        s.lines = 9;
        assert_eq!(s.drop_interval_ms(), 1000);

        drop_current(&mut s, 0);

        assert_eq!(s.lines(), 10);
        assert_eq!(s.level(), 1);
        // Points use the level in effect before the clear.
        assert_eq!(s.score(), 40);
        assert_eq!(
            s.take_event(),
            Some(SessionEvent::LinesCleared { count: 1, points: 40 })
        );

        let interval = get_drop_interval_ms(1);
        assert_eq!(s.drop_interval_ms(), interval);
        assert_eq!(s.advance(interval - 1), 0);
        assert_eq!(s.advance(1), 1);
    }

    #[test]
    fn test_level_points_use_pre_clear_level() {
        let mut s = opening_i(&["###....###"], 3);
        s.lines = 19;
        drop_current(&mut s, 0);
        assert_eq!(s.level(), 4);
        assert_eq!(s.score(), 40 * 4);
    }

    #[test]
    fn test_long_stall_is_capped_and_resets_timer() {
        let mut s = started(12345);
        let ran = s.advance(u32::MAX);
        assert!(ran >= 1);
        assert!(ran <= MAX_CATCH_UP_TICKS);
        // A stall never leaves a backlog behind.
        assert_eq!(s.ms_until_tick(), s.drop_interval_ms());
        assert_eq!(s.advance(s.drop_interval_ms() - 1), 0);
    }

    #[test]
    fn test_catch_up_limit_covers_a_full_fall() {
        // Any piece locks within BOARD_HEIGHT ticks of spawning.
        assert!(MAX_CATCH_UP_TICKS > BOARD_HEIGHT as u32);
        let mut s = started(77);
        let ran = s.advance(u32::MAX);
        assert_eq!(s.pieces_spawned(), 2);
        assert!(ran <= BOARD_HEIGHT as u32);
    }

    #[test]
    fn test_max_tick_id_does_not_stop_gravity() {
        let mut s = started(12345);
        let row = s.piece().unwrap().position().0;
        assert!(s.tick(u64::MAX));
        assert!(!s.tick(u64::MAX));
        assert_eq!(s.piece().unwrap().position().0, row + 1);

        assert_eq!(s.advance(s.drop_interval_ms()), 1);
        assert_eq!(s.piece().unwrap().position().0, row + 2);
    }

    #[test]
    fn test_snapshot_highscore_tracks_running_score() {
        let mut s = opening_i(&["###....###"], 0);
        drop_current(&mut s, 0);
        assert_eq!(s.score(), 40);
        assert!(!s.is_game_over());
        assert_eq!(s.highscore(), 40);
        assert_eq!(s.snapshot().highscore, 40);

        let mut kept = Session::with_config(SessionConfig {
            highscore: 900,
            ..SessionConfig::default()
        });
        kept.start();
        assert_eq!(kept.snapshot().highscore, 900);
    }
}
