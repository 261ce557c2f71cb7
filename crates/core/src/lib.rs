//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the falling-block engine. It has no dependencies on the
//! terminal, the keyboard or the filesystem, which makes it:
//!
//! - **Deterministic**: the same seed deals the same shapes
//! - **Testable**: every rule is reachable from plain function calls
//! - **Allocation-free**: boards, pieces and snapshots are fixed-size arrays
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with a floor sentinel, line detection and compaction
//! - [`pieces`]: shapes, rotation, live pieces and their extremity sets
//! - [`movement`]: move/rotate legality checks and locking
//! - [`rng`]: seeded LCG and the anti-repeat bag randomizer
//! - [`scoring`]: classic line scores, leveling and gravity speed
//! - [`session`]: the spawn/fall/lock/clear state machine
//! - [`snapshot`]: read-only views for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Phase, Session};
//! use blockfall_types::Action;
//!
//! let mut session = Session::new(12345);
//! session.start();
//! assert_eq!(session.phase(), Phase::Falling);
//!
//! session.apply_action(Action::MoveLeft);
//! session.apply_action(Action::RotateCw);
//!
//! // One second at level 0 is one gravity step.
//! assert_eq!(session.advance(1000), 1);
//!
//! let snap = session.snapshot();
//! assert_eq!(snap.falling_cells(), 4);
//! assert!(!snap.game_over);
//! ```
//!
//! # Timing
//!
//! The session never reads a clock. Callers either pass elapsed wall-clock
//! milliseconds to [`Session::advance`](session::Session::advance), or drive
//! [`Session::tick`](session::Session::tick) with their own tick ids.

pub mod board;
pub mod movement;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use movement::{can_move, can_rotate, lock, try_move, try_rotate, Moves};
pub use pieces::{compute_extremities, Extremities, Piece, Shape};
pub use rng::{deal, History, Randomizer, SimpleRng};
pub use scoring::{calculate_line_score, get_drop_interval_ms, levels_gained};
pub use session::{Phase, Session, SessionConfig, SessionEvent};
pub use snapshot::{BoardSnapshot, DisplayCell, SessionSnapshot};
