//! Per-action debounce for polled input.
//!
//! Terminals repeat a held key at their own rate, often faster than the game
//! loop wants to move a piece. The debouncer lets each action through at most
//! once per window. Time is supplied by the caller in milliseconds so the
//! debouncer stays independent of any clock.

use crate::types::{Action, DEFAULT_DEBOUNCE_MS};

/// Tracks when each action was last let through.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: u32,
    last_accepted_ms: [Option<u64>; Action::COUNT],
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_window_ms(DEFAULT_DEBOUNCE_MS)
    }

    pub fn with_window_ms(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted_ms: [None; Action::COUNT],
        }
    }

    /// Decide whether `action` observed at `now_ms` should be applied.
    ///
    /// `Action::None` is never accepted. Actions are debounced independently,
    /// so a rotation right after a move is not held back.
    pub fn accept(&mut self, action: Action, now_ms: u64) -> bool {
        if action == Action::None {
            return false;
        }
        let slot = &mut self.last_accepted_ms[action.index()];
        if let Some(last) = *slot {
            if now_ms.saturating_sub(last) < self.window_ms as u64 {
                return false;
            }
        }
        *slot = Some(now_ms);
        true
    }

    /// Forget all history, e.g. after a restart
    pub fn reset(&mut self) {
        self.last_accepted_ms = [None; Action::COUNT];
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
