//! Cancellable timers on the session's virtual clock
//!
//! Nothing here sleeps. The host advances the clock and due timers are
//! popped in deadline order, so a long frame that crosses several deadlines
//! still fires them one after another.

use serde::{Deserialize, Serialize};

/// What a timer gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// End of the spin animation; resolves the result
    SpinDuration,
    /// End of the celebration overlay (cosmetic)
    Celebration,
}

/// A pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub kind: TimerKind,
    /// Virtual clock time (ms) at which it fires
    pub deadline_ms: u64,
}

/// At most one pending timer per kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    pending: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire `delay_ms` after `now_ms`
    ///
    /// Replaces a pending timer of the same kind. Returns true if one was replaced.
    pub fn schedule(&mut self, kind: TimerKind, now_ms: u64, delay_ms: u64) -> bool {
        let replaced = self.cancel(kind);
        self.pending.push(Timer {
            kind,
            deadline_ms: now_ms.saturating_add(delay_ms),
        });
        replaced
    }

    /// Cancel the pending timer of `kind`, if any
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.kind != kind);
        self.pending.len() != before
    }

    /// Cancel everything; returns how many timers were dropped
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|t| t.kind == kind)
    }

    /// Remove and return the earliest timer due at or before `until_ms`
    ///
    /// Ties go to the timer scheduled first.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Timer> {
        let (pos, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= until_ms)
            .min_by_key(|(_, t)| t.deadline_ms)?;
        Some(self.pending.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
