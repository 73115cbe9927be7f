//! Spin session state
//!
//! Everything the spin controller mutates lives here. The selected option
//! only exists inside `SpinPhase::Resolved`, so a spin in progress can never
//! carry a stale result.

use serde::{Deserialize, Serialize};

use super::option::WheelOption;
use super::timer::{TimerKind, Timers};

/// Spin controller phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpinPhase {
    /// Nothing spun yet (or the last spin was cancelled / had nothing to resolve)
    Idle,
    /// Wheel turning toward `to_degrees`; the trigger is locked
    Spinning {
        from_degrees: f64,
        to_degrees: f64,
        started_at_ms: u64,
        duration_ms: u64,
        /// Options as they were when the spin started
        snapshot: Vec<WheelOption>,
    },
    /// Last spin landed on `option`; accepts a new spin like Idle
    Resolved { index: usize, option: WheelOption },
}

impl SpinPhase {
    #[inline]
    pub fn is_spinning(&self) -> bool {
        matches!(self, SpinPhase::Spinning { .. })
    }

    /// Result of the last completed spin
    pub fn selected(&self) -> Option<&WheelOption> {
        match self {
            SpinPhase::Resolved { option, .. } => Some(option),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpinPhase::Idle => "idle",
            SpinPhase::Spinning { .. } => "spinning",
            SpinPhase::Resolved { .. } => "resolved",
        }
    }
}

/// Something the host should react to (sound, overlay, result handling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpinEvent {
    /// Spin began: start the spin cue
    SpinStarted {
        spin: u64,
        from_degrees: f64,
        to_degrees: f64,
        duration_ms: u64,
    },
    /// Spin trigger locked (true) or released (false)
    SpinningChanged(bool),
    /// Animation over: stop the spin cue, play the result cue
    SpinFinished { spin: u64 },
    /// The wheel landed on `option` (position `index` in the resolved list)
    Resolved {
        spin: u64,
        index: usize,
        option: WheelOption,
    },
    CelebrationStarted { duration_ms: u64 },
    CelebrationEnded,
    /// Session torn down with work in flight; stop cues and overlays
    Cancelled {
        was_spinning: bool,
        was_celebrating: bool,
    },
}

/// Spin session (one per mounted wheel)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinSession {
    /// Total rotation across all spins (degrees); only ever grows
    pub cumulative_rotation: f64,
    pub phase: SpinPhase,
    /// Virtual clock (ms), advanced by the host
    pub now_ms: u64,
    pub timers: Timers,
    /// Spins started so far
    pub spin_count: u64,
    /// Set on teardown; every later call is a no-op
    pub torn_down: bool,
    #[serde(skip)]
    events: Vec<SpinEvent>,
}

impl Default for SpinSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinSession {
    pub fn new() -> Self {
        Self {
            cumulative_rotation: 0.0,
            phase: SpinPhase::Idle,
            now_ms: 0,
            timers: Timers::new(),
            spin_count: 0,
            torn_down: false,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_spinning(&self) -> bool {
        self.phase.is_spinning()
    }

    pub fn is_celebrating(&self) -> bool {
        self.timers.is_pending(TimerKind::Celebration)
    }

    pub fn selected(&self) -> Option<&WheelOption> {
        self.phase.selected()
    }

    /// Rotation to draw right now
    ///
    /// Eases out (cubic) from the spin's start angle to its target; outside a
    /// spin it is the cumulative rotation.
    pub fn display_rotation(&self) -> f64 {
        match &self.phase {
            SpinPhase::Spinning {
                from_degrees,
                to_degrees,
                started_at_ms,
                duration_ms,
                ..
            } => {
                if *duration_ms == 0 {
                    return *to_degrees;
                }
                let elapsed = self.now_ms.saturating_sub(*started_at_ms) as f64;
                let t = (elapsed / *duration_ms as f64).clamp(0.0, 1.0);
                let eased = 1.0 - (1.0 - t).powi(3);
                from_degrees + (to_degrees - from_degrees) * eased
            }
            _ => self.cumulative_rotation,
        }
    }

    /// Queue an event for the host
    pub(crate) fn push_event(&mut self, event: SpinEvent) {
        self.events.push(event);
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<SpinEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cancel timers and lock the session for good
    ///
    /// The rotation is kept; a spin in flight is dropped without a result.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let was_spinning = self.is_spinning();
        let was_celebrating = self.is_celebrating();
        self.timers.cancel_all();

        if was_spinning {
            self.phase = SpinPhase::Idle;
        }
        if was_spinning || was_celebrating {
            self.push_event(SpinEvent::Cancelled {
                was_spinning,
                was_celebrating,
            });
        }
        if was_spinning {
            self.push_event(SpinEvent::SpinningChanged(false));
        }
        self.torn_down = true;
        log::debug!(
            "Spin session torn down (spinning: {was_spinning}, celebrating: {was_celebrating})"
        );
    }
}
