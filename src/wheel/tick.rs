//! Spin controller
//!
//! Drives the session through Idle → Spinning → Resolved. The host feeds in
//! spin requests and elapsed time; transitions queue `SpinEvent`s on the
//! session for the host to act on.

use rand::{Rng, RngCore};

use super::option::WheelOption;
use super::resolve::resolve_index;
use super::state::{SpinEvent, SpinPhase, SpinSession};
use super::timer::TimerKind;
use crate::settings::{ResolveAgainst, WheelSettings};

/// Source of the random extra rotation for each spin
///
/// Implemented for every `RngCore`; tests plug in fixed sequences.
pub trait SpinSource {
    /// Extra rotation in degrees: `min` plus a whole number in `[0, span)`
    fn extra_degrees(&mut self, min: u32, span: u32) -> f64;
}

impl<R: RngCore> SpinSource for R {
    fn extra_degrees(&mut self, min: u32, span: u32) -> f64 {
        let jitter = if span == 0 { 0 } else { self.random_range(0..span) };
        min as f64 + jitter as f64
    }
}

/// Try to start a spin
///
/// Returns false (and changes nothing) while spinning, after teardown, or
/// when the option list is too short to spin.
pub fn request_spin<S: SpinSource>(
    session: &mut SpinSession,
    options: &[WheelOption],
    settings: &WheelSettings,
    source: &mut S,
) -> bool {
    if session.torn_down {
        log::debug!("Spin ignored: session torn down");
        return false;
    }
    if session.is_spinning() {
        log::debug!("Spin ignored: already spinning");
        return false;
    }
    if !settings.can_spin(options.len()) {
        log::debug!("Spin ignored: {} option(s) on the wheel", options.len());
        return false;
    }

    let extra = source.extra_degrees(settings.min_extra_degrees, settings.extra_degrees_span);
    let from = session.cumulative_rotation;
    let to = from + extra;
    session.cumulative_rotation = to;
    session.spin_count += 1;

    session.phase = SpinPhase::Spinning {
        from_degrees: from,
        to_degrees: to,
        started_at_ms: session.now_ms,
        duration_ms: settings.spin_duration_ms,
        snapshot: options.to_vec(),
    };
    session
        .timers
        .schedule(TimerKind::SpinDuration, session.now_ms, settings.spin_duration_ms);

    session.push_event(SpinEvent::SpinStarted {
        spin: session.spin_count,
        from_degrees: from,
        to_degrees: to,
        duration_ms: settings.spin_duration_ms,
    });
    session.push_event(SpinEvent::SpinningChanged(true));

    log::debug!(
        "Spin #{} started: +{extra}° ({from}° → {to}°) over {} ms",
        session.spin_count,
        settings.spin_duration_ms
    );
    true
}

/// Advance the session clock by `dt_ms`, firing due timers in order
///
/// `live_options` is the caller's current list; it is only consulted when
/// resolving against live options.
pub fn advance(
    session: &mut SpinSession,
    live_options: &[WheelOption],
    settings: &WheelSettings,
    dt_ms: u64,
) {
    if session.torn_down {
        return;
    }

    let target = session.now_ms.saturating_add(dt_ms);
    while let Some(timer) = session.timers.pop_due(target) {
        session.now_ms = session.now_ms.max(timer.deadline_ms);
        match timer.kind {
            TimerKind::SpinDuration => finish_spin(session, live_options, settings),
            TimerKind::Celebration => {
                session.push_event(SpinEvent::CelebrationEnded);
                log::debug!("Celebration ended");
            }
        }
    }
    session.now_ms = target;
}

/// Spin timer fired: resolve and release the trigger
fn finish_spin(session: &mut SpinSession, live_options: &[WheelOption], settings: &WheelSettings) {
    let phase = std::mem::replace(&mut session.phase, SpinPhase::Idle);
    let SpinPhase::Spinning { snapshot, .. } = phase else {
        log::warn!("Spin timer fired outside a spin; ignoring");
        return;
    };
    let spin = session.spin_count;

    session.push_event(SpinEvent::SpinFinished { spin });

    let pool: &[WheelOption] = match settings.resolve_against {
        ResolveAgainst::SpinSnapshot => &snapshot,
        ResolveAgainst::LiveOptions => live_options,
    };

    let Some(index) = resolve_index(session.cumulative_rotation, pool.len()) else {
        log::warn!("Spin #{spin} finished with no options to resolve against");
        session.push_event(SpinEvent::SpinningChanged(false));
        return;
    };
    let option = pool[index].clone();

    session.phase = SpinPhase::Resolved {
        index,
        option: option.clone(),
    };
    session.push_event(SpinEvent::SpinningChanged(false));

    if settings.celebration {
        session.timers.schedule(
            TimerKind::Celebration,
            session.now_ms,
            settings.celebration_duration_ms,
        );
        session.push_event(SpinEvent::CelebrationStarted {
            duration_ms: settings.celebration_duration_ms,
        });
    }

    log::info!(
        "Spin #{spin} landed on \"{}\" (option {index}, rotation {}°)",
        option.text,
        session.cumulative_rotation
    );
    session.push_event(SpinEvent::Resolved { spin, index, option });
}
