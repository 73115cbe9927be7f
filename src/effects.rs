//! Side-effect hooks
//!
//! Sound cues, the celebration overlay and host restyling while the wheel
//! turns. Hooks can fail (autoplay blocked, no audio device); failures are
//! logged by the engine and never hold up a result.

use std::fmt;

/// Why a side effect could not run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// The backing device/context is missing
    Unavailable(String),
    /// The environment refused playback (e.g. no user gesture yet)
    PlaybackRejected(String),
    Other(String),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::Unavailable(what) => write!(f, "{what} unavailable"),
            EffectError::PlaybackRejected(why) => write!(f, "playback rejected: {why}"),
            EffectError::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for EffectError {}

/// Host side effects driven by the spin controller
///
/// Every method has a no-op default.
pub trait SpinHooks {
    /// Spin began: start the (looping) spin cue
    fn spin_started(&mut self) -> Result<(), EffectError> {
        Ok(())
    }

    /// Spin animation over: stop the spin cue, play the result cue
    fn spin_finished(&mut self) -> Result<(), EffectError> {
        Ok(())
    }

    /// Show (true) or hide (false) the celebration overlay
    fn celebration(&mut self, _active: bool) -> Result<(), EffectError> {
        Ok(())
    }

    /// Spin trigger locked/released; hosts hide navigation, block scrolling, etc.
    fn spinning_changed(&mut self, _spinning: bool) {}

    /// Session torn down mid-spin or mid-celebration: stop everything now
    fn cancelled(&mut self) {}
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl SpinHooks for NoopHooks {}

/// Hooks that only log, for headless hosts
#[derive(Debug, Clone, Default)]
pub struct LogHooks {
    /// Label prefixed to every line
    pub name: String,
}

impl LogHooks {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SpinHooks for LogHooks {
    fn spin_started(&mut self) -> Result<(), EffectError> {
        log::info!("[{}] spin cue started", self.name);
        Ok(())
    }

    fn spin_finished(&mut self) -> Result<(), EffectError> {
        log::info!("[{}] spin cue stopped, result cue played", self.name);
        Ok(())
    }

    fn celebration(&mut self, active: bool) -> Result<(), EffectError> {
        log::info!(
            "[{}] celebration {}",
            self.name,
            if active { "on" } else { "off" }
        );
        Ok(())
    }

    fn spinning_changed(&mut self, spinning: bool) {
        log::debug!("[{}] spinning = {spinning}", self.name);
    }

    fn cancelled(&mut self) {
        log::info!("[{}] effects cancelled", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            EffectError::Unavailable("AudioContext".into()).to_string(),
            "AudioContext unavailable"
        );
        assert_eq!(
            EffectError::PlaybackRejected("NotAllowedError".into()).to_string(),
            "playback rejected: NotAllowedError"
        );
        assert_eq!(EffectError::Other("boom".into()).to_string(), "boom");
    }

    #[test]
    fn test_defaults_are_ok() {
        let mut hooks = NoopHooks;
        assert!(hooks.spin_started().is_ok());
        assert!(hooks.spin_finished().is_ok());
        assert!(hooks.celebration(true).is_ok());
        hooks.spinning_changed(true);
        hooks.cancelled();
    }
}
