//! Spin settings and preferences
//!
//! Persisted in LocalStorage on the web; native builds read an optional JSON
//! file named by `DECISION_WHEEL_SETTINGS`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which option list a finished spin is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResolveAgainst {
    /// The list as it was when the spin started (matches what was drawn)
    #[default]
    SpinSnapshot,
    /// Whatever the list is when the spin ends
    LiveOptions,
}

/// Wheel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    // === Spin ===
    /// Spin animation length (ms)
    pub spin_duration_ms: u64,
    /// Guaranteed extra rotation per spin (degrees)
    pub min_extra_degrees: u32,
    /// Width of the random extra rotation range (degrees)
    pub extra_degrees_span: u32,
    /// Fewest options that enable spinning (never below 1)
    pub min_options: usize,
    /// Option list used to resolve a finished spin
    pub resolve_against: ResolveAgainst,

    // === Celebration ===
    /// Show the celebration overlay after a result
    pub celebration: bool,
    /// Celebration overlay length (ms)
    pub celebration_duration_ms: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            min_extra_degrees: MIN_EXTRA_DEGREES,
            extra_degrees_span: EXTRA_DEGREES_SPAN,
            min_options: MIN_OPTIONS_TO_SPIN,
            resolve_against: ResolveAgainst::SpinSnapshot,

            celebration: true,
            celebration_duration_ms: CELEBRATION_DURATION_MS,

            master_volume: 0.8,
            muted: false,
        }
    }
}

impl WheelSettings {
    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Clamp values into their usable ranges
    ///
    /// Every spin must still add at least `MIN_EXTRA_DEGREES`, whatever the
    /// stored settings say.
    pub fn sanitized(mut self) -> Self {
        self.min_options = self.min_options.max(1);
        self.min_extra_degrees = self.min_extra_degrees.max(MIN_EXTRA_DEGREES);
        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Whether a list of `option_count` options may be spun
    pub fn can_spin(&self, option_count: usize) -> bool {
        option_count > 0 && option_count >= self.min_options
    }

    /// Effective audio volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "decision_wheel_settings";

    /// Environment variable naming a settings file for native builds
    pub const PATH_ENV: &'static str = "DECISION_WHEEL_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `DECISION_WHEEL_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.to_string_lossy());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}", path.to_string_lossy());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}", path.to_string_lossy());
                Self::default()
            }
        }
    }
}
