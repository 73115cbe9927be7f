//! Browser bindings
//!
//! `WheelWidget` is the JS-facing handle: the page feeds it options and
//! animation-frame timestamps and reads back SVG markup and results.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::audio::WebAudioCues;
use crate::effects::{EffectError, SpinHooks};
use crate::engine::SpinEngine;
use crate::history::{SpinHistory, SpinRecord};
use crate::platform::{FrameClock, seed_from_js};
use crate::settings::WheelSettings;
use crate::wheel::WheelOption;

/// Attribute set on `<html>` while a spin is in flight (pages hide navigation on it)
const SPINNING_ATTR: &str = "data-wheel-spinning";
/// Attribute set on `<html>` while the celebration runs
const CELEBRATING_ATTR: &str = "data-wheel-celebrating";

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Errs only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Decision wheel module loaded");
}

fn set_root_flag(name: &str, on: bool) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let _ = if on {
        root.set_attribute(name, "")
    } else {
        root.remove_attribute(name)
    };
}

/// Audio cues plus page-level flags
struct BrowserHooks {
    audio: WebAudioCues,
}

impl SpinHooks for BrowserHooks {
    fn spin_started(&mut self) -> Result<(), EffectError> {
        self.audio.spin_started()
    }

    fn spin_finished(&mut self) -> Result<(), EffectError> {
        self.audio.spin_finished()
    }

    fn celebration(&mut self, active: bool) -> Result<(), EffectError> {
        set_root_flag(CELEBRATING_ATTR, active);
        Ok(())
    }

    fn spinning_changed(&mut self, spinning: bool) {
        set_root_flag(SPINNING_ATTR, spinning);
    }

    fn cancelled(&mut self) {
        self.audio.cancelled();
        set_root_flag(CELEBRATING_ATTR, false);
    }
}

type Landed = Rc<RefCell<Vec<(usize, WheelOption)>>>;

/// One wheel mounted on a page
#[wasm_bindgen]
pub struct WheelWidget {
    engine: SpinEngine,
    clock: FrameClock,
    landed: Landed,
    volume: Rc<Cell<f32>>,
    history: SpinHistory,
    unread: Option<SpinRecord>,
}

#[wasm_bindgen]
impl WheelWidget {
    /// `options_json` is an array of `{text, color?, penalty?, bonus?}`
    ///
    /// `seed` must be a whole number in `0..=Number.MAX_SAFE_INTEGER`.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: &str, seed: f64) -> Result<WheelWidget, JsValue> {
        let seed = seed_from_js(seed)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid seed: {seed}")))?;
        let options = WheelOption::list_from_json(options_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid options: {e}")))?;
        let settings = WheelSettings::load();
        let volume = Rc::new(Cell::new(settings.effective_volume()));
        let hooks = BrowserHooks {
            audio: WebAudioCues::new(volume.clone()),
        };

        let landed: Landed = Rc::default();
        let sink = landed.clone();
        let engine = SpinEngine::new(options, seed)
            .with_settings(settings)
            .with_hooks(hooks)
            .on_result(move |index, option| sink.borrow_mut().push((index, option.clone())));

        log::info!("Wheel mounted with {} options", engine.options().len());
        Ok(Self {
            engine,
            clock: FrameClock::new(),
            landed,
            volume,
            history: SpinHistory::new(),
            unread: None,
        })
    }

    pub fn set_options(&mut self, options_json: &str) -> Result<(), JsValue> {
        let options = WheelOption::list_from_json(options_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid options: {e}")))?;
        self.engine.set_options(options);
        Ok(())
    }

    /// Apply and persist settings JSON (missing fields take defaults)
    pub fn set_settings(&mut self, settings_json: &str) -> Result<(), JsValue> {
        let settings = WheelSettings::from_json(settings_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid settings: {e}")))?;
        settings.save();
        self.volume.set(settings.effective_volume());
        self.engine.set_settings(settings);
        Ok(())
    }

    pub fn settings_json(&self) -> String {
        self.engine.settings().to_json().unwrap_or_else(|_| "{}".into())
    }

    /// Spin button handler; false when the press was ignored
    pub fn spin(&mut self) -> bool {
        self.engine.spin()
    }

    /// Call from requestAnimationFrame with its timestamp
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.step(now_ms);
        if dt > 0 {
            self.engine.advance(dt);
        }
        self.collect_results();
    }

    /// Rotation (degrees) to apply to the wheel this frame
    pub fn rotation(&self) -> f64 {
        self.engine.display_rotation()
    }

    pub fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    pub fn can_spin(&self) -> bool {
        self.engine.can_spin()
    }

    pub fn is_celebrating(&self) -> bool {
        self.engine.is_celebrating()
    }

    pub fn svg(&self) -> String {
        self.engine.render_svg()
    }

    /// Newest unread result as JSON, or `undefined`
    pub fn take_result(&mut self) -> Option<String> {
        let record = self.unread.take()?;
        match serde_json::to_string(&record) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Failed to encode result: {e}");
                None
            }
        }
    }

    pub fn history_json(&self) -> String {
        serde_json::to_string(&self.history).unwrap_or_else(|_| "{\"entries\":[]}".into())
    }

    /// Unmount; the widget stays callable but inert
    pub fn destroy(&mut self) {
        self.engine.teardown();
        self.landed.borrow_mut().clear();
        self.clock.reset();
        set_root_flag(SPINNING_ATTR, false);
        set_root_flag(CELEBRATING_ATTR, false);
    }

    fn collect_results(&mut self) {
        let landed: Vec<_> = self.landed.borrow_mut().drain(..).collect();
        for (index, option) in landed {
            let record = SpinRecord {
                option,
                index,
                rotation_degrees: self.engine.cumulative_rotation(),
                timestamp: js_sys::Date::now(),
            };
            self.history.record(record.clone());
            self.unread = Some(record);
        }
    }
}
