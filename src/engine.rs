//! Spin engine: the host-facing driver
//!
//! Owns the option list, its sector layout, the spin session and the
//! randomness source, and turns queued `SpinEvent`s into hook calls and the
//! result callback.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::effects::{NoopHooks, SpinHooks};
use crate::renderer::svg::render_wheel;
use crate::settings::WheelSettings;
use crate::wheel::{
    Sector, SpinEvent, SpinPhase, SpinSession, SpinSource, WheelGeometry, WheelOption, advance,
    build_sectors, request_spin,
};

/// Called once per completed spin with the winning option and its position
pub type ResultCallback = Box<dyn FnMut(usize, &WheelOption)>;

/// One mounted wheel
pub struct SpinEngine<S: SpinSource = Pcg32> {
    options: Vec<WheelOption>,
    sectors: Vec<Sector>,
    geometry: WheelGeometry,
    settings: WheelSettings,
    session: SpinSession,
    source: S,
    hooks: Box<dyn SpinHooks>,
    on_result: Option<ResultCallback>,
}

impl SpinEngine<Pcg32> {
    /// Engine with a seeded PCG source
    pub fn new(options: Vec<WheelOption>, seed: u64) -> Self {
        Self::with_source(options, Pcg32::seed_from_u64(seed))
    }
}

impl<S: SpinSource> SpinEngine<S> {
    pub fn with_source(options: Vec<WheelOption>, source: S) -> Self {
        let geometry = WheelGeometry::default();
        let sectors = build_sectors(&options, &geometry);
        Self {
            options,
            sectors,
            geometry,
            settings: WheelSettings::default(),
            session: SpinSession::new(),
            source,
            hooks: Box::new(NoopHooks),
            on_result: None,
        }
    }

    pub fn with_settings(mut self, settings: WheelSettings) -> Self {
        self.settings = settings.sanitized();
        self
    }

    /// Replace the settings; a spin in flight keeps its timing
    pub fn set_settings(&mut self, settings: WheelSettings) {
        self.settings = settings.sanitized();
    }

    pub fn with_geometry(mut self, geometry: WheelGeometry) -> Self {
        self.geometry = geometry;
        self.sectors = build_sectors(&self.options, &self.geometry);
        self
    }

    pub fn with_hooks(mut self, hooks: impl SpinHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Register the result callback (replaces any previous one)
    pub fn on_result(mut self, callback: impl FnMut(usize, &WheelOption) + 'static) -> Self {
        self.on_result = Some(Box::new(callback));
        self
    }

    /// Replace the option list and lay the wheel out again
    ///
    /// A spin in flight still resolves against the list it started with
    /// unless settings say otherwise.
    pub fn set_options(&mut self, options: Vec<WheelOption>) {
        if self.session.is_spinning() {
            log::debug!("Options changed mid-spin ({} → {})", self.options.len(), options.len());
        }
        self.options = options;
        self.sectors = build_sectors(&self.options, &self.geometry);
    }

    pub fn options(&self) -> &[WheelOption] {
        &self.options
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    pub fn session(&self) -> &SpinSession {
        &self.session
    }

    pub fn phase(&self) -> &SpinPhase {
        &self.session.phase
    }

    pub fn selected(&self) -> Option<&WheelOption> {
        self.session.selected()
    }

    pub fn cumulative_rotation(&self) -> f64 {
        self.session.cumulative_rotation
    }

    /// Rotation to draw this frame
    pub fn display_rotation(&self) -> f64 {
        self.session.display_rotation()
    }

    pub fn is_spinning(&self) -> bool {
        self.session.is_spinning()
    }

    pub fn is_celebrating(&self) -> bool {
        self.session.is_celebrating()
    }

    /// Whether the spin button should be enabled
    pub fn can_spin(&self) -> bool {
        !self.session.torn_down
            && !self.session.is_spinning()
            && self.settings.can_spin(self.options.len())
    }

    /// Spin button pressed; returns whether a spin started
    pub fn spin(&mut self) -> bool {
        let started = request_spin(
            &mut self.session,
            &self.options,
            &self.settings,
            &mut self.source,
        );
        self.dispatch();
        started
    }

    /// Advance the engine clock by `dt_ms`
    pub fn advance(&mut self, dt_ms: u64) {
        advance(&mut self.session, &self.options, &self.settings, dt_ms);
        self.dispatch();
    }

    /// Unmount: cancel timers and effects; no result is delivered afterwards
    pub fn teardown(&mut self) {
        self.session.teardown();
        self.dispatch();
    }

    /// SVG markup of the wheel at its current display rotation
    pub fn render_svg(&self) -> String {
        render_wheel(&self.sectors, &self.geometry, self.display_rotation())
    }

    fn dispatch(&mut self) {
        for event in self.session.drain_events() {
            match event {
                SpinEvent::SpinStarted { .. } => {
                    if let Err(e) = self.hooks.spin_started() {
                        log::warn!("Spin cue failed: {e}");
                    }
                }
                SpinEvent::SpinningChanged(spinning) => self.hooks.spinning_changed(spinning),
                SpinEvent::SpinFinished { .. } => {
                    if let Err(e) = self.hooks.spin_finished() {
                        log::warn!("Result cue failed: {e}");
                    }
                }
                SpinEvent::Resolved { index, option, .. } => {
                    if let Some(callback) = self.on_result.as_mut() {
                        callback(index, &option);
                    }
                }
                SpinEvent::CelebrationStarted { .. } => {
                    if let Err(e) = self.hooks.celebration(true) {
                        log::warn!("Celebration failed to start: {e}");
                    }
                }
                SpinEvent::CelebrationEnded => {
                    if let Err(e) = self.hooks.celebration(false) {
                        log::warn!("Celebration failed to stop: {e}");
                    }
                }
                SpinEvent::Cancelled { .. } => self.hooks.cancelled(),
            }
        }
    }
}

impl<S: SpinSource> Drop for SpinEngine<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::effects::EffectError;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records hook calls; optionally fails every cue
    struct Recorder {
        log: Log,
        fail_cues: bool,
    }

    impl SpinHooks for Recorder {
        fn spin_started(&mut self) -> Result<(), EffectError> {
            self.log.borrow_mut().push("start-cue".into());
            if self.fail_cues {
                return Err(EffectError::PlaybackRejected("NotAllowedError".into()));
            }
            Ok(())
        }

        fn spin_finished(&mut self) -> Result<(), EffectError> {
            self.log.borrow_mut().push("finish-cue".into());
            if self.fail_cues {
                return Err(EffectError::Unavailable("AudioContext".into()));
            }
            Ok(())
        }

        fn celebration(&mut self, active: bool) -> Result<(), EffectError> {
            self.log.borrow_mut().push(format!("celebration-{active}"));
            Ok(())
        }

        fn spinning_changed(&mut self, spinning: bool) {
            self.log.borrow_mut().push(format!("spinning-{spinning}"));
        }

        fn cancelled(&mut self) {
            self.log.borrow_mut().push("cancelled".into());
        }
    }

    fn abcd() -> Vec<WheelOption> {
        ["A", "B", "C", "D"].into_iter().map(WheelOption::from).collect()
    }

    fn recorded_engine(fail_cues: bool) -> (SpinEngine, Log) {
        let log: Log = Rc::default();
        let results = log.clone();
        let engine = SpinEngine::new(abcd(), 1234)
            .with_hooks(Recorder {
                log: log.clone(),
                fail_cues,
            })
            .on_result(move |i, option| {
                results.borrow_mut().push(format!("result-{i}-{}", option.text))
            });
        (engine, log)
    }

    #[test]
    fn test_hook_order_for_one_spin() {
        let (mut engine, log) = recorded_engine(false);
        assert!(engine.can_spin());
        assert!(engine.spin());
        assert!(!engine.can_spin());

        engine.advance(SPIN_DURATION_MS);
        engine.advance(CELEBRATION_DURATION_MS);

        let calls = log.borrow().clone();
        let result = calls.iter().find(|c| c.starts_with("result-")).cloned().unwrap();
        assert_eq!(
            calls,
            vec![
                "start-cue".to_string(),
                "spinning-true".into(),
                "finish-cue".into(),
                "spinning-false".into(),
                "celebration-true".into(),
                result,
                "celebration-false".into(),
            ]
        );
    }

    #[test]
    fn test_result_matches_resolver() {
        let (mut engine, log) = recorded_engine(false);
        engine.spin();
        engine.advance(SPIN_DURATION_MS);

        let expected = crate::wheel::resolve_index(engine.cumulative_rotation(), 4).unwrap();
        let selected = engine.selected().cloned().unwrap();
        assert_eq!(selected, abcd()[expected]);
        assert!(log.borrow().contains(&format!("result-{expected}-{}", selected.text)));
        assert!(engine.can_spin());
    }

    #[test]
    fn test_failing_cues_do_not_block_result() {
        let (mut engine, log) = recorded_engine(true);
        engine.spin();
        engine.advance(SPIN_DURATION_MS);
        assert!(engine.selected().is_some());
        assert_eq!(log.borrow().iter().filter(|c| c.starts_with("result-")).count(), 1);
    }

    #[test]
    fn test_double_spin_single_result() {
        let (mut engine, log) = recorded_engine(false);
        assert!(engine.spin());
        let rotation = engine.cumulative_rotation();
        assert!(!engine.spin());
        engine.advance(100);
        assert!(!engine.spin());
        assert_eq!(engine.cumulative_rotation(), rotation);

        engine.advance(60_000);
        let calls = log.borrow();
        assert_eq!(calls.iter().filter(|c| c.starts_with("result-")).count(), 1);
        assert_eq!(calls.iter().filter(|c| *c == "start-cue").count(), 1);
    }

    #[test]
    fn test_teardown_mid_spin_delivers_nothing() {
        let (mut engine, log) = recorded_engine(false);
        engine.spin();
        engine.advance(4999);
        engine.teardown();
        engine.advance(60_000);
        assert!(!engine.spin());

        let calls = log.borrow();
        assert!(!calls.iter().any(|c| c.starts_with("result-")));
        assert!(!calls.contains(&"finish-cue".to_string()));
        assert!(calls.contains(&"cancelled".to_string()));
        assert_eq!(calls.last().map(String::as_str), Some("spinning-false"));
        assert!(engine.session().timers.is_empty());
    }

    #[test]
    fn test_drop_cancels_in_flight_spin() {
        let (mut engine, log) = recorded_engine(false);
        engine.spin();
        drop(engine);
        let calls = log.borrow();
        assert!(calls.contains(&"cancelled".to_string()));
        assert!(!calls.iter().any(|c| c.starts_with("result-")));
    }

    #[test]
    fn test_too_few_options_disable_spin() {
        let (mut engine, log) = recorded_engine(false);
        engine.set_options(vec![WheelOption::new("Solo")]);
        assert!(!engine.can_spin());
        assert!(!engine.spin());
        engine.set_options(Vec::new());
        assert!(engine.sectors().is_empty());
        assert!(!engine.spin());
        engine.advance(60_000);
        assert_eq!(*engine.phase(), SpinPhase::Idle);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_set_options_relayouts() {
        let mut engine = SpinEngine::new(abcd(), 1);
        assert_eq!(engine.sectors().len(), 4);
        engine.set_options(vec!["X".into(), "Y".into(), "Z".into()]);
        assert_eq!(engine.sectors().len(), 3);
        assert_eq!(engine.sectors()[2].end_degrees, 360.0);
    }

    #[test]
    fn test_mid_spin_edit_resolves_against_snapshot() {
        let (mut engine, log) = recorded_engine(false);
        engine.spin();
        engine.set_options(vec!["X".into(), "Y".into()]);
        engine.advance(SPIN_DURATION_MS);
        let selected = engine.selected().map(|o| o.text.clone()).unwrap();
        assert!(["A", "B", "C", "D"].contains(&selected.as_str()));
        assert_eq!(log.borrow().iter().filter(|c| c.starts_with("result-")).count(), 1);
    }

    #[test]
    fn test_stored_settings_cannot_shrink_spins() {
        let json = r#"{"min_extra_degrees": 0, "extra_degrees_span": 0}"#;
        let settings = WheelSettings::from_json(json).unwrap();
        let mut engine = SpinEngine::new(vec!["A".into(), "B".into()], 1).with_settings(settings);

        let mut last = engine.cumulative_rotation();
        for _ in 0..3 {
            assert!(engine.spin());
            let gained = engine.cumulative_rotation() - last;
            assert!(gained >= MIN_EXTRA_DEGREES as f64, "rotation grew by {gained}");
            last = engine.cumulative_rotation();
            engine.advance(SPIN_DURATION_MS);
        }
    }

    #[test]
    fn test_set_settings_is_sanitized() {
        let mut engine = SpinEngine::new(abcd(), 1);
        engine.set_settings(WheelSettings {
            min_extra_degrees: 10,
            min_options: 0,
            ..Default::default()
        });
        assert_eq!(engine.settings().min_extra_degrees, MIN_EXTRA_DEGREES);
        assert_eq!(engine.settings().min_options, 1);
    }

    #[test]
    fn test_render_svg_has_every_sector() {
        let engine = SpinEngine::new(abcd(), 1);
        let svg = engine.render_svg();
        assert_eq!(svg.matches("<path d=\"M").count(), 4);
    }
}
