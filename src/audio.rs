//! Spin audio cues using Web Audio API
//!
//! Procedurally generated, no sound files needed:
//! - a ticking ratchet that loops while the wheel turns
//! - a rising chime when the result lands

use std::cell::Cell;
use std::rc::Rc;

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::effects::{EffectError, SpinHooks};

/// Ratchet tick rate while spinning (Hz)
const TICK_RATE_HZ: f32 = 12.0;

/// Looping spin cue: carrier + square LFO gating its gain
struct SpinLoop {
    carrier: OscillatorNode,
    lfo: OscillatorNode,
    gain: GainNode,
}

/// Audio cues for a wheel
pub struct WebAudioCues {
    ctx: Option<AudioContext>,
    /// Shared with the widget so settings changes apply to the next cue
    volume: Rc<Cell<f32>>,
    spin_loop: Option<SpinLoop>,
}

impl WebAudioCues {
    pub fn new(volume: Rc<Cell<f32>>) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume,
            spin_loop: None,
        }
    }

    fn volume(&self) -> f32 {
        self.volume.get().clamp(0.0, 1.0)
    }

    fn context(&self) -> Result<&AudioContext, EffectError> {
        let ctx = self
            .ctx
            .as_ref()
            .ok_or_else(|| EffectError::Unavailable("AudioContext".into()))?;
        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Ok(ctx)
    }

    /// Create an oscillator wired through a fresh gain node to the output
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Result<(OscillatorNode, GainNode), EffectError> {
        let rejected = |e: wasm_bindgen::JsValue| EffectError::PlaybackRejected(format!("{e:?}"));
        let osc = ctx.create_oscillator().map_err(rejected)?;
        let gain = ctx.create_gain().map_err(rejected)?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).map_err(rejected)?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(rejected)?;

        Ok((osc, gain))
    }

    fn start_loop(&mut self) -> Result<(), EffectError> {
        self.stop_loop();
        let volume = self.volume();
        if volume <= 0.0 {
            return Ok(());
        }
        let ctx = self.context()?;
        let rejected = |e: wasm_bindgen::JsValue| EffectError::PlaybackRejected(format!("{e:?}"));

        let (carrier, gain) = Self::create_osc(ctx, 900.0, OscillatorType::Triangle)?;
        gain.gain().set_value(0.0);

        // Square LFO drives the gain between -v and +v; clicks on each edge
        let lfo = ctx.create_oscillator().map_err(rejected)?;
        lfo.set_type(OscillatorType::Square);
        lfo.frequency().set_value(TICK_RATE_HZ);
        let depth = ctx.create_gain().map_err(rejected)?;
        depth.gain().set_value(volume * 0.15);
        lfo.connect_with_audio_node(&depth).map_err(rejected)?;
        depth
            .connect_with_audio_param(&gain.gain())
            .map_err(rejected)?;

        // Slow the ratchet down over the spin, like the wheel itself
        let t = ctx.current_time();
        lfo.frequency().set_value_at_time(TICK_RATE_HZ, t).ok();
        lfo.frequency()
            .exponential_ramp_to_value_at_time(2.0, t + 5.0)
            .ok();

        carrier.start().map_err(rejected)?;
        lfo.start().map_err(rejected)?;
        self.spin_loop = Some(SpinLoop { carrier, lfo, gain });
        Ok(())
    }

    fn stop_loop(&mut self) {
        if let Some(spin_loop) = self.spin_loop.take() {
            spin_loop.gain.gain().set_value(0.0);
            spin_loop.carrier.stop().ok();
            spin_loop.lfo.stop().ok();
        }
    }

    /// Result chime - quick rising arpeggio
    fn play_result(&self) -> Result<(), EffectError> {
        let volume = self.volume();
        if volume <= 0.0 {
            return Ok(());
        }
        let ctx = self.context()?;
        let t = ctx.current_time();

        for (i, freq) in [523.25_f32, 659.25, 783.99, 1046.5].into_iter().enumerate() {
            let (osc, gain) = Self::create_osc(ctx, freq, OscillatorType::Sine)?;
            let start = t + i as f64 * 0.08;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(volume * 0.4, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.4)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.45).ok();
        }
        Ok(())
    }
}

impl SpinHooks for WebAudioCues {
    fn spin_started(&mut self) -> Result<(), EffectError> {
        self.start_loop()
    }

    fn spin_finished(&mut self) -> Result<(), EffectError> {
        self.stop_loop();
        self.play_result()
    }

    fn cancelled(&mut self) {
        self.stop_loop();
    }
}

impl Drop for WebAudioCues {
    fn drop(&mut self) {
        self.stop_loop();
        if let Some(ctx) = &self.ctx {
            let _ = ctx.close();
        }
    }
}
