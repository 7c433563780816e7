//! Web Audio playback
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use super::SoundEffect;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = match AudioContext::new() {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                log::warn!("Failed to create AudioContext - audio disabled: {:?}", e);
                None
            }
        };
        Self {
            ctx,
            volume: Settings::default().effective_volume(),
        }
    }

    /// Pick up volume and mute from the player's settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if let Err(e) = ctx.resume() {
                log::warn!("AudioContext resume failed: {:?}", e);
            }
        }
    }

    /// Play whatever sounds a frame's events call for
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == AudioContextState::Suspended {
            self.resume();
        }

        match effect {
            SoundEffect::Jump => self.sweep(
                ctx,
                vol * 0.3,
                OscillatorType::Triangle,
                200.0,
                600.0,
                0.15,
            ),
            SoundEffect::DoubleJump => self.sweep(
                ctx,
                vol * 0.3,
                OscillatorType::Triangle,
                400.0,
                900.0,
                0.12,
            ),
            SoundEffect::FastFall => self.sweep(
                ctx,
                vol * 0.35,
                OscillatorType::Sine,
                500.0,
                80.0,
                0.12,
            ),
            SoundEffect::Attack => self.sweep(
                ctx,
                vol * 0.3,
                OscillatorType::Sawtooth,
                120.0,
                40.0,
                0.25,
            ),
            SoundEffect::Hit => self.sweep(
                ctx,
                vol * 0.6,
                OscillatorType::Square,
                150.0,
                60.0,
                0.2,
            ),
            SoundEffect::Pickup => self.arpeggio(
                ctx,
                vol * 0.25,
                OscillatorType::Sine,
                &[600.0, 800.0, 1000.0],
                0.08,
                0.15,
            ),
            SoundEffect::LevelUp => self.arpeggio(
                ctx,
                vol * 0.3,
                OscillatorType::Triangle,
                &[400.0, 500.0, 600.0, 800.0],
                0.1,
                0.4,
            ),
            SoundEffect::GameOver => self.arpeggio(
                ctx,
                vol * 0.3,
                OscillatorType::Sine,
                &[400.0, 350.0, 300.0, 200.0],
                0.2,
                0.3,
            ),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let built = (|| {
            let osc = ctx.create_oscillator()?;
            let gain = ctx.create_gain()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&ctx.destination())?;
            Ok::<_, wasm_bindgen::JsValue>((osc, gain))
        })();

        match built {
            Ok(nodes) => Some(nodes),
            Err(e) => {
                log::warn!("Could not build oscillator: {:?}", e);
                None
            }
        }
    }

    /// One tone gliding from `from` to `to` Hz
    fn sweep(
        &self,
        ctx: &AudioContext,
        peak: f32,
        osc_type: OscillatorType,
        from: f32,
        to: f32,
        length: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(peak, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + length)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + length)
            .ok();

        if osc.start().is_err() || osc.stop_with_when(t + length + 0.05).is_err() {
            log::warn!("Oscillator scheduling failed");
        }
    }

    /// Notes played one after another, `spacing` seconds apart
    fn arpeggio(
        &self,
        ctx: &AudioContext,
        peak: f32,
        osc_type: OscillatorType,
        notes: &[f32],
        spacing: f64,
        length: f64,
    ) {
        for (i, freq) in notes.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + i as f64 * spacing;
            gain.gain().set_value_at_time(peak, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            if osc.start_with_when(t).is_err() || osc.stop_with_when(t + length + 0.1).is_err() {
                log::warn!("Oscillator scheduling failed");
            }
        }
    }
}
