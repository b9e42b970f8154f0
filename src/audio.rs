//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no sound files needed. Playback failures are
//! logged and swallowed; the game never waits on audio.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::session::SoundKind;
use crate::settings::Settings;

/// Opening phrase of "Happy Birthday": (frequency Hz, length s)
const BIRTHDAY_PHRASE: [(f32, f64); 6] = [
    (392.00, 0.30),
    (392.00, 0.12),
    (440.00, 0.42),
    (392.00, 0.42),
    (523.25, 0.42),
    (493.88, 0.80),
];

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            muted: settings.muted,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.resume().is_err() {
                log::warn!("AudioContext resume rejected");
            }
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound cue
    pub fn play(&self, kind: SoundKind) {
        let Some(ctx) = &self.ctx else { return };

        // The primer exists to unlock output, so it always resumes
        if kind == SoundKind::Primer || ctx.state() == web_sys::AudioContextState::Suspended {
            self.resume();
        }

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let played = match kind {
            SoundKind::Primer => self.play_primer(ctx, vol),
            SoundKind::HeartFound => self.play_heart_found(ctx, vol),
            SoundKind::GiftOpened => self.play_gift_opened(ctx, vol),
            SoundKind::CandleBlow => self.play_candle_blow(ctx, vol),
            SoundKind::CakeSlice => self.play_cake_slice(ctx, vol),
            SoundKind::Celebration => self.play_celebration(ctx, vol),
        };
        if played.is_none() {
            log::error!("Audio playback failed for {}", kind.as_str());
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
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// One enveloped tone sweeping `from` -> `to` Hz, starting `offset` s from now
    #[allow(clippy::too_many_arguments)]
    fn tone(
        &self,
        ctx: &AudioContext,
        osc_type: OscillatorType,
        from: f32,
        to: f32,
        offset: f64,
        length: f64,
        peak: f32,
    ) -> Option<()> {
        let (osc, gain) = self.create_osc(ctx, from, osc_type)?;
        let t = ctx.current_time() + offset;

        gain.gain().set_value_at_time(0.0, t).ok()?;
        gain.gain().linear_ramp_to_value_at_time(peak, t + 0.01).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + length)
            .ok()?;
        osc.frequency().set_value_at_time(from, t).ok()?;
        if to != from {
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + length)
                .ok()?;
        }

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(t + length + 0.05).ok()?;
        Some(())
    }

    /// Primer - barely audible blip
    fn play_primer(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        self.tone(ctx, OscillatorType::Sine, 440.0, 440.0, 0.0, 0.05, vol * 0.01)
    }

    /// Heart found - bright upward pop
    fn play_heart_found(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        self.tone(ctx, OscillatorType::Sine, 600.0, 1200.0, 0.0, 0.12, vol * 0.5)
    }

    /// Gift opened - two-note chime (C5, G5)
    fn play_gift_opened(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        self.tone(ctx, OscillatorType::Triangle, 523.25, 523.25, 0.0, 0.12, vol * 0.4)?;
        self.tone(ctx, OscillatorType::Triangle, 783.99, 783.99, 0.1, 0.2, vol * 0.4)
    }

    /// Candles blown - falling breathy whoosh
    fn play_candle_blow(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        self.tone(ctx, OscillatorType::Sawtooth, 300.0, 80.0, 0.0, 0.5, vol * 0.15)?;
        self.tone(ctx, OscillatorType::Sawtooth, 310.0, 85.0, 0.02, 0.5, vol * 0.1)
    }

    /// Cake slice - short chop
    fn play_cake_slice(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        self.tone(ctx, OscillatorType::Square, 220.0, 110.0, 0.0, 0.15, vol * 0.2)
    }

    /// Celebration - opening phrase of the birthday song
    fn play_celebration(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        let mut offset = 0.0;
        for (freq, length) in BIRTHDAY_PHRASE {
            self.tone(ctx, OscillatorType::Triangle, freq, freq, offset, length, vol * 0.4)?;
            offset += length;
        }
        Some(())
    }
}
