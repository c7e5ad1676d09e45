//! Audio sink using the Web Audio API
//!
//! Every cue is synthesized from oscillators at play time; no sample files.
//! The host drains [`GameEvent`]s from the simulation each frame and feeds
//! them to [`AudioManager::handle`]. On native builds the manager is a silent
//! stub so headless tests and tools link without a browser.

use crate::sim::{GameEvent, HitSource};

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the cue for one simulation event
    #[cfg(target_arch = "wasm32")]
    pub fn handle(&self, event: &GameEvent) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match event {
            GameEvent::Throw => self.play_throw(ctx, vol),
            GameEvent::Jump => self.play_jump(ctx, vol),
            GameEvent::Delivery => self.play_delivery(ctx, vol),
            GameEvent::Heal => self.play_heal(ctx, vol),
            GameEvent::Coin => self.play_coin(ctx, vol),
            GameEvent::Bonus => self.play_bonus(ctx, vol),
            GameEvent::PowerUp(_) => self.play_power_up(ctx, vol),
            GameEvent::Hit(HitSource::Dog) => self.play_bark(ctx, vol),
            GameEvent::Hit(_) => self.play_thud(ctx, vol),
            GameEvent::Smash => self.play_smash(ctx, vol),
            GameEvent::Horn => self.play_horn(ctx, vol),
            GameEvent::GameOver { .. } => self.play_game_over(ctx, vol),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn handle(&self, event: &GameEvent) {
        let _ = (event, self.effective_volume());
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
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
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    /// Throw - quick whoosh up
    fn play_throw(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(700.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Jump - springy rise
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(450.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Delivery - happy ascending dings
    fn play_delivery(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Heal - warm two-note chime
    fn play_heal(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [500.0, 750.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    /// Coin - bright blip
    fn play_coin(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(900.0, t).ok();
        osc.frequency().set_value_at_time(1200.0, t + 0.04).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Bonus - celebratory run
    fn play_bonus(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    /// Power-up - swelling whoosh
    fn play_power_up(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.01, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.35, t + 0.1)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.35)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.45).ok();
    }

    /// Dog hit - two sharp barks
    fn play_bark(&self, ctx: &AudioContext, vol: f32) {
        for i in 0..2 {
            let delay = i as f64 * 0.15;
            if let Some((osc, gain)) = self.create_osc(ctx, 250.0, OscillatorType::Sawtooth) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc.frequency().set_value_at_time(250.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(120.0, t + 0.08)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.12).ok();
            }
        }
    }

    /// Generic hit - solid thump
    fn play_thud(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Obstacle smashed - crunchy crack
    fn play_smash(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                .ok();
            osc.frequency().set_value_at_time(100.0, t).ok();
            osc.frequency().set_value_at_time(2500.0, t + 0.02).ok();
            osc.frequency().set_value_at_time(150.0, t + 0.04).ok();
            osc.frequency().set_value_at_time(2000.0, t + 0.06).ok();
            osc.frequency().set_value_at_time(80.0, t + 0.1).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        // Bass thump underneath
        if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }
    }

    /// Vehicle horn - blaring two-tone
    fn play_horn(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for freq in [330.0, 415.0] {
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_volume_is_zero() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(1.0);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
    }

    #[test]
    fn test_volume_clamps() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(5.0);
        audio.set_sfx_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);

        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.5);
    }

    #[test]
    fn test_handle_is_safe_without_audio_device() {
        let audio = AudioManager::new();
        audio.handle(&GameEvent::Coin);
        audio.handle(&GameEvent::Hit(HitSource::Dog));
    }
}
