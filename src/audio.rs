//! Sound effects
//!
//! Effects are fire-and-forget: each play rewinds the sample to the start.
//! When a sample cannot be loaded a short synthesized tone stands in.

use crate::sim::GameEvent;
use crate::sim::breakout::BlockStatus;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a block
    BlockHit,
    /// A normal block breaks
    BlockDestroyed,
    /// The goal block breaks
    Goal,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::BlockHit,
        SoundEffect::BlockDestroyed,
        SoundEffect::Goal,
    ];

    /// The effect a simulation event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BlockHit { .. } => Some(SoundEffect::BlockHit),
            GameEvent::BlockDestroyed {
                was: BlockStatus::Goal,
                ..
            } => Some(SoundEffect::Goal),
            GameEvent::BlockDestroyed { .. } => Some(SoundEffect::BlockDestroyed),
            _ => None,
        }
    }

    /// Tone used when the sample is unavailable: (start Hz, end Hz, seconds)
    pub fn fallback_tone(&self) -> (f32, f32, f64) {
        match self {
            SoundEffect::BlockHit => (300.0, 300.0, 0.08),
            SoundEffect::BlockDestroyed => (150.0, 60.0, 0.15),
            SoundEffect::Goal => (400.0, 800.0, 0.4),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::config::AudioConfig;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        samples: Vec<(SoundEffect, HtmlAudioElement)>,
        volume: f32,
        muted: bool,
        unlocked: bool,
    }

    impl AudioManager {
        pub fn new(config: &AudioConfig) -> Self {
            let mut samples = Vec::new();
            for effect in SoundEffect::ALL {
                let src = match effect {
                    SoundEffect::BlockHit => &config.block_hit_src,
                    SoundEffect::BlockDestroyed => &config.block_destroyed_src,
                    SoundEffect::Goal => &config.goal_src,
                };
                if src.is_empty() {
                    continue;
                }
                match HtmlAudioElement::new_with_src(src) {
                    Ok(el) => samples.push((effect, el)),
                    Err(e) => log::warn!("Could not load {}: {:?}", src, e),
                }
            }

            Self {
                ctx: None,
                samples,
                volume: config.volume.clamp(0.0, 1.0),
                muted: config.muted,
                unlocked: false,
            }
        }

        /// Create and resume the audio context. Browsers only allow this
        /// from a user gesture, so it runs on the first click or key press.
        pub fn unlock(&mut self) {
            if self.unlocked {
                return;
            }
            self.unlocked = true;
            match AudioContext::new() {
                Ok(ctx) => {
                    if ctx.state() == web_sys::AudioContextState::Suspended {
                        let _ = ctx.resume();
                    }
                    self.ctx = Some(ctx);
                    log::info!("Audio unlocked");
                }
                Err(_) => log::warn!("Failed to create AudioContext - synthesized fallback disabled"),
            }
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn is_muted(&self) -> bool {
            self.muted
        }

        /// Play whatever sounds a batch of events calls for. Returns how
        /// many effects were played.
        pub fn handle_events(&self, events: &[GameEvent]) -> usize {
            events
                .iter()
                .filter_map(SoundEffect::for_event)
                .filter(|effect| self.play(*effect))
                .count()
        }

        pub fn play(&self, effect: SoundEffect) -> bool {
            if self.muted || self.volume <= 0.0 || !self.unlocked {
                return false;
            }

            if let Some((_, el)) = self.samples.iter().find(|(e, _)| *e == effect) {
                el.set_volume(self.volume as f64);
                el.set_current_time(0.0);
                let _ = el.play();
                return true;
            }

            match &self.ctx {
                Some(ctx) => {
                    play_tone(ctx, effect.fallback_tone(), self.volume);
                    true
                }
                None => false,
            }
        }
    }

    fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Triangle);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Sweep from `start` to `end` Hz with a decaying envelope
    fn play_tone(ctx: &AudioContext, (start, end, duration): (f32, f32, f64), vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, start) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.frequency().set_value_at_time(start, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(end, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration + 0.05).ok();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::SoundEffect;
    use crate::config::AudioConfig;
    use crate::sim::GameEvent;

    /// Headless stand-in: effects are only traced
    #[derive(Debug, Default)]
    pub struct AudioManager {
        volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(config: &AudioConfig) -> Self {
            Self {
                volume: config.volume.clamp(0.0, 1.0),
                muted: config.muted,
            }
        }

        pub fn unlock(&mut self) {}

        pub fn is_muted(&self) -> bool {
            self.muted
        }

        pub fn handle_events(&self, events: &[GameEvent]) -> usize {
            events
                .iter()
                .filter_map(SoundEffect::for_event)
                .filter(|effect| self.play(*effect))
                .count()
        }

        pub fn play(&self, effect: SoundEffect) -> bool {
            if self.muted || self.volume <= 0.0 {
                return false;
            }
            log::trace!("sfx {:?} at volume {:.2}", effect, self.volume);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::breakout::PowerUpKind;

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BlockHit { column: 1, row: 2 }),
            Some(SoundEffect::BlockHit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BlockDestroyed {
                column: 1,
                row: 2,
                was: BlockStatus::Normal
            }),
            Some(SoundEffect::BlockDestroyed)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BlockDestroyed {
                column: 5,
                row: 0,
                was: BlockStatus::Goal
            }),
            Some(SoundEffect::Goal)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::PaddleHit), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpCollected(PowerUpKind::MultiBall)),
            None
        );
    }

    #[test]
    fn test_fallback_tones_are_audible() {
        for effect in SoundEffect::ALL {
            let (start, end, secs) = effect.fallback_tone();
            assert!(start > 20.0 && end > 20.0);
            assert!(secs > 0.0);
        }
    }

    #[test]
    fn test_native_manager_counts_played_effects() {
        let events = [
            GameEvent::BlockHit { column: 0, row: 0 },
            GameEvent::BlockDestroyed {
                column: 0,
                row: 0,
                was: BlockStatus::Normal,
            },
            GameEvent::Won,
        ];
        let mut audio = AudioManager::new(&crate::config::AudioConfig::default());
        audio.unlock();
        assert!(!audio.is_muted());
        assert_eq!(audio.handle_events(&events), 2);
        assert!(audio.play(SoundEffect::Goal));

        let audio = AudioManager::new(&crate::config::AudioConfig {
            muted: true,
            ..Default::default()
        });
        assert!(audio.is_muted());
        assert_eq!(audio.handle_events(&events), 0);
        assert!(!audio.play(SoundEffect::Goal));
    }

    #[test]
    fn test_native_manager_silent_at_zero_volume() {
        let config = crate::config::AudioConfig {
            volume: -1.0,
            ..Default::default()
        };
        let audio = AudioManager::new(&config);
        assert!(!audio.is_muted());
        assert_eq!(audio.handle_events(&[GameEvent::BlockHit { column: 0, row: 0 }]), 0);
    }
}
