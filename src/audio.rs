//! Audio adapter
//!
//! Sounds are fire-and-forget: the game asks for an effect at a volume and
//! never looks at the result.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Main menu background theme
    MenuTheme,
    /// Coin picked up from the field
    CoinCollect,
}

impl SoundEffect {
    /// Whether this plays on the music channel rather than effects
    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::MenuTheme)
    }
}

/// Platform audio output
pub trait AudioBackend {
    /// Start playing `effect` at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Silence `effect` if it is still playing
    fn stop(&mut self, effect: SoundEffect);
}

/// Backend that only logs requests and records them
#[derive(Debug, Default)]
pub struct LogAudio {
    pub played: Vec<(SoundEffect, f32)>,
    pub stopped: Vec<SoundEffect>,
}

impl AudioBackend for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("play {:?} at volume {:.2}", effect, volume);
        self.played.push((effect, volume));
    }

    fn stop(&mut self, effect: SoundEffect) {
        log::debug!("stop {:?}", effect);
        self.stopped.push(effect);
    }
}

/// Applies volume settings before handing sounds to the backend
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Stop a looping sound such as the menu theme
    pub fn stop(&mut self, effect: SoundEffect) {
        self.backend.stop(effect);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
