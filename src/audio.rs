//! Audio seam
//!
//! The game only decides *which* clip to play and how loud. Decoding and
//! mixing belong to an [`AudioBackend`] supplied by the platform layer.

use std::path::{Path, PathBuf};

use crate::error::GameError;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Background theme, looped from initialization on
    Theme,
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a solid block
    SolidHit,
    /// Ball breaks a block
    BlockBreak,
    /// Pickup collected
    PowerUp,
}

impl SoundEffect {
    /// Clip path relative to the resource directory
    pub fn clip_name(self) -> &'static str {
        match self {
            SoundEffect::Theme => "audio/breakout.mp3",
            SoundEffect::PaddleHit => "audio/bleep.mp3",
            SoundEffect::SolidHit => "audio/solid.wav",
            SoundEffect::BlockBreak => "audio/bleep.wav",
            SoundEffect::PowerUp => "audio/powerup.wav",
        }
    }

    pub fn is_music(self) -> bool {
        matches!(self, SoundEffect::Theme)
    }

    /// The sound a simulation event makes, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BlockDestroyed { .. } => Some(SoundEffect::BlockBreak),
            GameEvent::SolidBlockHit => Some(SoundEffect::SolidHit),
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            _ => None,
        }
    }
}

/// Plays decoded clips. Implemented by the platform layer.
pub trait AudioBackend {
    fn play(&mut self, clip: &Path, volume: f32, looping: bool) -> Result<(), GameError>;
}

/// Backend that drops every request (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, _clip: &Path, _volume: f32, _looping: bool) -> Result<(), GameError> {
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    resource_dir: PathBuf,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        let mut audio = Self {
            backend,
            resource_dir: settings.resource_dir.clone(),
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: settings.muted,
        };
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio
    }

    /// Silent manager for tests and headless runs
    pub fn silent(settings: &Settings) -> Self {
        Self::new(Box::new(NullAudio), settings)
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

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume for a clip
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

    /// Play a sound effect. Backend failures are logged and swallowed.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }

        let clip = self.resource_dir.join(effect.clip_name());
        if let Err(e) = self.backend.play(&clip, vol, effect.is_music()) {
            log::warn!("Failed to play {:?}: {}", effect, e);
        }
    }

    /// Start the looping background theme
    pub fn start_music(&mut self) {
        self.play(SoundEffect::Theme);
    }

    /// Play whatever sounds a batch of simulation events calls for
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sim::PowerUpKind;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// One request seen by [`RecordingAudio`]
    #[derive(Debug, Clone, PartialEq)]
    pub struct Played {
        pub clip: PathBuf,
        pub volume: f32,
        pub looping: bool,
    }

    /// Backend that remembers every request
    #[derive(Debug, Default, Clone)]
    pub struct RecordingAudio {
        pub played: Rc<RefCell<Vec<Played>>>,
    }

    impl AudioBackend for RecordingAudio {
        fn play(&mut self, clip: &Path, volume: f32, looping: bool) -> Result<(), GameError> {
            self.played.borrow_mut().push(Played {
                clip: clip.to_path_buf(),
                volume,
                looping,
            });
            Ok(())
        }
    }

    struct FailingAudio;

    impl AudioBackend for FailingAudio {
        fn play(&mut self, clip: &Path, _volume: f32, _looping: bool) -> Result<(), GameError> {
            Err(GameError::UnknownResource {
                kind: "clip",
                name: clip.display().to_string(),
            })
        }
    }

    fn recording(settings: &Settings) -> (AudioManager, Rc<RefCell<Vec<Played>>>) {
        let backend = RecordingAudio::default();
        let played = backend.played.clone();
        (AudioManager::new(Box::new(backend), settings), played)
    }

    #[test]
    fn test_theme_loops_on_music_channel() {
        let settings = Settings {
            master_volume: 0.5,
            music_volume: 0.6,
            sfx_volume: 1.0,
            ..Settings::default()
        };
        let (mut audio, played) = recording(&settings);
        audio.start_music();

        let played = played.borrow();
        assert_eq!(played.len(), 1);
        assert!(played[0].looping);
        assert!((played[0].volume - 0.3).abs() < 1e-6);
        assert_eq!(
            played[0].clip,
            settings.resource_dir.join("audio/breakout.mp3")
        );
    }

    #[test]
    fn test_events_map_to_clips() {
        let (mut audio, played) = recording(&Settings::default());
        audio.play_events(&[
            GameEvent::PaddleHit,
            GameEvent::LifeLost { remaining: 2 },
            GameEvent::BlockDestroyed {
                position: Vec2::ZERO,
            },
            GameEvent::SolidBlockHit,
            GameEvent::PowerUpCollected(PowerUpKind::Chaos),
            GameEvent::PowerUpExpired(PowerUpKind::Chaos),
        ]);

        let clips: Vec<_> = played
            .borrow()
            .iter()
            .map(|p| p.clip.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(clips, ["bleep.mp3", "bleep.wav", "solid.wav", "powerup.wav"]);
        assert!(played.borrow().iter().all(|p| !p.looping));
    }

    #[test]
    fn test_muted_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let (mut audio, played) = recording(&settings);
        audio.start_music();
        audio.play(SoundEffect::PaddleHit);
        assert!(played.borrow().is_empty());

        audio.set_muted(false);
        audio.play(SoundEffect::PaddleHit);
        assert_eq!(played.borrow().len(), 1);
    }

    #[test]
    fn test_volumes_are_clamped() {
        let (mut audio, played) = recording(&Settings::default());
        audio.set_master_volume(4.0);
        audio.set_sfx_volume(-1.0);
        audio.play(SoundEffect::SolidHit);
        assert!(played.borrow().is_empty());

        audio.set_sfx_volume(2.0);
        audio.play(SoundEffect::SolidHit);
        assert_eq!(played.borrow()[0].volume, 1.0);
    }

    #[test]
    fn test_backend_failure_is_swallowed() {
        let mut audio = AudioManager::new(Box::new(FailingAudio), &Settings::default());
        audio.play(SoundEffect::PowerUp);
        audio.play_events(&[GameEvent::PaddleHit]);
    }
}
