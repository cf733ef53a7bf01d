//! Audio playback
//!
//! Platform-independent abstraction over sound playback. Playback is
//! fire-and-forget: the simulation never waits on a sound.

use std::collections::HashMap;

/// Handle to a playing sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle {
    /// Unique identifier for the sound
    pub id: u32,
}

/// Audio errors
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// The named sound is not known to the backend
    #[error("Sound not found: {0}")]
    NotFound(String),

    /// Playback could not start
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// The handle does not refer to a playing sound
    #[error("Invalid sound handle")]
    InvalidHandle,
}

/// Audio backend trait for platform abstraction
pub trait AudioBackend {
    /// Play a sound once
    fn play_one_shot(&mut self, name: &str) -> Result<SoundHandle, AudioError>;

    /// Play a sound in a loop until stopped
    fn play_looping(&mut self, name: &str) -> Result<SoundHandle, AudioError>;

    /// Stop a playing sound
    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError>;
}

/// Backend that logs playback instead of producing sound
///
/// Only sounds registered with [`with_sound`](Self::with_sound) can be
/// played, so missing assets fail the same way they would on a device.
#[derive(Debug, Default)]
pub struct LogAudio {
    known: Vec<String>,
    playing: HashMap<SoundHandle, String>,
    history: Vec<String>,
    next_id: u32,
}

impl LogAudio {
    /// Create a backend with no sounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a playable sound
    pub fn with_sound(mut self, name: impl Into<String>) -> Self {
        self.known.push(name.into());
        self
    }

    /// Names of every sound started so far, in order
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Check if a sound with this name is still playing
    pub fn is_playing(&self, name: &str) -> bool {
        self.playing.values().any(|playing| playing == name)
    }

    fn start(&mut self, name: &str, looping: bool) -> Result<SoundHandle, AudioError> {
        if !self.known.iter().any(|known| known == name) {
            return Err(AudioError::NotFound(name.to_string()));
        }

        let handle = SoundHandle { id: self.next_id };
        self.next_id += 1;
        self.history.push(name.to_string());
        if looping {
            self.playing.insert(handle, name.to_string());
        }
        log::info!("Playing {}{}", name, if looping { " (looping)" } else { "" });
        Ok(handle)
    }
}

impl AudioBackend for LogAudio {
    fn play_one_shot(&mut self, name: &str) -> Result<SoundHandle, AudioError> {
        self.start(name, false)
    }

    fn play_looping(&mut self, name: &str) -> Result<SoundHandle, AudioError> {
        self.start(name, true)
    }

    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let name = self.playing.remove(&handle).ok_or(AudioError::InvalidHandle)?;
        log::info!("Stopped {}", name);
        Ok(())
    }
}
