//! Game-over handling

use crate::config::GameConfig;
use crate::error::GameError;
use crate::stage::Stage;
use crate::systems::motion::MotionPolicy;
use arcade_engine::prelude::*;

/// Runs the terminal sequence exactly once per session
#[derive(Debug, Clone)]
pub struct OutcomeHandler {
    explosion_sound: String,
    game_over_scene: String,
    audio_enabled: bool,
    music: Option<SoundHandle>,
    fired: bool,
}

impl OutcomeHandler {
    /// Create a handler from the asset and audio settings
    pub fn new(config: &GameConfig) -> Self {
        Self {
            explosion_sound: config.audio.explosion_sound.clone(),
            game_over_scene: config.assets.game_over_scene.clone(),
            audio_enabled: config.audio.enabled,
            music: None,
            fired: false,
        }
    }

    /// Remember the background music so it can be stopped
    pub fn set_music(&mut self, handle: SoundHandle) {
        self.music = Some(handle);
    }

    /// Whether the terminal sequence already ran
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Halt debris, stop the music, play the explosion and present the game-over scene
    ///
    /// Returns `Ok(false)` without side effects on every call after the first.
    /// Sound failures are logged; scene failures are returned.
    pub fn trigger(
        &mut self,
        stage: &mut Stage,
        motion: &dyn MotionPolicy,
        audio: &mut dyn AudioBackend,
        presenter: &mut dyn ScenePresenter,
    ) -> Result<bool, GameError> {
        if self.fired {
            return Ok(false);
        }
        self.fired = true;
        log::info!("Ship hit by debris, game over");

        motion.halt(stage);

        if let Some(music) = self.music.take() {
            if let Err(e) = audio.stop(music) {
                log::warn!("Failed to stop background music: {}", e);
            }
        }

        if self.audio_enabled {
            if let Err(e) = audio.play_one_shot(&self.explosion_sound) {
                log::warn!("Failed to play {}: {}", self.explosion_sound, e);
            }
        }

        let scene = presenter.load(&self.game_over_scene)?;
        presenter.present(scene, ScaleMode::AspectFill)?;
        Ok(true)
    }
}
