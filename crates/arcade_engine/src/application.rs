//! Application trait and lifecycle management

use crate::config::ConfigError;
use crate::input::Touch;
use crate::scene::Viewport;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a game with [`Engine::run`](crate::Engine::run).
/// Touch callbacks are delivered between frames, never during one.
pub trait Application {
    /// Set up the scene
    ///
    /// Called once before the first frame with the screen size.
    fn on_enter(&mut self, viewport: Viewport) -> Result<(), AppError>;

    /// Advance the game by one frame
    ///
    /// # Arguments
    /// * `delta_time` - Time since last frame in seconds
    fn on_frame(&mut self, delta_time: f32) -> Result<(), AppError>;

    /// Fingers went down
    fn on_touch_begin(&mut self, _touches: &[Touch]) -> Result<(), AppError> {
        Ok(())
    }

    /// Fingers moved
    fn on_touch_move(&mut self, _touches: &[Touch]) -> Result<(), AppError> {
        Ok(())
    }

    /// Whether the engine should stop running frames
    fn is_finished(&self) -> bool {
        false
    }
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
