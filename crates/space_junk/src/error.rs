//! Game errors

use arcade_engine::assets::AssetError;
use arcade_engine::audio::AudioError;
use arcade_engine::config::ConfigError;
use arcade_engine::scene::SceneError;
use arcade_engine::AppError;
use thiserror::Error;

/// Errors raised by the game session
#[derive(Error, Debug)]
pub enum GameError {
    /// A required entity is gone
    #[error("Entity not found: {0}")]
    EntityNotFound(&'static str),

    /// A required asset is missing at startup
    #[error("Asset load failed: {0}")]
    AssetLoadFailed(#[from] AssetError),

    /// Configuration could not be used
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Audio backend failure
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Scene presentation failure
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

impl From<GameError> for AppError {
    fn from(error: GameError) -> Self {
        match error {
            GameError::Config(inner) => Self::Config(inner),
            GameError::AssetLoadFailed(inner) => Self::Asset(inner.to_string()),
            other => Self::GameLogic(Box::new(other)),
        }
    }
}
