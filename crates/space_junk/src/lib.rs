//! # Space Junk
//!
//! A single-screen arcade game: the player steers a ship sideways while
//! debris falls from the top of the screen. The first hit ends the game.
//!
//! Debris motion and collision detection are pluggable:
//!
//! - motion: scripted fall-and-spin actions, or a single physics impulse
//! - detection: per-frame bounding-box polling, or physics contacts
//!   classified by category
//!
//! [`GameSession`] ties the systems together and implements
//! [`Application`](arcade_engine::Application), so it runs under the
//! headless [`Engine`](arcade_engine::Engine).

#![warn(missing_docs)]

pub mod categories;
pub mod components;
pub mod config;
pub mod error;
pub mod session;
pub mod stage;
pub mod systems;

pub use categories::{Category, Masks};
pub use components::{EntityKind, Node};
pub use config::{DetectorModel, GameConfig, MotionModel};
pub use error::GameError;
pub use session::{GameSession, SessionState, SessionStats};
pub use stage::Stage;

use arcade_engine::assets::{AssetCatalog, AssetKind};

/// Catalog holding every asset the configuration names
///
/// Used by headless runs where the host can provide anything asked for.
pub fn catalog_for(config: &GameConfig) -> AssetCatalog {
    let mut catalog = AssetCatalog::new()
        .with(AssetKind::Texture, config.assets.ship_sprite.as_str())
        .with(AssetKind::Effect, config.assets.thruster_effect.as_str())
        .with(AssetKind::Scene, config.assets.game_over_scene.as_str())
        .with(AssetKind::Sound, config.audio.background_music.as_str())
        .with(AssetKind::Sound, config.audio.explosion_sound.as_str());
    for sprite in &config.assets.debris {
        catalog.insert(AssetKind::Texture, sprite.name.as_str());
    }
    catalog
}
