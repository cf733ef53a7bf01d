//! Game configuration
//!
//! Loaded from `.toml` or `.ron` through [`Config`]. Every section has
//! defaults, so a partial file only overrides what it names.

use arcade_engine::config::{Config, ConfigError};
use arcade_engine::foundation::math::Vec2;
use arcade_engine::scene::Viewport;
use arcade_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Asset names and sprite sizes
    pub assets: AssetConfig,

    /// Audio settings
    pub audio: AudioConfig,

    /// Screen and loop settings
    pub session: SessionConfig,
}

impl Config for GameConfig {}

/// How debris moves after it spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionModel {
    /// Repeating fall-and-spin actions, recycled at the bottom
    #[default]
    Scripted,
    /// One impulse, then the physics integrator
    Impulse,
}

/// How the ship/debris collision is noticed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorModel {
    /// Bounding-box test every frame
    Polling,
    /// Physics contact events classified by category
    #[default]
    Contact,
    /// Any physics contact ends the game
    AnyContact,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Seconds between spawns
    pub spawn_interval: f32,

    /// How far below the bottom edge scripted debris falls
    pub fall_overshoot: f32,

    /// Shortest scripted fall, seconds
    pub fall_duration_min: f32,

    /// Longest scripted fall (exclusive), seconds
    pub fall_duration_max: f32,

    /// Strongest downward impulse
    pub impulse_dy_min: f32,

    /// Weakest downward impulse
    pub impulse_dy_max: f32,

    /// Spin impulse applied to impulse-driven debris
    pub angular_impulse: f32,

    /// Debris mass
    pub debris_mass: f32,

    /// Debris rotational inertia
    pub debris_inertia: f32,

    /// Impulse-driven debris is destroyed once its top edge is this far below the screen
    pub reap_margin: f32,

    /// Horizontal distance of one tap step
    pub tap_step: f32,

    /// Seconds for one tap step
    pub tap_duration: f32,

    /// Seconds for the ship to follow a drag
    pub drag_duration: f32,

    /// Height of the ship above the bottom edge
    pub ship_y: f32,

    /// Ship mass
    pub ship_mass: f32,

    /// Distance of the thruster flame below the ship
    pub thruster_offset: f32,

    /// Debris motion model
    pub motion: MotionModel,

    /// Collision detection model
    pub detector: DetectorModel,

    /// Random seed; entropy when unset
    pub seed: Option<u64>,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 1.0,
            fall_overshoot: 50.0,
            fall_duration_min: 2.0,
            fall_duration_max: 5.0,
            impulse_dy_min: -150.0,
            impulse_dy_max: -100.0,
            angular_impulse: 0.03,
            debris_mass: 1.0,
            debris_inertia: 0.05,
            reap_margin: 50.0,
            tap_step: 50.0,
            tap_duration: 0.5,
            drag_duration: 0.25,
            ship_y: 150.0,
            ship_mass: 1.0,
            thruster_offset: 50.0,
            motion: MotionModel::default(),
            detector: DetectorModel::default(),
            seed: None,
        }
    }
}

/// A debris sprite and its size in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisSprite {
    /// Texture name
    pub name: String,
    /// Width and height
    pub size: [f32; 2],
}

impl DebrisSprite {
    /// Create a sprite entry
    pub fn new(name: &str, width: f32, height: f32) -> Self {
        Self {
            name: name.to_string(),
            size: [width, height],
        }
    }

    /// Size as a vector
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.size[0], self.size[1])
    }
}

/// Asset names and sprite sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Ship texture
    pub ship_sprite: String,

    /// Ship width and height
    pub ship_size: [f32; 2],

    /// Debris variants, picked uniformly
    pub debris: Vec<DebrisSprite>,

    /// Particle effect trailing the ship; optional
    pub thruster_effect: String,

    /// Scene shown when the game ends
    pub game_over_scene: String,
}

impl AssetConfig {
    /// Ship size as a vector
    pub fn ship_extent(&self) -> Vec2 {
        Vec2::new(self.ship_size[0], self.ship_size[1])
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            ship_sprite: "player".to_string(),
            ship_size: [99.0, 75.0],
            debris: vec![
                DebrisSprite::new("meteorBrown_big3", 89.0, 82.0),
                DebrisSprite::new("meteorGrey_big4", 98.0, 96.0),
                DebrisSprite::new("meteorGrey_med1", 43.0, 43.0),
                DebrisSprite::new("wingGreen_6", 40.0, 57.0),
                DebrisSprite::new("wingRed_2", 45.0, 52.0),
            ],
            thruster_effect: "thrusterFlame.sks".to_string(),
            game_over_scene: "GameOver".to_string(),
        }
    }
}

/// Audio configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Looping background track
    pub background_music: String,

    /// One-shot sound played on game over
    pub explosion_sound: String,

    /// Audio enabled
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            background_music: "backgroundSound.wav".to_string(),
            explosion_sound: "explosionSound.wav".to_string(),
            enabled: true,
        }
    }
}

/// Screen and loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Screen width in points
    pub width: f32,

    /// Screen height in points
    pub height: f32,

    /// Simulation step, seconds
    pub fixed_dt: f32,

    /// Largest single step, seconds
    pub max_dt: f32,

    /// Frame limit for headless runs
    pub max_frames: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 750.0,
            height: 1334.0,
            fixed_dt: 1.0 / 60.0,
            max_dt: 0.1,
            max_frames: 60 * 60,
        }
    }
}

impl SessionConfig {
    /// Screen size
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Engine settings for a headless run
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            viewport: self.viewport(),
            fixed_dt: self.fixed_dt,
            max_dt: self.max_dt,
            max_frames: self.max_frames,
        }
    }
}

impl GameConfig {
    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.require_finite()?;

        let gameplay = &self.gameplay;
        let session = &self.session;
        if session.width <= 0.0 || session.height <= 0.0 {
            return Err(invalid("session.width", "screen must be non-empty"));
        }
        if session.fixed_dt <= 0.0 || session.max_dt < session.fixed_dt {
            return Err(invalid("session.fixed_dt", "step must be positive and not above max_dt"));
        }
        if gameplay.spawn_interval < session.fixed_dt {
            return Err(invalid("gameplay.spawn_interval", "must be at least one simulation step"));
        }
        if gameplay.fall_duration_min <= 0.0
            || gameplay.fall_duration_max < gameplay.fall_duration_min
        {
            return Err(invalid(
                "gameplay.fall_duration_min",
                "durations must be positive and min must not exceed max",
            ));
        }
        if gameplay.impulse_dy_max < gameplay.impulse_dy_min {
            return Err(invalid("gameplay.impulse_dy_max", "must not be below impulse_dy_min"));
        }
        if gameplay.debris_mass <= 0.0
            || gameplay.debris_inertia <= 0.0
            || gameplay.ship_mass <= 0.0
        {
            return Err(invalid("gameplay.debris_mass", "masses and inertia must be positive"));
        }
        if gameplay.tap_duration < 0.0 || gameplay.drag_duration < 0.0 {
            return Err(invalid("gameplay.tap_duration", "durations must not be negative"));
        }
        if self.assets.debris.is_empty() {
            return Err(invalid("assets.debris", "at least one debris sprite is required"));
        }
        Ok(())
    }

    fn require_finite(&self) -> Result<(), ConfigError> {
        let gameplay = &self.gameplay;
        let session = &self.session;
        let fields = [
            ("gameplay.spawn_interval", gameplay.spawn_interval),
            ("gameplay.fall_overshoot", gameplay.fall_overshoot),
            ("gameplay.fall_duration_min", gameplay.fall_duration_min),
            ("gameplay.fall_duration_max", gameplay.fall_duration_max),
            ("gameplay.impulse_dy_min", gameplay.impulse_dy_min),
            ("gameplay.impulse_dy_max", gameplay.impulse_dy_max),
            ("gameplay.angular_impulse", gameplay.angular_impulse),
            ("gameplay.debris_mass", gameplay.debris_mass),
            ("gameplay.debris_inertia", gameplay.debris_inertia),
            ("gameplay.reap_margin", gameplay.reap_margin),
            ("gameplay.tap_step", gameplay.tap_step),
            ("gameplay.tap_duration", gameplay.tap_duration),
            ("gameplay.drag_duration", gameplay.drag_duration),
            ("gameplay.ship_y", gameplay.ship_y),
            ("gameplay.ship_mass", gameplay.ship_mass),
            ("gameplay.thruster_offset", gameplay.thruster_offset),
            ("session.width", session.width),
            ("session.height", session.height),
            ("session.fixed_dt", session.fixed_dt),
            ("session.max_dt", session.max_dt),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(field, "must be a finite number"));
        }

        let mut sizes = self
            .assets
            .ship_size
            .iter()
            .chain(self.assets.debris.iter().flat_map(|sprite| &sprite.size));
        if sizes.any(|value| !value.is_finite() || *value < 0.0) {
            return Err(invalid("assets", "sprite sizes must be finite and non-negative"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.assets.debris.len(), 5);
        assert_eq!(config.gameplay.motion, MotionModel::Scripted);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let name = format!("space_junk_{}_partial.toml", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(
            &path,
            "[gameplay]\nmotion = \"impulse\"\ndetector = \"polling\"\nseed = 7\n\n\
             [session]\nwidth = 800.0\n",
        )
        .unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(config.gameplay.motion, MotionModel::Impulse);
        assert_eq!(config.gameplay.detector, DetectorModel::Polling);
        assert_eq!(config.gameplay.seed, Some(7));
        assert_eq!(config.session.width, 800.0);
        assert_eq!(config.session.height, SessionConfig::default().height);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_validate_rejects_empty_catalog() {
        let mut config = GameConfig::default();
        config.assets.debris.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "assets.debris", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_values() {
        let mut config = GameConfig::default();
        config.session.width = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "session.width", .. })
        ));

        let mut config = GameConfig::default();
        config.gameplay.fall_duration_max = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "gameplay.fall_duration_max", .. })
        ));

        let mut config = GameConfig::default();
        config.assets.debris[2].size[0] = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "assets", .. })));
    }

    #[test]
    fn test_validate_rejects_spawn_interval_below_step() {
        let mut config = GameConfig::default();
        config.gameplay.spawn_interval = 1e-6;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "gameplay.spawn_interval", .. })
        ));

        config.gameplay.spawn_interval = config.session.fixed_dt;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_infinite_width_in_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("space_junk_{}_inf.toml", std::process::id()));
        std::fs::write(&path, "[session]\nwidth = inf\n").unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert!(config.session.width.is_infinite());
        assert!(config.validate().is_err());
        let _ = std::fs::remove_file(path);
    }
}
