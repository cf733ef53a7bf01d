//! # Arcade Engine
//!
//! A small headless 2D engine for single-screen arcade games.
//!
//! ## Features
//!
//! - **Entity Table**: Generational handles over a slot map
//! - **Actions**: Timed move/rotate/remove actions with sequencing and repetition
//! - **Physics**: Impulse-driven rigid bodies with category/collision/contact bitmasks
//! - **Host Collaborators**: Audio, scene presentation and asset lookup behind traits
//! - **Headless Loop**: Fixed-step driver that feeds scripted touch input
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arcade_engine::prelude::*;
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn on_enter(&mut self, _viewport: Viewport) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn on_frame(&mut self, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut game = MyGame;
//!     Engine::run(config, &mut game, InputScript::new())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod actions;
pub mod physics;
pub mod events;
pub mod input;
pub mod audio;
pub mod scene;
pub mod assets;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineConfig, EngineError, EngineReport};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError, EngineReport,
        foundation::{
            math::{Vec2, Rect, Transform2D},
            time::{FrameClock, RepeatingTimer},
        },
        ecs::{World, Entity, Spatial},
        actions::{Action, ActionRunner, Directive, Timing},
        physics::{
            PhysicsWorld, RigidBody, BodyKind, BodyShape, CollisionLayers, Contact, ContactEvent,
        },
        events::EventQueue,
        input::{Touch, InputEvent, InputScript},
        audio::{AudioBackend, AudioError, LogAudio, SoundHandle},
        scene::{LogPresenter, ScenePresenter, SceneError, ScaleMode, Viewport, Presentation},
        assets::{AssetCatalog, AssetError, AssetKind},
        config::{Config, ConfigError},
    };
}
