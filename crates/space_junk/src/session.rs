//! Game session
//!
//! Owns the stage, the systems and the host collaborators for one play
//! through, and runs the systems in a fixed order every frame.

use crate::components::{EntityKind, Node};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::stage::Stage;
use crate::systems::{
    animation, controls, detector_for, policy_for, CollisionDetector, MotionPolicy, OutcomeHandler,
    Spawner,
};
use arcade_engine::prelude::*;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, scene not entered yet
    Idle,
    /// Debris is falling
    Playing,
    /// The ship was hit
    GameOver,
}

/// Running counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Debris created by the spawner
    pub spawned: u64,
    /// Scripted debris respawned at the top
    pub recycled: u64,
    /// Impulse debris destroyed below the screen
    pub reaped: u64,
    /// Debris destroyed by hitting the ship
    pub destroyed: u64,
    /// Frames simulated while playing
    pub frames: u64,
}

/// One play through of the debris encounter loop
pub struct GameSession<A: AudioBackend, P: ScenePresenter> {
    config: GameConfig,
    assets: AssetCatalog,
    audio: A,
    presenter: P,
    stage: Stage,
    spawner: Spawner,
    motion: Box<dyn MotionPolicy>,
    detector: Box<dyn CollisionDetector>,
    outcome: OutcomeHandler,
    state: SessionState,
    stats: SessionStats,
}

impl<A: AudioBackend, P: ScenePresenter> GameSession<A, P> {
    /// Create a session; the scene is built by [`enter`](Self::enter)
    pub fn new(
        config: GameConfig,
        assets: AssetCatalog,
        audio: A,
        presenter: P,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let mut stage = Stage::new(config.session.viewport(), config.gameplay.seed);
        let detector = detector_for(config.gameplay.detector);
        stage.contact_bodies = detector.uses_contacts();

        let motion = policy_for(&config.gameplay);
        log::info!("Session uses {} motion with {} detection", motion.name(), detector.name());

        Ok(Self {
            spawner: Spawner::new(&config.gameplay, &config.assets.debris),
            outcome: OutcomeHandler::new(&config),
            assets,
            audio,
            presenter,
            stage,
            motion,
            detector,
            state: SessionState::Idle,
            stats: SessionStats::default(),
            config,
        })
    }

    /// Check assets, place the ship, boundary and thruster, start the music
    ///
    /// Fails if a required asset is missing. A missing thruster effect only
    /// logs a warning.
    pub fn enter(&mut self, viewport: Viewport) -> Result<(), GameError> {
        if self.state != SessionState::Idle {
            log::warn!("Scene entered twice; ignoring");
            return Ok(());
        }

        self.check_assets()?;
        self.stage.viewport = viewport;

        if self.stage.contact_bodies {
            let edge = Node::new(
                EntityKind::Edge,
                "edge",
                Vec2::new(viewport.width * 0.5, viewport.height * 0.5),
                Vec2::new(viewport.width, viewport.height),
            );
            let boundary = BodyShape::edge_loop(viewport.width, viewport.height);
            self.stage.spawn_with_body(edge, RigidBody::fixed(boundary));
        }

        let gameplay = &self.config.gameplay;
        let ship_position = Vec2::new(viewport.width * 0.5, gameplay.ship_y);
        let ship = Node::new(
            EntityKind::Ship,
            self.config.assets.ship_sprite.as_str(),
            ship_position,
            self.config.assets.ship_extent(),
        );
        let ship = if self.stage.contact_bodies {
            let body = RigidBody::dynamic(BodyShape::circle_for_size(ship.size))
                .with_gravity(false)
                .with_mass(gameplay.ship_mass, gameplay.ship_mass);
            self.stage.spawn_with_body(ship, body)
        } else {
            self.stage.spawn_node(ship)
        };
        self.stage.ship = Some(ship);

        let effect = &self.config.assets.thruster_effect;
        if self.assets.contains(AssetKind::Effect, effect) {
            let flame = Node::new(
                EntityKind::Effect,
                effect.as_str(),
                ship_position - Vec2::new(0.0, gameplay.thruster_offset),
                Vec2::zeros(),
            );
            self.stage.thruster = Some(self.stage.spawn_node(flame));
        } else {
            log::warn!("Thruster effect {} not found; continuing without it", effect);
        }

        if self.config.audio.enabled {
            let music = self.audio.play_looping(&self.config.audio.background_music)?;
            self.outcome.set_music(music);
        }

        self.state = SessionState::Playing;
        log::info!("Scene entered ({}x{})", viewport.width, viewport.height);
        Ok(())
    }

    fn check_assets(&self) -> Result<(), GameError> {
        let assets = &self.config.assets;
        self.assets.require(AssetKind::Texture, &assets.ship_sprite)?;
        for sprite in &assets.debris {
            self.assets.require(AssetKind::Texture, &sprite.name)?;
        }
        if self.config.audio.enabled {
            self.assets.require(AssetKind::Sound, &self.config.audio.background_music)?;
            self.assets.require(AssetKind::Sound, &self.config.audio.explosion_sound)?;
        }
        self.assets.require(AssetKind::Scene, &assets.game_over_scene)?;
        Ok(())
    }

    /// Run one frame: spawn, actions, physics, motion post-step, detection, outcome
    pub fn frame(&mut self, delta_time: f32) -> Result<(), GameError> {
        if self.state != SessionState::Playing {
            return Ok(());
        }
        self.stats.frames += 1;

        let spawned = self.spawner.tick(delta_time, &mut self.stage, self.motion.as_ref());
        self.stats.spawned += spawned.len() as u64;

        let removed = animation::run_actions(&mut self.stage, delta_time);

        let stage = &mut self.stage;
        stage.physics.step(delta_time, &mut stage.world, &mut stage.contacts);

        let report = self.motion.after_step(&mut self.stage, removed);
        self.stats.recycled += report.recycled as u64;
        self.stats.reaped += report.reaped as u64;

        let detection = self.detector.detect(&mut self.stage);
        self.stage.contacts.clear();
        self.stats.destroyed += detection.destroyed.len() as u64;

        if detection.game_over {
            self.finish()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), GameError> {
        if self.state == SessionState::GameOver {
            return Ok(());
        }
        self.state = SessionState::GameOver;
        self.spawner.stop();

        self.outcome
            .trigger(&mut self.stage, self.motion.as_ref(), &mut self.audio, &mut self.presenter)?;
        log::info!(
            "Game over after {} frames: {} spawned, {} recycled, {} reaped",
            self.stats.frames,
            self.stats.spawned,
            self.stats.recycled,
            self.stats.reaped
        );
        Ok(())
    }

    /// Handle touches going down
    pub fn touch_began(&mut self, touches: &[Touch]) -> Result<(), GameError> {
        if self.state != SessionState::Playing {
            return Ok(());
        }
        controls::tap(&mut self.stage, touches, &self.config.gameplay)
    }

    /// Handle touches moving
    pub fn touch_moved(&mut self, touches: &[Touch]) -> Result<(), GameError> {
        if self.state != SessionState::Playing {
            return Ok(());
        }
        controls::drag(&mut self.stage, touches, &self.config.gameplay)
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Running counters
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Shared simulation state
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Shared simulation state, mutably
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Audio backend
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Scene presenter
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Whether the spawner is still producing debris
    pub fn is_spawning(&self) -> bool {
        self.spawner.is_running()
    }

    /// Settings the session was created with
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

impl<A: AudioBackend, P: ScenePresenter> Application for GameSession<A, P> {
    fn on_enter(&mut self, viewport: Viewport) -> Result<(), AppError> {
        self.enter(viewport).map_err(AppError::from)
    }

    fn on_frame(&mut self, delta_time: f32) -> Result<(), AppError> {
        self.frame(delta_time).map_err(AppError::from)
    }

    fn on_touch_begin(&mut self, touches: &[Touch]) -> Result<(), AppError> {
        self.touch_began(touches).map_err(AppError::from)
    }

    fn on_touch_move(&mut self, touches: &[Touch]) -> Result<(), AppError> {
        self.touch_moved(touches).map_err(AppError::from)
    }

    fn is_finished(&self) -> bool {
        self.state == SessionState::GameOver
    }
}
