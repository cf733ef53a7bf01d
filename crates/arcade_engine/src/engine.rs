//! Core engine implementation
//!
//! Headless fixed-step driver. Each iteration delivers the scripted input
//! that is due, then advances the application by one frame.

use crate::{
    application::Application,
    foundation::time::FrameClock,
    input::{InputEvent, InputScript},
    scene::Viewport,
};
use thiserror::Error;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Screen size handed to the application
    pub viewport: Viewport,

    /// Simulated seconds per frame
    pub fixed_dt: f32,

    /// Upper clamp for a single frame step
    pub max_dt: f32,

    /// Stop after this many frames
    pub max_frames: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            fixed_dt: 1.0 / 60.0,
            max_dt: 0.1,
            max_frames: 60 * 60,
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineReport {
    /// Frames simulated
    pub frames: u64,
    /// Seconds of simulated time
    pub simulated_time: f32,
    /// Whether the application asked to stop before the frame limit
    pub finished: bool,
}

/// Main engine struct
pub struct Engine {
    config: EngineConfig,
    clock: FrameClock,
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        if config.fixed_dt <= 0.0 || !config.fixed_dt.is_finite() {
            return Err(EngineError::InitializationFailed(format!(
                "fixed_dt must be positive, got {}",
                config.fixed_dt
            )));
        }
        if config.viewport.width <= 0.0 || config.viewport.height <= 0.0 {
            return Err(EngineError::InitializationFailed(format!(
                "viewport must be non-empty, got {}x{}",
                config.viewport.width, config.viewport.height
            )));
        }

        let clock = FrameClock::new(config.max_dt.max(config.fixed_dt));
        Ok(Self {
            config,
            clock,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(
        config: EngineConfig,
        app: &mut T,
        mut script: InputScript,
    ) -> Result<EngineReport, EngineError> {
        let mut engine = Self::new(config)?;

        log::info!(
            "Entering scene ({}x{})",
            engine.config.viewport.width,
            engine.config.viewport.height
        );
        app.on_enter(engine.config.viewport)
            .map_err(|e| EngineError::ApplicationError(format!("App enter: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.running {
            for event in script.due(engine.clock.total_time()) {
                engine.deliver(app, &event)?;
            }

            let delta_time = engine.clock.tick(engine.config.fixed_dt);
            app.on_frame(delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App frame: {}", e)))?;

            if app.is_finished() {
                log::info!("Application finished after {} frames", engine.clock.frame_count());
                engine.running = false;
            } else if engine.clock.frame_count() >= engine.config.max_frames {
                log::info!("Frame limit of {} reached", engine.config.max_frames);
                engine.running = false;
            }
        }

        log::info!("Engine shutdown complete");
        Ok(EngineReport {
            frames: engine.clock.frame_count(),
            simulated_time: engine.clock.total_time(),
            finished: app.is_finished(),
        })
    }

    fn deliver<T: Application>(&self, app: &mut T, event: &InputEvent) -> Result<(), EngineError> {
        log::debug!("Input at {:.3}s: {:?}", self.clock.total_time(), event);
        let result = match event {
            InputEvent::TouchBegan(touches) => app.on_touch_begin(touches),
            InputEvent::TouchMoved(touches) => app.on_touch_move(touches),
        };
        result.map_err(|e| EngineError::ApplicationError(format!("App input: {}", e)))
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Application callback failed
    #[error("Application error: {0}")]
    ApplicationError(String),
}
