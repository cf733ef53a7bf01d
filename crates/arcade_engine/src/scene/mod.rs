//! Scene presentation
//!
//! A presenter swaps the visible scene. The simulation only names the
//! scene to load and how to fit it to the screen.

/// Screen size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(750.0, 1334.0)
    }
}

/// How a presented scene is fitted to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// Scale uniformly to cover the viewport, cropping overflow
    #[default]
    AspectFill,
    /// Scale uniformly to fit inside the viewport
    AspectFit,
    /// Stretch to the viewport
    Fill,
    /// Keep the scene's own size
    ResizeFill,
}

/// A loaded scene ready to be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Scene name
    pub name: String,
}

/// Scene errors
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// No scene with this name exists
    #[error("Scene not found: {0}")]
    NotFound(String),

    /// The scene could not be shown
    #[error("Presentation failed: {0}")]
    PresentFailed(String),
}

/// Host that loads and shows scenes
pub trait ScenePresenter {
    /// Load a scene by name
    fn load(&mut self, name: &str) -> Result<Presentation, SceneError>;

    /// Replace the visible scene
    fn present(&mut self, presentation: Presentation, mode: ScaleMode) -> Result<(), SceneError>;
}

/// Presenter that records presentations instead of drawing them
#[derive(Debug, Default)]
pub struct LogPresenter {
    known: Vec<String>,
    presented: Vec<(Presentation, ScaleMode)>,
}

impl LogPresenter {
    /// Create a presenter with no scenes
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loadable scene
    pub fn with_scene(mut self, name: impl Into<String>) -> Self {
        self.known.push(name.into());
        self
    }

    /// Every presentation shown so far
    pub fn presented(&self) -> &[(Presentation, ScaleMode)] {
        &self.presented
    }
}

impl ScenePresenter for LogPresenter {
    fn load(&mut self, name: &str) -> Result<Presentation, SceneError> {
        if self.known.iter().any(|known| known == name) {
            Ok(Presentation { name: name.to_string() })
        } else {
            Err(SceneError::NotFound(name.to_string()))
        }
    }

    fn present(&mut self, presentation: Presentation, mode: ScaleMode) -> Result<(), SceneError> {
        log::info!("Presenting scene {} ({:?})", presentation.name, mode);
        self.presented.push((presentation, mode));
        Ok(())
    }
}
