//! Game entities

use crate::systems::motion::MotionDescriptor;
use arcade_engine::prelude::*;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The player's ship
    Ship,
    /// Falling debris
    Debris,
    /// Screen boundary
    Edge,
    /// Decorative effect such as the thruster flame
    Effect,
}

/// A positioned, renderable game object
#[derive(Debug, Clone)]
pub struct Node {
    /// Entity kind
    pub kind: EntityKind,

    /// Position and rotation
    pub transform: Transform2D,

    /// Unrotated width and height
    pub size: Vec2,

    /// Texture or effect name
    pub sprite: String,

    /// Running actions
    pub actions: ActionRunner,

    /// Motion attached at spawn; debris only
    pub motion: Option<MotionDescriptor>,
}

impl Node {
    /// Create a node with no actions
    pub fn new(kind: EntityKind, sprite: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            transform: Transform2D::at(position),
            size,
            sprite: sprite.into(),
            actions: ActionRunner::new(),
            motion: None,
        }
    }

    /// Attach a motion descriptor
    pub fn with_motion(mut self, motion: MotionDescriptor) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Position of the node's center
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Axis-aligned frame, grown to enclose the rotated sprite
    pub fn frame(&self) -> Rect {
        Rect::rotated_bounds(self.transform.position, self.size, self.transform.rotation)
    }

    /// Check the node kind
    pub fn is(&self, kind: EntityKind) -> bool {
        self.kind == kind
    }
}

impl Spatial for Node {
    fn transform(&self) -> &Transform2D {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform2D {
        &mut self.transform
    }
}
