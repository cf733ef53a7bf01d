//! Rigid body description

use super::CollisionLayers;
use crate::foundation::math::Vec2;

/// How the integrator treats a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    /// Moved by velocity, gravity and collision response
    #[default]
    Dynamic,
    /// Moved by its velocity only; never pushed
    Kinematic,
    /// Never moves
    Static,
}

/// Collision shape, centered on the owning entity's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Solid circle
    Circle {
        /// Radius in points
        radius: f32,
    },
    /// Hollow rectangle outline; only its four edges collide
    EdgeLoop {
        /// Half of the rectangle's width and height
        half_extents: Vec2,
    },
}

impl BodyShape {
    /// Circle enclosing a sprite of the given size
    pub fn circle_for_size(size: Vec2) -> Self {
        Self::Circle { radius: size.x.max(size.y) * 0.5 }
    }

    /// Edge loop along the border of a `width` x `height` rectangle
    pub fn edge_loop(width: f32, height: f32) -> Self {
        Self::EdgeLoop { half_extents: Vec2::new(width * 0.5, height * 0.5) }
    }
}

/// Physics state attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// Integration mode
    pub kind: BodyKind,
    /// Collision shape
    pub shape: BodyShape,
    /// Linear velocity in points per second
    pub velocity: Vec2,
    /// Angular velocity in radians per second
    pub angular_velocity: f32,
    /// Mass; impulses change velocity by `impulse / mass`
    pub mass: f32,
    /// Rotational inertia; angular impulses change spin by `impulse / inertia`
    pub inertia: f32,
    /// Bounciness in `[0, 1]`
    pub restitution: f32,
    /// Whether world gravity applies
    pub affected_by_gravity: bool,
    /// Category mask
    pub category: u32,
    /// Categories that push this body
    pub collision: u32,
    /// Categories that produce contact events with this body
    pub contact: u32,
}

impl RigidBody {
    /// Create a dynamic body
    pub fn dynamic(shape: BodyShape) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            shape,
            velocity: Vec2::zeros(),
            angular_velocity: 0.0,
            mass: 1.0,
            inertia: 1.0,
            restitution: 0.2,
            affected_by_gravity: true,
            category: CollisionLayers::ALL,
            collision: CollisionLayers::ALL,
            contact: CollisionLayers::NONE,
        }
    }

    /// Create a static body
    pub fn fixed(shape: BodyShape) -> Self {
        Self {
            kind: BodyKind::Static,
            affected_by_gravity: false,
            ..Self::dynamic(shape)
        }
    }

    /// Create a kinematic body
    pub fn kinematic(shape: BodyShape) -> Self {
        Self {
            kind: BodyKind::Kinematic,
            affected_by_gravity: false,
            ..Self::dynamic(shape)
        }
    }

    /// Set category, collision and contact masks
    pub fn with_masks(mut self, category: u32, collision: u32, contact: u32) -> Self {
        self.category = category;
        self.collision = collision;
        self.contact = contact;
        self
    }

    /// Toggle gravity
    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.affected_by_gravity = enabled;
        self
    }

    /// Set mass and rotational inertia
    pub fn with_mass(mut self, mass: f32, inertia: f32) -> Self {
        self.mass = mass.max(f32::EPSILON);
        self.inertia = inertia.max(f32::EPSILON);
        self
    }

    /// Inverse mass, zero for bodies that are never pushed
    pub fn inverse_mass(&self) -> f32 {
        match self.kind {
            BodyKind::Dynamic => 1.0 / self.mass,
            BodyKind::Kinematic | BodyKind::Static => 0.0,
        }
    }

    /// Apply an instantaneous linear impulse
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.kind == BodyKind::Dynamic {
            self.velocity += impulse / self.mass;
        }
    }

    /// Apply an instantaneous angular impulse
    pub fn apply_angular_impulse(&mut self, impulse: f32) {
        if self.kind == BodyKind::Dynamic {
            self.angular_velocity += impulse / self.inertia;
        }
    }

    /// Stop all motion
    pub fn halt(&mut self) {
        self.velocity = Vec2::zeros();
        self.angular_velocity = 0.0;
    }
}
