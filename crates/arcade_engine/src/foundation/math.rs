//! Math utilities and types
//!
//! Provides the 2D math types used by the entity table, actions and physics.
//! Screen space has its origin at the bottom-left corner with y pointing up.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Position and rotation of an entity in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Position of the entity's center
    pub position: Vec2,

    /// Rotation in radians, counter-clockwise
    pub rotation: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
        }
    }
}

impl Transform2D {
    /// Create a transform at the given position with no rotation
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }

    /// Translate by a delta
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Rotate by an angle in radians
    pub fn rotate(&mut self, angle: f32) {
        self.rotation += angle;
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Bottom-left corner
    pub min: Vec2,
    /// Top-right corner
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from its corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a rectangle centered on a point
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Axis-aligned bounds of a `size` rectangle rotated by `rotation` around `center`
    ///
    /// This is the frame a sprite reports while it spins, so a rotated sprite
    /// occupies a larger box than its unrotated size.
    pub fn rotated_bounds(center: Vec2, size: Vec2, rotation: f32) -> Self {
        let (sin, cos) = rotation.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let extent = Vec2::new(
            size.x * cos + size.y * sin,
            size.x * sin + size.y * cos,
        );
        Self::from_center_size(center, extent)
    }

    /// Width of the rectangle
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Check if a point lies inside or on the border
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if two rectangles share a region of non-zero area
    ///
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
