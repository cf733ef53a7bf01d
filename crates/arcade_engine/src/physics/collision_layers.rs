//! Bitmask filtering for collisions and contact reports
//!
//! Every body carries three masks:
//!
//! - `category`: which groups the body belongs to
//! - `collision`: which categories push this body around
//! - `contact`: which categories produce contact events with this body
//!
//! Collision response and contact reporting are filtered independently, so
//! two bodies can report a contact without bouncing off each other and the
//! other way round.

/// Collision layer helpers over plain `u32` masks
pub struct CollisionLayers;

impl CollisionLayers {
    /// No layer
    pub const NONE: u32 = 0;

    /// All layers
    pub const ALL: u32 = 0xFFFF_FFFF;

    /// Check if body A is pushed by body B
    pub fn responds_to(collision_a: u32, category_b: u32) -> bool {
        collision_a & category_b != 0
    }

    /// Check if two bodies physically collide
    ///
    /// The pair collides when either side responds to the other.
    pub fn should_collide(
        category_a: u32,
        collision_a: u32,
        category_b: u32,
        collision_b: u32,
    ) -> bool {
        Self::responds_to(collision_a, category_b) || Self::responds_to(collision_b, category_a)
    }

    /// Check if an overlap of two bodies should be reported as a contact
    pub fn should_contact(
        category_a: u32,
        contact_a: u32,
        category_b: u32,
        contact_b: u32,
    ) -> bool {
        category_a & contact_b != 0 || category_b & contact_a != 0
    }
}
