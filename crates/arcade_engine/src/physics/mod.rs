//! Physics module for rigid bodies and contact reporting
//!
//! Provides a small impulse integrator with circle and edge-loop shapes,
//! bitmask filtering and contact begin/end events.

pub mod body;
pub mod collision_layers;
pub mod world;

pub use body::{BodyKind, BodyShape, RigidBody};
pub use collision_layers::CollisionLayers;
pub use world::{Contact, ContactEvent, ContactPair, PhysicsWorld};
