//! Entity table
//!
//! Entities are generational handles into a slot map. Game code holds
//! handles, never references, and resolves them through the [`World`]
//! each tick. A handle to a despawned entity simply resolves to `None`.

pub mod world;
pub mod entity;

pub use world::{World, Spatial};
pub use entity::Entity;

#[cfg(test)]
mod tests;
