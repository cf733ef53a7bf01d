//! Entity table implementation

use super::Entity;
use crate::foundation::math::Transform2D;
use slotmap::SlotMap;

/// Anything stored in a [`World`] that has a position in screen space
///
/// Physics and action code reach entity transforms through this trait so
/// the engine stays independent of the game's entity type.
pub trait Spatial {
    /// Current transform
    fn transform(&self) -> &Transform2D;

    /// Mutable transform
    fn transform_mut(&mut self) -> &mut Transform2D;
}

/// Table owning every live entity of a scene
#[derive(Debug, Clone)]
pub struct World<T> {
    entities: SlotMap<Entity, T>,
}

impl<T> World<T> {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
        }
    }

    /// Insert an entity and return its handle
    pub fn spawn(&mut self, entity: T) -> Entity {
        self.entities.insert(entity)
    }

    /// Remove an entity, returning it if the handle was still live
    pub fn despawn(&mut self, entity: Entity) -> Option<T> {
        self.entities.remove(entity)
    }

    /// Resolve a handle
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.entities.get(entity)
    }

    /// Resolve a handle mutably
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.entities.get_mut(entity)
    }

    /// Check whether a handle is still live
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over live entities in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter()
    }

    /// Iterate mutably over live entities in slot order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter_mut()
    }

    /// Snapshot of handles matching a predicate
    ///
    /// Useful when the caller needs to mutate the world while walking it.
    pub fn handles_where(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|(_, entity)| predicate(entity))
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Remove every entity
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl<T> Default for World<T> {
    fn default() -> Self {
        Self::new()
    }
}
