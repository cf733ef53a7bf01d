//! Shared simulation state
//!
//! The stage owns the entity table, the physics world and the contact queue.
//! Systems borrow it for the duration of one step.

use crate::categories::Masks;
use crate::components::{EntityKind, Node};
use crate::error::GameError;
use arcade_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Entities, physics and randomness of one session
pub struct Stage {
    /// Entity table
    pub world: World<Node>,

    /// Rigid bodies keyed by entity
    pub physics: PhysicsWorld,

    /// Contact transitions from the last physics step
    pub contacts: EventQueue<ContactEvent>,

    /// Screen size
    pub viewport: Viewport,

    /// Random source
    pub rng: StdRng,

    /// The player's ship
    pub ship: Option<Entity>,

    /// Thruster flame following the ship
    pub thruster: Option<Entity>,

    /// Whether ship, edge and scripted debris get bodies for contact reporting
    pub contact_bodies: bool,
}

impl Stage {
    /// Create an empty stage
    ///
    /// Gravity is off: debris either follows scripted actions or keeps the
    /// velocity of its initial impulse.
    pub fn new(viewport: Viewport, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            world: World::new(),
            physics: PhysicsWorld::new(Vec2::zeros()),
            contacts: EventQueue::new(),
            viewport,
            rng,
            ship: None,
            thruster: None,
            contact_bodies: true,
        }
    }

    /// Uniform sample from `[min, max)`, or `min` if the range is empty
    pub fn sample(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random point on the top edge
    pub fn random_top_position(&mut self) -> Vec2 {
        let x = self.rng.gen_range(0.0..=self.viewport.width);
        Vec2::new(x, self.viewport.height)
    }

    /// Resolve the ship handle
    pub fn ship_entity(&self) -> Result<Entity, GameError> {
        self.ship
            .filter(|&ship| self.world.contains(ship))
            .ok_or(GameError::EntityNotFound("ship"))
    }

    /// Insert a node and give it a body with the masks of its kind
    pub fn spawn_with_body(&mut self, node: Node, body: RigidBody) -> Entity {
        let kind = node.kind;
        let entity = self.world.spawn(node);
        if let Some(masks) = Masks::for_kind(kind) {
            let body = body.with_masks(
                masks.category.bits(),
                masks.collision.bits(),
                masks.contact.bits(),
            );
            self.physics.add_body(entity, body);
        }
        entity
    }

    /// Insert a node without a body
    pub fn spawn_node(&mut self, node: Node) -> Entity {
        self.world.spawn(node)
    }

    /// Remove an entity and its body
    pub fn despawn(&mut self, entity: Entity) -> Option<Node> {
        self.physics.remove_body(entity);
        self.world.despawn(entity)
    }

    /// Handles of every entity of a kind
    pub fn handles_of(&self, kind: EntityKind) -> Vec<Entity> {
        self.world.handles_where(|node| node.is(kind))
    }

    /// Number of live entities of a kind
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.world.iter().filter(|(_, node)| node.is(kind)).count()
    }
}
