//! Physics world
//!
//! Integrates rigid bodies attached to entities of a [`World`], resolves
//! overlaps between bodies whose collision masks allow it and reports
//! contact begin/end transitions as [`ContactEvent`]s.

use super::{BodyKind, BodyShape, CollisionLayers, RigidBody};
use crate::ecs::{Entity, Spatial, World};
use crate::events::EventQueue;
use crate::foundation::math::Vec2;
use slotmap::SecondaryMap;
use std::collections::HashMap;

/// Two bodies in contact, stored in a stable order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactPair {
    /// Body with the smaller handle
    pub entity_a: Entity,
    /// Body with the larger handle
    pub entity_b: Entity,
}

impl ContactPair {
    /// Create a pair (always stores the smaller handle first)
    pub fn new(entity_a: Entity, entity_b: Entity) -> Self {
        if entity_a.id() <= entity_b.id() {
            Self { entity_a, entity_b }
        } else {
            Self { entity_a: entity_b, entity_b: entity_a }
        }
    }
}

/// Participants of a reported contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// First body
    pub a: Entity,
    /// Second body
    pub b: Entity,
    /// Category mask of the first body
    pub category_a: u32,
    /// Category mask of the second body
    pub category_b: u32,
}

impl Contact {
    /// Union of both participants' categories
    pub fn categories(&self) -> u32 {
        self.category_a | self.category_b
    }

    /// The participant belonging to `category`, if any
    pub fn entity_in(&self, category: u32) -> Option<Entity> {
        if self.category_a & category != 0 {
            Some(self.a)
        } else if self.category_b & category != 0 {
            Some(self.b)
        } else {
            None
        }
    }
}

/// Contact transitions produced by [`PhysicsWorld::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    /// Two bodies started touching
    Begin(Contact),
    /// Two bodies stopped touching
    End(Contact),
}

/// Penetration of one shape into another
#[derive(Debug, Clone, Copy)]
struct Manifold {
    /// Unit vector pointing from A toward B at the contact
    normal: Vec2,
    depth: f32,
}

impl Manifold {
    fn flipped(self) -> Self {
        Self { normal: -self.normal, depth: self.depth }
    }
}

fn circle_circle(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> Option<Manifold> {
    let offset = pos_b - pos_a;
    let distance = offset.norm();
    let depth = radius_a + radius_b - distance;
    if depth <= 0.0 {
        return None;
    }
    let normal = if distance > f32::EPSILON { offset / distance } else { Vec2::new(0.0, 1.0) };
    Some(Manifold { normal, depth })
}

/// Circle against the outline of a rectangle; the normal points from the
/// circle toward the nearest edge
fn circle_edge_loop(circle: Vec2, radius: f32, center: Vec2, half: Vec2) -> Option<Manifold> {
    let local = circle - center;
    let inside = local.x.abs() <= half.x && local.y.abs() <= half.y;

    if inside {
        let walls = [
            (half.x - local.x, Vec2::new(1.0, 0.0)),
            (half.x + local.x, Vec2::new(-1.0, 0.0)),
            (half.y - local.y, Vec2::new(0.0, 1.0)),
            (half.y + local.y, Vec2::new(0.0, -1.0)),
        ];
        let (gap, normal) = walls.into_iter().fold((f32::MAX, Vec2::zeros()), |best, wall| {
            if wall.0 < best.0 {
                wall
            } else {
                best
            }
        });
        (gap < radius).then_some(Manifold { normal, depth: radius - gap })
    } else {
        let closest = Vec2::new(local.x.clamp(-half.x, half.x), local.y.clamp(-half.y, half.y));
        let offset = closest - local;
        let distance = offset.norm();
        if distance >= radius || distance <= f32::EPSILON {
            return None;
        }
        Some(Manifold { normal: offset / distance, depth: radius - distance })
    }
}

fn overlap(shape_a: BodyShape, pos_a: Vec2, shape_b: BodyShape, pos_b: Vec2) -> Option<Manifold> {
    match (shape_a, shape_b) {
        (BodyShape::Circle { radius: ra }, BodyShape::Circle { radius: rb }) => {
            circle_circle(pos_a, ra, pos_b, rb)
        }
        (BodyShape::Circle { radius }, BodyShape::EdgeLoop { half_extents }) => {
            circle_edge_loop(pos_a, radius, pos_b, half_extents)
        }
        (BodyShape::EdgeLoop { half_extents }, BodyShape::Circle { radius }) => {
            circle_edge_loop(pos_b, radius, pos_a, half_extents).map(Manifold::flipped)
        }
        (BodyShape::EdgeLoop { .. }, BodyShape::EdgeLoop { .. }) => None,
    }
}

/// Rigid bodies keyed by the entity they move
pub struct PhysicsWorld {
    bodies: SecondaryMap<Entity, RigidBody>,
    gravity: Vec2,
    current_contacts: HashMap<ContactPair, Contact>,
    previous_contacts: HashMap<ContactPair, Contact>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(Vec2::new(0.0, -9.8))
    }
}

impl PhysicsWorld {
    /// Create a physics world with the given gravity in points/s²
    pub fn new(gravity: Vec2) -> Self {
        Self {
            bodies: SecondaryMap::new(),
            gravity,
            current_contacts: HashMap::new(),
            previous_contacts: HashMap::new(),
        }
    }

    /// World gravity
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Attach a body to an entity, replacing any previous body
    pub fn add_body(&mut self, entity: Entity, body: RigidBody) {
        self.bodies.insert(entity, body);
    }

    /// Detach an entity's body
    pub fn remove_body(&mut self, entity: Entity) -> Option<RigidBody> {
        self.bodies.remove(entity)
    }

    /// Body attached to an entity
    pub fn body(&self, entity: Entity) -> Option<&RigidBody> {
        self.bodies.get(entity)
    }

    /// Body attached to an entity, mutably
    pub fn body_mut(&mut self, entity: Entity) -> Option<&mut RigidBody> {
        self.bodies.get_mut(entity)
    }

    /// Number of attached bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Pairs currently in contact
    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.current_contacts.values()
    }

    /// Drop every body and contact
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.current_contacts.clear();
        self.previous_contacts.clear();
    }

    /// Advance the simulation by `delta_time` seconds
    ///
    /// Bodies whose entity no longer exists are dropped. Begin events are
    /// pushed for pairs that started touching this step and end events for
    /// pairs that stopped, each group ordered by handle.
    pub fn step<T: Spatial>(
        &mut self,
        delta_time: f32,
        world: &mut World<T>,
        events: &mut EventQueue<ContactEvent>,
    ) {
        self.bodies.retain(|entity, _| world.contains(entity));

        self.integrate(delta_time, world);

        std::mem::swap(&mut self.current_contacts, &mut self.previous_contacts);
        self.current_contacts.clear();
        self.narrow_phase(world);

        let mut began: Vec<_> = self
            .current_contacts
            .iter()
            .filter(|(pair, _)| !self.previous_contacts.contains_key(pair))
            .map(|(pair, contact)| (*pair, *contact))
            .collect();
        began.sort_by_key(|(pair, _)| *pair);

        let mut ended: Vec<_> = self
            .previous_contacts
            .iter()
            .filter(|(pair, _)| !self.current_contacts.contains_key(pair))
            .map(|(pair, contact)| (*pair, *contact))
            .collect();
        ended.sort_by_key(|(pair, _)| *pair);

        for (_, contact) in ended {
            events.push(ContactEvent::End(contact));
        }
        for (pair, contact) in began {
            log::trace!("Contact began: {} <-> {}", pair.entity_a.id(), pair.entity_b.id());
            events.push(ContactEvent::Begin(contact));
        }
    }

    fn integrate<T: Spatial>(&mut self, delta_time: f32, world: &mut World<T>) {
        for (entity, body) in &mut self.bodies {
            if body.kind == BodyKind::Static {
                continue;
            }
            if body.kind == BodyKind::Dynamic && body.affected_by_gravity {
                body.velocity += self.gravity * delta_time;
            }
            if let Some(item) = world.get_mut(entity) {
                let transform = item.transform_mut();
                transform.translate(body.velocity * delta_time);
                transform.rotate(body.angular_velocity * delta_time);
            }
        }
    }

    fn narrow_phase<T: Spatial>(&mut self, world: &mut World<T>) {
        let handles: Vec<Entity> = self.bodies.keys().collect();

        for (index, &entity_a) in handles.iter().enumerate() {
            for &entity_b in &handles[index + 1..] {
                let (Some(body_a), Some(body_b)) =
                    (self.bodies.get(entity_a), self.bodies.get(entity_b))
                else {
                    continue;
                };
                let (Some(item_a), Some(item_b)) = (world.get(entity_a), world.get(entity_b)) else {
                    continue;
                };

                let collides = CollisionLayers::should_collide(
                    body_a.category,
                    body_a.collision,
                    body_b.category,
                    body_b.collision,
                );
                let reports = CollisionLayers::should_contact(
                    body_a.category,
                    body_a.contact,
                    body_b.category,
                    body_b.contact,
                );
                if !collides && !reports {
                    continue;
                }

                let pos_a = item_a.transform().position;
                let pos_b = item_b.transform().position;
                let Some(manifold) = overlap(body_a.shape, pos_a, body_b.shape, pos_b) else {
                    continue;
                };

                if reports {
                    self.current_contacts.insert(
                        ContactPair::new(entity_a, entity_b),
                        Contact {
                            a: entity_a,
                            b: entity_b,
                            category_a: body_a.category,
                            category_b: body_b.category,
                        },
                    );
                }

                if collides {
                    self.resolve(entity_a, entity_b, manifold, world);
                }
            }
        }
    }

    /// Push overlapping bodies apart and cancel their approaching velocity
    fn resolve<T: Spatial>(
        &mut self,
        entity_a: Entity,
        entity_b: Entity,
        manifold: Manifold,
        world: &mut World<T>,
    ) {
        let (Some(body_a), Some(body_b)) = (self.bodies.get(entity_a), self.bodies.get(entity_b))
        else {
            return;
        };

        let inv_a = if CollisionLayers::responds_to(body_a.collision, body_b.category) {
            body_a.inverse_mass()
        } else {
            0.0
        };
        let inv_b = if CollisionLayers::responds_to(body_b.collision, body_a.category) {
            body_b.inverse_mass()
        } else {
            0.0
        };
        let total = inv_a + inv_b;
        if total <= 0.0 {
            return;
        }

        let normal = manifold.normal;
        let restitution = body_a.restitution.min(body_b.restitution);
        let approach = (body_b.velocity - body_a.velocity).dot(&normal);
        let impulse = if approach < 0.0 { -(1.0 + restitution) * approach / total } else { 0.0 };

        if let Some(body) = self.bodies.get_mut(entity_a) {
            body.velocity -= normal * impulse * inv_a;
        }
        if let Some(body) = self.bodies.get_mut(entity_b) {
            body.velocity += normal * impulse * inv_b;
        }

        let correction = normal * (manifold.depth / total);
        if let Some(item) = world.get_mut(entity_a) {
            item.transform_mut().translate(-correction * inv_a);
        }
        if let Some(item) = world.get_mut(entity_b) {
            item.transform_mut().translate(correction * inv_b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform2D;
    use approx::assert_relative_eq;

    struct Ball(Transform2D);

    impl Spatial for Ball {
        fn transform(&self) -> &Transform2D {
            &self.0
        }

        fn transform_mut(&mut self) -> &mut Transform2D {
            &mut self.0
        }
    }

    const SHIP: u32 = 1;
    const ROCK: u32 = 2;
    const WALL: u32 = 4;

    fn ball(world: &mut World<Ball>, x: f32, y: f32) -> Entity {
        world.spawn(Ball(Transform2D::at(Vec2::new(x, y))))
    }

    #[test]
    fn test_integration_without_gravity() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::default();
        let mut events = EventQueue::new();

        let rock = ball(&mut world, 0.0, 100.0);
        let mut body = RigidBody::dynamic(BodyShape::Circle { radius: 5.0 }).with_gravity(false);
        body.apply_impulse(Vec2::new(0.0, -120.0));
        physics.add_body(rock, body);

        for _ in 0..60 {
            physics.step(1.0 / 60.0, &mut world, &mut events);
        }

        let y = world.get(rock).map(|b| b.0.position.y).unwrap();
        assert_relative_eq!(y, -20.0, epsilon = 1e-2);
    }

    #[test]
    fn test_contact_begin_and_end_are_reported_once() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new(Vec2::zeros());
        let mut events = EventQueue::new();

        let ship = ball(&mut world, 0.0, 0.0);
        let rock = ball(&mut world, 0.0, 8.0);
        let ship_body = RigidBody::kinematic(BodyShape::Circle { radius: 5.0 });
        physics.add_body(ship, ship_body.with_masks(SHIP, ROCK, ROCK));
        physics.add_body(
            rock,
            RigidBody::kinematic(BodyShape::Circle { radius: 5.0 }).with_masks(ROCK, SHIP, SHIP),
        );

        physics.step(1.0 / 60.0, &mut world, &mut events);
        physics.step(1.0 / 60.0, &mut world, &mut events);
        let begins: Vec<_> = events.drain().collect();
        assert_eq!(begins.len(), 1);
        let ContactEvent::Begin(contact) = begins[0] else {
            panic!("expected a begin event");
        };
        assert_eq!(contact.categories(), SHIP | ROCK);
        assert_eq!(contact.entity_in(ROCK), Some(rock));

        world.get_mut(rock).unwrap().0.position.y = 50.0;
        physics.step(1.0 / 60.0, &mut world, &mut events);
        assert!(matches!(events.drain().next(), Some(ContactEvent::End(_))));
    }

    #[test]
    fn test_contact_mask_filters_reports() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new(Vec2::zeros());
        let mut events = EventQueue::new();

        let a = ball(&mut world, 0.0, 0.0);
        let b = ball(&mut world, 3.0, 0.0);
        let circle = RigidBody::kinematic(BodyShape::Circle { radius: 5.0 });
        physics.add_body(a, circle.clone().with_masks(WALL, SHIP, 0));
        physics.add_body(b, circle.with_masks(ROCK, ROCK, 0));

        physics.step(1.0 / 60.0, &mut world, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_edge_loop_keeps_body_inside() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new(Vec2::zeros());
        let mut events = EventQueue::new();

        let frame = ball(&mut world, 400.0, 300.0);
        let boundary = RigidBody::fixed(BodyShape::edge_loop(800.0, 600.0));
        physics.add_body(frame, boundary.with_masks(WALL, SHIP, 0));

        let ship = ball(&mut world, 790.0, 300.0);
        physics.add_body(
            ship,
            RigidBody::dynamic(BodyShape::Circle { radius: 20.0 })
                .with_gravity(false)
                .with_masks(SHIP, WALL, 0),
        );

        physics.step(1.0 / 60.0, &mut world, &mut events);
        let x = world.get(ship).unwrap().0.position.x;
        assert_relative_eq!(x, 780.0, epsilon = 1e-3);
    }

    #[test]
    fn test_despawned_entities_lose_their_bodies() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::default();
        let mut events = EventQueue::new();

        let rock = ball(&mut world, 0.0, 0.0);
        physics.add_body(rock, RigidBody::dynamic(BodyShape::Circle { radius: 1.0 }));
        world.despawn(rock);

        physics.step(1.0 / 60.0, &mut world, &mut events);
        assert_eq!(physics.body_count(), 0);
        assert!(physics.body(rock).is_none());
    }
}
