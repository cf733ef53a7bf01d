//! Entity table tests

use super::*;
use crate::foundation::math::{Transform2D, Vec2};

#[derive(Debug)]
struct Marker {
    transform: Transform2D,
    tag: &'static str,
}

impl Spatial for Marker {
    fn transform(&self) -> &Transform2D {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform2D {
        &mut self.transform
    }
}

fn marker(tag: &'static str, x: f32) -> Marker {
    Marker {
        transform: Transform2D::at(Vec2::new(x, 0.0)),
        tag,
    }
}

#[test]
fn test_spawn_and_resolve() {
    let mut world = World::new();
    let ship = world.spawn(marker("ship", 10.0));

    assert_eq!(world.len(), 1);
    assert_eq!(world.get(ship).map(|m| m.tag), Some("ship"));
}

#[test]
fn test_stale_handle_does_not_alias_new_entity() {
    let mut world = World::new();
    let first = world.spawn(marker("debris", 1.0));
    world.despawn(first);

    // The slot gets reused with a new generation
    let second = world.spawn(marker("debris", 2.0));
    assert_ne!(first, second);
    assert!(world.get(first).is_none());
    assert!(world.contains(second));
}

#[test]
fn test_handles_where_filters() {
    let mut world = World::new();
    world.spawn(marker("ship", 0.0));
    world.spawn(marker("debris", 1.0));
    world.spawn(marker("debris", 2.0));

    let debris = world.handles_where(|m| m.tag == "debris");
    assert_eq!(debris.len(), 2);
}

#[test]
fn test_transform_through_spatial() {
    let mut world = World::new();
    let handle = world.spawn(marker("ship", 0.0));

    if let Some(entity) = world.get_mut(handle) {
        entity.transform_mut().translate(Vec2::new(5.0, 3.0));
    }
    let position = world.get(handle).map(|m| m.transform().position);
    assert_eq!(position, Some(Vec2::new(5.0, 3.0)));
}
