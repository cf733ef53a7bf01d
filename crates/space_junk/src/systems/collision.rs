//! Ship/debris collision detection
//!
//! Three detectors share one trait:
//!
//! - [`PollingDetector`] tests debris frames against the ship frame every frame
//! - [`PairContactDetector`] classifies physics contacts by category
//! - [`AnyContactDetector`] treats any contact as fatal, for hosts without
//!   category masks

use crate::categories::Category;
use crate::components::EntityKind;
use crate::config::DetectorModel;
use crate::stage::Stage;
use arcade_engine::prelude::*;

/// Result of one detection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    /// The ship was hit this frame
    pub game_over: bool,
    /// Debris removed by the hit
    pub destroyed: Vec<Entity>,
}

/// Pluggable collision detection
pub trait CollisionDetector {
    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Whether this detector reads physics contacts
    fn uses_contacts(&self) -> bool;

    /// Inspect the stage after the physics step
    fn detect(&mut self, stage: &mut Stage) -> Detection;
}

/// Build the detector for a detection model
pub fn detector_for(model: DetectorModel) -> Box<dyn CollisionDetector> {
    match model {
        DetectorModel::Polling => Box::new(PollingDetector),
        DetectorModel::Contact => Box::new(PairContactDetector),
        DetectorModel::AnyContact => {
            log::warn!("Using any-contact detection; debris/debris contacts will end the game");
            Box::new(AnyContactDetector)
        }
    }
}

/// Bounding-box test of every debris frame against the ship frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PollingDetector;

impl CollisionDetector for PollingDetector {
    fn name(&self) -> &'static str {
        "polling"
    }

    fn uses_contacts(&self) -> bool {
        false
    }

    fn detect(&mut self, stage: &mut Stage) -> Detection {
        let ship = stage.ship.and_then(|ship| stage.world.get(ship));
        let Some(ship_frame) = ship.map(|ship| ship.frame()) else {
            return Detection::default();
        };

        let hits = stage.world.handles_where(|node| {
            node.is(EntityKind::Debris) && node.frame().intersects(&ship_frame)
        });
        for &debris in &hits {
            stage.despawn(debris);
        }

        Detection {
            game_over: !hits.is_empty(),
            destroyed: hits,
        }
    }
}

/// Physics contacts classified by the union of both participants' categories
#[derive(Debug, Clone, Copy, Default)]
pub struct PairContactDetector;

impl CollisionDetector for PairContactDetector {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn uses_contacts(&self) -> bool {
        true
    }

    fn detect(&mut self, stage: &mut Stage) -> Detection {
        let mut detection = Detection::default();
        let events: Vec<ContactEvent> = stage.contacts.drain().collect();

        for event in events {
            let ContactEvent::Begin(contact) = event else {
                continue;
            };
            let categories = Category::from_bits_truncate(contact.categories());

            if categories == Category::SHIP | Category::DEBRIS {
                if let Some(debris) = contact.entity_in(Category::DEBRIS.bits()) {
                    if stage.despawn(debris).is_some() {
                        detection.destroyed.push(debris);
                    }
                }
                detection.game_over = true;
            } else if categories == Category::DEBRIS {
                log::debug!("Debris {} touched debris {}", contact.a.id(), contact.b.id());
            }
        }

        detection
    }
}

/// Any contact at all ends the game
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyContactDetector;

impl CollisionDetector for AnyContactDetector {
    fn name(&self) -> &'static str {
        "any_contact"
    }

    fn uses_contacts(&self) -> bool {
        true
    }

    fn detect(&mut self, stage: &mut Stage) -> Detection {
        let game_over = stage
            .contacts
            .drain()
            .fold(false, |hit, event| hit || matches!(event, ContactEvent::Begin(_)));
        Detection {
            game_over,
            destroyed: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Node;

    fn stage_with_ship(x: f32, y: f32) -> Stage {
        let mut stage = Stage::new(Viewport::new(800.0, 800.0), Some(2));
        let ship = Node::new(EntityKind::Ship, "player", Vec2::new(x, y), Vec2::new(99.0, 75.0));
        let body = RigidBody::kinematic(BodyShape::circle_for_size(ship.size));
        stage.ship = Some(stage.spawn_with_body(ship, body));
        stage
    }

    fn debris_at(stage: &mut Stage, x: f32, y: f32) -> Entity {
        let size = Vec2::new(43.0, 43.0);
        let node = Node::new(EntityKind::Debris, "meteorGrey_med1", Vec2::new(x, y), size);
        let body = RigidBody::kinematic(BodyShape::circle_for_size(node.size));
        stage.spawn_with_body(node, body)
    }

    fn step(stage: &mut Stage) {
        stage.physics.step(1.0 / 60.0, &mut stage.world, &mut stage.contacts);
    }

    #[test]
    fn test_polling_removes_every_overlapping_debris() {
        let mut stage = stage_with_ship(400.0, 150.0);
        let near = debris_at(&mut stage, 420.0, 170.0);
        let also_near = debris_at(&mut stage, 380.0, 140.0);
        let far = debris_at(&mut stage, 100.0, 700.0);

        let detection = PollingDetector.detect(&mut stage);

        assert!(detection.game_over);
        assert_eq!(detection.destroyed, vec![near, also_near]);
        assert!(stage.world.contains(far));
        assert!(!stage.world.contains(near));
    }

    #[test]
    fn test_polling_without_overlap() {
        let mut stage = stage_with_ship(400.0, 150.0);
        debris_at(&mut stage, 400.0, 600.0);
        assert_eq!(PollingDetector.detect(&mut stage), Detection::default());
    }

    #[test]
    fn test_pair_contact_ship_and_debris() {
        let mut stage = stage_with_ship(400.0, 150.0);
        let debris = debris_at(&mut stage, 400.0, 200.0);
        step(&mut stage);

        let detection = PairContactDetector.detect(&mut stage);
        assert!(detection.game_over);
        assert_eq!(detection.destroyed, vec![debris]);
        assert!(stage.contacts.is_empty());
    }

    #[test]
    fn test_overlapping_debris_only_end_the_game_with_any_contact() {
        let mut stage = stage_with_ship(400.0, 150.0);
        debris_at(&mut stage, 100.0, 600.0);
        debris_at(&mut stage, 120.0, 610.0);
        step(&mut stage);
        assert_eq!(stage.contacts.len(), 1);

        let mut replay = stage.contacts.clone();
        let detection = PairContactDetector.detect(&mut stage);
        assert!(!detection.game_over);
        assert_eq!(stage.count_of(EntityKind::Debris), 2);

        std::mem::swap(&mut stage.contacts, &mut replay);
        assert!(AnyContactDetector.detect(&mut stage).game_over);
    }

    #[test]
    fn test_end_events_are_ignored() {
        let mut stage = stage_with_ship(400.0, 150.0);
        let debris = debris_at(&mut stage, 400.0, 200.0);
        step(&mut stage);
        stage.contacts.clear();

        stage.world.get_mut(debris).unwrap().transform.position.y = 700.0;
        step(&mut stage);
        assert_eq!(stage.contacts.len(), 1);
        assert_eq!(PairContactDetector.detect(&mut stage), Detection::default());
        assert_eq!(AnyContactDetector.detect(&mut stage), Detection::default());
    }
}
