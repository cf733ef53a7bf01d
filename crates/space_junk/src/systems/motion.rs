//! Debris motion policies
//!
//! A policy decides how freshly spawned debris moves, what happens when its
//! scripted removal fires, and how debris is stopped on game over.

use crate::components::{EntityKind, Node};
use crate::config::{GameplayConfig, MotionModel};
use crate::stage::Stage;
use arcade_engine::prelude::*;
use std::f32::consts::TAU;

/// Motion rule attached to a debris entity at spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionDescriptor {
    /// Seconds for one scripted fall
    pub duration: f32,
    /// Offset covered by one scripted fall
    pub fall: Vec2,
    /// Rotation over one scripted fall, radians
    pub rotation: f32,
    /// Linear impulse for the impulse model
    pub impulse: Vec2,
    /// Angular impulse for the impulse model
    pub angular_impulse: f32,
}

impl MotionDescriptor {
    /// Draw a descriptor for the current screen
    pub fn sample(stage: &mut Stage, gameplay: &GameplayConfig) -> Self {
        let duration = stage.sample(gameplay.fall_duration_min, gameplay.fall_duration_max);
        let dy = stage.sample(gameplay.impulse_dy_min, gameplay.impulse_dy_max);

        Self {
            duration,
            fall: Vec2::new(0.0, -(stage.viewport.height + gameplay.fall_overshoot)),
            rotation: TAU,
            impulse: Vec2::new(0.0, dy),
            angular_impulse: gameplay.angular_impulse,
        }
    }

    /// Fall and spin in parallel, then remove; repeated forever
    pub fn fall_action(&self) -> Action {
        Action::repeat_forever(Action::sequence(vec![
            Action::group(vec![
                Action::move_by(self.fall, self.duration),
                Action::rotate_by(self.rotation, self.duration),
            ]),
            Action::remove(),
        ]))
    }
}

/// What a policy did after a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionReport {
    /// Debris respawned at the top
    pub recycled: usize,
    /// Debris destroyed below the screen
    pub reaped: usize,
}

/// Pluggable debris motion
pub trait MotionPolicy {
    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Insert freshly spawned debris and set it moving
    fn attach(&self, stage: &mut Stage, node: Node) -> Entity;

    /// Handle debris removed by its actions this step and do per-step cleanup
    fn after_step(&mut self, stage: &mut Stage, removed: Vec<Node>) -> MotionReport;

    /// Stop all debris in place
    fn halt(&self, stage: &mut Stage) {
        for entity in stage.handles_of(EntityKind::Debris) {
            if let Some(node) = stage.world.get_mut(entity) {
                node.actions.remove_all();
            }
            if let Some(body) = stage.physics.body_mut(entity) {
                body.halt();
            }
        }
        log::debug!("Halted debris ({})", self.name());
    }
}

/// Build the policy for a motion model
pub fn policy_for(gameplay: &GameplayConfig) -> Box<dyn MotionPolicy> {
    match gameplay.motion {
        MotionModel::Scripted => Box::new(ScriptedMotion),
        MotionModel::Impulse => Box::new(ImpulseMotion::new(gameplay)),
    }
}

/// Repeating fall-and-spin actions
///
/// When the fall's removal fires, the entity is replaced by a fresh one at a
/// random top position with the same sprite and descriptor, so production
/// never stops and nothing is left below the screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedMotion;

impl MotionPolicy for ScriptedMotion {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn attach(&self, stage: &mut Stage, mut node: Node) -> Entity {
        if let Some(descriptor) = node.motion {
            node.actions.run(&descriptor.fall_action());
        }

        if stage.contact_bodies {
            let body = RigidBody::kinematic(BodyShape::circle_for_size(node.size));
            stage.spawn_with_body(node, body)
        } else {
            stage.spawn_node(node)
        }
    }

    fn after_step(&mut self, stage: &mut Stage, removed: Vec<Node>) -> MotionReport {
        let mut report = MotionReport::default();
        for node in removed {
            let Some(descriptor) = node.motion.filter(|_| node.is(EntityKind::Debris)) else {
                continue;
            };
            let position = stage.random_top_position();
            let fresh = Node::new(EntityKind::Debris, node.sprite, position, node.size)
                .with_motion(descriptor);
            let entity = self.attach(stage, fresh);
            log::trace!("Recycled debris as {} at x={:.1}", entity.id(), position.x);
            report.recycled += 1;
        }
        report
    }
}

/// One impulse at spawn, then free flight
///
/// Debris whose frame has dropped more than `reap_margin` below the screen
/// is destroyed.
#[derive(Debug, Clone, Copy)]
pub struct ImpulseMotion {
    mass: f32,
    inertia: f32,
    reap_margin: f32,
}

impl ImpulseMotion {
    /// Create the policy from gameplay settings
    pub fn new(gameplay: &GameplayConfig) -> Self {
        Self {
            mass: gameplay.debris_mass,
            inertia: gameplay.debris_inertia,
            reap_margin: gameplay.reap_margin,
        }
    }
}

impl MotionPolicy for ImpulseMotion {
    fn name(&self) -> &'static str {
        "impulse"
    }

    fn attach(&self, stage: &mut Stage, node: Node) -> Entity {
        let mut body = RigidBody::dynamic(BodyShape::circle_for_size(node.size))
            .with_gravity(false)
            .with_mass(self.mass, self.inertia);
        if let Some(descriptor) = node.motion {
            body.apply_impulse(descriptor.impulse);
            body.apply_angular_impulse(descriptor.angular_impulse);
        }
        stage.spawn_with_body(node, body)
    }

    fn after_step(&mut self, stage: &mut Stage, _removed: Vec<Node>) -> MotionReport {
        let floor = -self.reap_margin;
        let below = stage
            .world
            .handles_where(|node| node.is(EntityKind::Debris) && node.frame().max.y < floor);

        for &entity in &below {
            stage.despawn(entity);
        }

        MotionReport {
            recycled: 0,
            reaped: below.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::animation;
    use approx::assert_relative_eq;

    fn stage() -> Stage {
        Stage::new(Viewport::new(800.0, 800.0), Some(11))
    }

    fn fixed_fall(stage: &mut Stage, duration: f32) -> MotionDescriptor {
        let gameplay = GameplayConfig {
            fall_duration_min: duration,
            fall_duration_max: duration,
            ..GameplayConfig::default()
        };
        MotionDescriptor::sample(stage, &gameplay)
    }

    #[test]
    fn test_descriptor_ranges() {
        let mut stage = stage();
        let gameplay = GameplayConfig::default();
        for _ in 0..100 {
            let descriptor = MotionDescriptor::sample(&mut stage, &gameplay);
            assert!((2.0..5.0).contains(&descriptor.duration));
            assert!((-150.0..=-100.0).contains(&descriptor.impulse.y));
            assert_relative_eq!(descriptor.fall.y, -850.0);
            assert_relative_eq!(descriptor.rotation, TAU);
        }
    }

    #[test]
    fn test_scripted_debris_is_recycled_at_the_top() {
        let mut stage = stage();
        let mut policy = ScriptedMotion;
        let descriptor = fixed_fall(&mut stage, 3.0);
        let size = Vec2::new(43.0, 43.0);
        let node = Node::new(EntityKind::Debris, "meteorGrey_med1", Vec2::new(400.0, 800.0), size)
            .with_motion(descriptor);
        let first = policy.attach(&mut stage, node);

        let mut report = MotionReport::default();
        let mut last_y = 800.0;
        for _ in 0..6 {
            if let Some(node) = stage.world.get(first) {
                last_y = node.position().y;
            }
            let removed = animation::run_actions(&mut stage, 0.5);
            if let Some(node) = removed.first() {
                last_y = node.position().y;
            }
            report = policy.after_step(&mut stage, removed);
        }

        assert_relative_eq!(last_y, -50.0, epsilon = 1e-2);
        assert_eq!(report.recycled, 1);
        assert!(!stage.world.contains(first));

        let survivors = stage.handles_of(EntityKind::Debris);
        assert_eq!(survivors.len(), 1);
        let fresh = stage.world.get(survivors[0]).unwrap();
        assert_relative_eq!(fresh.position().y, 800.0);
        assert_eq!(fresh.motion, Some(descriptor));
        assert!(!fresh.actions.is_empty());
    }

    #[test]
    fn test_impulse_debris_is_reaped_below_screen() {
        let mut stage = stage();
        let mut policy = ImpulseMotion::new(&GameplayConfig::default());
        let descriptor = MotionDescriptor::sample(&mut stage, &GameplayConfig::default());
        let size = Vec2::new(45.0, 52.0);
        let node = Node::new(EntityKind::Debris, "wingRed_2", Vec2::new(100.0, 10.0), size)
            .with_motion(descriptor);
        let entity = policy.attach(&mut stage, node);

        let speed = stage.physics.body(entity).unwrap().velocity.y;
        assert!((-150.0..=-100.0).contains(&speed));

        let mut reaped = 0;
        for _ in 0..240 {
            stage.physics.step(1.0 / 60.0, &mut stage.world, &mut stage.contacts);
            reaped += policy.after_step(&mut stage, Vec::new()).reaped;
        }

        assert_eq!(reaped, 1);
        assert!(!stage.world.contains(entity));
        assert!(stage.physics.body(entity).is_none());
    }

    #[test]
    fn test_halt_stops_both_models() {
        let mut stage = stage();
        let descriptor = MotionDescriptor::sample(&mut stage, &GameplayConfig::default());
        let size = Vec2::new(10.0, 10.0);
        let rock = |sprite: &str, x: f32| {
            Node::new(EntityKind::Debris, sprite, Vec2::new(x, 800.0), size).with_motion(descriptor)
        };
        let scripted = ScriptedMotion.attach(&mut stage, rock("a", 10.0));
        let impulse = ImpulseMotion::new(&GameplayConfig::default());
        let flying = impulse.attach(&mut stage, rock("b", 500.0));

        ScriptedMotion.halt(&mut stage);

        assert!(stage.world.get(scripted).unwrap().actions.is_empty());
        assert_eq!(stage.physics.body(flying).unwrap().velocity, Vec2::zeros());
    }
}
