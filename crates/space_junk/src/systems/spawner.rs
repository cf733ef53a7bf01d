//! Debris spawner

use crate::components::{EntityKind, Node};
use crate::config::{DebrisSprite, GameplayConfig};
use crate::stage::Stage;
use crate::systems::motion::{MotionDescriptor, MotionPolicy};
use arcade_engine::prelude::*;
use rand::seq::SliceRandom;

/// Creates one debris entity per timer fire
///
/// The first fire happens on the first tick, then one every interval.
pub struct Spawner {
    timer: RepeatingTimer,
    catalog: Vec<DebrisSprite>,
    gameplay: GameplayConfig,
    spawned: u64,
}

impl Spawner {
    /// Create a spawner over a sprite catalog
    pub fn new(gameplay: &GameplayConfig, catalog: &[DebrisSprite]) -> Self {
        Self {
            timer: RepeatingTimer::new(gameplay.spawn_interval).with_immediate_first_fire(),
            catalog: catalog.to_vec(),
            gameplay: gameplay.clone(),
            spawned: 0,
        }
    }

    /// Advance the timer and spawn once per fire
    pub fn tick(
        &mut self,
        delta_time: f32,
        stage: &mut Stage,
        motion: &dyn MotionPolicy,
    ) -> Vec<Entity> {
        let fires = self.timer.advance(delta_time);
        (0..fires).filter_map(|_| self.spawn(stage, motion)).collect()
    }

    /// Spawn one debris entity at a random top position
    ///
    /// Returns `None` only when the catalog is empty.
    pub fn spawn(&mut self, stage: &mut Stage, motion: &dyn MotionPolicy) -> Option<Entity> {
        let sprite = self.catalog.choose(&mut stage.rng)?.clone();
        let position = stage.random_top_position();
        let descriptor = MotionDescriptor::sample(stage, &self.gameplay);

        let extent = sprite.extent();
        let node =
            Node::new(EntityKind::Debris, sprite.name, position, extent).with_motion(descriptor);
        let entity = motion.attach(stage, node);
        self.spawned += 1;

        log::debug!(
            "Spawned debris {} at x={:.1} ({:.2}s fall)",
            entity.id(),
            position.x,
            descriptor.duration
        );
        Some(entity)
    }

    /// Stop spawning
    pub fn stop(&mut self) {
        self.timer.stop();
    }

    /// Whether the spawner still fires
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Total debris spawned
    pub fn spawned(&self) -> u64 {
        self.spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetConfig;
    use crate::systems::motion::ScriptedMotion;

    fn spawner() -> Spawner {
        Spawner::new(&GameplayConfig::default(), &AssetConfig::default().debris)
    }

    #[test]
    fn test_spawns_at_top_inside_screen() {
        let mut stage = Stage::new(Viewport::new(640.0, 960.0), Some(5));
        let mut spawner = spawner();
        let catalog = AssetConfig::default().debris;

        for _ in 0..100 {
            let entity = spawner.spawn(&mut stage, &ScriptedMotion).unwrap();
            let node = stage.world.get(entity).unwrap();
            assert!((0.0..=640.0).contains(&node.position().x));
            assert_eq!(node.position().y, 960.0);
            assert!(catalog.iter().any(|sprite| sprite.name == node.sprite));
        }
        assert_eq!(spawner.spawned(), 100);
    }

    #[test]
    fn test_first_spawn_is_immediate_then_once_per_interval() {
        let mut stage = Stage::new(Viewport::new(640.0, 960.0), Some(5));
        let mut spawner = spawner();

        let first = spawner.tick(1.0 / 60.0, &mut stage, &ScriptedMotion);
        assert_eq!(first.len(), 1);

        let mut total = first.len();
        for _ in 0..99 {
            total += spawner.tick(1.0 / 60.0, &mut stage, &ScriptedMotion).len();
        }
        assert_eq!(total, 2);
    }

    #[test]
    fn test_stopped_spawner_is_silent() {
        let mut stage = Stage::new(Viewport::new(640.0, 960.0), Some(5));
        let mut spawner = spawner();
        spawner.stop();

        assert!(spawner.tick(5.0, &mut stage, &ScriptedMotion).is_empty());
        assert!(!spawner.is_running());
    }

    #[test]
    fn test_empty_catalog_spawns_nothing() {
        let mut stage = Stage::new(Viewport::new(640.0, 960.0), Some(5));
        let mut spawner = Spawner::new(&GameplayConfig::default(), &[]);
        assert!(spawner.spawn(&mut stage, &ScriptedMotion).is_none());
    }
}
