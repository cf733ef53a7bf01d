//! Touch controls
//!
//! Tap steps the ship sideways toward the touch; steps from several taps add
//! up. Drag eases the ship to the touch x and cancels any steps in progress,
//! and a new tap cancels a drag in progress. The thruster flame follows the
//! same actions.

use crate::config::GameplayConfig;
use crate::error::GameError;
use crate::stage::Stage;
use arcade_engine::prelude::*;

/// Action key of tap steps
pub const TAP_KEY: &str = "tap";

/// Action key of the drag follow
pub const DRAG_KEY: &str = "drag";

/// Step the ship left or right of its current x for every touch
pub fn tap(
    stage: &mut Stage,
    touches: &[Touch],
    gameplay: &GameplayConfig,
) -> Result<(), GameError> {
    let ship = stage.ship_entity()?;
    let ship_x = stage
        .world
        .get(ship)
        .map(|node| node.position().x)
        .ok_or(GameError::EntityNotFound("ship"))?;

    for touch in touches {
        let dx = if touch.location.x < ship_x { -gameplay.tap_step } else { gameplay.tap_step };
        let step = Action::move_by(Vec2::new(dx, 0.0), gameplay.tap_duration);
        for_steered(stage, ship, |actions| {
            actions.remove_action(DRAG_KEY);
            actions.run_stacked(TAP_KEY, &step);
        });
    }
    Ok(())
}

/// Ease the ship to the x of the latest moved touch
pub fn drag(
    stage: &mut Stage,
    touches: &[Touch],
    gameplay: &GameplayConfig,
) -> Result<(), GameError> {
    let ship = stage.ship_entity()?;

    if let Some(touch) = touches.last() {
        let follow = Action::move_to_x(touch.location.x, gameplay.drag_duration)
            .with_timing(Timing::EaseInEaseOut);
        for_steered(stage, ship, |actions| {
            actions.remove_action(TAP_KEY);
            actions.run_keyed(DRAG_KEY, &follow);
        });
    }
    Ok(())
}

fn for_steered(stage: &mut Stage, ship: Entity, mut apply: impl FnMut(&mut ActionRunner)) {
    for entity in [Some(ship), stage.thruster].into_iter().flatten() {
        if let Some(node) = stage.world.get_mut(entity) {
            apply(&mut node.actions);
        }
    }
}
