//! Per-frame action stepping

use crate::components::Node;
use crate::stage::Stage;
use arcade_engine::actions::Directive;

/// Advance every entity's actions and remove entities whose actions asked for it
///
/// Returns the removed nodes so the motion policy can react to them.
pub fn run_actions(stage: &mut Stage, delta_time: f32) -> Vec<Node> {
    let mut finished = Vec::new();
    for (entity, node) in stage.world.iter_mut() {
        if node.actions.is_empty() {
            continue;
        }
        let Node { actions, transform, .. } = node;
        if actions.advance(delta_time, transform) == Directive::Remove {
            finished.push(entity);
        }
    }

    finished.into_iter().filter_map(|entity| stage.despawn(entity)).collect()
}
