//! Action runner
//!
//! Holds the running state of every action attached to one entity and
//! advances it once per frame. Leftover time from a finished step flows into
//! the next step of a sequence, so a chain of actions does not drift by a
//! frame per step.

use super::{Action, Timing};
use crate::foundation::math::Transform2D;

/// Progress below this many seconds from the end counts as finished
const FINISH_EPSILON: f32 = 1e-4;

/// Upper bound on restarts of a repeating action within one frame
const MAX_RESTARTS_PER_FRAME: u32 = 8;

/// What the owner should do with the entity after a frame of actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Keep the entity
    Keep,
    /// A `Remove` action fired; destroy the entity
    Remove,
}

#[derive(Debug, Clone, Copy, Default)]
struct StepResult {
    finished: bool,
    leftover: f32,
    remove: bool,
}

impl StepResult {
    fn pending() -> Self {
        Self::default()
    }

    fn done(leftover: f32) -> Self {
        Self { finished: true, leftover, remove: false }
    }

    fn removal(leftover: f32) -> Self {
        Self { finished: true, leftover, remove: true }
    }
}

#[derive(Debug, Clone)]
enum Running {
    MoveBy { delta: crate::foundation::math::Vec2, duration: f32, timing: Timing, elapsed: f32 },
    MoveToX { x: f32, duration: f32, timing: Timing, elapsed: f32, start: Option<f32> },
    RotateBy { angle: f32, duration: f32, elapsed: f32 },
    Wait { duration: f32, elapsed: f32 },
    Group(Vec<(Running, bool)>),
    Sequence { steps: Vec<Action>, index: usize, current: Option<Box<Running>> },
    Repeat { template: Box<Action>, current: Box<Running> },
    Remove,
}

/// Advance a timed leaf and return (progress before, progress after, result)
fn advance_leaf(elapsed: &mut f32, duration: f32, dt: f32) -> (f32, f32, StepResult) {
    if duration <= 0.0 {
        return (0.0, 1.0, StepResult::done(dt));
    }

    let from = *elapsed / duration;
    let used = dt.min((duration - *elapsed).max(0.0));
    *elapsed += used;

    if duration - *elapsed <= FINISH_EPSILON {
        *elapsed = duration;
        (from, 1.0, StepResult::done((dt - used).max(0.0)))
    } else {
        (from, *elapsed / duration, StepResult::pending())
    }
}

impl Running {
    fn start(action: &Action) -> Self {
        match action {
            Action::MoveBy { delta, duration, timing } => Self::MoveBy {
                delta: *delta,
                duration: *duration,
                timing: *timing,
                elapsed: 0.0,
            },
            Action::MoveToX { x, duration, timing } => Self::MoveToX {
                x: *x,
                duration: *duration,
                timing: *timing,
                elapsed: 0.0,
                start: None,
            },
            Action::RotateBy { angle, duration } => Self::RotateBy {
                angle: *angle,
                duration: *duration,
                elapsed: 0.0,
            },
            Action::Wait { duration } => Self::Wait { duration: *duration, elapsed: 0.0 },
            Action::Group(children) => {
                Self::Group(children.iter().map(|child| (Self::start(child), false)).collect())
            }
            Action::Sequence(steps) => Self::Sequence {
                steps: steps.clone(),
                index: 0,
                current: None,
            },
            Action::RepeatForever(child) => Self::Repeat {
                template: child.clone(),
                current: Box::new(Self::start(child)),
            },
            Action::Remove => Self::Remove,
        }
    }

    fn step(&mut self, dt: f32, transform: &mut Transform2D) -> StepResult {
        match self {
            Self::MoveBy { delta, duration, timing, elapsed } => {
                let (from, to, result) = advance_leaf(elapsed, *duration, dt);
                transform.translate(*delta * (timing.apply(to) - timing.apply(from)));
                result
            }
            Self::MoveToX { x, duration, timing, elapsed, start } => {
                let origin = *start.get_or_insert(transform.position.x);
                let (_, to, result) = advance_leaf(elapsed, *duration, dt);
                transform.position.x = origin + (*x - origin) * timing.apply(to);
                result
            }
            Self::RotateBy { angle, duration, elapsed } => {
                let (from, to, result) = advance_leaf(elapsed, *duration, dt);
                transform.rotate(*angle * (to - from));
                result
            }
            Self::Wait { duration, elapsed } => advance_leaf(elapsed, *duration, dt).2,
            Self::Group(children) => {
                let mut all_finished = true;
                let mut leftover = dt;
                for (child, finished) in children.iter_mut() {
                    if *finished {
                        continue;
                    }
                    let result = child.step(dt, transform);
                    if result.remove {
                        return StepResult::removal(result.leftover);
                    }
                    if result.finished {
                        *finished = true;
                        leftover = leftover.min(result.leftover);
                    } else {
                        all_finished = false;
                    }
                }
                if all_finished {
                    StepResult::done(leftover)
                } else {
                    StepResult::pending()
                }
            }
            Self::Sequence { steps, index, current } => {
                let mut remaining = dt;
                loop {
                    let Some(next) = steps.get(*index) else {
                        return StepResult::done(remaining);
                    };
                    let running = current.get_or_insert_with(|| Box::new(Self::start(next)));
                    let result = running.step(remaining, transform);
                    if result.remove {
                        return result;
                    }
                    if !result.finished {
                        return StepResult::pending();
                    }
                    *current = None;
                    *index += 1;
                    remaining = result.leftover;
                }
            }
            Self::Repeat { template, current } => {
                let mut remaining = dt;
                for _ in 0..MAX_RESTARTS_PER_FRAME {
                    let result = current.step(remaining, transform);
                    if result.remove {
                        return result;
                    }
                    if !result.finished {
                        return StepResult::pending();
                    }
                    *current = Box::new(Self::start(template));
                    if result.leftover <= 0.0 {
                        break;
                    }
                    remaining = result.leftover;
                }
                StepResult::pending()
            }
            Self::Remove => StepResult::removal(dt),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    key: Option<String>,
    running: Running,
}

/// Running actions attached to one entity
#[derive(Debug, Clone, Default)]
pub struct ActionRunner {
    slots: Vec<Slot>,
}

impl ActionRunner {
    /// Create an empty runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an action alongside the ones already running
    pub fn run(&mut self, action: &Action) {
        self.slots.push(Slot {
            key: None,
            running: Running::start(action),
        });
    }

    /// Start an action under a key, replacing any action running under the same key
    pub fn run_keyed(&mut self, key: &str, action: &Action) {
        self.remove_action(key);
        self.slots.push(Slot {
            key: Some(key.to_string()),
            running: Running::start(action),
        });
    }

    /// Start an action under a key alongside any already running under it
    pub fn run_stacked(&mut self, key: &str, action: &Action) {
        self.slots.push(Slot {
            key: Some(key.to_string()),
            running: Running::start(action),
        });
    }

    /// Check whether an action is running under `key`
    pub fn has_action(&self, key: &str) -> bool {
        self.slots.iter().any(|slot| slot.key.as_deref() == Some(key))
    }

    /// Stop every action running under `key`
    pub fn remove_action(&mut self, key: &str) {
        self.slots.retain(|slot| slot.key.as_deref() != Some(key));
    }

    /// Stop every action
    pub fn remove_all(&mut self) {
        self.slots.clear();
    }

    /// Number of running actions
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if nothing is running
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Advance every running action by `delta_time` seconds
    ///
    /// Finished actions are dropped. If any action requests removal the
    /// remaining actions are cancelled and [`Directive::Remove`] is returned.
    pub fn advance(&mut self, delta_time: f32, transform: &mut Transform2D) -> Directive {
        let mut index = 0;
        while index < self.slots.len() {
            let result = self.slots[index].running.step(delta_time, transform);
            if result.remove {
                self.slots.clear();
                return Directive::Remove;
            }
            if result.finished {
                self.slots.remove(index);
            } else {
                index += 1;
            }
        }
        Directive::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;
    use std::f32::consts::TAU;

    fn fall_cycle(distance: f32, duration: f32) -> Action {
        Action::repeat_forever(Action::sequence(vec![
            Action::group(vec![
                Action::move_by(Vec2::new(0.0, -distance), duration),
                Action::rotate_by(TAU, duration),
            ]),
            Action::remove(),
        ]))
    }

    #[test]
    fn test_fall_reaches_bottom_then_requests_removal() {
        let mut transform = Transform2D::at(Vec2::new(400.0, 800.0));
        let mut runner = ActionRunner::new();
        runner.run(&fall_cycle(850.0, 3.0));

        for _ in 0..5 {
            assert_eq!(runner.advance(0.5, &mut transform), Directive::Keep);
        }
        assert_relative_eq!(transform.position.y, 800.0 - 850.0 * 5.0 / 6.0, epsilon = 1e-3);

        assert_eq!(runner.advance(0.5, &mut transform), Directive::Remove);
        assert_relative_eq!(transform.position.y, -50.0, epsilon = 1e-3);
        assert_relative_eq!(transform.rotation, TAU, epsilon = 1e-4);
        assert!(runner.is_empty());
    }

    #[test]
    fn test_sequence_carries_leftover_time() {
        let mut transform = Transform2D::default();
        let mut runner = ActionRunner::new();
        runner.run(&Action::sequence(vec![
            Action::wait(0.25),
            Action::move_by(Vec2::new(10.0, 0.0), 1.0),
        ]));

        runner.advance(0.5, &mut transform);
        assert_relative_eq!(transform.position.x, 2.5, epsilon = 1e-4);
    }

    #[test]
    fn test_move_to_x_eases_from_current_position() {
        let mut transform = Transform2D::at(Vec2::new(200.0, 100.0));
        let mut runner = ActionRunner::new();
        runner.run(&Action::move_to_x(300.0, 0.25).with_timing(Timing::EaseInEaseOut));

        runner.advance(0.125, &mut transform);
        assert_relative_eq!(transform.position.x, 250.0, epsilon = 1e-3);

        runner.advance(0.125, &mut transform);
        assert_relative_eq!(transform.position.x, 300.0, epsilon = 1e-3);
        assert_relative_eq!(transform.position.y, 100.0);
        assert!(runner.is_empty());
    }

    #[test]
    fn test_keyed_action_replaces_previous() {
        let mut transform = Transform2D::default();
        let mut runner = ActionRunner::new();
        runner.run_keyed("steer", &Action::move_by(Vec2::new(50.0, 0.0), 0.5));
        runner.run_keyed("steer", &Action::move_by(Vec2::new(-50.0, 0.0), 0.5));
        assert_eq!(runner.len(), 1);
        assert!(runner.has_action("steer"));

        runner.advance(0.5, &mut transform);
        assert_relative_eq!(transform.position.x, -50.0, epsilon = 1e-4);
        assert!(!runner.has_action("steer"));
    }

    #[test]
    fn test_stacked_actions_accumulate_until_removed() {
        let mut transform = Transform2D::default();
        let mut runner = ActionRunner::new();
        runner.run_stacked("tap", &Action::move_by(Vec2::new(50.0, 0.0), 0.5));
        runner.advance(0.25, &mut transform);
        runner.run_stacked("tap", &Action::move_by(Vec2::new(50.0, 0.0), 0.5));
        assert_eq!(runner.len(), 2);

        runner.advance(1.0, &mut transform);
        assert_relative_eq!(transform.position.x, 100.0, epsilon = 1e-4);

        runner.run_stacked("tap", &Action::move_by(Vec2::new(50.0, 0.0), 0.5));
        runner.run_stacked("tap", &Action::move_by(Vec2::new(50.0, 0.0), 0.5));
        runner.remove_action("tap");
        assert!(runner.is_empty());
    }

    #[test]
    fn test_repeat_restarts_child() {
        let mut transform = Transform2D::default();
        let mut runner = ActionRunner::new();
        runner.run(&Action::repeat_forever(Action::move_by(Vec2::new(1.0, 0.0), 1.0)));

        for _ in 0..4 {
            assert_eq!(runner.advance(0.5, &mut transform), Directive::Keep);
        }
        assert_relative_eq!(transform.position.x, 2.0, epsilon = 1e-4);
        assert_eq!(runner.len(), 1);
    }

    #[test]
    fn test_remove_all_stops_motion() {
        let mut transform = Transform2D::default();
        let mut runner = ActionRunner::new();
        runner.run(&fall_cycle(850.0, 3.0));
        runner.remove_all();

        assert_eq!(runner.advance(1.0, &mut transform), Directive::Keep);
        assert_eq!(transform, Transform2D::default());
    }
}
