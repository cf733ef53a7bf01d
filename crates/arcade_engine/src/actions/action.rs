//! Action descriptions
//!
//! An [`Action`] is an immutable description of a timed change to an
//! entity's transform. The [`ActionRunner`](super::ActionRunner) turns it
//! into running state when it is attached to an entity.

use crate::foundation::math::Vec2;

/// Timing curve applied to an action's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timing {
    /// Constant speed
    #[default]
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Starts fast, ends slow
    EaseOut,
    /// Slow at both ends
    EaseInEaseOut,
}

impl Timing {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInEaseOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Timed change to an entity
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Translate by a relative offset
    MoveBy {
        /// Total offset
        delta: Vec2,
        /// Seconds
        duration: f32,
        /// Progress curve
        timing: Timing,
    },

    /// Animate the x coordinate to an absolute value, keeping y
    ///
    /// The start x is captured on the first step, not when the action is built.
    MoveToX {
        /// Target x coordinate
        x: f32,
        /// Seconds
        duration: f32,
        /// Progress curve
        timing: Timing,
    },

    /// Rotate by a relative angle in radians
    RotateBy {
        /// Total angle
        angle: f32,
        /// Seconds
        duration: f32,
    },

    /// Do nothing for a while
    Wait {
        /// Seconds
        duration: f32,
    },

    /// Run children in parallel; finishes when all have finished
    Group(Vec<Action>),

    /// Run children one after another
    Sequence(Vec<Action>),

    /// Restart the child every time it finishes
    RepeatForever(Box<Action>),

    /// Ask the owner to destroy the entity
    Remove,
}

impl Action {
    /// Translate by `delta` over `duration` seconds
    pub fn move_by(delta: Vec2, duration: f32) -> Self {
        Self::MoveBy { delta, duration, timing: Timing::Linear }
    }

    /// Animate x to `x` over `duration` seconds
    pub fn move_to_x(x: f32, duration: f32) -> Self {
        Self::MoveToX { x, duration, timing: Timing::Linear }
    }

    /// Rotate by `angle` radians over `duration` seconds
    pub fn rotate_by(angle: f32, duration: f32) -> Self {
        Self::RotateBy { angle, duration }
    }

    /// Idle for `duration` seconds
    pub fn wait(duration: f32) -> Self {
        Self::Wait { duration }
    }

    /// Run actions in parallel
    pub fn group(actions: Vec<Action>) -> Self {
        Self::Group(actions)
    }

    /// Run actions in order
    pub fn sequence(actions: Vec<Action>) -> Self {
        Self::Sequence(actions)
    }

    /// Repeat an action forever
    pub fn repeat_forever(action: Action) -> Self {
        Self::RepeatForever(Box::new(action))
    }

    /// Request removal of the entity
    pub fn remove() -> Self {
        Self::Remove
    }

    /// Replace the timing curve of a move action; other actions are unchanged
    pub fn with_timing(self, curve: Timing) -> Self {
        match self {
            Self::MoveBy { delta, duration, .. } => Self::MoveBy { delta, duration, timing: curve },
            Self::MoveToX { x, duration, .. } => Self::MoveToX { x, duration, timing: curve },
            other => other,
        }
    }

    /// Total duration in seconds, or `None` if the action never ends
    pub fn duration(&self) -> Option<f32> {
        match self {
            Self::MoveBy { duration, .. }
            | Self::MoveToX { duration, .. }
            | Self::RotateBy { duration, .. }
            | Self::Wait { duration } => Some(duration.max(0.0)),
            Self::Group(children) => children
                .iter()
                .try_fold(0.0_f32, |longest, child| child.duration().map(|d| longest.max(d))),
            Self::Sequence(children) => children
                .iter()
                .try_fold(0.0_f32, |total, child| child.duration().map(|d| total + d)),
            Self::RepeatForever(_) => None,
            Self::Remove => Some(0.0),
        }
    }
}
