//! Game systems, run by the session in a fixed order each frame:
//! spawner, actions, physics, motion post-step, collision, outcome.

pub mod animation;
pub mod collision;
pub mod controls;
pub mod motion;
pub mod outcome;
pub mod spawner;

pub use collision::{detector_for, CollisionDetector, Detection};
pub use motion::{policy_for, MotionDescriptor, MotionPolicy, MotionReport};
pub use outcome::OutcomeHandler;
pub use spawner::Spawner;
