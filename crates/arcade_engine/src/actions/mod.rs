//! Timed actions
//!
//! Actions describe how an entity's transform changes over time and are run
//! by a per-entity [`ActionRunner`].

mod action;
mod runner;

pub use action::{Action, Timing};
pub use runner::{ActionRunner, Directive};
