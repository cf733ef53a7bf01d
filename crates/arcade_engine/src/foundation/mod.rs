//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - 2D math types and bounding rectangles
//! - Frame timing and repeating timers
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
