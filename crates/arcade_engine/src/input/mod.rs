//! Touch input
//!
//! The headless engine has no input device; touches come from an
//! [`InputScript`] of time-stamped events delivered between frames.

use crate::foundation::math::Vec2;

/// One finger on the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// Finger identifier, stable while the finger stays down
    pub id: u32,
    /// Location in screen space
    pub location: Vec2,
}

impl Touch {
    /// Create a touch at `(x, y)`
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, location: Vec2::new(x, y) }
    }
}

/// Touch event delivered to the application
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Fingers went down
    TouchBegan(Vec<Touch>),
    /// Fingers moved while down
    TouchMoved(Vec<Touch>),
}

/// Time-ordered list of input events to replay
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    events: Vec<(f32, InputEvent)>,
    cursor: usize,
}

impl InputScript {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event at `at` seconds of simulated time
    ///
    /// Events scheduled for the same time are delivered in insertion order.
    pub fn push(&mut self, at: f32, event: InputEvent) {
        let index = self.events[self.cursor..]
            .iter()
            .position(|(time, _)| *time > at)
            .map_or(self.events.len(), |offset| self.cursor + offset);
        self.events.insert(index, (at, event));
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, at: f32, event: InputEvent) -> Self {
        self.push(at, event);
        self
    }

    /// Take every event scheduled at or before `until`
    pub fn due(&mut self, until: f32) -> Vec<InputEvent> {
        let start = self.cursor;
        while self.cursor < self.events.len() && self.events[self.cursor].0 <= until {
            self.cursor += 1;
        }
        self.events[start..self.cursor].iter().map(|(_, event)| event.clone()).collect()
    }

    /// Number of events not yet delivered
    pub fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }
}
