//! Event queue
//!
//! Producers push events during a tick; a single consumer drains them once
//! per tick in the order they were pushed.

use std::collections::VecDeque;

/// FIFO queue of events of one type
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    pending: VecDeque<E>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventQueue<E> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Queue an event
    pub fn push(&mut self, event: E) {
        self.pending.push_back(event);
    }

    /// Remove and yield every queued event in order
    pub fn drain(&mut self) -> impl Iterator<Item = E> + '_ {
        self.pending.drain(..)
    }

    /// Drop every queued event
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut queue = EventQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::new();
        queue.push("begin");
        queue.clear();
        assert_eq!(queue.len(), 0);
    }
}
