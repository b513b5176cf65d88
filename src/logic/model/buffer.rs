//! Ring Buffer - bounded FIFO of recent entries
//!
//! Oldest entry is evicted once the buffer grows past its capacity.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Capacity is clamped to at least 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push an entry, returning the evicted one if the buffer was full
    pub fn push(&mut self, item: T) -> Option<T> {
        self.items.push_back(item);
        if self.items.len() > self.capacity {
            self.items.pop_front()
        } else {
            None
        }
    }

    /// Shrinking drops the oldest entries immediately
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Oldest first
    pub fn into_vec(self) -> Vec<T> {
        self.items.into()
    }

    pub fn status(&self) -> BufferStatus {
        BufferStatus {
            current_size: self.items.len(),
            capacity: self.capacity,
            fill_percent: (self.items.len() as f32 / self.capacity as f32 * 100.0).min(100.0),
        }
    }
}

/// Buffer status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferStatus {
    pub current_size: usize,
    pub capacity: usize,
    pub fill_percent: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_first() {
        let mut buffer = RingBuffer::new(3);
        assert!(buffer.push(1).is_none());
        assert!(buffer.push(2).is_none());
        assert!(buffer.push(3).is_none());
        assert_eq!(buffer.push(4), Some(1));

        let items: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(items, vec![2, 3, 4]);
        assert_eq!(buffer.latest(), Some(&4));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut buffer = RingBuffer::new(5);
        for i in 0..100 {
            buffer.push(i);
            assert!(buffer.len() <= 5);
        }
        assert_eq!(buffer.iter().next(), Some(&95));
    }

    #[test]
    fn test_shrink_drops_oldest() {
        let mut buffer = RingBuffer::new(4);
        for i in 0..4 {
            buffer.push(i);
        }
        buffer.set_capacity(2);
        let items: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(items, vec![2, 3]);
        assert_eq!(buffer.status().fill_percent, 100.0);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut buffer = RingBuffer::new(0);
        buffer.push("a");
        buffer.push("b");
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.capacity(), 1);
    }
}
