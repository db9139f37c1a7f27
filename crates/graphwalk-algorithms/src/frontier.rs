//! Frontier containers for the breadth-first engine.
//!
//! The engine only pushes, pops, and re-keys vertex indices. A FIFO queue
//! gives plain breadth-first order; an indexed min-heap gives best-first
//! order, which is what Dijkstra and A* run on.

use std::collections::VecDeque;

const ABSENT: usize = usize::MAX;

/// Queue of discovered but unexpanded vertices.
pub trait Frontier {
    /// Adds `vertex` with priority `key`. Lower keys pop first in keyed frontiers.
    fn push(&mut self, vertex: usize, key: f64);

    /// Removes the next vertex to expand.
    fn pop(&mut self) -> Option<usize>;

    /// Signals that the key of `vertex` decreased to `key`.
    fn update(&mut self, vertex: usize, key: f64);

    /// Number of queued vertices.
    fn len(&self) -> usize;

    /// Returns true if nothing is queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes everything.
    fn clear(&mut self);
}

/// First-in first-out frontier. Keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct FifoFrontier {
    queue: VecDeque<usize>,
}

impl FifoFrontier {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, vertex: usize, _key: f64) {
        self.queue.push_back(vertex);
    }

    fn pop(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    fn update(&mut self, _vertex: usize, _key: f64) {}

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Indexed binary min-heap with decrease-key.
///
/// Each vertex appears at most once. Pushing a vertex already queued acts as
/// an update. Ties pop in unspecified order.
#[derive(Debug, Clone, Default)]
pub struct PriorityFrontier {
    heap: Vec<usize>,
    keys: Vec<f64>,
    positions: Vec<usize>,
}

impl PriorityFrontier {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `vertex` is queued.
    pub fn contains(&self, vertex: usize) -> bool {
        self.positions.get(vertex).is_some_and(|&p| p != ABSENT)
    }

    fn ensure(&mut self, vertex: usize) {
        if vertex >= self.positions.len() {
            self.positions.resize(vertex + 1, ABSENT);
            self.keys.resize(vertex + 1, f64::INFINITY);
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a]] = a;
        self.positions[self.heap[b]] = b;
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.keys[self.heap[pos]] < self.keys[self.heap[parent]] {
                self.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.keys[self.heap[left]] < self.keys[self.heap[smallest]] {
                smallest = left;
            }
            if right < len && self.keys[self.heap[right]] < self.keys[self.heap[smallest]] {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, vertex: usize, key: f64) {
        self.ensure(vertex);
        if self.positions[vertex] != ABSENT {
            self.update(vertex, key);
            return;
        }
        self.keys[vertex] = key;
        self.positions[vertex] = self.heap.len();
        self.heap.push(vertex);
        self.sift_up(self.heap.len() - 1);
    }

    fn pop(&mut self) -> Option<usize> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let top = self.heap.pop()?;
        self.positions[top] = ABSENT;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    fn update(&mut self, vertex: usize, key: f64) {
        if !self.contains(vertex) {
            return;
        }
        let pos = self.positions[vertex];
        let old = self.keys[vertex];
        self.keys[vertex] = key;
        if key < old {
            self.sift_up(pos);
        } else {
            self.sift_down(pos);
        }
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        for &vertex in &self.heap {
            self.positions[vertex] = ABSENT;
        }
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = FifoFrontier::new();
        frontier.push(3, 9.0);
        frontier.push(1, 0.0);
        frontier.update(1, -5.0);
        assert_eq!(frontier.pop(), Some(3));
        assert_eq!(frontier.pop(), Some(1));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_priority_pops_smallest() {
        let mut frontier = PriorityFrontier::new();
        for (vertex, key) in [(0, 5.0), (1, 2.0), (2, 8.0), (3, 1.0), (4, 3.0)] {
            frontier.push(vertex, key);
        }
        let order: Vec<usize> = std::iter::from_fn(|| frontier.pop()).collect();
        assert_eq!(order, vec![3, 1, 4, 0, 2]);
    }

    #[test]
    fn test_priority_decrease_key() {
        let mut frontier = PriorityFrontier::new();
        frontier.push(0, 10.0);
        frontier.push(1, 5.0);
        frontier.push(2, 7.0);
        frontier.update(0, 1.0);
        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop(), Some(0));
        assert!(!frontier.contains(0));
    }

    #[test]
    fn test_push_existing_updates() {
        let mut frontier = PriorityFrontier::new();
        frontier.push(0, 4.0);
        frontier.push(1, 3.0);
        frontier.push(0, 2.0);
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop(), Some(0));
        assert_eq!(frontier.pop(), Some(1));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut frontier = PriorityFrontier::new();
        frontier.update(7, 1.0);
        assert!(frontier.is_empty());
        frontier.push(2, 1.0);
        frontier.clear();
        assert!(!frontier.contains(2));
        frontier.push(2, 0.5);
        assert_eq!(frontier.pop(), Some(2));
    }
}
