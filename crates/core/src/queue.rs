use common::types::Weight;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Heap entry ordered by `(key, seq)`. `seq` is the insertion counter, so equal keys
/// come out first-in first-out.
#[derive(Debug, Clone)]
struct QueueEntry<T> {
    key: Weight,
    seq: u64,
    item: T,
}

impl<T> PartialEq for QueueEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for QueueEntry<T> {}

impl<T> PartialOrd for QueueEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for QueueEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-oriented priority queue without decrease-key.
///
/// Lowering an item's priority means pushing it again; the caller discards the stale
/// copies when they surface (lazy deletion).
#[derive(Debug, Clone)]
pub struct MinQueue<T> {
    heap: BinaryHeap<Reverse<QueueEntry<T>>>,
    next_seq: u64,
}

impl<T> MinQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Inserts unconditionally; duplicates of `item` are allowed.
    pub fn push(&mut self, item: T, key: Weight) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(QueueEntry { key, seq, item }));
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_min(&mut self) -> Option<(T, Weight)> {
        self.heap
            .pop()
            .map(|Reverse(QueueEntry { key, item, .. })| (item, key))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for MinQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_non_decreasing_key_order() {
        let mut queue = MinQueue::new();
        queue.push("c", 3.0);
        queue.push("a", 1.0);
        queue.push("d", 4.0);
        queue.push("b", 2.0);

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_min()).collect();
        assert_eq!(order, vec![("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]);
    }

    #[test]
    fn equal_keys_pop_in_insertion_order() {
        let mut queue = MinQueue::new();
        queue.push(10, 1.0);
        queue.push(20, 1.0);
        queue.push(30, 1.0);

        assert_eq!(queue.pop_min(), Some((10, 1.0)));
        assert_eq!(queue.pop_min(), Some((20, 1.0)));
        assert_eq!(queue.pop_min(), Some((30, 1.0)));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut queue = MinQueue::new();
        queue.push('x', 5.0);
        queue.push('x', 2.0);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop_min(), Some(('x', 2.0)));
        assert_eq!(queue.pop_min(), Some(('x', 5.0)));
        assert!(queue.is_empty());
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut queue: MinQueue<usize> = MinQueue::default();
        assert!(queue.is_empty());
        assert_eq!(queue.pop_min(), None);
    }

    #[test]
    fn negative_and_infinite_keys_order_correctly() {
        let mut queue = MinQueue::with_capacity(3);
        queue.push(1, f64::INFINITY);
        queue.push(2, -3.5);
        queue.push(3, 0.0);

        assert_eq!(queue.pop_min().map(|(n, _)| n), Some(2));
        assert_eq!(queue.pop_min().map(|(n, _)| n), Some(3));
        assert_eq!(queue.pop_min().map(|(n, _)| n), Some(1));
    }
}
