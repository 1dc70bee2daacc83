//! Generic binary heap used both for zone ranking and for Dijkstra.
//!
//! `PriorityHeap` is parameterized by key type, item type and direction.
//! [`MaxFirst`] surfaces the largest key, [`MinFirst`] the smallest. Among
//! equal keys the smaller item surfaces first in either direction, so the
//! extraction order never depends on heap shape.
//!
//! Storage grows on demand. A push never drops its entry: the only way it
//! can fail is a failed reservation, reported as
//! [`ReliefError::StorageExhausted`].

use std::marker::PhantomData;

use crate::error::{try_reserve, ReliefError};

/// Direction of a [`PriorityHeap`].
pub trait HeapOrder {
    /// Returns `true` when key `a` must surface before key `b`.
    fn precedes<K: Ord>(a: &K, b: &K) -> bool;
}

/// Largest key first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFirst;

/// Smallest key first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinFirst;

impl HeapOrder for MaxFirst {
    #[inline]
    fn precedes<K: Ord>(a: &K, b: &K) -> bool {
        a > b
    }
}

impl HeapOrder for MinFirst {
    #[inline]
    fn precedes<K: Ord>(a: &K, b: &K) -> bool {
        a < b
    }
}

/// A key paired with the item it ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapEntry<K, T> {
    pub key: K,
    pub item: T,
}

/// Binary heap over [`HeapEntry`] values.
#[derive(Debug, Clone)]
pub struct PriorityHeap<K, T, O> {
    data: Vec<HeapEntry<K, T>>,
    order: PhantomData<O>,
}

/// Largest key first.
pub type MaxHeap<K, T> = PriorityHeap<K, T, MaxFirst>;
/// Smallest key first.
pub type MinHeap<K, T> = PriorityHeap<K, T, MinFirst>;

impl<K: Ord, T: Ord, O: HeapOrder> Default for PriorityHeap<K, T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, T: Ord, O: HeapOrder> PriorityHeap<K, T, O> {
    /// Empty heap with no storage reserved.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            order: PhantomData,
        }
    }

    /// Empty heap with room for `capacity` entries before it has to grow.
    pub fn with_capacity(capacity: usize) -> Result<Self, ReliefError> {
        let mut heap = Self::new();
        try_reserve(&mut heap.data, capacity, "priority heap")?;
        Ok(heap)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The entry the next [`pop`](Self::pop) would return.
    pub fn peek(&self) -> Option<&HeapEntry<K, T>> {
        self.data.first()
    }

    /// Insert `item` under `key` in O(log n).
    pub fn push(&mut self, key: K, item: T) -> Result<(), ReliefError> {
        if self.data.len() == self.data.capacity() {
            try_reserve(&mut self.data, 1, "priority heap")?;
        }
        self.data.push(HeapEntry { key, item });
        let last = self.data.len() - 1;
        self.sift_up(last);
        Ok(())
    }

    /// Remove the top entry in O(log n).
    pub fn pop(&mut self) -> Result<HeapEntry<K, T>, ReliefError> {
        if self.data.is_empty() {
            return Err(ReliefError::EmptyQueue);
        }
        let top = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Ok(top)
    }

    /// Drain every entry in extraction order.
    pub fn into_sorted_vec(mut self) -> Result<Vec<HeapEntry<K, T>>, ReliefError> {
        let mut sorted = Vec::new();
        try_reserve(&mut sorted, self.data.len(), "sorted heap")?;
        while let Ok(entry) = self.pop() {
            sorted.push(entry);
        }
        Ok(sorted)
    }

    /// Whether the entry at `a` must sit above the entry at `b`.
    fn ahead(&self, a: usize, b: usize) -> bool {
        let (ea, eb) = (&self.data[a], &self.data[b]);
        if ea.key == eb.key {
            ea.item < eb.item
        } else {
            O::precedes(&ea.key, &eb.key)
        }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.ahead(idx, parent) {
                break;
            }
            self.data.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut best = idx;

            if left < len && self.ahead(left, best) {
                best = left;
            }
            if right < len && self.ahead(right, best) {
                best = right;
            }
            if best == idx {
                break;
            }
            self.data.swap(idx, best);
            idx = best;
        }
    }
}
