// Chunk: docs/chunks/interval_tracking - Edit-tracked intervals over buffer offsets

//! Binary heaps of interval handles, ordered through the arena.
//!
//! The tracker's side buckets need "the interval nearest the gap" in O(1).
//! `std::collections::BinaryHeap` cannot express that: the ordering key
//! lives in the [`IntervalArena`], not in the element, and the keys move
//! whenever a whole bucket is translated. So this is a small hand-rolled
//! heap over [`IntervalId`] whose comparisons read bounds through the
//! arena passed into each call.
//!
//! Uniform translations (`shift_forward`/`shift_backward`) change every
//! key by the same delta and therefore preserve heap order — no sifting.
//! Arbitrary-element removal is the one operation a binary heap does not
//! support natively: `erase` drops matching handles from the backing
//! vector and re-heapifies in one O(n) pass.

use crate::interval::{Interval, IntervalArena, IntervalId};

/// Ordering strategy for an [`IntervalHeap`].
pub trait HeapOrder {
    /// Returns true if `a` belongs nearer the top of the heap than `b`.
    fn precedes(a: &Interval, b: &Interval) -> bool;
}

/// Top of the heap is the interval with the greatest `end`.
///
/// Used for the before-gap bucket: the interval whose `end` is closest to
/// `gap_start` surfaces first.
#[derive(Debug)]
pub enum AscendingByEnd {}

impl HeapOrder for AscendingByEnd {
    fn precedes(a: &Interval, b: &Interval) -> bool {
        a.end() > b.end()
    }
}

/// Top of the heap is the interval with the smallest `begin`.
///
/// Used for the after-gap bucket: the interval whose `begin` is closest
/// to `gap_start` surfaces first.
#[derive(Debug)]
pub enum DescendingByBegin {}

impl HeapOrder for DescendingByBegin {
    fn precedes(a: &Interval, b: &Interval) -> bool {
        a.begin() < b.begin()
    }
}

/// A binary heap of interval handles.
///
/// Intervals with equal keys are ordered arbitrarily relative to each
/// other; there is no stability guarantee.
#[derive(Debug)]
pub struct IntervalHeap<O: HeapOrder> {
    items: Vec<IntervalId>,
    _order: std::marker::PhantomData<O>,
}

impl<O: HeapOrder> Default for IntervalHeap<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: HeapOrder> IntervalHeap<O> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _order: std::marker::PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The handle nearest the gap, if any. O(1).
    pub fn peek(&self) -> Option<IntervalId> {
        self.items.first().copied()
    }

    /// All handles in heap order (not sorted). For bucket walks and dumps.
    pub fn ids(&self) -> &[IntervalId] {
        &self.items
    }

    pub fn push(&mut self, arena: &IntervalArena, id: IntervalId) {
        self.items.push(id);
        self.sift_up(arena, self.items.len() - 1);
    }

    pub fn pop(&mut self, arena: &IntervalArena) -> Option<IntervalId> {
        if self.items.is_empty() {
            return None;
        }
        let top = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(arena, 0);
        }
        Some(top)
    }

    /// Translates every member forward by `count`. Relative order is
    /// unchanged, so the heap property survives without sifting.
    pub fn shift_forward(&self, arena: &mut IntervalArena, count: usize) {
        for &id in &self.items {
            arena[id].shift_forward(count);
        }
    }

    /// Translates every member backward by `count`.
    pub fn shift_backward(&self, arena: &mut IntervalArena, count: usize) {
        for &id in &self.items {
            arena[id].shift_backward(count);
        }
    }

    /// Removes every handle in `doomed` that is present in this heap,
    /// then restores the heap property with a single heapify pass.
    pub fn erase(&mut self, arena: &IntervalArena, doomed: &[IntervalId]) {
        let before = self.items.len();
        self.items.retain(|id| !doomed.contains(id));
        if self.items.len() != before {
            self.heapify(arena);
        }
    }

    fn heapify(&mut self, arena: &IntervalArena) {
        for i in (0..self.items.len() / 2).rev() {
            self.sift_down(arena, i);
        }
    }

    fn sift_up(&mut self, arena: &IntervalArena, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if O::precedes(&arena[self.items[child]], &arena[self.items[parent]]) {
                self.items.swap(child, parent);
                child = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, arena: &IntervalArena, mut parent: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * parent + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut first = parent;
            if O::precedes(&arena[self.items[left]], &arena[self.items[first]]) {
                first = left;
            }
            if right < len && O::precedes(&arena[self.items[right]], &arena[self.items[first]]) {
                first = right;
            }
            if first == parent {
                break;
            }
            self.items.swap(parent, first);
            parent = first;
        }
    }
}
