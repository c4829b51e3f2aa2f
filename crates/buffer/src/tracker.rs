// Chunk: docs/chunks/interval_tracking - Edit-tracked intervals over buffer offsets

//! Keeps every registered interval numerically correct across edits.
//!
//! The tracker partitions intervals into three buckets relative to the
//! buffer's gap:
//!
//! - *before-gap*: `end <= gap_start`, heap-ordered so the interval whose
//!   `end` is nearest the gap is O(1) away;
//! - *across-gap*: `begin < gap_start < end`, unordered and expected small;
//! - *after-gap*: `begin >= gap_start`, heap-ordered so the interval whose
//!   `begin` is nearest the gap is O(1) away.
//!
//! The gap buffer calls the `did_*` hooks immediately after each physical
//! mutation. Each hook touches only the intervals adjacent to the edit
//! (plus uniform whole-bucket translations), so the cost is proportional
//! to the intervals actually displaced, not to the total registered count.

use tracing::{debug, trace};

use crate::interval::{Interval, IntervalArena, IntervalId};
use crate::interval_heap::{AscendingByEnd, DescendingByBegin, IntervalHeap};

/// Bucketed registry of intervals, driven by the gap buffer's hooks.
#[derive(Debug, Default)]
pub struct IntervalTracker {
    arena: IntervalArena,
    before_gap: IntervalHeap<AscendingByEnd>,
    across_gap: Vec<IntervalId>,
    after_gap: IntervalHeap<DescendingByBegin>,
}

impl IntervalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered intervals.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn get(&self, id: IntervalId) -> Option<&Interval> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: IntervalId) -> Option<&mut Interval> {
        self.arena.get_mut(id)
    }

    /// Allocates an interval and registers it against the current gap.
    pub fn create(&mut self, begin: usize, end: usize, gap_start: usize) -> IntervalId {
        let id = self.arena.insert(Interval::new(begin, end));
        self.add(id, gap_start);
        id
    }

    /// Classifies `id` into the bucket matching its bounds.
    fn add(&mut self, id: IntervalId, gap_start: usize) {
        let interval = &self.arena[id];
        if interval.end() <= gap_start {
            self.before_gap.push(&self.arena, id);
        } else if interval.begin() >= gap_start {
            self.after_gap.push(&self.arena, id);
        } else {
            self.across_gap.push(id);
        }
    }

    /// Deregisters and frees every interval in `doomed`.
    ///
    /// Heap members are erased from the backing vector followed by one
    /// O(n) re-heapify; this is batch removal, not O(log n) per element.
    pub fn remove(&mut self, doomed: &[IntervalId]) {
        if doomed.is_empty() {
            return;
        }
        self.before_gap.erase(&self.arena, doomed);
        self.across_gap.retain(|id| !doomed.contains(id));
        self.after_gap.erase(&self.arena, doomed);
        for &id in doomed {
            self.arena.remove(id);
        }
    }

    /// Applies a caller-side mutation (shift, push, pop) to a registered
    /// interval, then reclassifies it against `gap_start`. The caller may
    /// move the interval to the other side of the gap; pulling it out of
    /// its bucket first keeps the heaps ordered. Returns false for a
    /// stale handle.
    pub fn with_mut(
        &mut self,
        id: IntervalId,
        f: impl FnOnce(&mut Interval),
        gap_start: usize,
    ) -> bool {
        if self.arena.get(id).is_none() {
            return false;
        }
        self.before_gap.erase(&self.arena, &[id]);
        self.across_gap.retain(|&other| other != id);
        self.after_gap.erase(&self.arena, &[id]);
        f(&mut self.arena[id]);
        self.add(id, gap_start);
        true
    }

    // ==================== Mutation hooks ====================

    /// `count` bytes were just inserted at the gap.
    ///
    /// Straddlers grow (their extent now contains the new bytes: dirty);
    /// everything after the gap translates right (not dirty); everything
    /// before the gap is untouched.
    pub fn did_insert(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        for i in 0..self.across_gap.len() {
            let id = self.across_gap[i];
            self.arena[id].push_back(count);
        }
        self.after_gap.shift_forward(&mut self.arena, count);
    }

    /// `count` bytes were just deleted by enlarging the gap backward;
    /// `gap_start` is the post-deletion gap start.
    ///
    /// Before-gap intervals whose `end` fell inside the enlarged gap are
    /// truncated to the gap and reclassified (dirty). Straddlers lose the
    /// deleted extent (dirty). Everything after the gap translates left
    /// (not dirty).
    pub fn did_delete(&mut self, count: usize, gap_start: usize) {
        if count == 0 {
            return;
        }
        let mut displaced = Vec::new();
        while let Some(top) = self.before_gap.peek() {
            if self.arena[top].end() <= gap_start {
                break;
            }
            self.before_gap.pop(&self.arena);
            let interval = &mut self.arena[top];
            let overshoot = interval.end() - gap_start;
            if interval.is_empty() {
                // A zero-width marker inside the deleted range translates
                // to the gap; it has no extent to truncate and must not be
                // shifted again by the after-gap pass below.
                interval.shift_backward(overshoot);
            } else {
                interval.pop_back(overshoot);
            }
            displaced.push(top);
        }
        if !displaced.is_empty() {
            trace!(count = displaced.len(), "delete displaced before-gap intervals");
        }
        for id in displaced {
            self.add(id, gap_start);
        }

        for i in 0..self.across_gap.len() {
            let id = self.across_gap[i];
            let interval = &mut self.arena[id];
            interval.pop_back(count);
            // A straddler whose begin fell inside the deleted range keeps
            // only the extent that survived: its begin snaps to the gap.
            let overshoot = interval.begin().saturating_sub(gap_start);
            if overshoot > 0 {
                interval.push_front(overshoot);
            }
        }

        self.after_gap.shift_backward(&mut self.arena, count);
    }

    /// The gap was relocated forward (toward the end of the buffer) with
    /// no change in logical length; `gap_start` is its new start.
    ///
    /// The gap swept over bytes that used to be after it, so after-gap
    /// intervals whose `begin` now lies left of the gap are displaced,
    /// along with every current straddler, and all of them reclassify.
    /// No bounds change and nothing is marked dirty: only the split point
    /// moved, not the content.
    pub fn did_move_gap_forward(&mut self, gap_start: usize) {
        let mut displaced = std::mem::take(&mut self.across_gap);
        while let Some(top) = self.after_gap.peek() {
            if self.arena[top].begin() >= gap_start {
                break;
            }
            self.after_gap.pop(&self.arena);
            displaced.push(top);
        }
        if !displaced.is_empty() {
            trace!(count = displaced.len(), gap_start, "forward sweep reclassified intervals");
        }
        for id in displaced {
            self.add(id, gap_start);
        }
    }

    /// The gap was relocated backward; mirror of
    /// [`IntervalTracker::did_move_gap_forward`].
    pub fn did_move_gap_backward(&mut self, gap_start: usize) {
        let mut displaced = std::mem::take(&mut self.across_gap);
        while let Some(top) = self.before_gap.peek() {
            if self.arena[top].end() <= gap_start {
                break;
            }
            self.before_gap.pop(&self.arena);
            displaced.push(top);
        }
        if !displaced.is_empty() {
            trace!(count = displaced.len(), gap_start, "backward sweep reclassified intervals");
        }
        for id in displaced {
            self.add(id, gap_start);
        }
    }

    // ==================== Introspection ====================

    /// Logs every bucket at debug level.
    pub fn dump(&self, gap_start: usize) {
        debug!(
            gap_start,
            before = self.before_gap.len(),
            across = self.across_gap.len(),
            after = self.after_gap.len(),
            "interval buckets"
        );
        for &id in self.before_gap.ids() {
            let interval = &self.arena[id];
            debug!(bucket = "before", begin = interval.begin(), end = interval.end());
        }
        for &id in &self.across_gap {
            let interval = &self.arena[id];
            debug!(bucket = "across", begin = interval.begin(), end = interval.end());
        }
        for &id in self.after_gap.ids() {
            let interval = &self.arena[id];
            debug!(bucket = "after", begin = interval.begin(), end = interval.end());
        }
    }

    /// Walks every bucket and asserts it agrees with `gap_start`.
    ///
    /// Called by the gap buffer after each mutation in debug builds; a
    /// violation is a programmer error, never a runtime condition.
    #[cfg(any(debug_assertions, test))]
    pub fn debug_validate(&self, gap_start: usize) {
        for &id in self.before_gap.ids() {
            let interval = &self.arena[id];
            debug_assert!(interval.begin() <= interval.end());
            debug_assert!(
                interval.end() <= gap_start,
                "before-gap interval [{}, {}) vs gap_start {}",
                interval.begin(),
                interval.end(),
                gap_start,
            );
        }
        for &id in &self.across_gap {
            let interval = &self.arena[id];
            debug_assert!(interval.begin() <= interval.end());
            debug_assert!(
                interval.begin() < gap_start && interval.end() > gap_start,
                "across-gap interval [{}, {}) vs gap_start {}",
                interval.begin(),
                interval.end(),
                gap_start,
            );
        }
        for &id in self.after_gap.ids() {
            let interval = &self.arena[id];
            debug_assert!(interval.begin() <= interval.end());
            debug_assert!(
                interval.begin() >= gap_start,
                "after-gap interval [{}, {}) vs gap_start {}",
                interval.begin(),
                interval.end(),
                gap_start,
            );
        }
    }

    #[cfg(test)]
    fn bucket_of(&self, id: IntervalId) -> &'static str {
        if self.before_gap.ids().contains(&id) {
            "before"
        } else if self.across_gap.contains(&id) {
            "across"
        } else if self.after_gap.ids().contains(&id) {
            "after"
        } else {
            "none"
        }
    }
}
