// Chunk: docs/chunks/interval_tracking - Edit-tracked intervals over buffer offsets

//! Intervals: mutable `[begin, end)` regions over logical buffer offsets.
//!
//! An interval knows nothing about the buffer that contains it. It only
//! supports local bound adjustments (extend, truncate, translate) plus a
//! dirty flag that records whether an overlapping edit changed its extent,
//! as opposed to merely translating it.
//!
//! Intervals live in an [`IntervalArena`] and are referred to by stable
//! [`IntervalId`] handles, so collaborators can hold on to a region across
//! arbitrary edits without dangling references.

/// Stable handle to an interval stored in an [`IntervalArena`].
///
/// Handles remain valid until the interval is removed from the arena.
/// Using a handle after removal is a programmer error and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalId(usize);

/// A half-open `[begin, end)` region of logical byte offsets.
///
/// Invariant: `begin <= end` at all times. Every operation below preserves
/// it by clamping.
///
/// The dirty flag is set exactly when an operation truncates or extends
/// the interval; pure translations (`shift_forward`, `shift_backward`)
/// never set it. The flag is never cleared except by [`Interval::mark_clean`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    begin: usize,
    end: usize,
    dirty: bool,
}

impl Interval {
    /// Creates a clean interval over `[begin, end)`.
    ///
    /// Debug-asserts `begin <= end`; in release builds a reversed pair is
    /// clamped to an empty interval at `begin`.
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end, "reversed interval [{begin}, {end})");
        Self {
            begin,
            end: end.max(begin),
            dirty: false,
        }
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag. Only callers do this; the tracker never does.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Extends `begin` backward by `count`, saturating at 0.
    ///
    /// Marks dirty only if `begin` actually moved.
    pub fn push_front(&mut self, count: usize) {
        let moved = self.begin.min(count);
        if moved > 0 {
            self.begin -= moved;
            self.dirty = true;
        }
    }

    /// Extends `end` forward by `count`. Marks dirty if `count > 0`.
    pub fn push_back(&mut self, count: usize) {
        if count > 0 {
            self.end += count;
            self.dirty = true;
        }
    }

    /// Shrinks the interval from the front: `begin` advances by `count`,
    /// stopping at `end`.
    ///
    /// A shrink attempt on an already-empty interval is a no-op and does
    /// not redundantly mark dirty.
    pub fn pop_front(&mut self, count: usize) {
        if count == 0 || self.is_empty() {
            return;
        }
        self.begin = (self.begin + count).min(self.end);
        self.dirty = true;
    }

    /// Shrinks the interval from the back: `end` retreats by `count`.
    ///
    /// When the whole interval falls inside the removed extent, `begin`
    /// follows `end` down so the interval collapses at the new `end`
    /// (this is what lets a deletion truncate a fully-covered interval to
    /// an empty interval at the gap). No-op on an already-empty interval.
    pub fn pop_back(&mut self, count: usize) {
        if count == 0 || self.is_empty() {
            return;
        }
        self.end = self.end.saturating_sub(count);
        self.begin = self.begin.min(self.end);
        self.dirty = true;
    }

    /// Translates both bounds forward by `count`. Never marks dirty.
    pub fn shift_forward(&mut self, count: usize) {
        self.begin += count;
        self.end += count;
    }

    /// Translates both bounds backward by `count`, saturating so `begin`
    /// stops at 0 (both bounds move by the same delta). Never marks dirty.
    pub fn shift_backward(&mut self, count: usize) {
        let delta = self.begin.min(count);
        self.begin -= delta;
        self.end -= delta;
    }
}

/// Slot arena for intervals with stable integer handles.
///
/// Removal pushes the slot onto a free list; the slot is reused by a later
/// insert. A handle is only ever live for one interval at a time, so
/// collaborators that deregister before discarding their handles (the
/// required discipline) never observe reuse.
#[derive(Debug, Default)]
pub struct IntervalArena {
    slots: Vec<Option<Interval>>,
    free: Vec<usize>,
}

impl IntervalArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live intervals.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `interval` and returns its handle.
    pub fn insert(&mut self, interval: Interval) -> IntervalId {
        match self.free.pop() {
            Some(slot) => {
                debug_assert!(self.slots[slot].is_none());
                self.slots[slot] = Some(interval);
                IntervalId(slot)
            }
            None => {
                self.slots.push(Some(interval));
                IntervalId(self.slots.len() - 1)
            }
        }
    }

    /// Removes the interval behind `id`, freeing the slot for reuse.
    ///
    /// Returns `None` if the handle is not live.
    pub fn remove(&mut self, id: IntervalId) -> Option<Interval> {
        let interval = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(interval)
    }

    pub fn get(&self, id: IntervalId) -> Option<&Interval> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: IntervalId) -> Option<&mut Interval> {
        self.slots.get_mut(id.0)?.as_mut()
    }
}

impl std::ops::Index<IntervalId> for IntervalArena {
    type Output = Interval;

    fn index(&self, id: IntervalId) -> &Interval {
        self.get(id).expect("stale interval handle")
    }
}

impl std::ops::IndexMut<IntervalId> for IntervalArena {
    fn index_mut(&mut self, id: IntervalId) -> &mut Interval {
        self.get_mut(id).expect("stale interval handle")
    }
}
