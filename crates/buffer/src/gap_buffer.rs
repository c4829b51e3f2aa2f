// Chunk: docs/chunks/text_store - Gap buffer text store with interval tracking

//! Gap buffer: the byte store at the core of the editor.
//!
//! A gap buffer keeps one relocatable contiguous free region (the gap) at
//! the edit point, so localized inserts and deletes are O(1) amortized;
//! moving the edit point costs O(distance) and amortizes well for real
//! editing patterns.
//!
//! The buffer drives an [`IntervalTracker`]: after every structural
//! mutation (insert, delete, or pure gap relocation) it notifies the
//! tracker so that every registered interval stays numerically correct
//! without copying text or invalidating interval identity.
//!
//! All offsets are logical byte offsets. Out-of-range offsets are clamped
//! into `[0, len]`, never rejected — the hot edit path stays branch-light
//! and there is no error surface.

use std::fmt;

use tracing::trace;

use crate::interval::{Interval, IntervalId};
use crate::text_view::TextView;
use crate::tracker::IntervalTracker;

/// A byte-oriented gap buffer with edit-tracked intervals.
///
/// Physically the storage is `[prefix | gap | suffix]`; the logical text
/// is the prefix followed by the suffix. Logical offset `o` maps to
/// physical `o` when `o < gap_start`, else `o + gap_len`.
///
/// One buffer exists per open document and lives for the editing
/// session. Collaborators register intervals via
/// [`GapBuffer::create_interval`] and deregister them in batches with
/// [`GapBuffer::remove_intervals`] before discarding the handles.
#[derive(Debug, Default)]
pub struct GapBuffer {
    /// Backing store. Bytes outside `[gap_start, gap_end)` always spell
    /// the logical text in order.
    buf: Vec<u8>,
    /// First byte of the gap.
    gap_start: usize,
    /// One past the last byte of the gap.
    gap_end: usize,
    tracker: IntervalTracker,
}

impl GapBuffer {
    /// Creates an empty buffer. The first insert allocates storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer owning `bytes`, with an empty gap at offset 0.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            buf: bytes,
            gap_start: 0,
            gap_end: 0,
            tracker: IntervalTracker::new(),
        }
    }

    /// Creates a buffer initialized with the bytes of `text`.
    ///
    /// Note: not `FromStr` because construction cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self::from_bytes(text.as_bytes().to_vec())
    }

    // ==================== Accessors ====================

    /// Logical size in bytes (excluding the gap).
    pub fn len(&self) -> usize {
        self.buf.len() - self.gap_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current gap position in logical coordinates.
    pub fn gap_position(&self) -> usize {
        self.gap_start
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// The byte at logical offset `pos`, or `None` past the end.
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        if pos >= self.len() {
            return None;
        }
        let physical = if pos < self.gap_start {
            pos
        } else {
            pos + self.gap_len()
        };
        Some(self.buf[physical])
    }

    /// Materializes the full logical content.
    pub fn contents(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.len());
        result.extend_from_slice(&self.buf[..self.gap_start]);
        result.extend_from_slice(&self.buf[self.gap_end..]);
        result
    }

    /// The full logical content as up to two slices, without copying.
    pub fn text(&self) -> TextView<'_> {
        TextView::from_pair(&self.buf[..self.gap_start], &self.buf[self.gap_end..])
    }

    /// The content of a registered interval, without copying.
    ///
    /// A single slice when the interval lies entirely on one side of the
    /// gap; two slices when it straddles. `None` for a stale handle.
    pub fn text_for_interval(&self, id: IntervalId) -> Option<TextView<'_>> {
        let interval = self.tracker.get(id)?;
        let (begin, end) = (interval.begin(), interval.end());
        debug_assert!(end <= self.len());
        let view = if end <= self.gap_start {
            TextView::from_slice(&self.buf[begin..end])
        } else if begin >= self.gap_start {
            let gap = self.gap_len();
            TextView::from_slice(&self.buf[begin + gap..end + gap])
        } else {
            // The interval crosses the gap.
            let tail = end - self.gap_start;
            TextView::from_pair(
                &self.buf[begin..self.gap_start],
                &self.buf[self.gap_end..self.gap_end + tail],
            )
        };
        Some(view)
    }

    // ==================== Search ====================

    /// First occurrence of `byte` at or after logical offset `from`.
    ///
    /// Scans the physical left segment, then the right segment,
    /// translating right-segment hits back to logical offsets.
    pub fn find(&self, byte: u8, from: usize) -> Option<usize> {
        let from = from.min(self.len());
        if from < self.gap_start {
            if let Some(i) = self.buf[from..self.gap_start].iter().position(|&b| b == byte) {
                return Some(from + i);
            }
        }
        let gap = self.gap_len();
        let start = from.max(self.gap_start) + gap;
        if start < self.buf.len() {
            if let Some(i) = self.buf[start..].iter().position(|&b| b == byte) {
                return Some(start + i - gap);
            }
        }
        None
    }

    /// Last occurrence of `byte` strictly before logical offset `from`.
    ///
    /// Mirror of [`GapBuffer::find`]: the right segment is scanned
    /// backward first, then the left segment.
    pub fn rfind(&self, byte: u8, from: usize) -> Option<usize> {
        let from = from.min(self.len());
        if from > self.gap_start {
            let gap = self.gap_len();
            let segment = &self.buf[self.gap_end..from + gap];
            if let Some(i) = segment.iter().rposition(|&b| b == byte) {
                return Some(self.gap_start + i);
            }
        }
        let limit = from.min(self.gap_start);
        self.buf[..limit].iter().rposition(|&b| b == byte)
    }

    // ==================== Mutation ====================

    /// Inserts one byte at logical offset `pos` (clamped into `[0, len]`).
    pub fn insert_byte(&mut self, pos: usize, byte: u8) {
        self.insert(pos, &[byte]);
    }

    /// Inserts `bytes` at logical offset `pos` (clamped into `[0, len]`).
    ///
    /// Expands the storage first if the gap is too small, relocates the
    /// gap to `pos`, writes into the gap, then notifies the tracker.
    pub fn insert(&mut self, pos: usize, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if self.gap_len() < bytes.len() {
            self.expand(bytes.len());
        }
        self.move_gap_to(pos);
        self.buf[self.gap_start..self.gap_start + bytes.len()].copy_from_slice(bytes);
        self.gap_start += bytes.len();
        self.tracker.did_insert(bytes.len());
        self.debug_validate();
    }

    /// Deletes the byte at logical offset `pos`, if any.
    pub fn delete_after(&mut self, pos: usize) {
        self.delete_range(pos, pos.saturating_add(1));
    }

    /// Deletes logical range `[begin, end)`, both bounds clamped into
    /// `[0, len]`. An empty range after clamping is a no-op: text and
    /// every registered interval are byte-for-byte unchanged.
    ///
    /// Deletion is "enlarge the gap over the doomed bytes": the gap is
    /// relocated so it starts at `end`, then `gap_start` retreats by the
    /// deleted count.
    pub fn delete_range(&mut self, begin: usize, end: usize) {
        let size = self.len();
        let begin = begin.min(size);
        let end = end.min(size);
        if begin >= end {
            return;
        }
        let count = end - begin;
        self.move_gap_to(end);
        self.gap_start -= count;
        self.tracker.did_delete(count, self.gap_start);
        // The gap start itself moved backward; straddlers and before-gap
        // overhangs reclassify exactly as for a pure relocation.
        self.tracker.did_move_gap_backward(self.gap_start);
        self.debug_validate();
    }

    /// Relocates the gap to logical offset `pos` without changing the
    /// logical content.
    ///
    /// This is a distinct primitive (cursor movement through text, line
    /// boundary scans): no bytes are inserted or deleted, but straddling
    /// intervals change buckets, so the tracker is still notified.
    pub fn move_gap_to(&mut self, pos: usize) {
        let pos = pos.min(self.len());
        match pos.cmp(&self.gap_start) {
            std::cmp::Ordering::Greater => {
                let delta = pos - self.gap_start;
                self.buf
                    .copy_within(self.gap_end..self.gap_end + delta, self.gap_start);
                self.gap_start += delta;
                self.gap_end += delta;
                trace!(delta, gap_start = self.gap_start, "gap moved forward");
                self.tracker.did_move_gap_forward(self.gap_start);
            }
            std::cmp::Ordering::Less => {
                let delta = self.gap_start - pos;
                self.gap_start -= delta;
                self.gap_end -= delta;
                self.buf
                    .copy_within(self.gap_start..self.gap_start + delta, self.gap_end);
                trace!(delta, gap_start = self.gap_start, "gap moved backward");
                self.tracker.did_move_gap_backward(self.gap_start);
            }
            std::cmp::Ordering::Equal => {}
        }
        self.debug_validate();
    }

    /// Reallocates so the gap holds at least `required_gap_size` bytes.
    ///
    /// New capacity is `ceil(1.5 * (len + required_gap_size)) + 1`; the
    /// 1.5x factor amortizes repeated point inserts to O(1) average. The
    /// prefix stays in place and the suffix moves to the end of the new
    /// allocation.
    fn expand(&mut self, required_gap_size: usize) {
        if self.gap_len() >= required_gap_size {
            return;
        }
        let min_size = self.len() + required_gap_size;
        let new_capacity = min_size + (min_size + 1) / 2 + 1;
        let tail = self.buf.len() - self.gap_end;

        let mut new_buf = vec![0u8; new_capacity];
        new_buf[..self.gap_start].copy_from_slice(&self.buf[..self.gap_start]);
        new_buf[new_capacity - tail..].copy_from_slice(&self.buf[self.gap_end..]);
        trace!(
            old_capacity = self.buf.len(),
            new_capacity,
            "expanded gap storage"
        );
        self.gap_end = new_capacity - tail;
        self.buf = new_buf;
    }

    // ==================== Intervals ====================

    /// Allocates and registers an interval over `[begin, end)`, clamped
    /// into the current logical bounds. The handle stays valid across
    /// all edits until removed.
    pub fn create_interval(&mut self, begin: usize, end: usize) -> IntervalId {
        let size = self.len();
        let begin = begin.min(size);
        let end = end.clamp(begin, size);
        self.tracker.create(begin, end, self.gap_start)
    }

    /// Deregisters and frees every interval in `doomed`.
    pub fn remove_intervals(&mut self, doomed: &[IntervalId]) {
        self.tracker.remove(doomed);
    }

    /// Read access to a registered interval.
    pub fn interval(&self, id: IntervalId) -> Option<&Interval> {
        self.tracker.get(id)
    }

    /// Number of registered intervals.
    pub fn interval_count(&self) -> usize {
        self.tracker.len()
    }

    /// Clears an interval's dirty flag. Returns false for a stale handle.
    pub fn mark_interval_clean(&mut self, id: IntervalId) -> bool {
        match self.tracker.get_mut(id) {
            Some(interval) => {
                interval.mark_clean();
                true
            }
            None => false,
        }
    }

    /// Applies a caller-side mutation (shift, push, pop) to a registered
    /// interval and reclassifies it against the gap. Returns false for a
    /// stale handle.
    pub fn with_interval_mut(&mut self, id: IntervalId, f: impl FnOnce(&mut Interval)) -> bool {
        let found = self.tracker.with_mut(id, f, self.gap_start);
        self.debug_validate();
        found
    }

    /// Logs every interval bucket at debug level.
    pub fn dump_intervals(&self) {
        self.tracker.dump(self.gap_start);
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        debug_assert!(self.gap_start <= self.gap_end);
        debug_assert!(self.gap_end <= self.buf.len());
        self.tracker.debug_validate(self.gap_start);
    }

    #[cfg(not(debug_assertions))]
    fn debug_validate(&self) {}
}

impl fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.buf[..self.gap_start]))?;
        write!(f, "{}", String::from_utf8_lossy(&self.buf[self.gap_end..]))
    }
}
