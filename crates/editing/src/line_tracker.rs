// Chunk: docs/chunks/editing_collaborators - Cursor, selection, and line tracking

//! Partitions the buffer into per-line intervals.
//!
//! Each line is registered as an interval `[start, end)` that excludes
//! its terminating `\n`, so the buffer translates line bounds across
//! edits for free and the dirty flags say which lines need re-render.
//! Structural changes (a line break typed or deleted) are not something
//! the intervals can express; the owner rescans with
//! [`LineTracker::update_lines`] when that happens.

use tracing::trace;

use tern_buffer::{GapBuffer, IntervalId};

/// Registry of one interval per line, in document order.
#[derive(Debug, Default)]
pub struct LineTracker {
    lines: Vec<IntervalId>,
}

impl LineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked lines. Text ending in `\n` has no trailing
    /// empty line.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The interval handle for line `index`, if tracked.
    pub fn line(&self, index: usize) -> Option<IntervalId> {
        self.lines.get(index).copied()
    }

    /// Deregisters every line interval.
    pub fn clear(&mut self, buffer: &mut GapBuffer) {
        buffer.remove_intervals(&self.lines);
        self.lines.clear();
    }

    /// Rebuilds the line registry from scratch by scanning for line
    /// breaks.
    pub fn update_lines(&mut self, buffer: &mut GapBuffer) {
        self.clear(buffer);
        let size = buffer.len();
        let mut offset = 0;
        while offset < size {
            match buffer.find(b'\n', offset) {
                Some(end) => {
                    self.lines.push(buffer.create_interval(offset, end));
                    offset = end + 1;
                }
                None => {
                    self.lines.push(buffer.create_interval(offset, size));
                    break;
                }
            }
        }
        trace!(lines = self.lines.len(), "rescanned line intervals");
    }

    /// Index of the line whose span contains `offset`. An offset on a
    /// line's terminating `\n` belongs to that line.
    pub fn line_containing(&self, buffer: &GapBuffer, offset: usize) -> Option<usize> {
        self.lines.iter().position(|&id| {
            buffer
                .interval(id)
                .is_some_and(|line| line.begin() <= offset && offset <= line.end())
        })
    }

    /// Indices of every line whose extent changed since the last
    /// [`LineTracker::mark_lines_clean`].
    pub fn dirty_lines(&self, buffer: &GapBuffer) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, &id)| buffer.interval(id).is_some_and(|line| line.is_dirty()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Clears every line's dirty flag after a render pass.
    pub fn mark_lines_clean(&self, buffer: &mut GapBuffer) {
        for &id in &self.lines {
            buffer.mark_interval_clean(id);
        }
    }
}
