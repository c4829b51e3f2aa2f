// Chunk: docs/chunks/editing_collaborators - Cursor, selection, and line tracking

//! Selection and position types.
//!
//! A selection is a directional pair of logical byte offsets: `base` is
//! where it was anchored, `extent` is where it grew to. `start`/`end`
//! are the normalized min/max. A caret is a selection whose two offsets
//! coincide.

/// Which side of a zero-width boundary a position belongs to.
///
/// Matters at line breaks: a position at the end of one line and a
/// position at the start of the next have the same offset and different
/// affinity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Affinity {
    Upstream,
    #[default]
    Downstream,
}

/// A logical byte offset paired with its boundary affinity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextPosition {
    offset: usize,
    affinity: Affinity,
}

impl TextPosition {
    pub fn new(offset: usize, affinity: Affinity) -> Self {
        Self { offset, affinity }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn affinity(&self) -> Affinity {
        self.affinity
    }
}

/// A directional pair of offsets with a shared affinity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    base_offset: usize,
    extent_offset: usize,
    affinity: Affinity,
}

impl Selection {
    pub fn new(base_offset: usize, extent_offset: usize) -> Self {
        Self {
            base_offset,
            extent_offset,
            affinity: Affinity::default(),
        }
    }

    pub fn with_affinity(base_offset: usize, extent_offset: usize, affinity: Affinity) -> Self {
        Self {
            base_offset,
            extent_offset,
            affinity,
        }
    }

    /// A zero-width selection at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    pub fn extent_offset(&self) -> usize {
        self.extent_offset
    }

    pub fn affinity(&self) -> Affinity {
        self.affinity
    }

    pub fn base(&self) -> TextPosition {
        TextPosition::new(self.base_offset, self.affinity)
    }

    pub fn extent(&self) -> TextPosition {
        TextPosition::new(self.extent_offset, self.affinity)
    }

    pub fn start_offset(&self) -> usize {
        self.base_offset.min(self.extent_offset)
    }

    pub fn end_offset(&self) -> usize {
        self.base_offset.max(self.extent_offset)
    }

    pub fn start(&self) -> TextPosition {
        TextPosition::new(self.start_offset(), self.affinity)
    }

    pub fn end(&self) -> TextPosition {
        TextPosition::new(self.end_offset(), self.affinity)
    }

    /// Normalized `(start, end)` offsets.
    pub fn range(&self) -> (usize, usize) {
        (self.start_offset(), self.end_offset())
    }

    pub fn is_caret(&self) -> bool {
        self.base_offset == self.extent_offset
    }

    /// Translates both offsets by `delta`. A backward shift saturates so
    /// the lower offset stops at 0, moving both by the same amount; the
    /// selection never changes width.
    pub fn shift(&mut self, delta: isize) {
        if delta < 0 {
            let moved = self.start_offset().min(delta.unsigned_abs());
            self.base_offset -= moved;
            self.extent_offset -= moved;
        } else {
            self.base_offset += delta as usize;
            self.extent_offset += delta as usize;
        }
    }

    /// Re-anchors the selection over `[begin, end)`.
    pub fn set_range(&mut self, begin: usize, end: usize) {
        self.base_offset = begin;
        self.extent_offset = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret() {
        let selection = Selection::caret(7);
        assert!(selection.is_caret());
        assert_eq!(selection.range(), (7, 7));
        assert_eq!(selection.affinity(), Affinity::Downstream);
    }

    #[test]
    fn test_directional_normalization() {
        // Extent left of base: start/end still come out ordered.
        let selection = Selection::new(9, 4);
        assert!(!selection.is_caret());
        assert_eq!(selection.base_offset(), 9);
        assert_eq!(selection.extent_offset(), 4);
        assert_eq!(selection.start_offset(), 4);
        assert_eq!(selection.end_offset(), 9);
        assert_eq!(selection.start().offset(), 4);
        assert_eq!(selection.end().offset(), 9);
    }

    #[test]
    fn test_shift() {
        let mut selection = Selection::new(4, 9);
        selection.shift(3);
        assert_eq!(selection.range(), (7, 12));
        selection.shift(-7);
        assert_eq!(selection.range(), (0, 5));
        // Already at 0: both offsets stay put, width preserved.
        selection.shift(-2);
        assert_eq!(selection.range(), (0, 5));
    }

    #[test]
    fn test_set_range() {
        let mut selection = Selection::with_affinity(1, 2, Affinity::Upstream);
        selection.set_range(5, 8);
        assert_eq!(selection.range(), (5, 8));
        assert_eq!(selection.affinity(), Affinity::Upstream);
    }

    #[test]
    fn test_positions_carry_affinity() {
        let selection = Selection::with_affinity(3, 6, Affinity::Upstream);
        assert_eq!(selection.base().affinity(), Affinity::Upstream);
        assert_eq!(selection.extent().offset(), 6);
    }
}
