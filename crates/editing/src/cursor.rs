// Chunk: docs/chunks/editing_collaborators - Cursor, selection, and line tracking

//! A cursor over a gap buffer.
//!
//! The cursor keeps a [`Selection`] plus a registered interval over the
//! same range, so the buffer translates its position across edits made
//! by other collaborators. Horizontal movement refuses to cross line
//! breaks; vertical movement remembers a preferred column the way every
//! terminal editor does.

use tracing::trace;

use tern_buffer::{GapBuffer, IntervalId};

use crate::selection::Selection;

/// How the cursor is drawn, and therefore how many bytes it occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorMode {
    /// A block over one byte.
    #[default]
    Block,
    /// A zero-width bar between bytes.
    Line,
}

impl CursorMode {
    /// Bytes the cursor occupies: 1 for a block, 0 for a bar.
    fn width(self) -> usize {
        match self {
            CursorMode::Block => 1,
            CursorMode::Line => 0,
        }
    }
}

/// A cursor position backed by a registered buffer interval.
///
/// Call [`Cursor::release`] before dropping the cursor to deregister
/// its interval, and [`Cursor::sync_from_interval`] after edits the
/// cursor did not make itself.
#[derive(Debug)]
pub struct Cursor {
    mode: CursorMode,
    selection: Selection,
    interval: IntervalId,
    current_column: usize,
    preferred_column: usize,
}

impl Cursor {
    /// Creates a cursor at offset 0 in block mode.
    pub fn new(buffer: &mut GapBuffer) -> Self {
        let mode = CursorMode::default();
        let interval = buffer.create_interval(0, mode.width());
        Self {
            mode,
            selection: Selection::new(0, mode.width()),
            interval,
            current_column: 0,
            preferred_column: 0,
        }
    }

    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The cursor's logical offset (the selection base).
    pub fn offset(&self) -> usize {
        self.selection.base_offset()
    }

    /// Deregisters the cursor's interval.
    pub fn release(self, buffer: &mut GapBuffer) {
        buffer.remove_intervals(&[self.interval]);
    }

    // ==================== Movement ====================

    /// Moves one byte left, refusing to cross a line break. Returns
    /// whether the cursor moved.
    pub fn move_left(&mut self, buffer: &mut GapBuffer) -> bool {
        if self.offset() == 0 || buffer.byte_at(self.offset() - 1) == Some(b'\n') {
            return false;
        }
        self.selection.shift(-1);
        buffer.with_interval_mut(self.interval, |interval| interval.shift_backward(1));
        self.current_column = self.current_column.saturating_sub(1);
        self.preferred_column = self.current_column;
        true
    }

    /// Moves one byte right, refusing to cross a line break. Returns
    /// whether the cursor moved.
    pub fn move_right(&mut self, buffer: &mut GapBuffer) -> bool {
        let end = self.selection.end_offset();
        if end >= buffer.len() || buffer.byte_at(end) == Some(b'\n') {
            return false;
        }
        self.selection.shift(1);
        buffer.with_interval_mut(self.interval, |interval| interval.shift_forward(1));
        self.current_column += 1;
        self.preferred_column = self.current_column;
        true
    }

    /// Moves to the next line, clamping the column to that line's width
    /// but remembering the preferred column for later vertical moves.
    pub fn move_down(&mut self, buffer: &mut GapBuffer) -> bool {
        let Some(end_of_current_line) = buffer.find(b'\n', self.offset()) else {
            return false;
        };
        if end_of_current_line + 1 == buffer.len() {
            return false;
        }
        let next_line_start = end_of_current_line + 1;
        let end_of_next_line = buffer
            .find(b'\n', next_line_start)
            .unwrap_or_else(|| buffer.len());
        let column_limit = self.column_limit(end_of_next_line - next_line_start);
        self.current_column = self.preferred_column.min(column_limit);
        self.move_cursor_to(buffer, next_line_start + self.current_column);
        true
    }

    /// Moves to the previous line; mirror of [`Cursor::move_down`].
    pub fn move_up(&mut self, buffer: &mut GapBuffer) -> bool {
        // The line break ending the previous line. rfind is exclusive of
        // its start offset, so a cursor sitting on a '\n' still resolves
        // to its own line start.
        let Some(end_of_previous_line) = buffer.rfind(b'\n', self.offset()) else {
            return false;
        };
        let previous_line_start = match buffer.rfind(b'\n', end_of_previous_line) {
            Some(brk) => brk + 1,
            None => 0,
        };
        let column_limit = self.column_limit(end_of_previous_line - previous_line_start);
        self.current_column = self.preferred_column.min(column_limit);
        self.move_cursor_to(buffer, previous_line_start + self.current_column);
        true
    }

    /// Switches drawing mode, re-anchoring the interval to the new
    /// width. A block cursor cannot sit on a line break, so it steps
    /// left off one.
    pub fn set_mode(&mut self, buffer: &mut GapBuffer, mode: CursorMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        let offset = self.offset();
        self.move_cursor_to(buffer, offset);
        if self.mode == CursorMode::Block && buffer.byte_at(self.offset()) == Some(b'\n') {
            self.move_left(buffer);
        }
    }

    /// Jumps to `offset`. Returns false (without moving) when the
    /// cursor would not fit before the end of the buffer.
    pub fn set_offset(&mut self, buffer: &mut GapBuffer, offset: usize) -> bool {
        if offset + self.mode.width() > buffer.len() {
            return false;
        }
        self.move_cursor_to(buffer, offset);
        let line_start = match buffer.rfind(b'\n', offset) {
            Some(brk) => brk + 1,
            None => 0,
        };
        self.current_column = offset - line_start;
        self.preferred_column = self.current_column;
        true
    }

    /// Re-derives the selection from the registered interval after
    /// edits made by other collaborators. Clears the interval's dirty
    /// flag. Returns whether anything changed.
    pub fn sync_from_interval(&mut self, buffer: &mut GapBuffer) -> bool {
        let Some(interval) = buffer.interval(self.interval) else {
            return false;
        };
        let (begin, end) = (interval.begin(), interval.end());
        if !interval.is_dirty() && self.selection.range() == (begin, end) {
            return false;
        }
        trace!(begin, end, "cursor resynced from interval");
        self.selection.set_range(begin, end);
        buffer.mark_interval_clean(self.interval);
        let line_start = match buffer.rfind(b'\n', begin) {
            Some(brk) => brk + 1,
            None => 0,
        };
        self.current_column = begin - line_start;
        self.preferred_column = self.current_column;
        true
    }

    /// Widest column the cursor may occupy on a line of `line_len`
    /// bytes: a block cursor needs a byte under it.
    fn column_limit(&self, line_len: usize) -> usize {
        if line_len > 0 && self.mode == CursorMode::Block {
            line_len - 1
        } else {
            line_len
        }
    }

    fn move_cursor_to(&mut self, buffer: &mut GapBuffer, offset: usize) {
        self.selection.set_range(offset, offset + self.mode.width());
        buffer.remove_intervals(&[self.interval]);
        self.interval = buffer.create_interval(offset, offset + self.mode.width());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_at(buffer: &mut GapBuffer, offset: usize) -> Cursor {
        let mut cursor = Cursor::new(buffer);
        assert!(cursor.set_offset(buffer, offset));
        cursor
    }

    #[test]
    fn test_new_at_origin() {
        let mut buffer = GapBuffer::from_str("abc");
        let cursor = Cursor::new(&mut buffer);
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.mode(), CursorMode::Block);
        assert_eq!(buffer.interval_count(), 1);
        cursor.release(&mut buffer);
        assert_eq!(buffer.interval_count(), 0);
    }

    #[test]
    fn test_move_right_stops_at_line_break() {
        let mut buffer = GapBuffer::from_str("ab\ncd");
        let mut cursor = Cursor::new(&mut buffer);
        assert!(cursor.move_right(&mut buffer));
        assert_eq!(cursor.offset(), 1);
        // Block cursor at 1 covers byte 1; end_offset 2 is the '\n'.
        assert!(!cursor.move_right(&mut buffer));
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn test_move_left_stops_at_line_start() {
        let mut buffer = GapBuffer::from_str("ab\ncd");
        let mut cursor = cursor_at(&mut buffer, 4);
        assert!(cursor.move_left(&mut buffer));
        assert_eq!(cursor.offset(), 3);
        // Byte 2 is the '\n': refuse to cross onto the previous line.
        assert!(!cursor.move_left(&mut buffer));
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_move_down_clamps_column() {
        let mut buffer = GapBuffer::from_str("long line\nab\nanother");
        let mut cursor = cursor_at(&mut buffer, 7);
        assert!(cursor.move_down(&mut buffer));
        // Next line "ab" only has columns 0..2; block cursor clamps to 1.
        assert_eq!(cursor.offset(), 11);

        // The preferred column survives through the narrow line; "another"
        // has room for column 6 at most under a block cursor.
        assert!(cursor.move_down(&mut buffer));
        assert_eq!(cursor.offset(), 19);
        assert_eq!(buffer.byte_at(cursor.offset()), Some(b'r'));
    }

    #[test]
    fn test_move_down_on_last_line() {
        let mut buffer = GapBuffer::from_str("ab\ncd");
        let mut cursor = cursor_at(&mut buffer, 3);
        assert!(!cursor.move_down(&mut buffer));
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_move_up_mirrors_move_down() {
        let mut buffer = GapBuffer::from_str("long line\nab\nanother");
        let mut cursor = cursor_at(&mut buffer, 18);
        assert!(cursor.move_up(&mut buffer));
        // Column 5 clamps to "ab" (block limit is column 1).
        assert_eq!(cursor.offset(), 11);
        assert!(cursor.move_up(&mut buffer));
        assert_eq!(cursor.offset(), 5);
        assert!(!cursor.move_up(&mut buffer));
    }

    #[test]
    fn test_set_mode_steps_off_line_break() {
        let mut buffer = GapBuffer::from_str("ab\ncd");
        let mut cursor = Cursor::new(&mut buffer);
        cursor.set_mode(&mut buffer, CursorMode::Line);
        assert!(cursor.set_offset(&mut buffer, 2));
        assert_eq!(cursor.offset(), 2);

        // Back to block: cannot sit on the '\n', steps left.
        cursor.set_mode(&mut buffer, CursorMode::Block);
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn test_set_offset_rejects_overflow() {
        let mut buffer = GapBuffer::from_str("abc");
        let mut cursor = Cursor::new(&mut buffer);
        // Block cursor occupies one byte: 3 is past the last.
        assert!(!cursor.set_offset(&mut buffer, 3));
        assert!(cursor.set_offset(&mut buffer, 2));

        cursor.set_mode(&mut buffer, CursorMode::Line);
        // A zero-width cursor may sit at end of buffer.
        assert!(cursor.set_offset(&mut buffer, 3));
    }

    #[test]
    fn test_cursor_tracks_edits_elsewhere() {
        let mut buffer = GapBuffer::from_str("Hello, world");
        let mut cursor = cursor_at(&mut buffer, 7);

        // Another collaborator inserts ahead of the cursor.
        buffer.insert(0, b">> ");
        assert!(cursor.sync_from_interval(&mut buffer));
        assert_eq!(cursor.offset(), 10);
        assert_eq!(buffer.byte_at(cursor.offset()), Some(b'w'));

        // Nothing changed since the last sync.
        assert!(!cursor.sync_from_interval(&mut buffer));
    }
}
