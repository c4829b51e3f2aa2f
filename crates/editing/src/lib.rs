// Chunk: docs/chunks/editing_collaborators - Cursor, selection, and line tracking

//! tern-editing: collaborators that edit through a
//! [`tern_buffer::GapBuffer`].
//!
//! Everything here follows the same pattern: hold an interval handle
//! registered with the buffer, let the buffer keep the numbers correct
//! across edits, and consult the dirty flag to learn that an edit
//! changed the tracked region's extent (rather than just moving it).
//!
//! - [`Cursor`] — a movable position backed by a registered interval,
//!   with line-break-aware horizontal movement and preferred-column
//!   vertical movement.
//! - [`LineTracker`] — one interval per line, driving dirty-line
//!   reporting for the renderer.
//! - [`Selection`], [`TextPosition`], [`Affinity`] — the positional
//!   vocabulary shared by the above.

mod cursor;
mod line_tracker;
mod selection;

pub use cursor::{Cursor, CursorMode};
pub use line_tracker::LineTracker;
pub use selection::{Affinity, Selection, TextPosition};
