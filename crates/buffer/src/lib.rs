// Chunk: docs/chunks/text_store - Gap buffer text store with interval tracking
// Chunk: docs/chunks/interval_tracking - Edit-tracked intervals over buffer offsets

//! tern-buffer: the text store at the core of the tern editor.
//!
//! This crate provides a byte-oriented gap buffer plus an interval
//! tracker that keeps registered `[begin, end)` regions numerically
//! correct across every edit.
//!
//! # Overview
//!
//! The main type is [`GapBuffer`], which provides:
//! - Byte insertion and range deletion with the classic gap-buffer
//!   cost model (O(1) amortized at the edit point)
//! - Forward and backward single-byte search that understands the
//!   physical split
//! - Zero-copy [`TextView`] access to the whole text or to any
//!   registered interval
//! - Interval registration: collaborators (cursors, selections, line
//!   caches) hold [`IntervalId`] handles and the buffer keeps the
//!   underlying [`Interval`] bounds correct as text changes
//!
//! # Example
//!
//! ```
//! use tern_buffer::GapBuffer;
//!
//! let mut buffer = GapBuffer::from_str("Hello, world");
//! let world = buffer.create_interval(7, 12);
//!
//! // Inserting left of the interval translates it without dirtying it.
//! buffer.insert(5, b"!!!");
//! let interval = buffer.interval(world).unwrap();
//! assert_eq!((interval.begin(), interval.end()), (10, 15));
//! assert!(!interval.is_dirty());
//! assert_eq!(buffer.text_for_interval(world).unwrap().to_vec(), b"world");
//! ```
//!
//! # Dirty discipline
//!
//! An interval's dirty flag is set exactly when an edit changes its
//! extent (truncation or growth), never when the edit merely translates
//! it or when the gap moves through it. The tracker only ever sets the
//! flag; clearing it is the owning collaborator's job, via
//! [`GapBuffer::mark_interval_clean`].

mod gap_buffer;
mod interval;
mod interval_heap;
mod text_view;
mod tracker;

pub use gap_buffer::GapBuffer;
pub use interval::{Interval, IntervalId};
pub use text_view::TextView;
pub use tracker::IntervalTracker;
