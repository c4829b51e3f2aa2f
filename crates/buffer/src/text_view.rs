// Chunk: docs/chunks/text_store - Gap buffer text store with interval tracking

//! Zero-copy views of logical text.
//!
//! Text in a gap buffer is physically at most two contiguous runs: the
//! bytes before the gap and the bytes after it. [`TextView`] exposes a
//! logical range as those runs without copying; a range that lies
//! entirely on one side of the gap borrows a single slice and an empty
//! right half.

/// Borrowed view of a logical byte range as up to two slices.
///
/// The logical content is `left` followed by `right`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextView<'a> {
    left: &'a [u8],
    right: &'a [u8],
}

impl<'a> TextView<'a> {
    /// An empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// A view over a single contiguous run.
    pub fn from_slice(left: &'a [u8]) -> Self {
        Self { left, right: &[] }
    }

    /// A view over two contiguous runs split by the gap.
    pub fn from_pair(left: &'a [u8], right: &'a [u8]) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &'a [u8] {
        self.left
    }

    pub fn right(&self) -> &'a [u8] {
        self.right
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Iterates over the bytes of both runs in logical order.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + 'a {
        self.left.iter().chain(self.right.iter()).copied()
    }

    /// Materializes the view into one owned buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.len());
        result.extend_from_slice(self.left);
        result.extend_from_slice(self.right);
        result
    }

    /// Materializes the view as a string, replacing invalid UTF-8.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.to_vec()).into_owned()
    }
}
