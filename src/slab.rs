//! The Slab type: a chunk tagged with its position.

/// A chunk of text with its position in the chunk sequence.
///
/// Chunks are independent once produced, so downstream enrichment often
/// processes them concurrently. The `index` lets results be put back into
/// document order after out-of-order completion:
///
/// ```rust
/// use chunkwise::Slab;
///
/// let mut done = vec![Slab::new("second", 1), Slab::new("first", 0)];
/// done.sort_by_key(|s| s.index);
/// assert_eq!(done[0].text, "first");
/// ```
///
/// Chunk text comes from the prepared (normalized) document, so a slab does
/// not carry byte offsets into the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slab {
    /// The chunk text.
    pub text: String,
    /// Zero-based index of this chunk in the sequence.
    pub index: usize,
}

impl Slab {
    /// Create a new slab.
    #[must_use]
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
        }
    }

    /// The length of this chunk in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether this chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for Slab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slab {{ index: {}, chars: {} }}",
            self.index,
            self.char_len()
        )
    }
}
