//! Paragraph-first chunking.
//!
//! Authors already mark topic boundaries with blank lines. When they do, those
//! boundaries are trusted first and embeddings are only consulted for units
//! that end up too short or too long.
//!
//! ## The Algorithm
//!
//! ```text
//! 1. Split on blank lines, trim, drop empties.
//! 2. Merge neighbours: append a paragraph to the buffer while
//!    len(buffer) + len(paragraph) < min_chunk_length, else flush.
//! 3. For each merged unit:
//!      len < min  or  len > max   -> SemanticChunker sub-chunks
//!      min <= len <= max          -> kept verbatim
//! ```
//!
//! A unit already within bounds is never subdivided, so re-chunking such a
//! unit returns it unchanged.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::bounds::char_len;
use crate::{ChunkBounds, Chunker, Result, SemanticChunker};

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern is valid"));

/// Whether `text` contains a blank-line paragraph boundary.
///
/// Accepts `\n\n`, `\r\n\r\n`, and lines holding only whitespace.
#[must_use]
pub fn has_paragraph_break(text: &str) -> bool {
    PARAGRAPH_BREAK.is_match(text)
}

/// Split `text` on blank lines into trimmed, non-empty paragraphs.
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Merge consecutive paragraphs whose running length stays below `min_len`.
#[must_use]
pub fn merge_short_paragraphs(paragraphs: &[&str], min_len: usize) -> Vec<String> {
    let mut merged = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for &paragraph in paragraphs {
        let paragraph_len = char_len(paragraph);
        if current_len + paragraph_len < min_len {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(paragraph);
            current_len += paragraph_len;
        } else {
            if !current.is_empty() {
                merged.push(std::mem::take(&mut current));
            }
            current.push_str(paragraph);
            current_len = paragraph_len;
        }
    }

    if !current.is_empty() {
        merged.push(current);
    }

    merged
}

/// Chunker that splits on paragraphs first and falls back to semantic chunking.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use chunkwise::{Chunker, ChunkerConfig, HashedBagOfWords, ParagraphChunker, SemanticChunker};
///
/// let config = ChunkerConfig::default().with_lengths(20, 200);
/// let semantic = SemanticChunker::new(Arc::new(HashedBagOfWords::default()), config).unwrap();
/// let chunker = ParagraphChunker::new(semantic);
///
/// let chunks = chunker
///     .chunk_text("Insulated shell keeps heat in.\n\nAvailable in five sizes.")
///     .unwrap();
/// assert_eq!(chunks.len(), 2);
/// ```
#[derive(Debug)]
pub struct ParagraphChunker {
    semantic: SemanticChunker,
}

impl ParagraphChunker {
    /// Create a paragraph chunker delegating to `semantic` for out-of-bounds units.
    ///
    /// Bounds and preprocessing are taken from the semantic chunker.
    #[must_use]
    pub fn new(semantic: SemanticChunker) -> Self {
        Self { semantic }
    }

    /// The chunk length bounds.
    #[must_use]
    pub fn bounds(&self) -> ChunkBounds {
        self.semantic.bounds()
    }

    /// The semantic chunker used for out-of-bounds units.
    #[must_use]
    pub fn semantic(&self) -> &SemanticChunker {
        &self.semantic
    }

    /// Chunk text that has already been preprocessed.
    ///
    /// # Errors
    ///
    /// Propagates embedding model failures from semantic re-chunking.
    pub fn chunk_prepared(&self, text: &str) -> Result<Vec<String>> {
        let bounds = self.bounds();
        let paragraphs = split_paragraphs(text);
        let units = merge_short_paragraphs(&paragraphs, bounds.min());

        tracing::debug!(
            paragraphs = paragraphs.len(),
            units = units.len(),
            "merged short paragraphs"
        );

        let mut chunks = Vec::with_capacity(units.len());
        for unit in units {
            match bounds.fits_text(&unit) {
                Ordering::Equal => chunks.push(unit),
                Ordering::Less | Ordering::Greater => {
                    chunks.extend(self.semantic.chunk_prepared(&unit)?);
                }
            }
        }

        Ok(chunks)
    }
}

impl Chunker for ParagraphChunker {
    fn chunk_text(&self, text: &str) -> Result<Vec<String>> {
        let prepared = self.semantic.preprocessor().prepare(text);
        self.chunk_prepared(&prepared)
    }
}
