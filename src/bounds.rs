//! Chunk length bounds.
//!
//! ## Soft floor, hard-ish ceiling
//!
//! Chunks are expected to land between a minimum and a maximum length:
//!
//! - Below `min`: too little context for a useful embedding. Short units are
//!   merged with their neighbours or re-chunked semantically.
//! - Above `max`: too much material for one retrieval hit. Long units are
//!   re-chunked semantically, and the semantic accumulator closes a chunk as
//!   soon as it reaches `max`.
//!
//! ```text
//!          Less          |        Equal         |     Greater
//! 0 ---------------- min ======================= max ---------------->
//!   merge / re-chunk     |  kept verbatim       |  re-chunk
//! ```
//!
//! Lengths are counted in Unicode scalar values (`str::chars`), not bytes, so
//! that a bound means the same thing for accented or non-Latin product text.

use std::cmp::Ordering;

use crate::{Error, Result};

/// Minimum and maximum chunk length, in characters.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use chunkwise::ChunkBounds;
///
/// let bounds = ChunkBounds::new(600, 3000).unwrap();
/// assert_eq!(bounds.fits(120), Ordering::Less);
/// assert_eq!(bounds.fits(600), Ordering::Equal);
/// assert_eq!(bounds.fits(3000), Ordering::Equal);
/// assert_eq!(bounds.fits(3001), Ordering::Greater);
///
/// // Inclusive range syntax
/// let bounds = ChunkBounds::try_from(500..=2000).unwrap();
/// assert_eq!(bounds.min(), 500);
/// assert_eq!(bounds.max(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkBounds {
    min: usize,
    max: usize,
}

impl ChunkBounds {
    /// Create bounds from a minimum and maximum length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `max == 0` or `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if max == 0 {
            return Err(Error::InvalidConfig(
                "max_chunk_length must be > 0".to_string(),
            ));
        }
        if min > max {
            return Err(Error::InvalidConfig(format!(
                "min_chunk_length ({min}) must be <= max_chunk_length ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    /// The minimum chunk length.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// The maximum chunk length.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Classify a length against the bounds.
    ///
    /// Returns:
    /// - `Ordering::Less`: shorter than `min`
    /// - `Ordering::Equal`: within `min..=max`
    /// - `Ordering::Greater`: longer than `max`
    #[must_use]
    pub fn fits(&self, len: usize) -> Ordering {
        if len < self.min {
            Ordering::Less
        } else if len > self.max {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Classify a piece of text by its character count.
    #[must_use]
    pub fn fits_text(&self, text: &str) -> Ordering {
        self.fits(char_len(text))
    }

    /// Whether an accumulated length has reached the hard cap.
    #[must_use]
    pub const fn reached_max(&self, len: usize) -> bool {
        len >= self.max
    }

    /// Whether an accumulated length has reached the minimum.
    #[must_use]
    pub const fn reached_min(&self, len: usize) -> bool {
        len >= self.min
    }
}

impl Default for ChunkBounds {
    fn default() -> Self {
        Self {
            min: 600,
            max: 3000,
        }
    }
}

impl TryFrom<std::ops::RangeInclusive<usize>> for ChunkBounds {
    type Error = Error;

    fn try_from(range: std::ops::RangeInclusive<usize>) -> Result<Self> {
        Self::new(*range.start(), *range.end())
    }
}

/// Length of `text` in characters.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
