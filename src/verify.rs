//! Content-preservation check.
//!
//! Compares the content words of a source text with those of its chunks.
//! Chunking only regroups sentences, so every content word of the prepared
//! source should reappear somewhere in the output:
//!
//! ```rust
//! use chunkwise::verify::check_coverage;
//!
//! let source = "The jacket is warm. The hood detaches.";
//! let chunks = vec!["The jacket is warm.".to_string()];
//!
//! let report = check_coverage(source, &chunks);
//! assert_eq!(report.missing_words, vec!["hood", "detaches"]);
//! assert_eq!(report.score, 50);
//! ```
//!
//! Compare against the text the chunker actually saw (after preprocessing).
//! Stop words are ignored on both sides.

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::normalize::is_stopword;

/// Result of [`check_coverage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    /// Share of distinct source content words found in the chunks, 0 to 100.
    pub score: u8,
    /// Source content words absent from every chunk, in first-seen order.
    pub missing_words: Vec<String>,
    /// Number of distinct content words in the source.
    pub source_words: usize,
}

impl CoverageReport {
    /// Whether every source content word was found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_words.is_empty()
    }
}

/// Measure how much of `source`'s vocabulary survives in `chunks`.
///
/// Words are lowercased Unicode words with stop words removed. An empty
/// vocabulary scores 100.
#[must_use]
pub fn check_coverage(source: &str, chunks: &[String]) -> CoverageReport {
    let source_words = content_words(source);

    let chunk_words: HashSet<String> = chunks
        .iter()
        .flat_map(|chunk| content_words(chunk))
        .collect();

    let missing_words: Vec<String> = source_words
        .iter()
        .filter(|w| !chunk_words.contains(*w))
        .cloned()
        .collect();

    let total = source_words.len();
    let score = if total == 0 {
        100
    } else {
        let found = total - missing_words.len();
        ((found as f64 / total as f64) * 100.0).round() as u8
    };

    CoverageReport {
        score,
        missing_words,
        source_words: total,
    }
}

/// Distinct lowercased non-stop words, in first-seen order.
fn content_words(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.unicode_words()
        .map(str::to_lowercase)
        .filter(|w| !is_stopword(w))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}
