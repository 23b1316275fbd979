//! Sentence splitting.
//!
//! Splits normalized text into sentence units on terminal punctuation.
//!
//! ## The Boundary Heuristic
//!
//! A sentence ends at `.`, `!` or `?` followed by whitespace:
//!
//! ```text
//! "stay warm. stay dry! stay stylish"
//!           ^         ^
//!           boundary  boundary
//!
//! -> ["stay warm.", "stay dry!", "stay stylish"]
//! ```
//!
//! Punctuation not followed by whitespace is not a boundary, so decimals
//! (`3.5`), version strings (`v1.2.0`) and domains (`example.com`) stay intact.
//! Abbreviations followed by a space ("approx. 600 BC") do split. Input here
//! has already been normalized, which strips most abbreviation dots, so a
//! full syntactic parser would buy little.
//!
//! The splitter knows nothing about embedding windows; it only produces the
//! ordered units the profiler later groups.

use std::sync::LazyLock;

use regex::Regex;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary pattern is valid"));

/// Regex-based sentence splitter.
///
/// ## Example
///
/// ```rust
/// use chunkwise::SentenceSplitter;
///
/// let sentences = SentenceSplitter.split("First one. Second one? Third!");
/// assert_eq!(sentences, vec!["First one.", "Second one?", "Third!"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    /// Split text into trimmed, non-empty sentences in document order.
    ///
    /// Joining the result with single spaces reproduces the input modulo
    /// whitespace.
    #[must_use]
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in SENTENCE_END.find_iter(text) {
            // The punctuation mark is a single ASCII byte.
            let end = boundary.start() + 1;
            push_trimmed(&mut sentences, &text[start..end]);
            start = boundary.end();
        }

        if start < text.len() {
            push_trimmed(&mut sentences, &text[start..]);
        }

        sentences
    }

    /// Split into owned sentences.
    #[must_use]
    pub fn split_owned(&self, text: &str) -> Vec<String> {
        self.split(text).into_iter().map(str::to_string).collect()
    }
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_sentences() {
        let sentences = SentenceSplitter.split("Hello world. How are you? I am fine.");
        assert_eq!(sentences, vec!["Hello world.", "How are you?", "I am fine."]);
    }

    #[test]
    fn test_trailing_fragment_kept() {
        let sentences = SentenceSplitter.split("One. Two without end");
        assert_eq!(sentences, vec!["One.", "Two without end"]);
    }

    #[test]
    fn test_no_split_without_whitespace() {
        let sentences = SentenceSplitter.split("Version 3.5 ships today. Visit example.com now.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("3.5"));
        assert!(sentences[1].contains("example.com"));
    }

    #[test]
    fn test_newline_is_whitespace() {
        let sentences = SentenceSplitter.split("warm jacket.\nwaterproof shell!\n\nsoft lining");
        assert_eq!(sentences, vec!["warm jacket.", "waterproof shell!", "soft lining"]);
    }

    #[test]
    fn test_repeated_punctuation() {
        let sentences = SentenceSplitter.split("Really?! Yes... indeed.");
        assert_eq!(sentences, vec!["Really?!", "Yes...", "indeed."]);
    }

    #[test]
    fn test_empty_text() {
        assert!(SentenceSplitter.split("").is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        assert!(SentenceSplitter.split("   \n\t  ").is_empty());
    }

    #[test]
    fn test_rejoin_preserves_content() {
        let text = "  Stay warm.   Stay dry!\nStay stylish?  ";
        let rejoined = SentenceSplitter.split(text).join(" ");
        let squash = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(squash(&rejoined), squash(text));
    }
}
