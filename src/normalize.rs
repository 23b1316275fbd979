//! Text normalization.
//!
//! Normalization runs before chunking and is best-effort: a step that cannot
//! (or need not) transform its input reports [`Outcome::Unchanged`] and the
//! caller keeps the text it already had. Nothing in this module fails.
//!
//! ## BasicNormalizer
//!
//! ```text
//! "Stay Warm, Stay Dry! (S-XXL)\n\nIt's windproof."
//!   normalize                     -> "stay warm stay dry! s xxl\n\nits windproof."
//!   lemmatize_and_strip_stopwords -> "stay warm stay dry! s xxl\n\nwindproof."
//! ```
//!
//! Line structure is kept intact, blank lines included, so paragraph
//! boundaries survive normalization.

use std::collections::HashSet;
use std::sync::LazyLock;

use unicode_segmentation::UnicodeSegmentation;

/// Result of a normalization step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The step produced new text.
    Transformed(String),
    /// The step left its input as is.
    Unchanged,
}

impl Outcome {
    /// The resulting text, falling back to `input` when unchanged.
    #[must_use]
    pub fn apply(self, input: String) -> String {
        match self {
            Self::Transformed(text) => text,
            Self::Unchanged => input,
        }
    }

    /// Whether the step left its input as is.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// A text normalization collaborator.
pub trait TextNormalizer: Send + Sync {
    /// Canonicalize surface form (case, punctuation, symbols).
    fn normalize(&self, text: &str) -> Outcome;

    /// Reduce words to base forms and drop stop words.
    fn lemmatize_and_strip_stopwords(&self, text: &str) -> Outcome;
}

/// Normalizer that leaves all text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl TextNormalizer for Passthrough {
    fn normalize(&self, _text: &str) -> Outcome {
        Outcome::Unchanged
    }

    fn lemmatize_and_strip_stopwords(&self, _text: &str) -> Outcome {
        Outcome::Unchanged
    }
}

/// Rule-based English normalizer.
///
/// - `normalize` lowercases, keeps alphanumeric characters and the sentence
///   terminators `.`, `!`, `?`, and drops all other symbols.
/// - `lemmatize_and_strip_stopwords` drops common English stop words while
///   keeping their sentence terminators. No lemmatizer is bundled; words keep
///   their surface form.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicNormalizer;

impl TextNormalizer for BasicNormalizer {
    fn normalize(&self, text: &str) -> Outcome {
        if text.trim().is_empty() {
            return Outcome::Unchanged;
        }
        let normalized = map_lines(text, normalize_line);
        changed(text, normalized)
    }

    fn lemmatize_and_strip_stopwords(&self, text: &str) -> Outcome {
        if text.trim().is_empty() {
            return Outcome::Unchanged;
        }
        let stripped = map_lines(text, strip_stopwords_line);
        changed(text, stripped)
    }
}

fn changed(input: &str, output: String) -> Outcome {
    if output == input {
        Outcome::Unchanged
    } else {
        Outcome::Transformed(output)
    }
}

fn map_lines(text: &str, f: impl Fn(&str) -> String) -> String {
    text.split('\n')
        .map(|line| f(line.trim_end_matches('\r')))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn normalize_line(line: &str) -> String {
    let mut tokens: Vec<String> = Vec::new();

    for segment in line.split_word_bounds() {
        if segment.chars().all(is_terminator) {
            match tokens.last_mut() {
                Some(last) => last.push_str(segment),
                None => tokens.push(segment.to_string()),
            }
            continue;
        }

        let token: String = segment
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        if !token.is_empty() {
            tokens.push(token);
        }
    }

    tokens.join(" ")
}

fn strip_stopwords_line(line: &str) -> String {
    let mut kept: Vec<String> = Vec::new();

    for token in line.split_whitespace() {
        let core = token.trim_end_matches(is_terminator);
        if !is_stopword(core) {
            kept.push(token.to_string());
            continue;
        }

        let terminator = &token[core.len()..];
        if terminator.is_empty() {
            continue;
        }
        match kept.last_mut() {
            Some(last) if last.ends_with(is_terminator) => {}
            Some(last) => last.push_str(terminator),
            None => kept.push(terminator.to_string()),
        }
    }

    kept.join(" ")
}

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
        "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor",
        "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
        "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Whether `word` is an English stop word (case-insensitive).
#[must_use]
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word.to_lowercase().as_str())
}
