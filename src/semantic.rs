//! Semantic chunking using embedding distance.
//!
//! Splits text where the topic changes, detected by peaks in the distance
//! between windowed sentence embeddings.
//!
//! ## The Idea
//!
//! Adjacent sentence windows about the same topic have similar embeddings.
//! When the topic changes, distance jumps. Boundaries whose distance exceeds
//! the document's own `breakpoint_percentile` quantile are candidate breaks.
//!
//! ```text
//! Sentences:   S0    S1    S2    S3    S4    S5
//! Distances:     0.05  0.08  0.61  0.07  0.04
//!                            ^ above the 0.9 quantile
//! ```
//!
//! ## Accumulation
//!
//! Sentences are appended greedily. After appending sentence `i`, the chunk
//! closes when either:
//!
//! 1. `i` is neither the first nor the last sentence, the boundary *before* it
//!    (`distance_to_next[i - 1]`) is a candidate break, and the chunk has
//!    reached `min_chunk_length`; or
//! 2. the chunk has reached `max_chunk_length`.
//!
//! Rule 1 looks back one boundary: the sentence that opens a new topic still
//! lands in the chunk it follows.
//!
//! ```text
//! Distances:     d0    d1   [d2]   d3    d4
//! Sentences:  S0    S1    S2    S3 |  S4    S5
//!                                  ^ closes after S3, not after S2
//! ```
//!
//! Rule 2 overrides the minimum, so a long low-variance passage cannot grow
//! without bound. A chunk may overshoot the maximum by its last sentence.
//!
//! ## Failure
//!
//! Embedding errors propagate; they are not retried here.

use std::sync::Arc;

use crate::bounds::char_len;
use crate::breakpoint::{is_candidate_break, select_threshold};
use crate::profile::{self, DistanceProfiler};
use crate::{ChunkBounds, Chunker, ChunkerConfig, EmbeddingModel, Preprocessor, Result, SentenceSplitter};

/// Semantic chunker using windowed embedding distance.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use chunkwise::{Chunker, ChunkerConfig, HashedBagOfWords, SemanticChunker};
///
/// let model = Arc::new(HashedBagOfWords::default());
/// let chunker = SemanticChunker::new(model, ChunkerConfig::default()).unwrap();
///
/// let chunks = chunker.chunk_text("Warm winter jacket. Detachable hood.").unwrap();
/// assert_eq!(chunks.len(), 1);
/// ```
pub struct SemanticChunker {
    model: Arc<dyn EmbeddingModel>,
    config: ChunkerConfig,
    bounds: ChunkBounds,
    profiler: DistanceProfiler,
    preprocessor: Preprocessor,
}

impl SemanticChunker {
    /// Create a chunker around a shared embedding model.
    ///
    /// Uses the default [`Preprocessor`] (basic normalization, no
    /// coreference resolution).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] if the configuration is invalid.
    pub fn new(model: Arc<dyn EmbeddingModel>, config: ChunkerConfig) -> Result<Self> {
        config.validate()?;
        let bounds = config.bounds()?;
        let profiler = DistanceProfiler::new(config.buffer_size);
        let preprocessor = Preprocessor::default().with_max_input_chars(config.max_input_chars);

        Ok(Self {
            model,
            config,
            bounds,
            profiler,
            preprocessor,
        })
    }

    /// Replace the preprocessor. The configured input limit still applies.
    #[must_use]
    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = preprocessor.with_max_input_chars(self.config.max_input_chars);
        self
    }

    /// The configuration this chunker was built with.
    #[must_use]
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// The chunk length bounds.
    #[must_use]
    pub fn bounds(&self) -> ChunkBounds {
        self.bounds
    }

    /// The shared embedding model.
    #[must_use]
    pub fn model(&self) -> &Arc<dyn EmbeddingModel> {
        &self.model
    }

    pub(crate) fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Chunk text that has already been preprocessed.
    ///
    /// # Errors
    ///
    /// Propagates embedding model failures.
    pub fn chunk_prepared(&self, text: &str) -> Result<Vec<String>> {
        let sentences = SentenceSplitter.split_owned(text);
        if sentences.is_empty() {
            return Ok(vec![]);
        }

        let profiled = self.profiler.profile(self.model.as_ref(), sentences)?;
        let distances = profile::distances(&profiled);
        let threshold = select_threshold(&distances, self.config.breakpoint_percentile);

        tracing::debug!(
            model = self.model.name(),
            sentences = profiled.len(),
            threshold = ?threshold,
            "profiled sentence distances"
        );

        let texts: Vec<&str> = profiled.iter().map(|s| s.text.as_str()).collect();
        let chunks = accumulate(&texts, &distances, threshold, self.bounds);

        tracing::debug!(chunks = chunks.len(), "semantic chunking complete");
        Ok(chunks)
    }
}

impl Chunker for SemanticChunker {
    fn chunk_text(&self, text: &str) -> Result<Vec<String>> {
        let prepared = self.preprocessor.prepare(text);
        self.chunk_prepared(&prepared)
    }
}

/// Greedy, length-bounded accumulation of sentences into chunks.
fn accumulate(
    sentences: &[&str],
    distances: &[f32],
    threshold: Option<f32>,
    bounds: ChunkBounds,
) -> Vec<String> {
    let n = sentences.len();
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for (i, &sentence) in sentences.iter().enumerate() {
        // Counted as emitted: one joining space per sentence after the first.
        let separator = usize::from(!current.is_empty());
        current.push(sentence);
        current_len += separator + char_len(sentence);

        // Looks at the boundary before sentence i, not after it.
        let break_before = i > 0
            && i + 1 < n
            && distances
                .get(i - 1)
                .is_some_and(|&d| is_candidate_break(d, threshold));

        if (break_before && bounds.reached_min(current_len)) || bounds.reached_max(current_len) {
            chunks.push(current.join(" "));
            current.clear();
            current_len = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

impl std::fmt::Debug for SemanticChunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticChunker")
            .field("model", &self.model.name())
            .field("breakpoint_percentile", &self.config.breakpoint_percentile)
            .field("buffer_size", &self.config.buffer_size)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, HashedBagOfWords};

    /// One axis per topic keyword, so distances are exactly 0 or 1.
    struct Topics;

    impl EmbeddingModel for Topics {
        fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    if t.contains("jacket") {
                        vec![1.0, 0.0]
                    } else {
                        vec![0.0, 1.0]
                    }
                })
                .collect())
        }

        fn name(&self) -> &str {
            "topics"
        }
    }

    struct Broken;

    impl EmbeddingModel for Broken {
        fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(Error::Embedding("model offline".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn bounds(min: usize, max: usize) -> ChunkBounds {
        ChunkBounds::new(min, max).unwrap()
    }

    fn chunker(model: Arc<dyn EmbeddingModel>, config: ChunkerConfig) -> SemanticChunker {
        SemanticChunker::new(model, config)
            .unwrap()
            .with_preprocessor(Preprocessor::passthrough())
    }

    #[test]
    fn test_break_closes_after_following_sentence() {
        let chunks = accumulate(
            &["aaaa", "bbbb", "cccc", "dddd"],
            &[0.9, 0.1, 0.1],
            Some(0.5),
            bounds(1, 100),
        );
        assert_eq!(chunks, vec!["aaaa bbbb", "cccc dddd"]);
    }

    #[test]
    fn test_min_length_suppresses_break() {
        let chunks = accumulate(
            &["aaaa", "bbbb", "cccc", "dddd"],
            &[0.9, 0.1, 0.1],
            Some(0.5),
            bounds(10, 100),
        );
        assert_eq!(chunks, vec!["aaaa bbbb cccc dddd"]);
    }

    #[test]
    fn test_max_length_forces_cut() {
        let chunks = accumulate(
            &["aaaa", "bbbb", "cccc", "dddd", "ee"],
            &[0.0, 0.0, 0.0, 0.0],
            None,
            bounds(1, 8),
        );
        assert_eq!(chunks, vec!["aaaa bbbb", "cccc dddd", "ee"]);
    }

    #[test]
    fn test_max_length_counts_separators() {
        // 4 + 1 + 4 = 9 reaches the cap; the sentence lengths alone (8) would not.
        let chunks = accumulate(
            &["aaaa", "bbbb", "cccc"],
            &[0.0, 0.0],
            None,
            bounds(1, 9),
        );
        assert_eq!(chunks, vec!["aaaa bbbb", "cccc"]);
        assert!(chunks.iter().all(|c| char_len(c) <= 9));
    }

    #[test]
    fn test_chunk_overshoots_max_by_at_most_last_sentence() {
        let sentences: Vec<String> = (0..120)
            .map(|i| format!("Sentence {i} has{} words.", " many".repeat(i % 7)))
            .collect();
        let refs: Vec<&str> = sentences.iter().map(String::as_str).collect();
        let longest = refs.iter().map(|s| char_len(s)).max().unwrap();
        let distances = vec![0.0; refs.len() - 1];

        let chunks = accumulate(&refs, &distances, None, bounds(1, 300));

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(char_len(chunk) <= 300 + longest, "{} chars", char_len(chunk));
        }
        assert_eq!(chunks.join(" "), refs.join(" "));
    }

    #[test]
    fn test_no_threshold_single_chunk() {
        let chunks = accumulate(&["one.", "two."], &[0.99], None, bounds(1, 100));
        assert_eq!(chunks, vec!["one. two."]);
    }

    #[test]
    fn test_topic_shift_detected() {
        let config = ChunkerConfig::default().with_buffer_size(0).with_lengths(1, 3000);
        let chunker = chunker(Arc::new(Topics), config);
        let text = "The jacket is warm. The jacket is navy. The jacket has pockets. \
                    Shipping is free. Returns take a week. Support answers fast.";

        let chunks = chunker.chunk_text(text).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(
            chunks[0],
            "The jacket is warm. The jacket is navy. The jacket has pockets. Shipping is free."
        );
        assert_eq!(chunks[1], "Returns take a week. Support answers fast.");
    }

    #[test]
    fn test_empty_and_blank_input() {
        let chunker = chunker(Arc::new(HashedBagOfWords::default()), ChunkerConfig::default());
        assert!(chunker.chunk_text("").unwrap().is_empty());
        assert!(chunker.chunk_text("  \n\t ").unwrap().is_empty());
    }

    #[test]
    fn test_embedding_failure_propagates() {
        let chunker = chunker(Arc::new(Broken), ChunkerConfig::default());
        let err = chunker.chunk_text("One sentence. Another sentence.").unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ChunkerConfig::default().with_lengths(10, 5);
        assert!(SemanticChunker::new(Arc::new(HashedBagOfWords::default()), config).is_err());
    }

    #[test]
    fn test_default_preprocessor_normalizes() {
        let chunker = SemanticChunker::new(
            Arc::new(HashedBagOfWords::default()),
            ChunkerConfig::default(),
        )
        .unwrap();
        let chunks = chunker.chunk_text("The Jacket is WARM. It is Navy!").unwrap();
        assert_eq!(chunks, vec!["jacket warm. navy!"]);
    }
}
