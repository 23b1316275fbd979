//! Sliding-window embedding distances.
//!
//! ## Why combine sentences?
//!
//! A single sentence is a noisy topic signal: "It is machine washable." says
//! little on its own. Embedding each sentence together with its neighbours
//! smooths that noise out:
//!
//! ```text
//! buffer_size = 1
//!
//! Sentences:  S0   S1   S2   S3   S4
//! Combined:  [S0 S1]
//!            [S0 S1 S2]
//!                [S1 S2 S3]
//!                     [S2 S3 S4]
//!                          [S3 S4]
//! ```
//!
//! Windows are truncated at the document edges: no wraparound, no padding.
//!
//! ## Distances
//!
//! `distance_to_next[i] = 1 - cos(E[i], E[i + 1])` for every sentence but the
//! last. Normalized text encoders keep this within roughly `[0, 1]`; peaks mark
//! likely topic shifts.
//!
//! All combined texts of a document go to the model in one batch.

use crate::{EmbeddingModel, Error, Result};

/// A sentence with its windowed embedding.
///
/// Created by [`DistanceProfiler::profile`] and scoped to one chunking call.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// The sentence itself.
    pub text: String,
    /// The sentence joined with up to `buffer_size` neighbours on each side.
    pub combined_text: String,
    /// Embedding of `combined_text`.
    pub embedding: Vec<f32>,
    /// Cosine distance to the next sentence's embedding; `None` for the last sentence.
    pub distance_to_next: Option<f32>,
}

/// Builds combined sentences, embeds them, and measures adjacent distances.
#[derive(Debug, Clone, Copy)]
pub struct DistanceProfiler {
    buffer_size: usize,
}

impl DistanceProfiler {
    /// Create a profiler with the given window radius.
    #[must_use]
    pub const fn new(buffer_size: usize) -> Self {
        Self { buffer_size }
    }

    /// Window radius.
    #[must_use]
    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Join each sentence with its neighbours in `[i - b, i + b]`, clamped to the document.
    #[must_use]
    pub fn combine<S: AsRef<str>>(&self, sentences: &[S]) -> Vec<String> {
        let n = sentences.len();
        (0..n)
            .map(|i| {
                let start = i.saturating_sub(self.buffer_size);
                let end = (i + self.buffer_size + 1).min(n);
                sentences[start..end]
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    /// Embed the combined sentences and attach adjacent distances.
    ///
    /// # Errors
    ///
    /// Propagates model failures, and returns [`Error::EmbeddingCount`] if the
    /// model does not return exactly one vector per sentence.
    pub fn profile(&self, model: &dyn EmbeddingModel, sentences: Vec<String>) -> Result<Vec<Sentence>> {
        if sentences.is_empty() {
            return Ok(vec![]);
        }

        let combined = self.combine(&sentences);
        let embeddings = model.encode(&combined)?;
        if embeddings.len() != sentences.len() {
            return Err(Error::EmbeddingCount {
                expected: sentences.len(),
                actual: embeddings.len(),
            });
        }

        let distances: Vec<f32> = embeddings
            .windows(2)
            .map(|pair| cosine_distance(&pair[0], &pair[1]))
            .collect();

        Ok(sentences
            .into_iter()
            .zip(combined)
            .zip(embeddings)
            .enumerate()
            .map(|(i, ((text, combined_text), embedding))| Sentence {
                text,
                combined_text,
                embedding,
                distance_to_next: distances.get(i).copied(),
            })
            .collect())
    }
}

/// Extract the `distance_to_next` values, in order (length `n - 1`).
#[must_use]
pub fn distances(sentences: &[Sentence]) -> Vec<f32> {
    sentences.iter().filter_map(|s| s.distance_to_next).collect()
}

/// Cosine similarity; zero if either vector has zero norm.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a > 0.0 && norm_b > 0.0 {
        dot / (norm_a * norm_b)
    } else {
        0.0
    }
}

/// `1 - cosine_similarity(a, b)`.
#[must_use]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}
