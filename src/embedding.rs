//! Sentence-embedding capability.
//!
//! The chunkers never load a model themselves. They receive an
//! `Arc<dyn EmbeddingModel>` at construction, so one loaded model serves every
//! chunker (and every thread) in the process, and tests can substitute a
//! double.
//!
//! Any model producing fixed-length dense vectors whose cosine similarity is
//! meaningful will do. Two implementations ship with the crate:
//!
//! | Model | Feature | Notes |
//! |-------|---------|-------|
//! | [`HashedBagOfWords`] | always | Lexical, deterministic, no download |
//! | `FastEmbedModel` | `fastembed` | ONNX sentence encoders (all-MiniLM-L6-v2, BGE) |

use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, Result};

/// A sentence-embedding model.
///
/// Implementations must be deterministic for a given model version and safe
/// for concurrent read-only use.
pub trait EmbeddingModel: Send + Sync {
    /// Encode a batch of texts, one vector per text, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Embedding`] if the model fails. Callers treat
    /// this as fatal for the current chunking call.
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Human-readable model name, used in logs.
    fn name(&self) -> &str;
}

/// Lexical embedder using the hashing trick.
///
/// Each lowercase word is hashed into one of `dim` buckets; the bucket counts
/// are L2-normalized. Texts sharing vocabulary land close together, which is
/// enough to detect topic shifts in product copy without a neural model.
///
/// ## Example
///
/// ```rust
/// use chunkwise::{EmbeddingModel, HashedBagOfWords};
///
/// let model = HashedBagOfWords::new(128).unwrap();
/// let vectors = model
///     .encode(&["waterproof jacket".to_string(), "jacket, waterproof!".to_string()])
///     .unwrap();
/// assert_eq!(vectors[0], vectors[1]);
/// ```
#[derive(Debug, Clone)]
pub struct HashedBagOfWords {
    dim: usize,
}

impl HashedBagOfWords {
    /// Create an embedder producing `dim`-dimensional vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `dim == 0`.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidConfig(
                "embedding dimension must be > 0".to_string(),
            ));
        }
        Ok(Self { dim })
    }

    /// Vector dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dim];
        for word in text.unicode_words() {
            let bucket = fnv1a(&word.to_lowercase()) % self.dim as u64;
            vector[bucket as usize] += 1.0;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

impl Default for HashedBagOfWords {
    fn default() -> Self {
        Self { dim: 256 }
    }
}

impl EmbeddingModel for HashedBagOfWords {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn name(&self) -> &str {
        "hashed-bag-of-words"
    }
}

// FNV-1a: stable across platforms and releases, unlike `DefaultHasher`.
fn fnv1a(s: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    s.bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}
