//! # chunkwise
//!
//! Topic-aware text chunking for retrieval pipelines.
//!
//! ## The Problem
//!
//! Long product descriptions, articles and manuals have to be cut into
//! pieces before they can be embedded, enriched and retrieved. Cutting every
//! N characters is cheap but lands in the middle of a thought. What a
//! retriever wants is pieces that each talk about one thing, and that are
//! neither too small to carry context nor too large to be a precise hit.
//!
//! ## Two Strategies
//!
//! ### Paragraph-first
//!
//! When the author left blank lines, they already marked the topics:
//!
//! ```text
//! "Warm hood.\n\nWindproof shell.\n\n<900 chars on insulation>\n\n<900 chars on sizing>"
//!
//!   short + short   -> merged into one chunk
//!   in bounds       -> kept verbatim
//!   too long        -> handed to the semantic chunker
//! ```
//!
//! ### Semantic
//!
//! Without paragraph breaks, topic shifts are found from the text itself.
//! Every sentence is embedded together with its neighbours, and boundaries
//! whose cosine distance sits above the document's own `breakpoint_percentile`
//! quantile become candidate breaks:
//!
//! ```text
//! Sentences:  S0    S1    S2    S3    S4    S5
//! Distances:     0.05  0.08  0.61  0.07  0.04
//!                            ^ topic shift
//! ```
//!
//! A candidate break closes the chunk only once it has reached
//! `min_chunk_length`; reaching `max_chunk_length` always closes it.
//!
//! [`AutoChunker`] picks between the two by looking for a blank line.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use chunkwise::{AutoChunker, Chunker, ChunkerConfig, HashedBagOfWords};
//!
//! let config = ChunkerConfig::default().with_lengths(10, 200);
//! let chunker = AutoChunker::from_model(Arc::new(HashedBagOfWords::default()), config).unwrap();
//!
//! let slabs = chunker
//!     .chunk("The shell is windproof.\n\nSizes run from S to XXL.")
//!     .unwrap();
//! assert_eq!(slabs.len(), 2);
//! assert_eq!(slabs[0].index, 0);
//! ```
//!
//! With the `fastembed` feature, swap [`HashedBagOfWords`] for
//! `FastEmbedModel::new("all-MiniLM-L6-v2")`. Load it once and share the
//! `Arc` between chunkers.
//!
//! ## Preprocessing
//!
//! Chunkers first run their [`Preprocessor`]: truncation at
//! `max_input_chars`, normalization, stop-word removal and optional
//! coreference resolution. Each step degrades to the text it was given
//! instead of failing. Only embedding errors abort a chunking call.
//!
//! ## Features
//!
//! | Feature | Adds | Crates |
//! |---------|------|--------|
//! | `fastembed` | `FastEmbedModel` | fastembed |
//! | `http` | `coref::HttpResolver` | reqwest |

mod bounds;
pub mod breakpoint;
mod config;
pub mod coref;
mod embedding;
mod error;
pub mod normalize;
pub mod paragraph;
mod preprocess;
pub mod profile;
mod select;
mod semantic;
mod sentence;
mod slab;
pub mod verify;

#[cfg(feature = "fastembed")]
mod fastembed_backend;

pub use bounds::ChunkBounds;
pub use config::{ChunkerConfig, DEFAULT_MAX_INPUT_CHARS, DEFAULT_MODEL_NAME};
pub use coref::{CorefError, CoreferenceResolver, NoopResolver};
pub use embedding::{EmbeddingModel, HashedBagOfWords};
pub use error::{Error, Result};
pub use normalize::{BasicNormalizer, Outcome, Passthrough, TextNormalizer};
pub use paragraph::ParagraphChunker;
pub use preprocess::Preprocessor;
pub use profile::{DistanceProfiler, Sentence};
pub use select::{AutoChunker, Strategy};
pub use semantic::SemanticChunker;
pub use sentence::SentenceSplitter;
pub use slab::Slab;

#[cfg(feature = "fastembed")]
pub use fastembed_backend::FastEmbedModel;

/// A text chunking strategy.
///
/// All chunkers implement this trait, so callers can hold any of them:
///
/// ```rust
/// use std::sync::Arc;
/// use chunkwise::{Chunker, ChunkerConfig, HashedBagOfWords, ParagraphChunker, SemanticChunker};
///
/// fn count(chunker: &dyn Chunker, text: &str) -> usize {
///     chunker.chunk_text(text).map(|c| c.len()).unwrap_or(0)
/// }
///
/// let model = Arc::new(HashedBagOfWords::default());
/// let semantic = SemanticChunker::new(model.clone(), ChunkerConfig::default()).unwrap();
/// let paragraph =
///     ParagraphChunker::new(SemanticChunker::new(model, ChunkerConfig::default()).unwrap());
///
/// assert_eq!(count(&semantic, "Light. Warm."), 1);
/// assert_eq!(count(&paragraph, "Light. Warm."), 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks, in document order.
    ///
    /// Empty or whitespace-only input yields no chunks.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding model fails.
    fn chunk_text(&self, text: &str) -> Result<Vec<String>>;

    /// Split text into chunks tagged with their position.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding model fails.
    fn chunk(&self, text: &str) -> Result<Vec<Slab>> {
        Ok(self
            .chunk_text(text)?
            .into_iter()
            .enumerate()
            .map(|(index, text)| Slab::new(text, index))
            .collect())
    }
}
