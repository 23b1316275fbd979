//! Error types for chunkwise.

/// Errors that can occur during chunking.
///
/// Upstream degradation (normalization, coreference) never surfaces here:
/// those steps fall back to the best text available. What remains is fatal
/// to a single `chunk_text` call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The embedding model failed to encode a batch.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The embedding model returned a different number of vectors than texts.
    #[error("embedding model returned {actual} vectors for {expected} texts")]
    EmbeddingCount {
        /// Number of texts submitted.
        expected: usize,
        /// Number of vectors returned.
        actual: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configured embedding model name is not recognized by the backend.
    #[error("unknown embedding model: {0}")]
    UnknownModel(String),
}

/// Result type for chunkwise operations.
pub type Result<T> = std::result::Result<T, Error>;
