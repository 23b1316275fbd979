//! Chunker configuration.
//!
//! One [`ChunkerConfig`] is fixed for the lifetime of a chunker. It can be
//! built in code, or deserialized from TOML with every field optional:
//!
//! ```toml
//! model_name = "all-MiniLM-L6-v2"
//! breakpoint_percentile = 0.9
//! max_chunk_length = 3000
//! min_chunk_length = 600
//! buffer_size = 3
//! ```

use serde::Deserialize;

use crate::{ChunkBounds, Error, Result};

/// Default sentence-embedding model.
pub const DEFAULT_MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// Inputs longer than this many characters are truncated before chunking.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 1_000_000;

/// Configuration shared by the semantic and paragraph chunkers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkerConfig {
    /// Name of the sentence-embedding model.
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Quantile of the distance distribution used as the break threshold, in `[0, 1]`.
    #[serde(default = "default_breakpoint_percentile")]
    pub breakpoint_percentile: f32,
    /// Hard cap on accumulated chunk length, in characters.
    #[serde(default = "default_max_chunk_length")]
    pub max_chunk_length: usize,
    /// Sentence window radius used when building combined sentences.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    /// Minimum length before a candidate break may close a chunk, in characters.
    #[serde(default = "default_min_chunk_length")]
    pub min_chunk_length: usize,
    /// Safety valve on input size, in characters.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_breakpoint_percentile() -> f32 {
    0.9
}

fn default_max_chunk_length() -> usize {
    3000
}

fn default_buffer_size() -> usize {
    3
}

fn default_min_chunk_length() -> usize {
    600
}

fn default_max_input_chars() -> usize {
    DEFAULT_MAX_INPUT_CHARS
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            breakpoint_percentile: default_breakpoint_percentile(),
            max_chunk_length: default_max_chunk_length(),
            buffer_size: default_buffer_size(),
            min_chunk_length: default_min_chunk_length(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

impl ChunkerConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] for malformed TOML or unknown keys, and
    /// [`Error::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.breakpoint_percentile) {
            return Err(Error::InvalidConfig(format!(
                "breakpoint_percentile must be within [0, 1], got {}",
                self.breakpoint_percentile
            )));
        }
        if self.max_input_chars == 0 {
            return Err(Error::InvalidConfig(
                "max_input_chars must be > 0".to_string(),
            ));
        }
        self.bounds().map(|_| ())
    }

    /// The chunk length bounds described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the lengths are inconsistent.
    pub fn bounds(&self) -> Result<ChunkBounds> {
        ChunkBounds::new(self.min_chunk_length, self.max_chunk_length)
    }

    /// Set the break threshold quantile.
    #[must_use]
    pub fn with_breakpoint_percentile(mut self, percentile: f32) -> Self {
        self.breakpoint_percentile = percentile;
        self
    }

    /// Set the minimum and maximum chunk lengths.
    #[must_use]
    pub fn with_lengths(mut self, min: usize, max: usize) -> Self {
        self.min_chunk_length = min;
        self.max_chunk_length = max;
        self
    }

    /// Set the sentence window radius.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}
