//! Pre-chunking text preparation.
//!
//! ```text
//! raw text
//!   -> truncate to max_input_chars
//!   -> normalize                         (Unchanged => keep input)
//!   -> lemmatize_and_strip_stopwords     (Unchanged => keep normalized)
//!   -> coreference resolve               (Err => keep cleaned, log warning)
//!   -> text handed to the chunker
//! ```
//!
//! No step here can fail a chunking call.

use std::sync::Arc;

use crate::config::DEFAULT_MAX_INPUT_CHARS;
use crate::coref::{CoreferenceResolver, NoopResolver};
use crate::normalize::{BasicNormalizer, Passthrough, TextNormalizer};

/// Normalizer and coreference resolver applied before chunking.
#[derive(Clone)]
pub struct Preprocessor {
    normalizer: Arc<dyn TextNormalizer>,
    resolver: Arc<dyn CoreferenceResolver>,
    max_input_chars: usize,
}

impl Preprocessor {
    /// Combine a normalizer and a resolver.
    #[must_use]
    pub fn new(normalizer: Arc<dyn TextNormalizer>, resolver: Arc<dyn CoreferenceResolver>) -> Self {
        Self {
            normalizer,
            resolver,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    /// A preprocessor that only truncates oversized input.
    #[must_use]
    pub fn passthrough() -> Self {
        Self::new(Arc::new(Passthrough), Arc::new(NoopResolver))
    }

    /// Set the input size limit, in characters.
    #[must_use]
    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    /// Replace the coreference resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn CoreferenceResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Prepare `text` for chunking.
    #[must_use]
    pub fn prepare(&self, text: &str) -> String {
        let text = truncate_chars(text, self.max_input_chars);

        let normalized = self.normalizer.normalize(&text).apply(text);
        let cleaned = self
            .normalizer
            .lemmatize_and_strip_stopwords(&normalized)
            .apply(normalized);

        match self.resolver.resolve(&cleaned) {
            Ok(resolved) => resolved,
            Err(error) => {
                tracing::warn!(%error, "coreference resolution failed, continuing with unresolved text");
                cleaned
            }
        }
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(Arc::new(BasicNormalizer), Arc::new(NoopResolver))
    }
}

impl std::fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preprocessor")
            .field("max_input_chars", &self.max_input_chars)
            .finish_non_exhaustive()
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            tracing::warn!(max_chars, "input truncated before chunking");
            text[..byte_idx].to_string()
        }
        None => text.to_string(),
    }
}
