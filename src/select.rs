//! Strategy selection.
//!
//! | Input                          | Strategy    |
//! |--------------------------------|-------------|
//! | contains a blank line          | Paragraph   |
//! | anything else (including "")   | Semantic    |
//!
//! Selection is purely structural; the content is never inspected.

use std::sync::Arc;

use crate::paragraph::has_paragraph_break;
use crate::{Chunker, ChunkerConfig, EmbeddingModel, ParagraphChunker, Result, SemanticChunker};

/// Which chunker handles a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Split on blank lines, re-chunk out-of-bounds paragraphs semantically.
    Paragraph,
    /// Split on embedding-distance peaks.
    Semantic,
}

impl Strategy {
    /// Pick the strategy for `text`.
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        if has_paragraph_break(text) {
            Self::Paragraph
        } else {
            Self::Semantic
        }
    }

    /// Explain which strategy `text` would get, and why.
    #[must_use]
    pub fn describe(text: &str) -> &'static str {
        if text.is_empty() {
            "The input text is empty."
        } else if has_paragraph_break(text) {
            "The text contains paragraph separations. Using ParagraphChunker."
        } else if text.contains(['.', '!', '?']) {
            "The text contains sentences but no paragraph separations. Using SemanticChunker."
        } else {
            "The text doesn't appear to have clear sentence or paragraph structure. \
             Using SemanticChunker as default."
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paragraph => f.write_str("paragraph"),
            Self::Semantic => f.write_str("semantic"),
        }
    }
}

/// Chunker that picks a strategy per input.
///
/// Both strategies share one embedding model and one configuration.
///
/// ```rust
/// use std::sync::Arc;
/// use chunkwise::{AutoChunker, ChunkerConfig, HashedBagOfWords, Strategy};
///
/// let chunker =
///     AutoChunker::from_model(Arc::new(HashedBagOfWords::default()), ChunkerConfig::default())
///         .unwrap();
/// assert_eq!(chunker.strategy("One.\n\nTwo."), Strategy::Paragraph);
/// assert_eq!(chunker.strategy("One. Two."), Strategy::Semantic);
/// ```
#[derive(Debug)]
pub struct AutoChunker {
    paragraph: ParagraphChunker,
}

impl AutoChunker {
    /// Wrap a semantic chunker; the paragraph strategy delegates to it.
    #[must_use]
    pub fn new(semantic: SemanticChunker) -> Self {
        Self {
            paragraph: ParagraphChunker::new(semantic),
        }
    }

    /// Build both strategies around a shared model.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] if the configuration is invalid.
    pub fn from_model(model: Arc<dyn EmbeddingModel>, config: ChunkerConfig) -> Result<Self> {
        Ok(Self::new(SemanticChunker::new(model, config)?))
    }

    /// The strategy that would handle `text`.
    #[must_use]
    pub fn strategy(&self, text: &str) -> Strategy {
        Strategy::for_text(text)
    }

    /// The chunker that would handle `text`.
    #[must_use]
    pub fn select(&self, text: &str) -> &dyn Chunker {
        match self.strategy(text) {
            Strategy::Paragraph => &self.paragraph,
            Strategy::Semantic => self.paragraph.semantic(),
        }
    }

    /// The paragraph strategy.
    #[must_use]
    pub fn paragraph(&self) -> &ParagraphChunker {
        &self.paragraph
    }

    /// The semantic strategy.
    #[must_use]
    pub fn semantic(&self) -> &SemanticChunker {
        self.paragraph.semantic()
    }
}

impl Chunker for AutoChunker {
    fn chunk_text(&self, text: &str) -> Result<Vec<String>> {
        let strategy = self.strategy(text);
        tracing::debug!(%strategy, "selected chunking strategy");
        self.select(text).chunk_text(text)
    }
}
