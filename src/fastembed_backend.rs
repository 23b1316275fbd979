//! FastEmbed backend.
//!
//! Wraps fastembed's ONNX text encoders behind [`EmbeddingModel`]. The model
//! is loaded once in [`FastEmbedModel::new`]; share the result through an
//! `Arc` rather than constructing one per chunker.

use fastembed::{EmbeddingModel as FastEmbedKind, InitOptions, TextEmbedding};

use crate::{EmbeddingModel, Error, Result};

/// Sentence encoder backed by fastembed.
///
/// ## Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use chunkwise::{ChunkerConfig, FastEmbedModel, SemanticChunker};
///
/// let config = ChunkerConfig::default();
/// let model = Arc::new(FastEmbedModel::new(&config.model_name)?);
/// let chunker = SemanticChunker::new(model, config)?;
/// ```
pub struct FastEmbedModel {
    model: TextEmbedding,
    name: String,
}

impl FastEmbedModel {
    /// Load the named model, downloading it on first use.
    ///
    /// Accepts short names (`all-MiniLM-L6-v2`) and hub-style names
    /// (`sentence-transformers/all-MiniLM-L6-v2`, `BAAI/bge-small-en-v1.5`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownModel`] for unsupported names and
    /// [`Error::Embedding`] if the model fails to load.
    pub fn new(model_name: &str) -> Result<Self> {
        let kind = resolve_model(model_name)?;
        tracing::info!(model = model_name, "loading fastembed model");

        let options = InitOptions::new(kind).with_show_download_progress(false);
        let model = TextEmbedding::try_new(options).map_err(|e| Error::Embedding(e.to_string()))?;

        tracing::info!(model = model_name, "fastembed model loaded");
        Ok(Self {
            model,
            name: model_name.to_string(),
        })
    }
}

fn resolve_model(model_name: &str) -> Result<FastEmbedKind> {
    let short = model_name.rsplit('/').next().unwrap_or(model_name);
    match short.to_ascii_lowercase().as_str() {
        "all-minilm-l6-v2" => Ok(FastEmbedKind::AllMiniLML6V2),
        "all-minilm-l12-v2" => Ok(FastEmbedKind::AllMiniLML12V2),
        "bge-small-en-v1.5" => Ok(FastEmbedKind::BGESmallENV15),
        "bge-base-en-v1.5" => Ok(FastEmbedKind::BGEBaseENV15),
        _ => Err(Error::UnknownModel(model_name.to_string())),
    }
}

impl EmbeddingModel for FastEmbedModel {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        self.model
            .embed(refs, None)
            .map_err(|e| Error::Embedding(e.to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for FastEmbedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedModel")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_names() {
        assert!(matches!(
            resolve_model("all-MiniLM-L6-v2"),
            Ok(FastEmbedKind::AllMiniLML6V2)
        ));
        assert!(matches!(
            resolve_model("sentence-transformers/all-MiniLM-L6-v2"),
            Ok(FastEmbedKind::AllMiniLML6V2)
        ));
        assert!(matches!(
            resolve_model("BAAI/bge-small-en-v1.5"),
            Ok(FastEmbedKind::BGESmallENV15)
        ));
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            resolve_model("word2vec"),
            Err(Error::UnknownModel(_))
        ));
    }

    #[test]
    #[ignore] // Requires fastembed model download
    fn test_encode_minilm() {
        let model = FastEmbedModel::new("all-MiniLM-L6-v2").unwrap();
        let vectors = model
            .encode(&["Hello, world!".to_string(), "Winter jacket.".to_string()])
            .unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].len(), 384);
    }
}
