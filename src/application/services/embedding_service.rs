use std::sync::Arc;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::{EmbeddingsArtifact, Fragment};

pub struct EmbeddingService {
    embedder: Arc<dyn Embedder>,
    batch_size: usize,
}

impl EmbeddingService {
    pub fn new(embedder: Arc<dyn Embedder>, batch_size: usize) -> Self {
        Self {
            embedder,
            batch_size: batch_size.max(1),
        }
    }

    /// Embeds every fragment that carries text, preserving input order.
    pub async fn embed_fragments(
        &self,
        fragments: Vec<Fragment>,
    ) -> Result<EmbeddingsArtifact, EmbeddingError> {
        let total = fragments.len();
        let valid: Vec<Fragment> = fragments
            .into_iter()
            .filter(|fragment| {
                if fragment.has_text() {
                    true
                } else {
                    tracing::warn!(fragment_id = %fragment.id, "fragment has no text, skipping");
                    false
                }
            })
            .collect();

        if valid.is_empty() {
            return Err(EmbeddingError::NoValidFragments);
        }

        tracing::info!(
            total,
            valid = valid.len(),
            model = self.embedder.model_name(),
            "embedding fragments"
        );

        let mut embeddings = Vec::with_capacity(valid.len());
        let batch_count = valid.len().div_ceil(self.batch_size);

        for (batch_index, batch) in valid.chunks(self.batch_size).enumerate() {
            let texts: Vec<&str> = batch.iter().map(|f| f.text.as_str()).collect();
            let mut batch_embeddings = self
                .embedder
                .embed_batch(&texts)
                .await
                .map_err(EmbeddingError::Embedding)?;

            if batch_embeddings.len() != batch.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: batch.len(),
                    actual: batch_embeddings.len(),
                });
            }

            tracing::debug!(batch = batch_index + 1, of = batch_count, "batch embedded");
            embeddings.append(&mut batch_embeddings);
        }

        let artifact =
            EmbeddingsArtifact::new(self.embedder.model_name().to_string(), valid, embeddings);

        for (source, stats) in &artifact.source_stats {
            tracing::info!(
                source = %source,
                fragments = stats.fragments,
                words = stats.words,
                "source embedded"
            );
        }

        Ok(artifact)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("no fragments with text to embed")]
    NoValidFragments,
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("embedder returned {actual} vectors for {expected} texts")]
    CountMismatch { expected: usize, actual: usize },
}
