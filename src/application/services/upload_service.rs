use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::ports::{VectorStore, VectorStoreError};
use crate::domain::{Embedding, EmbeddingsArtifact, Fragment};

use super::connect_index;

pub struct UploadService<V>
where
    V: VectorStore,
{
    vector_store: Arc<V>,
    batch_size: usize,
    expected_dimension: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub uploaded: usize,
    pub skipped: usize,
    pub batches: usize,
    pub per_source: BTreeMap<String, usize>,
}

impl<V> UploadService<V>
where
    V: VectorStore,
{
    pub fn new(vector_store: Arc<V>, batch_size: usize, expected_dimension: usize) -> Self {
        Self {
            vector_store,
            batch_size: batch_size.max(1),
            expected_dimension,
        }
    }

    pub async fn upload(&self, artifact: EmbeddingsArtifact) -> Result<UploadReport, UploadError> {
        if !artifact.is_aligned() {
            return Err(UploadError::MisalignedArtifact {
                fragments: artifact.fragments.len(),
                embeddings: artifact.embeddings.len(),
            });
        }

        if artifact.dimension != self.expected_dimension {
            tracing::warn!(
                artifact_dimension = artifact.dimension,
                expected_dimension = self.expected_dimension,
                "artifact dimension differs from configured dimension; consider regenerating embeddings"
            );
        }

        let stats = connect_index(self.vector_store.as_ref())
            .await
            .map_err(UploadError::Connection)?;

        if let Some(index_dimension) = stats.dimension
            && index_dimension != artifact.dimension
        {
            return Err(UploadError::DimensionMismatch {
                index: index_dimension,
                artifact: artifact.dimension,
            });
        }

        let total = artifact.len();
        let (fragments, embeddings): (Vec<Fragment>, Vec<Embedding>) = artifact
            .fragments
            .into_iter()
            .zip(artifact.embeddings)
            .filter(|(fragment, _)| {
                if fragment.has_text() {
                    true
                } else {
                    tracing::warn!(fragment_id = %fragment.id, "fragment has no text, skipping");
                    false
                }
            })
            .unzip();

        if fragments.is_empty() {
            return Err(UploadError::NothingToUpload);
        }

        let mut per_source: BTreeMap<String, usize> = BTreeMap::new();
        for fragment in &fragments {
            *per_source.entry(fragment.source.clone()).or_default() += 1;
        }
        for (source, count) in &per_source {
            tracing::info!(source = %source, fragments = count, "upload distribution");
        }

        let total_batches = fragments.len().div_ceil(self.batch_size);
        let mut uploaded = 0;

        for (batch_index, (fragment_batch, embedding_batch)) in fragments
            .chunks(self.batch_size)
            .zip(embeddings.chunks(self.batch_size))
            .enumerate()
        {
            let batch = batch_index + 1;
            tracing::info!(batch, total_batches, items = fragment_batch.len(), "uploading batch");

            let upserted = self
                .vector_store
                .upsert(fragment_batch, embedding_batch)
                .await
                .map_err(|source| UploadError::BatchFailed { batch, source })?;
            uploaded += upserted;
        }

        tracing::info!(uploaded, batches = total_batches, "upload complete");

        Ok(UploadReport {
            uploaded,
            skipped: total - fragments.len(),
            batches: total_batches,
            per_source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("artifact has {fragments} fragments but {embeddings} embeddings")]
    MisalignedArtifact { fragments: usize, embeddings: usize },
    #[error("connection: {0}")]
    Connection(VectorStoreError),
    #[error("index dimension {index} does not match artifact dimension {artifact}")]
    DimensionMismatch { index: usize, artifact: usize },
    #[error("no fragments with text to upload")]
    NothingToUpload,
    #[error("batch {batch} failed: {source}")]
    BatchFailed {
        batch: usize,
        #[source]
        source: VectorStoreError,
    },
}
