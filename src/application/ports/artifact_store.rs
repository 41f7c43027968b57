use async_trait::async_trait;

use crate::domain::{EmbeddingsArtifact, Fragment};

/// Local persistence for the intermediate pipeline outputs.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn save_fragments(&self, fragments: &[Fragment]) -> Result<(), ArtifactStoreError>;
    async fn load_fragments(&self) -> Result<Vec<Fragment>, ArtifactStoreError>;
    async fn save_embeddings(&self, artifact: &EmbeddingsArtifact)
    -> Result<(), ArtifactStoreError>;
    async fn load_embeddings(&self) -> Result<EmbeddingsArtifact, ArtifactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid artifact format in {path}: {source}")]
    InvalidFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
