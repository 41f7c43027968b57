use std::sync::Arc;

use crate::application::ports::{Embedder, EmbedderError, VectorStoreError};
use crate::infrastructure::embeddings::LocalCandleEmbedder;
use crate::infrastructure::persistence::PineconeAdapter;
use crate::infrastructure::storage::LocalArtifactStore;

use super::config::{CredentialError, PathSettings, PineconeSettings, Settings, load_credentials};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error("vector store: {0}")]
    VectorStore(#[from] VectorStoreError),
    #[error("embedder: {0}")]
    Embedder(#[from] EmbedderError),
}

/// Resolves credentials through `lookup` and only then builds the adapter, so
/// a missing key never reaches the network.
pub fn build_vector_store<F>(
    lookup: F,
    settings: &PineconeSettings,
) -> Result<Arc<PineconeAdapter>, BootstrapError>
where
    F: Fn(&str) -> Option<String>,
{
    let credentials = load_credentials(lookup)?;
    tracing::debug!(index = credentials.index_name(), "credentials loaded");
    let adapter = PineconeAdapter::new(&credentials, settings.options())?;
    Ok(Arc::new(adapter))
}

/// Reads the process environment; `main` has already loaded `.env` into it.
pub fn vector_store_from_env(
    settings: &PineconeSettings,
) -> Result<Arc<PineconeAdapter>, BootstrapError> {
    build_vector_store(|key| std::env::var(key).ok(), settings)
}

pub fn build_embedder(settings: &Settings) -> Result<Arc<dyn Embedder>, BootstrapError> {
    let embedder =
        LocalCandleEmbedder::new(&settings.embeddings.model, settings.embeddings.pooling)?;
    Ok(Arc::new(embedder))
}

pub fn build_artifact_store(paths: &PathSettings) -> LocalArtifactStore {
    LocalArtifactStore::new(paths.fragments_file.clone(), paths.embeddings_file.clone())
}
